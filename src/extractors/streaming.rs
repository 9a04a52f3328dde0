use super::text::looks_like_image_url;
use crate::model::{RecipeSummary, DEFAULT_CATEGORY};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};
use log::debug;
use std::mem;

/// Image attributes in order of preference.
const IMAGE_ATTRIBUTES: [&str; 3] = ["data-src", "src", "data-lazy-src"];

const TITLE_CLASS_MARKERS: [&str; 2] = ["title", "entry-title"];

/// Fields collected for the card currently being read.
#[derive(Debug, Default)]
struct Draft {
    name: Option<String>,
    image: Option<String>,
    url: Option<String>,
}

impl Draft {
    fn finish(self) -> Option<RecipeSummary> {
        let recipe = RecipeSummary {
            name: self.name.unwrap_or_default(),
            category: DEFAULT_CATEGORY.to_string(),
            image: self.image.unwrap_or_default(),
            url: self.url,
            ingredients: Vec::new(),
        };
        recipe.has_required_fields().then_some(recipe)
    }
}

/// Where the tokenizer is relative to a recipe card.
///
/// Title capture can only happen inside a card, and the draft only exists
/// while a card is open.
#[derive(Debug, Default)]
enum ParserState {
    #[default]
    Idle,
    InContainer(Draft),
    CapturingTitle(Draft),
}

impl ParserState {
    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            ParserState::Idle => None,
            ParserState::InContainer(draft) | ParserState::CapturingTitle(draft) => Some(draft),
        }
    }
}

/// Card state machine driven by start tag, text and end tag events.
struct CardMachine {
    state: ParserState,
    site_domain: String,
    recipes: Vec<RecipeSummary>,
}

impl CardMachine {
    fn new(site_domain: &str) -> Self {
        Self {
            state: ParserState::Idle,
            site_domain: site_domain.to_string(),
            recipes: Vec::new(),
        }
    }

    fn start_tag(&mut self, tag: &Tag) {
        let name: &str = &tag.name;

        if name == "article" && class_contains(tag, &["post"]) {
            // A new card discards whatever the previous one collected.
            self.state = ParserState::InContainer(Draft::default());
            return;
        }

        let site_domain = self.site_domain.as_str();
        match name {
            "img" => {
                if let (Some(draft), Some(image)) = (self.state.draft_mut(), resolve_image(tag)) {
                    draft.image = Some(image);
                }
            }
            "a" => {
                let href = attr(tag, "href")
                    .filter(|href| is_recipe_link(href, site_domain))
                    .map(str::to_string);
                if let (Some(draft), Some(href)) = (self.state.draft_mut(), href) {
                    draft.url = Some(href);
                }
            }
            "h2" | "h3" if class_contains(tag, &TITLE_CLASS_MARKERS) => {
                self.state = match mem::take(&mut self.state) {
                    ParserState::InContainer(draft) | ParserState::CapturingTitle(draft) => {
                        ParserState::CapturingTitle(draft)
                    }
                    ParserState::Idle => ParserState::Idle,
                };
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.state = match mem::take(&mut self.state) {
            ParserState::CapturingTitle(mut draft) => {
                draft.name = Some(text.to_string());
                ParserState::InContainer(draft)
            }
            other => other,
        };
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "h2" | "h3" => {
                self.state = match mem::take(&mut self.state) {
                    ParserState::CapturingTitle(draft) => ParserState::InContainer(draft),
                    other => other,
                };
            }
            "article" => {
                if let ParserState::InContainer(draft) | ParserState::CapturingTitle(draft) =
                    mem::take(&mut self.state)
                {
                    match draft.finish() {
                        Some(recipe) => self.recipes.push(recipe),
                        None => debug!("Dropping recipe card without a name or image"),
                    }
                }
            }
            _ => {}
        }
    }
}

/// Adapts tokenizer output to [`CardMachine`] events.
///
/// Character tokens are buffered so one run of text between two tags
/// arrives as a single text event.
struct CardSink {
    machine: CardMachine,
    pending_text: String,
}

impl CardSink {
    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let text = mem::take(&mut self.pending_text);
            self.machine.text(&text);
        }
    }
}

impl TokenSink for CardSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => self.pending_text.push_str(&text),
            Token::TagToken(tag) => {
                self.flush_text();
                match tag.kind {
                    TagKind::StartTag => {
                        self.machine.start_tag(&tag);
                        if let Some(kind) = raw_text_kind(&tag.name) {
                            if !tag.self_closing {
                                return TokenSinkResult::RawData(kind);
                            }
                        }
                    }
                    TagKind::EndTag => self.machine.end_tag(&tag.name),
                }
            }
            Token::EOFToken => self.flush_text(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizer-driven card extraction, used when the pattern strategy finds
/// nothing.
///
/// Looser than the primary: any `<article>` whose class mentions "post" is
/// a card. Unbalanced markup never errors; a card whose `</article>` never
/// arrives is dropped. Cards carry the default category.
pub fn extract_fallback(markup: &str, site_domain: &str) -> Vec<RecipeSummary> {
    let sink = CardSink {
        machine: CardMachine::new(site_domain),
        pending_text: String::new(),
    };
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(markup));
    // The sink never hands back a script, so a single feed drains the input.
    if let TokenizerResult::Script(()) = tokenizer.feed(&mut input) {
        debug!("Tokenizer paused on a script element");
    }
    tokenizer.end();

    let mut sink = tokenizer.sink;
    sink.flush_text();
    sink.machine.recipes
}

fn attr<'t>(tag: &'t Tag, name: &str) -> Option<&'t str> {
    tag.attrs
        .iter()
        .find(|attribute| &*attribute.name.local == name)
        .map(|attribute| &*attribute.value)
}

fn class_contains(tag: &Tag, markers: &[&str]) -> bool {
    attr(tag, "class")
        .map(|class| {
            let class = class.to_lowercase();
            markers.iter().any(|marker| class.contains(marker))
        })
        .unwrap_or(false)
}

/// First present image attribute that is a real, absolute image.
fn resolve_image(tag: &Tag) -> Option<String> {
    IMAGE_ATTRIBUTES
        .iter()
        .filter_map(|name| attr(tag, name))
        .find(|url| looks_like_image_url(url))
        .map(str::to_string)
}

fn is_recipe_link(href: &str, site_domain: &str) -> bool {
    href.contains("/recipes/") || (!site_domain.is_empty() && href.contains(site_domain))
}

/// Elements whose bodies are not markup.
fn raw_text_kind(name: &str) -> Option<RawKind> {
    match name {
        "script" => Some(RawKind::ScriptData),
        "style" => Some(RawKind::Rawtext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "example.com";

    #[test]
    fn test_single_card() {
        let markup = r#"
            <article class="Post entry">
                <a href="https://example.com/recipes/chili/"><img src="https://example.com/chili.jpg"></a>
                <h2 class="entry-title"><a href="https://example.com/recipes/chili/">Vegan Chili</a></h2>
            </article>"#;

        let recipes = extract_fallback(markup, DOMAIN);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Vegan Chili");
        assert_eq!(recipes[0].image, "https://example.com/chili.jpg");
        assert_eq!(
            recipes[0].url.as_deref(),
            Some("https://example.com/recipes/chili/")
        );
        assert_eq!(recipes[0].category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_image_attribute_preference_skips_placeholders() {
        let markup = r#"
            <article class="post">
                <img src="https://example.com/placeholder.png"
                     data-src="https://example.com/lazy-placeholder.gif"
                     data-lazy-src="https://example.com/real.jpg">
                <h3 class="title">Tempeh</h3>
            </article>"#;

        let recipes = extract_fallback(markup, DOMAIN);
        assert_eq!(recipes[0].image, "https://example.com/real.jpg");
    }

    #[test]
    fn test_data_src_wins_over_src() {
        let markup = r#"
            <article class="post">
                <img src="https://example.com/src.jpg" data-src="https://example.com/data-src.jpg">
                <h3 class="title">Seitan</h3>
            </article>"#;

        let recipes = extract_fallback(markup, DOMAIN);
        assert_eq!(recipes[0].image, "https://example.com/data-src.jpg");
    }

    #[test]
    fn test_unclosed_card_is_dropped() {
        let markup = r#"
            <article class="post">
                <img src="https://example.com/a.jpg">
                <h2 class="entry-title">Never Closed</h2>"#;

        assert!(extract_fallback(markup, DOMAIN).is_empty());
    }

    #[test]
    fn test_title_outside_card_is_ignored() {
        let markup = r#"
            <h2 class="entry-title">Site Heading</h2>
            <article class="post">
                <img src="https://example.com/a.jpg">
            </article>"#;

        assert!(extract_fallback(markup, DOMAIN).is_empty());
    }

    #[test]
    fn test_heading_without_title_class_is_not_captured() {
        let markup = r#"
            <article class="post">
                <h3 class="meta">Sponsored</h3>
                <img src="https://example.com/a.jpg">
            </article>"#;

        assert!(extract_fallback(markup, DOMAIN).is_empty());
    }

    #[test]
    fn test_nested_post_article_resets_draft() {
        let markup = r#"
            <article class="post">
                <h2 class="entry-title">Outer</h2>
                <article class="post related">
                    <img src="https://example.com/inner.jpg">
                </article>
            </article>"#;

        // The inner card lost the outer title, and the outer close finds no card.
        assert!(extract_fallback(markup, DOMAIN).is_empty());
    }

    #[test]
    fn test_links_outside_site_are_ignored() {
        let markup = r#"
            <article class="post">
                <a href="https://other.org/about/">About</a>
                <img src="https://example.com/a.jpg">
                <h2 class="entry-title">Ratatouille</h2>
            </article>"#;

        let recipes = extract_fallback(markup, DOMAIN);
        assert_eq!(recipes[0].url, None);
    }

    #[test]
    fn test_script_bodies_are_not_markup() {
        let markup = r#"
            <article class="post">
                <script>if (a < b) { document.write("</h2><article class='post'>"); }</script>
                <img src="https://example.com/a.jpg">
                <h2 class="entry-title">Polenta</h2>
            </article>"#;

        let recipes = extract_fallback(markup, DOMAIN);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Polenta");
    }

    #[test]
    fn test_title_capture_stops_at_first_text_run() {
        let markup = r#"
            <article class="post">
                <img src="https://example.com/a.jpg">
                <h2 class="title"><a href="/recipes/chili/"><span>Easy</span> Vegan Chili</a></h2>
            </article>"#;

        let recipes = extract_fallback(markup, DOMAIN);
        assert_eq!(recipes[0].name, "Easy");
    }

    #[test]
    fn test_entities_in_titles_are_decoded() {
        let markup = r#"
            <article class="post">
                <img src="https://example.com/a.jpg">
                <h2 class="entry-title">Mom&#8217;s Beans &amp; Rice</h2>
            </article>"#;

        let recipes = extract_fallback(markup, DOMAIN);
        assert_eq!(recipes[0].name, "Mom\u{2019}s Beans & Rice");
    }
}

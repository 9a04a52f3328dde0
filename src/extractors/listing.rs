use super::text::{decode_category_entities, decode_title_entities, looks_like_image_url, strip_tags};
use crate::model::{RecipeSummary, DEFAULT_CATEGORY};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// A recipe card: `<article class="... post-summary ...">` up to the first
/// `</article>`. Nested articles end the span early.
static ARTICLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<article[^>]*class="[^"]*post-summary[^"]*"[^>]*>(.*?)</article>"#)
        .expect("Invalid article regex")
});

static CATEGORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<p[^>]*class="[^"]*entry-category[^"]*"[^>]*>(.*?)</p>"#)
        .expect("Invalid category regex")
});

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<h3[^>]*class="[^"]*post-summary__title[^"]*"[^>]*>.*?<a[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#,
    )
    .expect("Invalid title regex")
});

static LAZY_SRCSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-lazy-srcset="([^"]+)""#).expect("Invalid srcset regex")
});

static SQUARE_IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https://[^\s]+600x600\.jpg)").expect("Invalid square image regex")
});

static LAZY_SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-lazy-src="([^"]+)""#).expect("Invalid lazy src regex"));

/// Title link of a card.
#[derive(Debug, PartialEq, Eq)]
struct CardTitle {
    href: String,
    name: String,
}

/// Pattern-based card extraction.
///
/// Returns cards in document order. A card without a resolvable name and
/// image is skipped. `capture_urls` controls whether the title link is
/// kept as the card's detail page.
pub fn extract_primary(markup: &str, capture_urls: bool) -> Vec<RecipeSummary> {
    let mut recipes = Vec::new();

    for captures in ARTICLE_REGEX.captures_iter(markup) {
        let Some(article) = captures.get(1) else {
            continue;
        };
        let article = article.as_str();

        let category = find_category(article).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let title = find_title(article);
        let image = find_image(article);

        let (Some(title), Some(image)) = (title, image) else {
            debug!("Skipping recipe card without a name or image");
            continue;
        };

        let recipe = RecipeSummary {
            name: title.name,
            category,
            image,
            url: capture_urls.then_some(title.href),
            ingredients: Vec::new(),
        };
        if recipe.has_required_fields() {
            recipes.push(recipe);
        } else {
            debug!("Skipping recipe card with an empty title");
        }
    }

    recipes
}

/// Text of the `entry-category` paragraph, tags stripped.
///
/// Expects a single card span.
fn find_category(article: &str) -> Option<String> {
    let captures = CATEGORY_REGEX.captures(article)?;
    let label = strip_tags(&captures[1], "");
    Some(decode_category_entities(label.trim()))
}

/// The first link inside the `post-summary__title` heading.
///
/// Expects a single card span; the link must carry a double-quoted `href`.
fn find_title(article: &str) -> Option<CardTitle> {
    let captures = TITLE_REGEX.captures(article)?;
    let name = strip_tags(&captures[2], "");
    Some(CardTitle {
        href: captures[1].to_string(),
        name: decode_title_entities(name.trim()),
    })
}

/// Card image: the 600x600 candidate of `data-lazy-srcset` when present,
/// otherwise an absolute `data-lazy-src`.
fn find_image(article: &str) -> Option<String> {
    square_image_from_srcset(article).or_else(|| lazy_src(article))
}

fn square_image_from_srcset(article: &str) -> Option<String> {
    let srcset = LAZY_SRCSET_REGEX.captures(article)?;
    let image = SQUARE_IMAGE_REGEX.captures(&srcset[1])?;
    Some(image[1].to_string()).filter(|url| looks_like_image_url(url))
}

fn lazy_src(article: &str) -> Option<String> {
    let captures = LAZY_SRC_REGEX.captures(article)?;
    Some(captures[1].to_string()).filter(|url| looks_like_image_url(url))
}

//! Small text cleaning helpers shared by the extractors.

use regex::Regex;
use std::sync::LazyLock;

/// Regex to strip HTML tags from raw markup fragments.
static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex"));

/// Replace every tag in `fragment` with `replacement`.
///
/// Not a parser: a `>` inside an attribute value ends the tag early.
pub fn strip_tags(fragment: &str, replacement: &str) -> String {
    HTML_TAG_REGEX.replace_all(fragment, replacement).into_owned()
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Category labels only ever carry escaped ampersands.
pub fn decode_category_entities(text: &str) -> String {
    text.replace("&amp;", "&")
}

/// Titles carry escaped ampersands and curly apostrophes.
pub fn decode_title_entities(text: &str) -> String {
    text.replace("&amp;", "&").replace("&#8217;", "'")
}

/// Drop the checkbox glyph the recipe plugin prefixes ingredients with and
/// turn encoded spaces into real ones.
pub fn remove_ingredient_entities(text: &str) -> String {
    text.replace("&#x25a2;", "").replace("&#32;", " ")
}

/// True for absolute http(s) URLs that are not lazy-loading placeholders.
pub fn looks_like_image_url(url: &str) -> bool {
    url.starts_with("http") && !url.to_lowercase().contains("placeholder")
}

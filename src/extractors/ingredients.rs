use super::text::{collapse_whitespace, remove_ingredient_entities, strip_tags};
use crate::model::MAX_INGREDIENTS;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// WP Recipe Maker ingredient rows.
static WPRM_INGREDIENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<li[^>]*class="[^"]*wprm-recipe-ingredient[^"]*"[^>]*>(.*?)</li>"#)
        .expect("Invalid WPRM ingredient regex")
});

/// Any list item whose class mentions "ingredient".
static GENERIC_INGREDIENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<li[^>]*class="[^"]*ingredient[^"]*"[^>]*>(.*?)</li>"#)
        .expect("Invalid ingredient regex")
});

/// Ingredient lines from a recipe detail page, in document order.
///
/// Tries the recipe plugin's markup first and the generic class second.
/// At most [`MAX_INGREDIENTS`] lines are returned.
pub fn extract_ingredients(detail_markup: &str) -> Vec<String> {
    let mut ingredients = list_items(&WPRM_INGREDIENT_REGEX, detail_markup);
    if ingredients.is_empty() {
        debug!("No plugin ingredient rows, trying generic ingredient list items");
        ingredients = list_items(&GENERIC_INGREDIENT_REGEX, detail_markup);
    }

    ingredients.truncate(MAX_INGREDIENTS);
    ingredients
}

/// Cleaned, non-empty bodies of every `<li>` matched by `pattern`.
fn list_items(pattern: &Regex, markup: &str) -> Vec<String> {
    pattern
        .captures_iter(markup)
        .map(|captures| clean_ingredient(&captures[1]))
        .filter(|ingredient| !ingredient.is_empty())
        .collect()
}

fn clean_ingredient(fragment: &str) -> String {
    let text = collapse_whitespace(&strip_tags(fragment, " "));
    collapse_whitespace(&remove_ingredient_entities(&text))
}

//! Recipe extraction from raw listing and detail page markup.
//!
//! Two strategies recover recipe cards from a listing page. The pattern
//! based [`extract_primary`] runs first; the tokenizer driven
//! [`extract_fallback`] only runs when the primary finds nothing. Both
//! are pure functions over the input string.

use crate::config::{DEFAULT_LISTING_URL, DEFAULT_SITE_DOMAIN};
use crate::model::RecipeSummary;
use log::{debug, info, warn};
use reqwest::Url;

mod ingredients;
mod listing;
mod streaming;
pub mod text;

pub use ingredients::extract_ingredients;
pub use listing::extract_primary;
pub use streaming::extract_fallback;

/// Knobs for listing page extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Whether card links are kept as `url` (and so followed for ingredients)
    pub capture_urls: bool,
    /// Links containing this domain are treated as recipe links by the fallback
    pub site_domain: String,
    /// Page the markup came from; relative card links are resolved against it
    pub base_url: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            capture_urls: true,
            site_domain: DEFAULT_SITE_DOMAIN.to_string(),
            base_url: DEFAULT_LISTING_URL.to_string(),
        }
    }
}

/// Extract recipe cards from a listing page.
///
/// Never fails; an empty result means neither strategy found a card with
/// both a name and an image. The fallback never supplements a partial
/// primary result. Card links come back absolute, or not at all when
/// `capture_urls` is off.
pub fn extract_summaries(markup: &str, options: &ExtractOptions) -> Vec<RecipeSummary> {
    let mut recipes = extract_primary(markup, options.capture_urls);
    if recipes.is_empty() {
        info!("No recipes found. Trying alternative parser...");
        recipes = extract_fallback(markup, &options.site_domain);
        debug!("Fallback extractor found {} recipes", recipes.len());
    } else {
        debug!("Primary extractor found {} recipes", recipes.len());
    }

    finish_links(&mut recipes, options);
    recipes
}

/// Apply the url policy to cards from either strategy.
fn finish_links(recipes: &mut [RecipeSummary], options: &ExtractOptions) {
    let base = Url::parse(&options.base_url)
        .inspect_err(|e| warn!("Invalid base URL {}: {}", options.base_url, e))
        .ok();

    for recipe in recipes.iter_mut() {
        recipe.url = match recipe.url.take() {
            Some(href) if options.capture_urls => resolve_link(base.as_ref(), &href),
            _ => None,
        };
    }
}

/// Absolute form of `href`, or `None` when it cannot be made absolute.
fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    match resolved {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            debug!("Dropping unresolvable recipe link {}: {}", href, e);
            None
        }
    }
}

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extractors::{extract_ingredients, extract_summaries};
use crate::fetchers::MarkupFetcher;
use crate::model::RecipeSummary;
use log::{error, info, warn};

/// How many cards the console summary lists.
const SUMMARY_PREVIEW: usize = 5;

/// Listing page → recipe cards → ingredients, one fetch at a time.
pub struct Pipeline {
    fetcher: Box<dyn MarkupFetcher>,
    config: ScraperConfig,
}

impl Pipeline {
    pub fn new(fetcher: Box<dyn MarkupFetcher>, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    /// Run the whole scrape.
    ///
    /// Only a failed listing fetch is returned as an error. Detail page
    /// failures leave that recipe with no ingredients.
    ///
    /// # Returns
    /// * `Ok(Vec<RecipeSummary>)` - Cards in listing order, possibly empty
    /// * `Err(ScrapeError)` - If the listing page could not be fetched
    pub async fn run(&self) -> Result<Vec<RecipeSummary>, ScrapeError> {
        info!("Downloading recipes page...");
        let markup = self
            .fetcher
            .fetch(&self.config.listing_url)
            .await
            .inspect_err(|e| error!("Error downloading page: {}", e))?;

        info!("Parsing recipes...");
        let mut recipes = extract_summaries(&markup, &self.config.extract_options());

        let total = recipes.len();
        info!("Found {} recipes. Fetching ingredients...", total);

        for (i, recipe) in recipes.iter_mut().enumerate() {
            info!(
                "[{}/{}] Fetching ingredients for: {}...",
                i + 1,
                total,
                truncate_chars(&recipe.name, 50)
            );

            recipe.ingredients = match recipe.url.as_deref() {
                Some(url) => {
                    let ingredients = fetch_ingredients(self.fetcher.as_ref(), url).await;
                    if ingredients.is_empty() {
                        info!("   ✗ No ingredients found");
                    } else {
                        info!("   ✓ Found {} ingredients", ingredients.len());
                    }
                    ingredients
                }
                None => Vec::new(),
            };
        }

        Ok(recipes)
    }
}

/// Fetch a detail page and extract its ingredients.
///
/// Never fails: a fetch error is logged and yields no ingredients.
pub async fn fetch_ingredients(fetcher: &dyn MarkupFetcher, url: &str) -> Vec<String> {
    match fetcher.fetch(url).await {
        Ok(markup) => extract_ingredients(&markup),
        Err(e) => {
            warn!("Error fetching ingredients from {}: {}", url, e);
            Vec::new()
        }
    }
}

/// Console summary of a finished run.
///
/// `detailed` adds ingredient counts and the first three ingredients.
pub fn summarize(recipes: &[RecipeSummary], detailed: bool) -> String {
    let mut out = format!(
        "{}\nSummary: {} recipes processed\n",
        "=".repeat(70),
        recipes.len()
    );

    for (i, recipe) in recipes.iter().take(SUMMARY_PREVIEW).enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, recipe.name));
        out.push_str(&format!("   Category: {}\n", recipe.category));
        if detailed {
            out.push_str(&format!(
                "   Ingredients: {} items\n",
                recipe.ingredients.len()
            ));
            if !recipe.ingredients.is_empty() {
                let first = recipe.ingredients.iter().take(3).cloned().collect::<Vec<_>>();
                out.push_str(&format!("   First 3: {}\n", first.join(", ")));
            }
        }
    }

    if recipes.len() > SUMMARY_PREVIEW {
        out.push_str(&format!(
            "\n... and {} more\n",
            recipes.len() - SUMMARY_PREVIEW
        ));
    }

    out
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

//! Scrape recipe cards and their ingredient lists from a recipe listing page.
//!
//! The extraction core lives in [`extractors`] and works on markup text
//! only. [`fetchers`] download that text, [`pipeline`] sequences the run and
//! [`output`] writes the results.

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod output;
pub mod pipeline;

pub use config::{load_config, FetcherKind, OutputConfig, ScraperConfig};
pub use error::ScrapeError;
pub use extractors::{
    extract_fallback, extract_ingredients, extract_primary, extract_summaries, ExtractOptions,
};
pub use fetchers::{fetcher_from_config, CurlFetcher, MarkupFetcher, RequestFetcher};
pub use model::RecipeSummary;
pub use pipeline::{fetch_ingredients, summarize, Pipeline};

/// Scrape the configured listing page with the configured downloader.
///
/// # Example
/// ```no_run
/// use recipe_scrape::{scrape_recipes, ScraperConfig};
///
/// # async fn run() -> Result<(), recipe_scrape::ScrapeError> {
/// let recipes = scrape_recipes(&ScraperConfig::default()).await?;
/// println!("{} recipes", recipes.len());
/// # Ok(())
/// # }
/// ```
pub async fn scrape_recipes(config: &ScraperConfig) -> Result<Vec<RecipeSummary>, ScrapeError> {
    let fetcher = fetcher_from_config(config)?;
    Pipeline::new(fetcher, config.clone()).run().await
}

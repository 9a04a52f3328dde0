//! Markup downloaders.
//!
//! The extractors never fetch anything themselves; the pipeline hands them
//! text obtained through a [`MarkupFetcher`].

use crate::config::{FetcherKind, ScraperConfig};
use crate::error::ScrapeError;
use async_trait::async_trait;

mod curl;
mod request;

pub use curl::CurlFetcher;
pub use request::RequestFetcher;

#[async_trait]
pub trait MarkupFetcher: Send + Sync {
    /// Full response body of `url`.
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;

    fn fetcher_name(&self) -> &str;
}

/// Build the downloader selected in the configuration.
pub fn fetcher_from_config(config: &ScraperConfig) -> Result<Box<dyn MarkupFetcher>, ScrapeError> {
    let timeout = config.timeout_duration();
    let fetcher: Box<dyn MarkupFetcher> = match config.fetcher {
        FetcherKind::Request => Box::new(RequestFetcher::new(Some(timeout))?),
        FetcherKind::Curl => Box::new(CurlFetcher::new(timeout)),
    };
    Ok(fetcher)
}

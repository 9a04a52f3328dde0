use thiserror::Error;

/// Errors that can occur while fetching markup or writing the scraped output.
///
/// Extraction itself never fails: a missing field is skipped or defaulted.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP client failure (connect, TLS, timeout, body decode)
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("Request to {url} failed with status: {status}")]
    HttpStatus { url: String, status: u16 },

    /// The external downloader exited unsuccessfully
    #[error("Downloader exited with status {code:?}: {stderr}")]
    ProcessExit { code: Option<i32>, stderr: String },

    /// The fetch did not complete within the configured timeout
    #[error("Timed out after {seconds}s fetching {url}")]
    Timeout { url: String, seconds: u64 },

    /// Failed to spawn the downloader or write an output file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize or read back the recipe document
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

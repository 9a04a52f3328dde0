use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::extractors::ExtractOptions;

pub const DEFAULT_LISTING_URL: &str = "https://theplantbasedschool.com/recipes/";
pub const DEFAULT_SITE_DOMAIN: &str = "theplantbasedschool.com";

/// Main scraper configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Listing page enumerating the recipe cards
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    /// Domain whose links count as recipe links for the fallback parser
    #[serde(default = "default_site_domain")]
    pub site_domain: String,
    /// Per-fetch timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Which downloader to use
    #[serde(default)]
    pub fetcher: FetcherKind,
    /// Record detail page links from the listing and fetch their ingredients
    #[serde(default = "default_capture_urls")]
    pub capture_urls: bool,
    /// Output artifacts
    #[serde(default)]
    pub output: OutputConfig,
}

/// Markup downloader backends
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// In-process HTTP client
    #[default]
    Request,
    /// External `curl` process
    Curl,
}

/// Where the two output artifacts are written
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Structured JSON document
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,
    /// Source-embeddable array literal
    #[serde(default = "default_js_path")]
    pub js_path: PathBuf,
    /// Constant name assigned in the literal
    #[serde(default = "default_constant_name")]
    pub constant_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: default_json_path(),
            js_path: default_js_path(),
            constant_name: default_constant_name(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            site_domain: default_site_domain(),
            timeout: default_timeout(),
            fetcher: FetcherKind::default(),
            capture_urls: default_capture_urls(),
            output: OutputConfig::default(),
        }
    }
}

// Default value functions
fn default_listing_url() -> String {
    DEFAULT_LISTING_URL.to_string()
}

fn default_site_domain() -> String {
    DEFAULT_SITE_DOMAIN.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_capture_urls() -> bool {
    true
}

fn default_json_path() -> PathBuf {
    PathBuf::from("recipes.json")
}

fn default_js_path() -> PathBuf {
    PathBuf::from("recipes.js")
}

fn default_constant_name() -> String {
    "recipes".to_string()
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCRAPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            capture_urls: self.capture_urls,
            site_domain: self.site_domain.clone(),
            base_url: self.listing_url.clone(),
        }
    }
}

/// Load configuration from file and environment variables
///
/// Environment variable format: RECIPE_SCRAPE__OUTPUT__JSON_PATH
pub fn load_config() -> Result<ScraperConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_SCRAPE__OUTPUT__JS_PATH
        .add_source(
            Environment::with_prefix("RECIPE_SCRAPE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ScraperConfig::default();
        assert_eq!(config.listing_url, "https://theplantbasedschool.com/recipes/");
        assert_eq!(config.site_domain, "theplantbasedschool.com");
        assert_eq!(config.timeout_duration(), Duration::from_secs(10));
        assert_eq!(config.fetcher, FetcherKind::Request);
        assert!(config.capture_urls);
        assert_eq!(config.output.json_path, PathBuf::from("recipes.json"));
        assert_eq!(config.output.js_path, PathBuf::from("recipes.js"));
        assert_eq!(config.output.constant_name, "recipes");
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
                fetcher = "curl"
                capture_urls = false

                [output]
                json_path = "out/cards.json"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: ScraperConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.fetcher, FetcherKind::Curl);
        assert!(!config.capture_urls);
        assert_eq!(config.output.json_path, PathBuf::from("out/cards.json"));
        assert_eq!(config.output.js_path, PathBuf::from("recipes.js"));
        assert_eq!(config.timeout, 10);
    }

    #[test]
    fn test_extract_options_follow_config() {
        let config = ScraperConfig {
            capture_urls: false,
            site_domain: "example.com".to_string(),
            listing_url: "https://example.com/all-recipes/".to_string(),
            ..ScraperConfig::default()
        };
        let options = config.extract_options();
        assert!(!options.capture_urls);
        assert_eq!(options.site_domain, "example.com");
        assert_eq!(options.base_url, "https://example.com/all-recipes/");
    }
}

use clap::Parser;
use log::{error, info};
use recipe_scrape::output::write_artifacts;
use recipe_scrape::{load_config, summarize, FetcherKind, ScraperConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "recipe-scrape", version, about = "Scrape recipe cards and ingredients from a listing page")]
struct Cli {
    /// Listing page to scrape (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Downloader to use
    #[arg(long, value_parser = parse_fetcher)]
    fetcher: Option<FetcherKind>,

    /// Only read the listing page; do not follow recipe links for ingredients
    #[arg(long)]
    listing_only: bool,

    /// Per-fetch timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Where to write the JSON document
    #[arg(long)]
    json: Option<PathBuf>,

    /// Where to write the array literal
    #[arg(long)]
    js: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut ScraperConfig) {
        if let Some(url) = self.url {
            config.listing_url = url;
        }
        if let Some(fetcher) = self.fetcher {
            config.fetcher = fetcher;
        }
        if self.listing_only {
            config.capture_urls = false;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(json) = self.json {
            config.output.json_path = json;
        }
        if let Some(js) = self.js {
            config.output.js_path = js;
        }
    }
}

fn parse_fetcher(value: &str) -> Result<FetcherKind, String> {
    match value {
        "request" => Ok(FetcherKind::Request),
        "curl" => Ok(FetcherKind::Curl),
        other => Err(format!("unknown fetcher '{other}', expected 'request' or 'curl'")),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = load_config()?;
    cli.apply(&mut config);

    let recipes = match recipe_scrape::scrape_recipes(&config).await {
        Ok(recipes) => recipes,
        Err(e) => {
            error!("Scrape aborted: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("\n{}", summarize(&recipes, config.capture_urls));

    write_artifacts(&recipes, &config.output).await?;
    info!("Done: {} recipes written", recipes.len());

    Ok(ExitCode::SUCCESS)
}

use crate::config::cli::Args;
use crate::error::Result;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

/// Where the stats page lives and how its rounds are found.
/// Selector templates use `{index}` for the 0-based round index.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub day_view_selector: String,
    pub answer_selector: String,
    pub clue_selector: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://thrice.geekswhodrink.com/stats".to_string(),
            day_view_selector: "#day-view".to_string(),
            answer_selector: r#"[data-dropdown-index-param="{index}"]"#.to_string(),
            clue_selector: r#"[data-dropdown-target="panel{index}"]"#.to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No scraper config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}

pub struct Config {
    pub args: Args,
    pub scraper_config: ScraperConfig,
    pub http_client: Client,
}

impl Config {
    pub fn new(args: Args) -> Result<Self> {
        let scraper_config = ScraperConfig::load(&args.config_file)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(args.timeout_secs))
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3",
            )
            .build()?;

        Ok(Self {
            args,
            scraper_config,
            http_client,
        })
    }
}

use crate::config::cli::Args;
use crate::config::Config;
use crate::domain::storage::GameRecordStore;
use crate::error::{Result, ScrapeError};
use crate::infrastructure::{DayViewScraper, JsonArchive, SqliteStore, ThriceClient};
use crate::services::game_service::GameService;
use crate::services::parsing::ClueBlockParser;
use crate::services::scraping::ScrapingService;
use clap::Parser;
use std::time::Duration;
use tracing::info;

mod config;
mod domain;
mod error;
mod infrastructure;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt().with_max_level(args.log_level).init();

    let config = Config::new(args)?;

    let range = config.args.day_range()?;

    let mut stores: Vec<Box<dyn GameRecordStore>> = Vec::new();
    if let Some(db) = &config.args.db {
        stores.push(Box::new(SqliteStore::open(db)?));
    }
    if let Some(dir) = &config.args.json_dir {
        stores.push(Box::new(JsonArchive::new(dir)));
    }

    let scraping = ScrapingService::new(
        ThriceClient::new(
            config.http_client.clone(),
            config.scraper_config.base_url.clone(),
        ),
        DayViewScraper::new(&config.scraper_config)?,
        ClueBlockParser::new()?,
    );

    let mut games = GameService::new(scraping, stores)
        .with_delay(Duration::from_millis(config.args.delay_ms))
        .with_printing(!config.args.quiet)
        .with_progress(range.len() > 1);

    let report = games.run(range).await?;
    if report.is_total_failure() {
        return Err(ScrapeError::Other(format!(
            "all {} days failed",
            report.failed.len()
        )));
    }

    if report.dropped_rounds > 0 {
        info!("{} malformed rounds were dropped", report.dropped_rounds);
    }
    info!("Scraping completed successfully!");
    Ok(())
}

use super::DayFetcher;
use crate::error::{Result, ScrapeError};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, info};

/// Fetches the stats page of the Thrice site for a given day.
#[derive(Debug, Clone)]
pub struct ThriceClient {
    client: Client,
    base_url: String,
}

impl ThriceClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, day: NaiveDate) -> String {
        format!("{}?day={}", self.base_url, day.format("%Y-%m-%d"))
    }
}

impl DayFetcher for ThriceClient {
    async fn fetch_day(&self, day: NaiveDate) -> Result<String> {
        let url = self.url_for(day);
        info!("Scraping {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("{url} answered with {status}");
            return Err(ScrapeError::FetchUnavailable { day });
        }

        Ok(response.text().await?)
    }
}

use crate::domain::{ScrapedDay, ScrapedRound};
use crate::error::{Result, ScrapeError};
use crate::infrastructure::{DayFetcher, DayViewScraper, RawRound};
use crate::services::parsing::ClueBlockParser;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// One day's worth of rounds plus how many had to be thrown away.
#[derive(Debug)]
pub struct DayOutcome {
    pub day: ScrapedDay,
    pub dropped_rounds: usize,
}

pub struct ScrapingService<F> {
    fetcher: F,
    scraper: DayViewScraper,
    parser: ClueBlockParser,
}

impl<F: DayFetcher> ScrapingService<F> {
    pub fn new(fetcher: F, scraper: DayViewScraper, parser: ClueBlockParser) -> Self {
        info!("Created new Scraping service");
        Self {
            fetcher,
            scraper,
            parser,
        }
    }

    pub async fn scrape_day(&self, day: NaiveDate) -> Result<DayOutcome> {
        let body = self.fetcher.fetch_day(day).await?;
        let raw_rounds = self
            .scraper
            .extract(&body)
            .ok_or(ScrapeError::FetchUnavailable { day })?;

        let mut rounds = Vec::new();
        let mut dropped_rounds = 0;

        for raw in raw_rounds {
            // Numbered by position among the kept rounds, not by the site's index
            let round_number = rounds.len() as u32 + 1;
            match self.parse_round(&raw, round_number) {
                Ok(Some(round)) => rounds.push(round),
                Ok(None) => debug!("{day}: round {} has no answer, skipping", raw.index),
                Err(e) => {
                    warn!("{day}: dropping round {}: {e}", raw.index);
                    dropped_rounds += 1;
                }
            }
        }

        Ok(DayOutcome {
            day: ScrapedDay {
                published: day,
                rounds,
            },
            dropped_rounds,
        })
    }

    fn parse_round(&self, raw: &RawRound, round_number: u32) -> Result<Option<ScrapedRound>> {
        let answer = match raw.answer.as_deref().map(str::trim) {
            Some(answer) if !answer.is_empty() => answer.to_string(),
            _ => return Ok(None),
        };

        let clues = match raw.clue_block.as_deref() {
            Some(block) => self.parser.parse(block)?,
            None => Vec::new(),
        };

        Ok(Some(ScrapedRound::new(round_number, answer, clues)))
    }
}

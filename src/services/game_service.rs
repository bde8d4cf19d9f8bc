use crate::domain::storage::GameRecordStore;
use crate::domain::{DayRange, ScrapedDay};
use crate::error::{Result, ScrapeError};
use crate::infrastructure::DayFetcher;
use crate::services::scraping::ScrapingService;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
pub struct RunReport {
    pub succeeded: Vec<NaiveDate>,
    pub failed: Vec<(NaiveDate, String)>,
    pub dropped_rounds: usize,
}

impl RunReport {
    pub fn is_total_failure(&self) -> bool {
        self.succeeded.is_empty() && !self.failed.is_empty()
    }
}

pub struct GameService<F> {
    scraping: ScrapingService<F>,
    stores: Vec<Box<dyn GameRecordStore>>,
    delay: Duration,
    print_rounds: bool,
    show_progress: bool,
}

impl<F: DayFetcher> GameService<F> {
    pub fn new(scraping: ScrapingService<F>, stores: Vec<Box<dyn GameRecordStore>>) -> Self {
        Self {
            scraping,
            stores,
            delay: Duration::ZERO,
            print_rounds: false,
            show_progress: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_printing(mut self, print_rounds: bool) -> Self {
        self.print_rounds = print_rounds;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Scrapes every day in the range. A failing day is logged and recorded
    /// in the report; it never stops the days after it.
    pub async fn run(&mut self, range: DayRange) -> Result<RunReport> {
        info!(
            "Scraping from {} to {} ({} days)",
            range.start(),
            range.end(),
            range.len()
        );

        for store in self.stores.iter_mut() {
            store.ensure_schema()?;
        }

        let pb = if self.show_progress {
            let pb = ProgressBar::new(range.len());
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .map_err(|e| ScrapeError::Other(e.to_string()))?,
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut report = RunReport::default();

        for (i, day) in range.days().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            pb.set_message(day.to_string());

            match self.process_day(day, &pb).await {
                Ok(dropped) => {
                    report.dropped_rounds += dropped;
                    report.succeeded.push(day);
                }
                Err(e) => {
                    error!("{day}: {e}");
                    report.failed.push((day, e.to_string()));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();

        if report.failed.is_empty() {
            info!("Scraped {} days", report.succeeded.len());
        } else {
            warn!(
                "Scraped {} of {} days, {} failed",
                report.succeeded.len(),
                range.len(),
                report.failed.len()
            );
        }

        Ok(report)
    }

    async fn process_day(&mut self, day: NaiveDate, pb: &ProgressBar) -> Result<usize> {
        let outcome = self.scraping.scrape_day(day).await?;

        if self.print_rounds {
            let rendered = format_day(&outcome.day);
            pb.suspend(|| print!("{rendered}"));
        }

        for store in self.stores.iter_mut() {
            let rounds = outcome.day.rounds.len();
            match store.insert_game(&outcome.day)? {
                Some(game_id) => {
                    info!("{day}: stored {rounds} rounds in {} (game {game_id})", store.name())
                }
                None => info!("{day}: stored {rounds} rounds in {}", store.name()),
            }
        }

        Ok(outcome.dropped_rounds)
    }
}

fn format_day(day: &ScrapedDay) -> String {
    let mut out = String::new();
    for (i, round) in day.rounds.iter().enumerate() {
        out.push_str(&format!("Round {}: {}\n", i + 1, round.answer));
        for clue in &round.clues {
            out.push_str(&format!("{} {}%\n", clue.text, clue.percent_correct));
        }
    }
    out
}

use crate::domain::DayRange;
use crate::error::{Result, ScrapeError};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::{warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape daily Thrice results into SQLite")]
pub struct Args {
    /// Single day to scrape, e.g. 2023-12-04
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub day: Option<NaiveDate>,

    /// First day of an inclusive range
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// Last day of an inclusive range
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// SQLite database to store games in
    #[arg(long, env = "THRICE_DB")]
    pub db: Option<PathBuf>,

    /// Directory to archive each scraped day as JSON
    #[arg(long)]
    pub json_dir: Option<PathBuf>,

    /// Path to scraper configuration file
    #[arg(long, default_value = "scraper_config.json")]
    pub config_file: PathBuf,

    /// Page load timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Pause between consecutive days in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Don't print the scraped rounds
    #[arg(long)]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

impl Args {
    pub fn day_range(&self) -> Result<DayRange> {
        match (self.day, self.start, self.end) {
            (Some(day), _, _) => Ok(DayRange::single(day)),
            (None, Some(start), Some(end)) => {
                if start == end {
                    warn!("start and end are the same, scraping {start} only");
                }
                DayRange::new(start, end)
            }
            _ => Err(ScrapeError::Other(
                "either --day or --start and --end are required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("thrice-scrape").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn single_day() {
        let range = args(&["--day", "2024-11-30"]).day_range().unwrap();
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn range_days() {
        let range = args(&["--start", "2024-01-01", "--end", "2024-01-03"])
            .day_range()
            .unwrap();
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = args(&["--start", "2024-01-03", "--end", "2024-01-01"])
            .day_range()
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidRange { .. }));
    }

    #[test]
    fn no_days_is_rejected() {
        assert!(args(&[]).day_range().is_err());
    }

    #[test]
    fn start_without_end_fails_to_parse() {
        let parsed = Args::try_parse_from(["thrice-scrape", "--start", "2024-01-01"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn day_conflicts_with_range() {
        let parsed = Args::try_parse_from([
            "thrice-scrape",
            "--day",
            "2024-01-01",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-02",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn log_level_is_validated() {
        assert_eq!(args(&["--day", "2024-01-01"]).log_level, Level::INFO);
        assert_eq!(
            args(&["--day", "2024-01-01", "--log-level", "debug"]).log_level,
            Level::DEBUG
        );
        let parsed =
            Args::try_parse_from(["thrice-scrape", "--day", "2024-01-01", "--log-level", "loud"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn bad_date_fails_to_parse() {
        assert!(Args::try_parse_from(["thrice-scrape", "--day", "2024-13-01"]).is_err());
    }
}

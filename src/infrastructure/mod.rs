mod clients;
mod scrapers;
mod storage;

pub use clients::{thrice::ThriceClient, DayFetcher};
pub use scrapers::day_view::{DayViewScraper, RawRound};
pub use storage::{fs_store::JsonArchive, sqlite_store::SqliteStore};

use super::ScrapedDay;
use crate::error::Result;

/// Write-only sink for scraped days.
pub trait GameRecordStore: Send {
    fn name(&self) -> &'static str;

    /// Safe to call repeatedly.
    fn ensure_schema(&mut self) -> Result<()>;

    /// Stores one day atomically. Rounds and clues are numbered by their
    /// position. Returns the new game id when the sink assigns one.
    fn insert_game(&mut self, day: &ScrapedDay) -> Result<Option<i64>>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const ARCHIVE_EXTENSION: &'static str = "json";
    pub const ARCHIVE_TMP_EXTENSION: &'static str = "tmp";
}

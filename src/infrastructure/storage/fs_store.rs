use crate::domain::storage::{GameRecordStore, StorageKeys};
use crate::domain::ScrapedDay;
use crate::error::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keeps one pretty-printed JSON file per scraped day.
#[derive(Clone)]
pub struct JsonArchive {
    data_dir: PathBuf,
}

impl JsonArchive {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn get_path_for_day(&self, day: NaiveDate) -> PathBuf {
        self.data_dir.join(format!(
            "{}.{}",
            day.format("%Y-%m-%d"),
            StorageKeys::ARCHIVE_EXTENSION
        ))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write_json_file<T: serde::Serialize + ?Sized>(&self, path: &Path, data: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;

        // Readers only ever see a complete file
        let tmp = path.with_extension(StorageKeys::ARCHIVE_TMP_EXTENSION);
        fs::write(&tmp, content)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    #[cfg(test)]
    fn read_day(&self, day: NaiveDate) -> Result<Option<ScrapedDay>> {
        let path = self.get_path_for_day(day);
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&content)?))
        } else {
            Ok(None)
        }
    }
}

impl GameRecordStore for JsonArchive {
    fn name(&self) -> &'static str {
        "json"
    }

    fn ensure_schema(&mut self) -> Result<()> {
        self.ensure_dir(&self.data_dir)
    }

    fn insert_game(&mut self, day: &ScrapedDay) -> Result<Option<i64>> {
        let path = self.get_path_for_day(day.published);
        self.write_json_file(&path, day)?;
        debug!("Archived {} to {}", day.published, path.display());
        Ok(None)
    }
}

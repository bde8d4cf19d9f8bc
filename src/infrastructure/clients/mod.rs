use crate::error::Result;
use chrono::NaiveDate;
use std::future::Future;

pub(crate) mod thrice;

/// Source of rendered day pages.
pub trait DayFetcher {
    fn fetch_day(&self, day: NaiveDate) -> impl Future<Output = Result<String>> + Send;
}

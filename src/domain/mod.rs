mod day_range;
mod game;
pub(crate) mod storage;

pub use day_range::DayRange;
pub use game::{points_for, ParsedClue, ScrapedDay, ScrapedRound};

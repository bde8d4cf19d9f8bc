use crate::error::{Result, ScrapeError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single clue together with the share of players who had answered
/// correctly once it was revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedClue {
    pub text: String,
    pub percent_correct: u8,
}

impl ParsedClue {
    pub fn new(text: impl Into<String>, percent_correct: u32) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ScrapeError::malformed("clue text is empty"));
        }
        if percent_correct > 100 {
            return Err(ScrapeError::malformed(format!(
                "percent correct {percent_correct} is above 100"
            )));
        }

        Ok(Self {
            text,
            percent_correct: percent_correct as u8,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedRound {
    pub round_number: u32,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    pub clues: Vec<ParsedClue>,
}

impl ScrapedRound {
    pub fn new(round_number: u32, answer: String, clues: Vec<ParsedClue>) -> Self {
        Self {
            round_number,
            answer,
            category: None,
            clues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedDay {
    pub published: NaiveDate,
    pub rounds: Vec<ScrapedRound>,
}

/// Earlier clues are worth more: 3, 2, then 1 for everything after.
pub fn points_for(clue_number: u32) -> u32 {
    match clue_number {
        0 | 1 => 3,
        2 => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_fixed_schedule() {
        assert_eq!(points_for(1), 3);
        assert_eq!(points_for(2), 2);
        assert_eq!(points_for(3), 1);
        assert_eq!(points_for(7), 1);
    }

    #[test]
    fn clue_rejects_out_of_range_percent() {
        assert!(ParsedClue::new("Too high.", 101).is_err());
        assert!(ParsedClue::new("Just right.", 100).is_ok());
        assert!(ParsedClue::new("Nobody.", 0).is_ok());
    }

    #[test]
    fn clue_rejects_blank_text() {
        let err = ParsedClue::new("   ", 40).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedClueBlock { .. }));
    }
}

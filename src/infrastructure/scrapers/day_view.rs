use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

pub const ROUNDS_PER_DAY: usize = 5;

/// Text pulled out of the day view for one round, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRound {
    pub index: usize,
    pub answer: Option<String>,
    pub clue_block: Option<String>,
}

struct RoundSelectors {
    answer: Selector,
    clues: Selector,
}

pub struct DayViewScraper {
    day_view: Selector,
    rounds: Vec<RoundSelectors>,
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector(format!("{selector}: {e}")))
}

impl DayViewScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let day_view = parse_selector(&config.day_view_selector)?;

        let rounds = (0..ROUNDS_PER_DAY)
            .map(|index| -> Result<RoundSelectors> {
                let index = index.to_string();
                Ok(RoundSelectors {
                    answer: parse_selector(&config.answer_selector.replace("{index}", &index))?,
                    clues: parse_selector(&config.clue_selector.replace("{index}", &index))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { day_view, rounds })
    }

    /// Returns `None` when the page has no day view at all.
    pub fn extract(&self, body: &str) -> Option<Vec<RawRound>> {
        let document = Html::parse_document(body);
        let day_view = document.select(&self.day_view).next()?;

        let rounds = self
            .rounds
            .iter()
            .enumerate()
            .map(|(index, selectors)| RawRound {
                index,
                answer: first_text(day_view, &selectors.answer),
                clue_block: first_text(day_view, &selectors.clues),
            })
            .collect();

        Some(rounds)
    }
}

/// Text of the first match with source whitespace collapsed, so a line
/// wrapped in the markup still reads as separate words.
fn first_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(|el| {
        el.text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    })
}

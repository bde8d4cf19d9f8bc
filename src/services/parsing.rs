use crate::domain::ParsedClue;
use crate::error::{Result, ScrapeError};
use regex::Regex;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Turns the rendered text of one round's clue panel into ordered clues.
///
/// The panel has no structure left once rendered: each clue is a sentence
/// followed by its percentage marker (`45%`), and all of them are
/// concatenated. Line breaks from the rendering can show up anywhere.
pub struct ClueBlockParser {
    line_breaks: Regex,
    percent: Regex,
}

impl ClueBlockParser {
    pub fn new() -> Result<Self> {
        let line_breaks =
            Regex::new(r"[\t\r\n]+").map_err(|e| ScrapeError::Parse(e.to_string()))?;
        let percent =
            Regex::new(r"(?:^|\D)(\d{1,3})%").map_err(|e| ScrapeError::Parse(e.to_string()))?;

        Ok(Self {
            line_breaks,
            percent,
        })
    }

    pub fn normalize(&self, raw: &str) -> String {
        let composed = raw.nfc().collect::<String>();
        self.line_breaks
            .replace_all(&composed, "")
            .trim()
            .to_string()
    }

    pub fn parse(&self, raw: &str) -> Result<Vec<ParsedClue>> {
        let text = self.normalize(raw);
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut segments: Vec<&str> = text.split_inclusive('%').collect();

        // Whatever follows the last marker is rendering residue as long as it's blank
        while segments
            .last()
            .is_some_and(|s| !s.ends_with('%') && s.trim().is_empty())
        {
            segments.pop();
        }

        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let mut clues = Vec::with_capacity(segments.len());
        for (i, segment) in segments.into_iter().enumerate() {
            clues.push(self.parse_segment(segment).map_err(|e| match e {
                ScrapeError::MalformedClueBlock { reason } => {
                    ScrapeError::malformed(format!("clue {}: {}", i + 1, reason))
                }
                other => other,
            })?);
        }

        if clues
            .windows(2)
            .any(|pair| pair[1].percent_correct < pair[0].percent_correct)
        {
            debug!("Percent correct decreases within block: {:?}", clues);
        }

        Ok(clues)
    }

    fn parse_segment(&self, segment: &str) -> Result<ParsedClue> {
        if !segment.ends_with('%') {
            return Err(ScrapeError::malformed(format!(
                "no percentage marker after {:?}",
                segment.trim()
            )));
        }

        let digits = self
            .percent
            .captures_iter(segment)
            .filter_map(|caps| caps.get(1))
            .last()
            .ok_or_else(|| {
                ScrapeError::malformed(format!("no percentage in {:?}", segment.trim()))
            })?;

        let percent_correct: u32 = digits
            .as_str()
            .parse()
            .map_err(|_| ScrapeError::malformed(format!("bad percentage {:?}", digits.as_str())))?;

        let rest = &segment[..digits.start()];
        let clue_text = match rest.find('?') {
            Some(pos) => &rest[..=pos],
            None => match rest.rfind(['.', '!']) {
                Some(pos) => &rest[..=pos],
                None => rest,
            },
        };

        ParsedClue::new(clue_text.trim(), percent_correct)
    }
}

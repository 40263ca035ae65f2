//! Prestige extraction from raw OCR text.
//!
//! A screenshot is only trusted when the source watermark (the marker) is
//! present somewhere in the recognised text. The value is then looked up
//! after the `Prestige` label, falling back to the number printed right
//! after the marker.

use anyhow::{Context, Result};
use regex::Regex;

/// Terminal classification of one OCR result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The marker is missing; the screenshot comes from somewhere else.
    InvalidSource,
    /// Marker present but no number could be isolated.
    ValueNotFound,
    /// Raw digit string, separators preserved (e.g. `"12,345"`).
    Value(String),
}

#[derive(Debug, Clone)]
pub struct PrestigeParser {
    marker_lower: String,
    label_pattern: Regex,
    marker_pattern: Regex,
}

impl PrestigeParser {
    pub fn new(marker: &str, label: &str) -> Result<Self> {
        let label_pattern = Regex::new(&format!(
            r"(?i){}[:\s]*([0-9][0-9,]*)",
            regex::escape(label)
        ))
        .context("Failed to compile label pattern")?;
        let marker_pattern = Regex::new(&format!(
            r"(?i){}\s+(\d{{1,3}}(?:,\d{{3}})*)",
            regex::escape(marker)
        ))
        .context("Failed to compile marker pattern")?;

        Ok(Self {
            marker_lower: marker.to_lowercase(),
            label_pattern,
            marker_pattern,
        })
    }

    pub fn parse(&self, text: &str) -> ParseOutcome {
        if !text.to_lowercase().contains(&self.marker_lower) {
            return ParseOutcome::InvalidSource;
        }

        for pattern in [&self.label_pattern, &self.marker_pattern] {
            if let Some(caps) = pattern.captures(text) {
                return ParseOutcome::Value(caps[1].to_string());
            }
        }

        ParseOutcome::ValueNotFound
    }
}

/// Strip thousands separators and convert to an integer.
///
/// Returns `None` when nothing numeric is left or the value overflows.
pub fn parse_prestige_value(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

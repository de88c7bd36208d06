//! Catalog text parsing: section type tags and weekday lists.

use crate::error::SessionError;
use crate::models::Weekday;

/// Role a raw section plays when building offerings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRole {
    Lecture,
    /// Any section attached to a lecture: lab, tutorial, discussion.
    ///
    /// All of these share one slot. An offering pairs its lecture with at
    /// most one of them, so a course needing both a discussion and a lab
    /// gets offerings with only one of the two.
    Lab,
}

impl SectionRole {
    /// Maps a catalog type tag to a role, case-insensitive.
    ///
    /// Tutorial and discussion tags map to [`SectionRole::Lab`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "lecture" | "lec" | "le" => Some(SectionRole::Lecture),
            "lab" | "laboratory" | "la" | "tutorial" | "tut" | "discussion" | "dis" | "di" => {
                Some(SectionRole::Lab)
            }
            _ => None,
        }
    }
}

/// Parses weekday entries into distinct days, first-seen order.
///
/// Each entry is split on commas, slashes, semicolons and whitespace. A
/// token is either one day name (`"Mon"`, `"thursday"`) or a run of
/// two-letter codes (`"MoWeFr"`).
pub fn parse_days<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Weekday>, SessionError> {
    let mut days = Vec::new();
    for entry in entries {
        let tokens = entry
            .as_ref()
            .split(|c: char| c == ',' || c == '/' || c == ';' || c.is_whitespace())
            .filter(|t| !t.is_empty());
        for token in tokens {
            for day in parse_token(token)? {
                if !days.contains(&day) {
                    days.push(day);
                }
            }
        }
    }
    Ok(days)
}

fn parse_token(token: &str) -> Result<Vec<Weekday>, SessionError> {
    if let Ok(day) = token.parse::<Weekday>() {
        return Ok(vec![day]);
    }

    let invalid = || SessionError::InvalidWeekday {
        text: token.to_string(),
    };
    if !token.is_ascii() || token.len() < 4 || token.len() % 2 != 0 {
        return Err(invalid());
    }
    (0..token.len())
        .step_by(2)
        .map(|i| token[i..i + 2].parse::<Weekday>().map_err(|_| invalid()))
        .collect()
}

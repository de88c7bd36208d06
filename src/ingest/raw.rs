//! Raw catalog section records.

use serde::{Deserialize, Serialize};

/// One section record as delivered by the catalog fetch layer.
///
/// All fields are untouched catalog text. Wire shape:
///
/// ```json
/// { "groupKey": "A", "type": "lecture", "label": "A00",
///   "days": ["Mo, We"], "startTime": "09:00", "endTime": "09:50" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    /// Sections sharing a key belong together (a lecture and its labs).
    pub group_key: String,
    /// Section type tag, e.g. "lecture" or "lab".
    #[serde(rename = "type")]
    pub section_type: String,
    /// Section code shown to the user.
    pub label: String,
    /// Weekday codes. Entries may hold several days (`"Mo, We"`, `"TuTh"`).
    pub days: Vec<String>,
    /// `"HH:MM"`.
    pub start_time: String,
    /// `"HH:MM"`.
    pub end_time: String,
}

impl RawSection {
    pub fn new(
        group_key: impl Into<String>,
        section_type: impl Into<String>,
        label: impl Into<String>,
        days: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            group_key: group_key.into(),
            section_type: section_type.into(),
            label: label.into(),
            days: vec![days.into()],
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// A lecture record.
    pub fn lecture(
        group_key: impl Into<String>,
        label: impl Into<String>,
        days: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self::new(group_key, "lecture", label, days, start_time, end_time)
    }

    /// A lab record.
    pub fn lab(
        group_key: impl Into<String>,
        label: impl Into<String>,
        days: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self::new(group_key, "lab", label, days, start_time, end_time)
    }
}

//! Error types.
//!
//! The search engine is total and has no error type. Errors arise only
//! while turning raw catalog text into typed sessions and courses, and at
//! the catalog seam.

use thiserror::Error;

/// Failure to build a [`TimeSession`](crate::models::TimeSession) or one of
/// its components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A time-of-day string could not be parsed.
    #[error("invalid time of day: '{text}'")]
    InvalidTime { text: String },

    /// A minute count outside `0..=1440`.
    #[error("time of day out of range: {minutes} minutes")]
    TimeOutOfRange { minutes: u16 },

    /// A weekday token could not be recognized.
    #[error("invalid weekday: '{text}'")]
    InvalidWeekday { text: String },

    /// `start >= end`.
    #[error("session must start before it ends ({start} >= {end})")]
    EmptyRange { start: String, end: String },
}

/// Failure to normalize raw sections into a [`CourseEntry`](crate::models::CourseEntry).
///
/// Every variant names the course so batch callers can report it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// No raw sections were supplied.
    #[error("course '{course_id}' has no sections")]
    Empty { course_id: String },

    /// A section type tag that is neither a lecture nor a lab.
    #[error("course '{course_id}': section '{label}' has unknown type '{tag}'")]
    UnknownSectionType {
        course_id: String,
        label: String,
        tag: String,
    },

    /// A section lists no meeting days.
    #[error("course '{course_id}': section '{label}' has no meeting days")]
    NoDays { course_id: String, label: String },

    /// A day or time string was malformed.
    #[error("course '{course_id}': section '{label}': {source}")]
    InvalidSession {
        course_id: String,
        label: String,
        #[source]
        source: SessionError,
    },

    /// Priority outside `0..=10`.
    #[error("course '{course_id}': priority {priority} is outside 0..=10")]
    PriorityOutOfRange { course_id: String, priority: u8 },
}

impl NormalizeError {
    /// The course this error refers to.
    pub fn course_id(&self) -> &str {
        match self {
            NormalizeError::Empty { course_id }
            | NormalizeError::UnknownSectionType { course_id, .. }
            | NormalizeError::NoDays { course_id, .. }
            | NormalizeError::InvalidSession { course_id, .. }
            | NormalizeError::PriorityOutOfRange { course_id, .. } => course_id,
        }
    }
}

/// Errors from the external catalog and prerequisite collaborators.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source has no sections for the course.
    #[error("course '{course_id}' not found in catalog")]
    NotFound { course_id: String },

    /// The source responded with an unreadable document.
    #[error("failed to decode catalog data: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport or service failure reported by the collaborator.
    #[error("catalog source failed: {message}")]
    Source { message: String },

    /// Sections were fetched but could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl CatalogError {
    /// Whether retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Source { .. })
    }
}

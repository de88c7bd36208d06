//! Input validation for timetable problems.
//!
//! Checks structural integrity of course entries before solving.
//! Detects:
//! - Duplicate course IDs
//! - Priorities outside `0..=10`
//! - Courses with no offerings
//! - Offerings without lecture sessions
//! - Offerings whose own sessions overlap
//!
//! The solver tolerates all of these (it never picks an unusable
//! offering), so validation is about reporting, not safety.

use crate::models::{CourseEntry, MAX_PRIORITY};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entries share the same course ID.
    DuplicateId,
    /// Priority above the allowed maximum.
    PriorityOutOfRange,
    /// A course has no offerings and can never be scheduled.
    NoOfferings,
    /// An offering has no lecture sessions.
    EmptyLecture,
    /// Two sessions of one offering overlap.
    SelfOverlap,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a course list before solving.
///
/// Checks:
/// 1. No duplicate course IDs
/// 2. Every priority is within `0..=10`
/// 3. Every course has at least one offering
/// 4. Every offering has lecture sessions
/// 5. No offering overlaps itself
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_entries(entries: &[CourseEntry]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for entry in entries {
        if !ids.insert(entry.course_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", entry.course_id),
            ));
        }

        if entry.priority > MAX_PRIORITY {
            errors.push(ValidationError::new(
                ValidationErrorKind::PriorityOutOfRange,
                format!(
                    "Course '{}' has priority {} (max {MAX_PRIORITY})",
                    entry.course_id, entry.priority
                ),
            ));
        }

        if entry.offerings.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoOfferings,
                format!("Course '{}' has no offerings", entry.course_id),
            ));
        }

        for offering in &entry.offerings {
            if offering.lecture_sessions.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyLecture,
                    format!(
                        "Offering '{}' of course '{}' has no lecture sessions",
                        offering.label(),
                        entry.course_id
                    ),
                ));
            }
            if !offering.is_self_consistent() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfOverlap,
                    format!(
                        "Offering '{}' of course '{}' overlaps itself",
                        offering.label(),
                        entry.course_id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

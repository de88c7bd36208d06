//! Course group normalizer.
//!
//! # Algorithm
//!
//! 1. Group raw sections by `group_key` (first-seen order).
//! 2. Lecture-role sections of a group form its single lecture; lab-role
//!    sections with the same label form one lab candidate.
//! 3. Expand every day list into one [`TimeSession`] per weekday.
//! 4. Drop groups with no lecture.
//! 5. Emit `lecture × ({none} ∪ labs)` offerings per group.
//!
//! # Complexity
//! O(n · l) where n = sections, l = lab candidates per group.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::parse::{parse_days, SectionRole};
use super::RawSection;
use crate::error::{NormalizeError, SessionError};
use crate::models::{CourseEntry, Offering, TimeOfDay, TimeSession, MAX_PRIORITY};

/// Whether a lecture may be taken without one of its labs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabPolicy {
    /// Every group also yields a lecture-only offering.
    #[default]
    Optional,
    /// Groups with lab candidates only yield lecture + lab offerings.
    Required,
}

/// Raw sections of one course plus the user's priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeRequest {
    pub course_id: String,
    pub priority: u8,
    pub sections: Vec<RawSection>,
}

impl NormalizeRequest {
    pub fn new(course_id: impl Into<String>, priority: u8, sections: Vec<RawSection>) -> Self {
        Self {
            course_id: course_id.into(),
            priority,
            sections,
        }
    }
}

/// Result of normalizing several courses.
///
/// Failures never abort the batch; successes and failures are collected
/// side by side.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Courses that normalized cleanly, in request order.
    pub entries: Vec<CourseEntry>,
    /// Courses that could not be scheduled, in request order.
    pub failures: Vec<NormalizeError>,
}

impl BatchOutcome {
    /// Whether every course normalized.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Ids of the failed courses.
    pub fn failed_course_ids(&self) -> Vec<&str> {
        self.failures.iter().map(NormalizeError::course_id).collect()
    }
}

/// Turns raw catalog sections into [`CourseEntry`] values.
///
/// # Example
///
/// ```
/// use u_timetable::ingest::{Normalizer, RawSection};
///
/// let raw = vec![
///     RawSection::lecture("A", "A00", "Mo, We", "09:00", "09:50"),
///     RawSection::lab("A", "A01", "Fr", "13:00", "13:50"),
/// ];
/// let course = Normalizer::new().normalize(&raw, 7, "CSE 12").unwrap();
///
/// // lecture only, lecture + A01
/// assert_eq!(course.offerings.len(), 2);
/// assert_eq!(course.offerings[1].label(), "A00 + A01");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Normalizer {
    pub lab_policy: LabPolicy,
}

#[derive(Debug)]
struct Section {
    label: String,
    sessions: Vec<TimeSession>,
}

#[derive(Debug)]
struct Group<'a> {
    key: &'a str,
    lecture: Option<Section>,
    labs: Vec<Section>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lab_policy(mut self, lab_policy: LabPolicy) -> Self {
        self.lab_policy = lab_policy;
        self
    }

    /// Normalizes one course.
    ///
    /// # Errors
    /// Empty input, priority above 10, an unknown section type, a missing
    /// or malformed day list, or a malformed or inverted time range.
    ///
    /// A course whose groups all lack a lecture is not an error: it comes
    /// back with no offerings and the solver always leaves it out.
    pub fn normalize(
        &self,
        raw_sections: &[RawSection],
        priority: u8,
        course_id: &str,
    ) -> Result<CourseEntry, NormalizeError> {
        if raw_sections.is_empty() {
            return Err(NormalizeError::Empty {
                course_id: course_id.to_string(),
            });
        }
        if priority > MAX_PRIORITY {
            return Err(NormalizeError::PriorityOutOfRange {
                course_id: course_id.to_string(),
                priority,
            });
        }

        let mut groups: Vec<Group<'_>> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for raw in raw_sections {
            let role = SectionRole::from_tag(&raw.section_type).ok_or_else(|| {
                NormalizeError::UnknownSectionType {
                    course_id: course_id.to_string(),
                    label: raw.label.clone(),
                    tag: raw.section_type.clone(),
                }
            })?;
            let sessions = expand_sessions(raw, course_id)?;

            let slot = *index.entry(raw.group_key.as_str()).or_insert_with(|| {
                groups.push(Group {
                    key: raw.group_key.as_str(),
                    lecture: None,
                    labs: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[slot];

            match role {
                SectionRole::Lecture => {
                    if let Some(lecture) = group.lecture.as_mut() {
                        merge_sessions(&mut lecture.sessions, sessions);
                    } else {
                        group.lecture = Some(Section {
                            label: raw.label.clone(),
                            sessions,
                        });
                    }
                }
                SectionRole::Lab => {
                    match group.labs.iter_mut().find(|l| l.label == raw.label) {
                        Some(lab) => merge_sessions(&mut lab.sessions, sessions),
                        None => group.labs.push(Section {
                            label: raw.label.clone(),
                            sessions,
                        }),
                    }
                }
            }
        }

        let mut entry = CourseEntry::new(course_id, priority);
        for group in &groups {
            let Some(lecture) = &group.lecture else {
                debug!(course_id, group = group.key, "discarding group without a lecture");
                continue;
            };

            let base = Offering::new(group.key, &lecture.label, lecture.sessions.clone());
            if group.labs.is_empty() || self.lab_policy == LabPolicy::Optional {
                entry.offerings.push(base.clone());
            }
            for lab in &group.labs {
                entry
                    .offerings
                    .push(base.clone().with_lab(&lab.label, lab.sessions.clone()));
            }
        }

        if entry.offerings.is_empty() {
            debug!(course_id, "no group has a lecture; course is unschedulable");
        }

        debug!(
            course_id,
            groups = groups.len(),
            offerings = entry.offerings.len(),
            "normalized course"
        );
        Ok(entry)
    }

    /// Normalizes many courses, isolating failures per course.
    pub fn normalize_batch<I>(&self, requests: I) -> BatchOutcome
    where
        I: IntoIterator<Item = NormalizeRequest>,
    {
        let mut outcome = BatchOutcome::default();
        for req in requests {
            match self.normalize(&req.sections, req.priority, &req.course_id) {
                Ok(entry) => outcome.entries.push(entry),
                Err(e) => {
                    warn!(course_id = %req.course_id, error = %e, "course could not be scheduled");
                    outcome.failures.push(e);
                }
            }
        }
        outcome
    }
}

/// Normalizes one course with default settings.
///
/// See [`Normalizer::normalize`].
pub fn normalize(
    raw_sections: &[RawSection],
    priority: u8,
    course_id: &str,
) -> Result<CourseEntry, NormalizeError> {
    Normalizer::new().normalize(raw_sections, priority, course_id)
}

fn expand_sessions(raw: &RawSection, course_id: &str) -> Result<Vec<TimeSession>, NormalizeError> {
    let invalid = |source: SessionError| NormalizeError::InvalidSession {
        course_id: course_id.to_string(),
        label: raw.label.clone(),
        source,
    };

    let days = parse_days(raw.days.as_slice()).map_err(invalid)?;
    if days.is_empty() {
        return Err(NormalizeError::NoDays {
            course_id: course_id.to_string(),
            label: raw.label.clone(),
        });
    }
    let start: TimeOfDay = raw.start_time.parse().map_err(invalid)?;
    let end: TimeOfDay = raw.end_time.parse().map_err(invalid)?;
    let kind = raw.section_type.trim();

    days.into_iter()
        .map(|day| TimeSession::new(day, start, end, kind).map_err(invalid))
        .collect()
}

fn merge_sessions(into: &mut Vec<TimeSession>, sessions: Vec<TimeSession>) {
    for s in sessions {
        if !into.contains(&s) {
            into.push(s);
        }
    }
}

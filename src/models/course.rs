//! Course and offering models.
//!
//! A [`CourseEntry`] is a course the user wants, weighted by a priority.
//! Each of its [`Offering`]s is one concrete way to take it: a lecture
//! section plus an optional lab section. The search engine picks at most
//! one offering per course.

use serde::{Deserialize, Serialize};

use super::TimeSession;

/// Highest user-assignable priority.
pub const MAX_PRIORITY: u8 = 10;

/// One enrollable lecture + lab pairing.
///
/// Sessions are already expanded to one per weekday. An offering is chosen
/// or skipped atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    /// Catalog group the lecture and lab belong to.
    pub group_key: String,
    /// Lecture section code (e.g. "LEC 01").
    pub lecture_label: String,
    /// Lab section code. `None` = no lab taken.
    pub lab_label: Option<String>,
    /// Lecture meetings (non-empty for normalized offerings).
    pub lecture_sessions: Vec<TimeSession>,
    /// Lab meetings (empty iff no lab is taken).
    pub lab_sessions: Vec<TimeSession>,
}

impl Offering {
    /// Creates a lecture-only offering.
    pub fn new(
        group_key: impl Into<String>,
        lecture_label: impl Into<String>,
        lecture_sessions: Vec<TimeSession>,
    ) -> Self {
        Self {
            group_key: group_key.into(),
            lecture_label: lecture_label.into(),
            lab_label: None,
            lecture_sessions,
            lab_sessions: Vec::new(),
        }
    }

    /// Pairs the lecture with a lab section.
    pub fn with_lab(mut self, lab_label: impl Into<String>, lab_sessions: Vec<TimeSession>) -> Self {
        self.lab_label = Some(lab_label.into());
        self.lab_sessions = lab_sessions;
        self
    }

    /// Display label: `"LEC 01"` or `"LEC 01 + LAB 02"`.
    pub fn label(&self) -> String {
        match &self.lab_label {
            Some(lab) => format!("{} + {}", self.lecture_label, lab),
            None => self.lecture_label.clone(),
        }
    }

    /// Lecture sessions followed by lab sessions.
    pub fn sessions(&self) -> impl Iterator<Item = &TimeSession> + Clone {
        self.lecture_sessions.iter().chain(self.lab_sessions.iter())
    }

    /// Number of weekly meetings.
    pub fn session_count(&self) -> usize {
        self.lecture_sessions.len() + self.lab_sessions.len()
    }

    /// Whether a lab is part of this offering.
    pub fn has_lab(&self) -> bool {
        self.lab_label.is_some()
    }

    /// Whether no two of this offering's own sessions overlap.
    pub fn is_self_consistent(&self) -> bool {
        let all: Vec<&TimeSession> = self.sessions().collect();
        all.iter()
            .enumerate()
            .all(|(i, a)| all[i + 1..].iter().all(|b| !a.overlaps(b)))
    }

    /// Whether any session of this offering overlaps any session of `other`.
    pub fn conflicts_with(&self, other: &Offering) -> bool {
        super::any_overlap(self.sessions(), other.sessions())
    }

    /// Total weekly minutes.
    pub fn weekly_minutes(&self) -> u32 {
        self.sessions().map(|s| u32::from(s.duration_minutes())).sum()
    }
}

/// A user-selected course with its priority and candidate offerings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Unique course key (department + number, e.g. "CSE 101").
    pub course_id: String,
    /// User weight, `0..=10`. Higher = more wanted.
    pub priority: u8,
    /// Candidate offerings, in construction order.
    pub offerings: Vec<Offering>,
}

impl CourseEntry {
    /// Creates a course with no offerings.
    pub fn new(course_id: impl Into<String>, priority: u8) -> Self {
        Self {
            course_id: course_id.into(),
            priority,
            offerings: Vec::new(),
        }
    }

    /// Adds an offering.
    pub fn with_offering(mut self, offering: Offering) -> Self {
        self.offerings.push(offering);
        self
    }

    /// Sets the priority. Offerings are untouched.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Updates the priority in place. Offerings are untouched.
    pub fn set_priority(&mut self, priority: u8) {
        self.priority = priority;
    }

    /// Whether the course has any offering at all.
    pub fn has_offerings(&self) -> bool {
        !self.offerings.is_empty()
    }

    pub fn offering_count(&self) -> usize {
        self.offerings.len()
    }

    /// Finds an offering by its display label.
    pub fn offering(&self, label: &str) -> Option<&Offering> {
        self.offerings.iter().find(|o| o.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn s(day: Weekday, start: &str, end: &str) -> TimeSession {
        TimeSession::parse(day, start, end, "").unwrap()
    }

    #[test]
    fn test_offering_builder() {
        let o = Offering::new("G1", "LEC 01", vec![s(Weekday::Mon, "09:00", "10:00")])
            .with_lab("LAB 02", vec![s(Weekday::Tue, "13:00", "15:00")]);

        assert_eq!(o.group_key, "G1");
        assert_eq!(o.label(), "LEC 01 + LAB 02");
        assert!(o.has_lab());
        assert_eq!(o.session_count(), 2);
        assert_eq!(o.weekly_minutes(), 180);

        let days: Vec<Weekday> = o.sessions().map(|x| x.day()).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Tue]); // lecture first
    }

    #[test]
    fn test_offering_lecture_only_label() {
        let o = Offering::new("G1", "A01", vec![s(Weekday::Fri, "08:00", "09:00")]);
        assert_eq!(o.label(), "A01");
        assert!(!o.has_lab());
    }

    #[test]
    fn test_self_consistency() {
        let ok = Offering::new("G", "L", vec![s(Weekday::Mon, "09:00", "10:00")])
            .with_lab("B", vec![s(Weekday::Mon, "10:00", "11:00")]);
        assert!(ok.is_self_consistent());

        let clash = Offering::new("G", "L", vec![s(Weekday::Mon, "09:00", "10:00")])
            .with_lab("B", vec![s(Weekday::Mon, "09:30", "11:00")]);
        assert!(!clash.is_self_consistent());
    }

    #[test]
    fn test_conflicts_with_checks_labs() {
        let a = Offering::new("G", "L", vec![s(Weekday::Mon, "09:00", "10:00")])
            .with_lab("B", vec![s(Weekday::Thu, "14:00", "16:00")]);
        let b = Offering::new("H", "L", vec![s(Weekday::Thu, "15:00", "16:00")]);
        let c = Offering::new("H", "L", vec![s(Weekday::Thu, "16:00", "17:00")]);
        assert!(a.conflicts_with(&b));
        assert!(b.conflicts_with(&a));
        assert!(!a.conflicts_with(&c));
    }

    #[test]
    fn test_course_entry_builder() {
        let mut c = CourseEntry::new("CSE 101", 7)
            .with_offering(Offering::new("G1", "A01", vec![s(Weekday::Mon, "09:00", "10:00")]))
            .with_offering(Offering::new("G2", "A02", vec![s(Weekday::Tue, "09:00", "10:00")]));

        assert_eq!(c.course_id, "CSE 101");
        assert_eq!(c.offering_count(), 2);
        assert!(c.offering("A02").is_some());
        assert!(c.offering("A03").is_none());

        let before = c.offerings.clone();
        c.set_priority(2);
        assert_eq!(c.priority, 2);
        assert_eq!(c.offerings, before);
    }

    #[test]
    fn test_course_entry_empty() {
        let c = CourseEntry::new("X", 0);
        assert!(!c.has_offerings());
    }
}

//! Timetable (solution) model.
//!
//! A [`ScheduleResult`] holds the chosen offering for every included course.
//! Results produced by the solver are always feasible; [`ScheduleResult::conflicts`]
//! re-checks that for results assembled or edited by hand.

use serde::{Deserialize, Serialize};

use super::{Offering, TimeSession, Weekday};

/// A course included in the timetable together with its chosen offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCourse {
    /// Course key.
    pub course_id: String,
    /// Priority the course contributed.
    pub priority: u8,
    /// The chosen lecture (+ lab) pairing.
    pub offering: Offering,
}

impl ScheduledCourse {
    pub fn new(course_id: impl Into<String>, priority: u8, offering: Offering) -> Self {
        Self {
            course_id: course_id.into(),
            priority,
            offering,
        }
    }
}

/// Output of the schedule search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Included courses in search order (priority desc, course id asc).
    pub chosen: Vec<ScheduledCourse>,
    /// Sum of the priorities of `chosen`.
    pub total_priority: u32,
    /// The search budget ran out; the result is the best found so far.
    pub truncated: bool,
    /// Search nodes visited.
    pub nodes_explored: u64,
}

/// Two chosen sessions that overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// First course involved.
    pub first_course: String,
    /// Second course involved. Equal to `first_course` for a self-overlapping offering.
    pub second_course: String,
    /// The overlapping session of the first course.
    pub first: TimeSession,
    /// The overlapping session of the second course.
    pub second: TimeSession,
}

impl ScheduleResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a course and adds its priority to the total.
    pub fn push(&mut self, course: ScheduledCourse) {
        self.total_priority += u32::from(course.priority);
        self.chosen.push(course);
    }

    /// Whether no course was included.
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Number of included courses.
    pub fn course_count(&self) -> usize {
        self.chosen.len()
    }

    /// Included course ids, in result order.
    pub fn course_ids(&self) -> Vec<&str> {
        self.chosen.iter().map(|c| c.course_id.as_str()).collect()
    }

    /// Finds the entry for a course.
    pub fn find(&self, course_id: &str) -> Option<&ScheduledCourse> {
        self.chosen.iter().find(|c| c.course_id == course_id)
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.find(course_id).is_some()
    }

    /// All sessions on `day` with their course, sorted by start time.
    pub fn sessions_on(&self, day: Weekday) -> Vec<(&ScheduledCourse, &TimeSession)> {
        let mut out: Vec<(&ScheduledCourse, &TimeSession)> = self
            .chosen
            .iter()
            .flat_map(|c| c.offering.sessions().map(move |s| (c, s)))
            .filter(|(_, s)| s.day() == day)
            .collect();
        out.sort_by_key(|(_, s)| (s.start(), s.end()));
        out
    }

    /// Every overlapping session pair, across and within chosen offerings.
    ///
    /// Empty for any result returned by the solver.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let tagged: Vec<(&str, &TimeSession)> = self
            .chosen
            .iter()
            .flat_map(|c| c.offering.sessions().map(move |s| (c.course_id.as_str(), s)))
            .collect();

        let mut conflicts = Vec::new();
        for (i, (ca, a)) in tagged.iter().enumerate() {
            for (cb, b) in &tagged[i + 1..] {
                if a.overlaps(b) {
                    conflicts.push(Conflict {
                        first_course: ca.to_string(),
                        second_course: cb.to_string(),
                        first: (*a).clone(),
                        second: (*b).clone(),
                    });
                }
            }
        }
        conflicts
    }

    /// Whether the timetable has no overlapping sessions.
    pub fn is_feasible(&self) -> bool {
        self.conflicts().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(day: Weekday, start: &str, end: &str) -> TimeSession {
        TimeSession::parse(day, start, end, "lecture").unwrap()
    }

    fn sample_result() -> ScheduleResult {
        let mut r = ScheduleResult::new();
        r.push(ScheduledCourse::new(
            "MATH 20A",
            8,
            Offering::new("A", "A00", vec![s(Weekday::Mon, "11:00", "12:00"), s(Weekday::Wed, "11:00", "12:00")])
                .with_lab("A01", vec![s(Weekday::Mon, "08:00", "09:00")]),
        ));
        r.push(ScheduledCourse::new(
            "CSE 12",
            5,
            Offering::new("B", "B00", vec![s(Weekday::Mon, "09:00", "10:20")]),
        ));
        r
    }

    #[test]
    fn test_push_accumulates_priority() {
        let r = sample_result();
        assert_eq!(r.total_priority, 13);
        assert_eq!(r.course_count(), 2);
        assert_eq!(r.course_ids(), vec!["MATH 20A", "CSE 12"]);
        assert!(!r.truncated);
    }

    #[test]
    fn test_find_and_contains() {
        let r = sample_result();
        assert_eq!(r.find("CSE 12").unwrap().offering.label(), "B00");
        assert!(r.contains("MATH 20A"));
        assert!(!r.contains("PHYS 2A"));
    }

    #[test]
    fn test_sessions_on_sorted() {
        let r = sample_result();
        let monday = r.sessions_on(Weekday::Mon);
        let starts: Vec<String> = monday.iter().map(|(_, s)| s.start().to_string()).collect();
        assert_eq!(starts, vec!["08:00", "09:00", "11:00"]);
        assert_eq!(monday[1].0.course_id, "CSE 12");
        assert!(r.sessions_on(Weekday::Fri).is_empty());
    }

    #[test]
    fn test_conflicts_detected() {
        let mut r = sample_result();
        assert!(r.is_feasible());

        r.push(ScheduledCourse::new(
            "PHYS 2A",
            3,
            Offering::new("C", "C00", vec![s(Weekday::Wed, "11:30", "12:30")]),
        ));
        let conflicts = r.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].first_course, "MATH 20A");
        assert_eq!(conflicts[0].second_course, "PHYS 2A");
        assert!(!r.is_feasible());
    }

    #[test]
    fn test_empty_result() {
        let r = ScheduleResult::new();
        assert!(r.is_empty());
        assert_eq!(r.total_priority, 0);
        assert!(r.conflicts().is_empty());
    }
}

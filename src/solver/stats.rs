//! Timetable statistics.
//!
//! Summarizes a solved timetable for display next to the calendar grid.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weekly minutes | Sum of all chosen session durations |
//! | Minutes by day | Same, per weekday with classes |
//! | Class days | Weekdays with at least one session |
//! | Earliest / latest | First start and last end over the week |
//! | Idle minutes | Gaps between consecutive sessions on the same day |
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", Sec. 2: Soft Constraints

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{CourseEntry, ScheduleResult, TimeOfDay, Weekday};

/// Weekly load indicators of a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleStats {
    pub course_count: usize,
    pub total_priority: u32,
    /// Chosen offerings that include a lab.
    pub lab_count: usize,
    /// Total weekly contact time (minutes).
    pub weekly_minutes: u32,
    /// Contact minutes per weekday; days without classes are absent.
    pub minutes_by_day: BTreeMap<Weekday, u32>,
    /// Earliest session start over the week.
    pub earliest_start: Option<TimeOfDay>,
    /// Latest session end over the week.
    pub latest_end: Option<TimeOfDay>,
    /// Total gap time between consecutive sessions on the same day (minutes).
    pub idle_minutes: u32,
}

impl ScheduleStats {
    /// Computes statistics from a timetable.
    pub fn calculate(result: &ScheduleResult) -> Self {
        let mut minutes_by_day = BTreeMap::new();
        let mut earliest_start: Option<TimeOfDay> = None;
        let mut latest_end: Option<TimeOfDay> = None;
        let mut idle_minutes: u32 = 0;

        for day in Weekday::ALL {
            let sessions = result.sessions_on(day);
            if sessions.is_empty() {
                continue;
            }

            let mut day_minutes: u32 = 0;
            // Sorted by start; `reach` is the latest end seen so far today.
            let mut reach: Option<TimeOfDay> = None;
            for (_, s) in &sessions {
                day_minutes += u32::from(s.duration_minutes());
                if let Some(r) = reach {
                    if s.start() > r {
                        idle_minutes += u32::from(s.start().minutes() - r.minutes());
                    }
                }
                reach = Some(reach.map_or(s.end(), |r| r.max(s.end())));
                earliest_start = Some(earliest_start.map_or(s.start(), |e| e.min(s.start())));
                latest_end = Some(latest_end.map_or(s.end(), |l| l.max(s.end())));
            }
            minutes_by_day.insert(day, day_minutes);
        }

        Self {
            course_count: result.course_count(),
            total_priority: result.total_priority,
            lab_count: result.chosen.iter().filter(|c| c.offering.has_lab()).count(),
            weekly_minutes: minutes_by_day.values().sum(),
            minutes_by_day,
            earliest_start,
            latest_end,
            idle_minutes,
        }
    }

    /// Number of weekdays with at least one session.
    pub fn class_days(&self) -> usize {
        self.minutes_by_day.len()
    }

    /// Input course ids that the timetable left out, in input order.
    pub fn excluded<'a>(result: &ScheduleResult, entries: &'a [CourseEntry]) -> Vec<&'a str> {
        let mut out: Vec<&str> = Vec::new();
        for entry in entries {
            let id = entry.course_id.as_str();
            if !result.contains(id) && !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }

    /// Whether the timetable stays within the given day and idle-time limits.
    pub fn meets_limits(&self, max_class_days: usize, max_idle_minutes: u32) -> bool {
        self.class_days() <= max_class_days && self.idle_minutes <= max_idle_minutes
    }
}

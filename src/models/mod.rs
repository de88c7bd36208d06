//! Timetabling domain models.
//!
//! Provides the typed shapes the normalizer produces and the solver
//! consumes. All values are immutable inputs passed by value; nothing here
//! holds ambient state.
//!
//! # Domain Mappings
//!
//! | u-timetable | Catalog term | Scheduling term |
//! |-------------|--------------|-----------------|
//! | TimeSession | Meeting | Interval on a day resource |
//! | Offering | Lecture + lab section pair | Multi-interval job |
//! | CourseEntry | Selected course | Job family (choose ≤ 1) |
//! | ScheduleResult | Timetable | Solution |

mod course;
mod prereq;
mod schedule;
mod session;

pub use course::{CourseEntry, Offering, MAX_PRIORITY};
pub use prereq::PrereqNode;
pub use schedule::{Conflict, ScheduleResult, ScheduledCourse};
pub use session::{any_overlap, overlaps, TimeOfDay, TimeSession, Weekday, MINUTES_PER_DAY};

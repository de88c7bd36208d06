//! Timetable search and evaluation.
//!
//! # Algorithm
//!
//! [`ScheduleSolver`] runs an exact depth-first include/exclude search with
//! branch-and-bound. It picks at most one offering per course so that no two
//! chosen sessions overlap and total priority is maximal. Ties go to the
//! first timetable met in visit order (priority descending, then course id).
//!
//! An optional node or wall-time budget turns the search into an anytime
//! procedure: when hit, the best timetable so far is returned and flagged
//! [`truncated`](crate::models::ScheduleResult::truncated).
//!
//! # Statistics
//!
//! [`ScheduleStats`] reports weekly contact time, per-day load and idle gaps.
//!
//! # References
//!
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 6.1
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete Programming Problems"

mod config;
mod search;
mod stats;

pub use config::SolverConfig;
pub use search::{solve, ScheduleSolver};
pub use stats::ScheduleStats;

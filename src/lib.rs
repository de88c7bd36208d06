//! Conflict-free weekly course timetables.
//!
//! Given the courses a student wants, each weighted by a priority from
//! 0 to 10, this crate finds the weekly timetable with the highest total
//! priority in which no two class meetings overlap.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `TimeOfDay`, `TimeSession`,
//!   `Offering`, `CourseEntry`, `ScheduleResult`, `PrereqNode`
//! - **`ingest`**: Raw catalog sections → `CourseEntry` (grouping, lecture × lab pairing)
//! - **`solver`**: Exact include/exclude search with branch-and-bound, timetable stats
//! - **`validation`**: Input integrity checks (duplicate IDs, priority range, self-overlap)
//! - **`catalog`**: Section source / prerequisite parser seams and the end-to-end planner
//! - **`error`**: Error types for parsing, normalization and catalog access
//!
//! # Example
//!
//! ```
//! use u_timetable::ingest::{normalize, RawSection};
//! use u_timetable::solver::solve;
//!
//! let cse = normalize(
//!     &[
//!         RawSection::lecture("A", "A00", "TuTh", "11:00", "12:20"),
//!         RawSection::lab("A", "A01", "Mo", "13:00", "13:50"),
//!     ],
//!     8,
//!     "CSE 100",
//! )
//! .unwrap();
//! let phys = normalize(&[RawSection::lecture("D", "D00", "TuTh", "12:00", "12:50")], 3, "PHYS 2A").unwrap();
//!
//! let result = solve(&[cse, phys]);
//! assert_eq!(result.course_ids(), vec!["CSE 100"]);
//! assert_eq!(result.total_priority, 8);
//! ```
//!
//! # Architecture
//!
//! The core is synchronous and performs no I/O. Catalog fetching and
//! prerequisite parsing live with the host and are reached through the
//! traits in [`catalog`]. Logging goes through `tracing`; the crate never
//! installs a subscriber.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Kleinberg & Tardos (2005), "Algorithm Design", Ch. 6.1

pub mod catalog;
pub mod error;
pub mod ingest;
pub mod models;
pub mod solver;
pub mod validation;

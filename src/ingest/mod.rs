//! Catalog ingestion.
//!
//! Converts raw per-section catalog records into typed [`CourseEntry`]
//! values. All string parsing of days and times happens here; the solver
//! only ever sees typed sessions.
//!
//! [`CourseEntry`]: crate::models::CourseEntry

mod normalizer;
mod parse;
mod raw;

pub use normalizer::{normalize, BatchOutcome, LabPolicy, NormalizeRequest, Normalizer};
pub use parse::{parse_days, SectionRole};
pub use raw::RawSection;

//! Catalog seams and the end-to-end planner.
//!
//! The catalog fetch and the prerequisite parser are external services.
//! They plug in through [`SectionSource`] and [`PrerequisiteParser`];
//! [`StaticCatalog`] and [`JsonPrerequisiteParser`] are in-memory stand-ins
//! for fixtures and offline use.
//!
//! [`Planner`] drives fetch → normalize → validate → solve for a list of
//! [`CourseRequest`]s, collecting per-course failures.

mod planner;
mod source;

pub use planner::{CourseRequest, PlanOutcome, Planner, PlannerConfig};
pub use source::{JsonPrerequisiteParser, PrerequisiteParser, SectionSource, StaticCatalog};

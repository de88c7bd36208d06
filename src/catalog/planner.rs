//! Fetch, normalize, solve.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::SectionSource;
use crate::error::CatalogError;
use crate::ingest::{LabPolicy, Normalizer};
use crate::models::{CourseEntry, ScheduleResult};
use crate::solver::{ScheduleSolver, ScheduleStats, SolverConfig};
use crate::validation::validate_entries;

/// A course the user wants, with its priority weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub course_id: String,
    pub priority: u8,
}

impl CourseRequest {
    pub fn new(course_id: impl Into<String>, priority: u8) -> Self {
        Self {
            course_id: course_id.into(),
            priority,
        }
    }
}

/// Planner settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub solver: SolverConfig,
    pub lab_policy: LabPolicy,
}

/// What a planning run produced.
#[derive(Debug)]
pub struct PlanOutcome {
    /// Best timetable over the courses that could be loaded.
    pub result: ScheduleResult,
    /// Courses that went into the search.
    pub entries: Vec<CourseEntry>,
    /// Courses that could not be fetched or normalized, in request order.
    pub failures: Vec<CatalogError>,
}

impl PlanOutcome {
    /// Whether every requested course reached the search.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Requested courses that loaded but did not fit the timetable.
    pub fn excluded(&self) -> Vec<&str> {
        ScheduleStats::excluded(&self.result, &self.entries)
    }

    pub fn stats(&self) -> ScheduleStats {
        ScheduleStats::calculate(&self.result)
    }
}

/// Runs the full pipeline for a list of course requests.
///
/// A course that fails to load never stops the others.
///
/// # Example
///
/// ```
/// use u_timetable::catalog::{CourseRequest, Planner, StaticCatalog};
/// use u_timetable::ingest::RawSection;
///
/// let catalog = StaticCatalog::new()
///     .with_course("CSE 12", vec![RawSection::lecture("A", "A00", "MoWe", "09:00", "10:20")])
///     .with_course("MATH 20C", vec![RawSection::lecture("B", "B00", "Mo", "10:00", "10:50")]);
///
/// let outcome = Planner::new(catalog).plan(&[
///     CourseRequest::new("CSE 12", 9),
///     CourseRequest::new("MATH 20C", 4),
///     CourseRequest::new("CSE 999", 1),
/// ]);
/// assert_eq!(outcome.result.course_ids(), vec!["CSE 12"]);
/// assert_eq!(outcome.failures.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Planner<S> {
    source: S,
    config: PlannerConfig,
}

impl<S: SectionSource> Planner<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, PlannerConfig::default())
    }

    pub fn with_config(source: S, config: PlannerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Fetches and normalizes every requested course, then solves.
    pub fn plan(&self, requests: &[CourseRequest]) -> PlanOutcome {
        let normalizer = Normalizer::new().with_lab_policy(self.config.lab_policy);
        let mut entries = Vec::with_capacity(requests.len());
        let mut failures = Vec::new();

        for req in requests {
            let loaded = self
                .source
                .fetch_sections(&req.course_id)
                .and_then(|raw| {
                    normalizer
                        .normalize(&raw, req.priority, &req.course_id)
                        .map_err(CatalogError::from)
                });
            match loaded {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(course_id = %req.course_id, error = %e, "course skipped");
                    failures.push(e);
                }
            }
        }

        if let Err(issues) = validate_entries(&entries) {
            for issue in &issues {
                warn!(kind = ?issue.kind, "{}", issue.message);
            }
        }

        let result = ScheduleSolver::with_config(self.config.solver.clone()).solve(&entries);
        info!(
            requested = requests.len(),
            loaded = entries.len(),
            failed = failures.len(),
            scheduled = result.course_count(),
            total_priority = result.total_priority,
            truncated = result.truncated,
            "plan complete"
        );

        PlanOutcome {
            result,
            entries,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::error::NormalizeError;
    use crate::ingest::RawSection;
    use crate::models::{TimeSession, Weekday};
    use tracing_test::traced_test;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_course(
                "CSE 100",
                vec![
                    RawSection::lecture("A", "A00", "TuTh", "11:00", "12:20"),
                    RawSection::lab("A", "A01", "Mo", "13:00", "13:50"),
                    RawSection::lab("A", "A02", "We", "13:00", "13:50"),
                ],
            )
            .with_course(
                "MATH 20C",
                vec![
                    RawSection::lecture("B", "B00", "MoWeFr", "13:00", "13:50"),
                    RawSection::lecture("C", "C00", "MoWeFr", "15:00", "15:50"),
                ],
            )
            .with_course(
                "PHYS 2A",
                vec![RawSection::lecture("D", "D00", "TuTh", "11:30", "12:50")],
            )
            .with_course(
                "BROKEN",
                vec![RawSection::lecture("E", "E00", "Mo", "14:00", "13:00")],
            )
            .with_course(
                "BIO 1L",
                vec![RawSection::lab("F", "F01", "Fr", "08:00", "09:50")],
            )
    }

    #[test]
    fn test_plan_picks_best_combination() {
        let outcome = Planner::new(catalog()).plan(&[
            CourseRequest::new("CSE 100", 8),
            CourseRequest::new("MATH 20C", 5),
            CourseRequest::new("PHYS 2A", 3),
        ]);

        assert!(outcome.is_complete());
        assert_eq!(outcome.result.total_priority, 13);
        assert_eq!(outcome.result.course_ids(), vec!["CSE 100", "MATH 20C"]);
        // Lecture-only offering fits, so it is the first found
        assert_eq!(outcome.result.find("CSE 100").unwrap().offering.label(), "A00");
        assert_eq!(outcome.result.find("MATH 20C").unwrap().offering.label(), "B00");
        assert_eq!(outcome.excluded(), vec!["PHYS 2A"]);
        assert!(outcome.result.is_feasible());
    }

    #[test]
    fn test_plan_with_required_labs() {
        let config = PlannerConfig {
            lab_policy: LabPolicy::Required,
            ..PlannerConfig::default()
        };
        let outcome = Planner::with_config(catalog(), config).plan(&[
            CourseRequest::new("CSE 100", 8),
            CourseRequest::new("MATH 20C", 5),
        ]);

        // A01 (Mon 13:00) and A02 (Wed 13:00) both clash with B00; C00 is free
        assert_eq!(outcome.result.total_priority, 13);
        assert_eq!(outcome.result.find("CSE 100").unwrap().offering.label(), "A00 + A01");
        assert_eq!(outcome.result.find("MATH 20C").unwrap().offering.label(), "C00");
        assert_eq!(outcome.stats().lab_count, 1);
    }

    #[test]
    fn test_plan_respects_blocked_times() {
        let blocked = TimeSession::parse(Weekday::Mon, "15:00", "16:00", "work").unwrap();
        let config = PlannerConfig {
            solver: SolverConfig::new().with_blocked(blocked),
            lab_policy: LabPolicy::Required,
        };
        let outcome = Planner::with_config(catalog(), config).plan(&[
            CourseRequest::new("CSE 100", 8),
            CourseRequest::new("MATH 20C", 5),
        ]);
        // C00 is blocked and B00 clashes with both CSE 100 labs
        assert_eq!(outcome.result.total_priority, 8);
        assert_eq!(outcome.result.course_ids(), vec!["CSE 100"]);
    }

    #[traced_test]
    #[test]
    fn test_plan_isolates_failures() {
        let outcome = Planner::new(catalog()).plan(&[
            CourseRequest::new("NOPE 1", 10),
            CourseRequest::new("BROKEN", 10),
            CourseRequest::new("PHYS 2A", 3),
            CourseRequest::new("CSE 100", 11),
        ]);

        assert_eq!(outcome.failures.len(), 3);
        assert!(matches!(outcome.failures[0], CatalogError::NotFound { .. }));
        assert!(matches!(
            outcome.failures[1],
            CatalogError::Normalize(NormalizeError::InvalidSession { .. })
        ));
        assert!(matches!(
            outcome.failures[2],
            CatalogError::Normalize(NormalizeError::PriorityOutOfRange { priority: 11, .. })
        ));
        assert_eq!(outcome.result.course_ids(), vec!["PHYS 2A"]);
        assert!(logs_contain("course skipped"));
        assert!(logs_contain("plan complete"));
    }

    #[traced_test]
    #[test]
    fn test_plan_warns_on_duplicate_request() {
        let outcome = Planner::new(catalog()).plan(&[
            CourseRequest::new("PHYS 2A", 3),
            CourseRequest::new("PHYS 2A", 4),
        ]);
        assert_eq!(outcome.result.course_count(), 1);
        assert_eq!(outcome.result.total_priority, 4);
        assert!(logs_contain("Duplicate course ID"));
    }

    #[traced_test]
    #[test]
    fn test_plan_lab_only_course_is_excluded_not_failed() {
        let outcome = Planner::new(catalog()).plan(&[
            CourseRequest::new("BIO 1L", 10),
            CourseRequest::new("PHYS 2A", 3),
        ]);

        assert!(outcome.is_complete());
        assert_eq!(outcome.entries.len(), 2);
        assert!(!outcome.entries[0].has_offerings());
        assert_eq!(outcome.result.course_ids(), vec!["PHYS 2A"]);
        assert_eq!(outcome.excluded(), vec!["BIO 1L"]);
        assert!(logs_contain("has no offerings"));
    }

    #[test]
    fn test_plan_empty_request() {
        let outcome = Planner::new(catalog()).plan(&[]);
        assert!(outcome.result.is_empty());
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_config_from_json() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{"lab_policy": "required", "solver": {"max_nodes": 500}}"#).unwrap();
        assert_eq!(config.lab_policy, LabPolicy::Required);
        assert_eq!(config.solver.max_nodes, Some(500));
        assert!(config.solver.branch_and_bound);
    }

    #[test]
    fn test_request_wire_shape() {
        let req: CourseRequest = serde_json::from_str(r#"{"courseId": "CSE 12", "priority": 7}"#).unwrap();
        assert_eq!(req, CourseRequest::new("CSE 12", 7));
    }
}

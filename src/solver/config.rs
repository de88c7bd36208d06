//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::models::TimeSession;

/// Search settings.
///
/// The defaults give an unbounded exact search. Hosts may load this from
/// JSON; missing fields keep their defaults.
///
/// # Example
/// ```
/// use u_timetable::solver::SolverConfig;
///
/// let cfg: SolverConfig = serde_json::from_str(r#"{"max_nodes": 100000}"#).unwrap();
/// assert_eq!(cfg.max_nodes, Some(100_000));
/// assert!(cfg.branch_and_bound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Skip branches that cannot beat the best timetable found so far.
    /// Never changes the result.
    pub branch_and_bound: bool,
    /// Stop after visiting this many search nodes. `None` = unlimited.
    pub max_nodes: Option<u64>,
    /// Stop after this much wall time (ms). `None` = unlimited.
    pub time_limit_ms: Option<u64>,
    /// Times the user cannot attend. Offerings touching them are skipped.
    pub blocked: Vec<TimeSession>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            branch_and_bound: true,
            max_nodes: None,
            time_limit_ms: None,
            blocked: Vec::new(),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of search nodes.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Caps the search wall time.
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    /// Adds a time the user cannot attend.
    pub fn with_blocked(mut self, session: TimeSession) -> Self {
        self.blocked.push(session);
        self
    }

    /// Disables branch-and-bound pruning (plain exhaustive search).
    pub fn without_pruning(mut self) -> Self {
        self.branch_and_bound = false;
        self
    }

    /// Whether any budget is set.
    pub fn is_bounded(&self) -> bool {
        self.max_nodes.is_some() || self.time_limit_ms.is_some()
    }
}

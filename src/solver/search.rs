//! Exhaustive include/exclude timetable search.
//!
//! # Algorithm
//!
//! 1. Order courses by priority (descending), then course id (ascending).
//! 2. Drop offerings that overlap themselves or a blocked time.
//! 3. Depth-first over courses. At each course try every remaining
//!    offering that fits the sessions already placed, in construction
//!    order, then try leaving the course out.
//! 4. Keep the first complete assignment with the highest total priority.
//!
//! Branch-and-bound cuts a branch once the priorities still reachable
//! cannot strictly beat the best total found, which leaves the answer
//! unchanged.
//!
//! # Complexity
//! O(∏ (oᵢ + 1)) in the worst case where oᵢ = offerings of course i.
//! Realistic inputs (a few dozen courses, a handful of offerings each)
//! prune to a small fraction of that.
//!
//! # Reference
//! Kleinberg & Tardos (2005), "Algorithm Design", Ch. 6.1 (Weighted Interval Scheduling)

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use super::SolverConfig;
use crate::models::{CourseEntry, Offering, ScheduleResult, ScheduledCourse, TimeSession};

/// How often (in nodes) the wall clock is consulted.
const CLOCK_CHECK_INTERVAL: u64 = 256;

/// Priority-maximizing timetable solver.
///
/// # Example
///
/// ```
/// use u_timetable::models::{CourseEntry, Offering, TimeSession, Weekday};
/// use u_timetable::solver::ScheduleSolver;
///
/// let mon = |a: &str, b: &str| TimeSession::parse(Weekday::Mon, a, b, "lecture").unwrap();
/// let entries = vec![
///     CourseEntry::new("A", 3).with_offering(Offering::new("A", "A00", vec![mon("09:00", "10:00")])),
///     CourseEntry::new("B", 8).with_offering(Offering::new("B", "B00", vec![mon("09:30", "10:30")])),
/// ];
///
/// let result = ScheduleSolver::new().solve(&entries);
/// assert_eq!(result.course_ids(), vec!["B"]);
/// assert_eq!(result.total_priority, 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleSolver {
    config: SolverConfig,
}

impl ScheduleSolver {
    /// Creates a solver with the default (exact, unbounded) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds the feasible timetable with maximum total priority.
    ///
    /// Total over any input: an empty or fully unschedulable list yields an
    /// empty result. Without a wall-time budget, identical input always
    /// yields an identical result; `time_limit_ms` makes the cut-off point
    /// depend on machine speed.
    pub fn solve(&self, entries: &[CourseEntry]) -> ScheduleResult {
        let candidates = self.prepare(entries);
        debug!(
            courses = entries.len(),
            schedulable = candidates.len(),
            offerings = candidates.iter().map(|c| c.offerings.len()).sum::<usize>(),
            "starting timetable search"
        );

        let mut search = Search::new(&candidates, &self.config);
        search.visit(0);

        let mut result = ScheduleResult::new();
        if let Some((_, picks)) = &search.best {
            for &(ci, oi) in picks {
                let cand = &candidates[ci];
                result.push(ScheduledCourse::new(
                    cand.entry.course_id.clone(),
                    cand.entry.priority,
                    cand.offerings[oi].clone(),
                ));
            }
        }
        result.truncated = search.truncated;
        result.nodes_explored = search.nodes;

        if result.truncated {
            warn!(
                nodes = result.nodes_explored,
                total_priority = result.total_priority,
                "search budget exhausted; returning best timetable found so far"
            );
        }
        debug!(
            chosen = result.course_count(),
            total_priority = result.total_priority,
            nodes = result.nodes_explored,
            "timetable search finished"
        );
        result
    }

    /// Orders courses and filters their offerings down to viable ones.
    ///
    /// Courses left without a viable offering can only be excluded, so
    /// they are removed from the search altogether.
    fn prepare<'a>(&self, entries: &'a [CourseEntry]) -> Vec<Candidate<'a>> {
        let mut order: Vec<&CourseEntry> = entries.iter().collect();
        order.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.course_id.cmp(&b.course_id))
        });

        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut candidates = Vec::with_capacity(order.len());
        for entry in order {
            let offerings: Vec<&Offering> = entry
                .offerings
                .iter()
                .filter(|o| self.is_viable(o))
                .collect();
            if offerings.is_empty() {
                trace!(course_id = %entry.course_id, "no viable offering; always excluded");
                continue;
            }
            let next = slots.len();
            let slot = *slots.entry(entry.course_id.as_str()).or_insert(next);
            candidates.push(Candidate {
                entry,
                offerings,
                slot,
            });
        }
        candidates
    }

    fn is_viable(&self, offering: &Offering) -> bool {
        offering.is_self_consistent()
            && !offering
                .sessions()
                .any(|s| self.config.blocked.iter().any(|b| s.overlaps(b)))
    }
}

/// Solves with the default configuration. See [`ScheduleSolver::solve`].
pub fn solve(entries: &[CourseEntry]) -> ScheduleResult {
    ScheduleSolver::new().solve(entries)
}

/// A course in search order with its viable offerings.
struct Candidate<'a> {
    entry: &'a CourseEntry,
    offerings: Vec<&'a Offering>,
    /// Shared by entries with the same course id, so at most one is taken.
    slot: usize,
}

/// Depth-first search state. Lives only for one `solve` call.
struct Search<'a, 'c> {
    candidates: &'c [Candidate<'a>],
    config: &'c SolverConfig,
    /// `bound[i]` = sum of priorities of candidates `i..`.
    bound: Vec<u32>,
    /// Placed sessions, per weekday.
    busy: [Vec<&'a TimeSession>; 7],
    taken: Vec<bool>,
    current: Vec<(usize, usize)>,
    current_total: u32,
    best: Option<(u32, Vec<(usize, usize)>)>,
    nodes: u64,
    truncated: bool,
    started: Instant,
}

impl<'a, 'c> Search<'a, 'c> {
    fn new(candidates: &'c [Candidate<'a>], config: &'c SolverConfig) -> Self {
        let mut bound = vec![0u32; candidates.len() + 1];
        for i in (0..candidates.len()).rev() {
            bound[i] = bound[i + 1] + u32::from(candidates[i].entry.priority);
        }
        let slot_count = candidates.iter().map(|c| c.slot + 1).max().unwrap_or(0);

        Self {
            candidates,
            config,
            bound,
            busy: std::array::from_fn(|_| Vec::new()),
            taken: vec![false; slot_count],
            current: Vec::with_capacity(candidates.len()),
            current_total: 0,
            best: None,
            nodes: 0,
            truncated: false,
            started: Instant::now(),
        }
    }

    fn visit(&mut self, depth: usize) {
        if self.truncated {
            return;
        }
        self.nodes += 1;
        if self.budget_exhausted() {
            self.truncated = true;
            // The partial assignment is itself feasible (the rest excluded).
            self.record();
            return;
        }

        if self.config.branch_and_bound {
            if let Some((best_total, _)) = &self.best {
                if self.current_total + self.bound[depth] <= *best_total {
                    return;
                }
            }
        }

        if depth == self.candidates.len() {
            self.record();
            return;
        }

        let candidates = self.candidates;
        let cand = &candidates[depth];
        if !self.taken[cand.slot] {
            let priority = u32::from(cand.entry.priority);
            for (oi, &offering) in cand.offerings.iter().enumerate() {
                if !self.fits(offering) {
                    continue;
                }
                self.place(offering);
                self.taken[cand.slot] = true;
                self.current.push((depth, oi));
                self.current_total += priority;

                self.visit(depth + 1);

                self.current_total -= priority;
                self.current.pop();
                self.taken[cand.slot] = false;
                self.remove(offering);

                if self.truncated {
                    return;
                }
            }
        }

        // exclude branch
        self.visit(depth + 1);
    }

    /// Keeps the current assignment if it strictly beats the best so far.
    fn record(&mut self) {
        let improves = match &self.best {
            None => true,
            Some((total, _)) => self.current_total > *total,
        };
        if improves {
            trace!(total = self.current_total, nodes = self.nodes, "new best timetable");
            self.best = Some((self.current_total, self.current.clone()));
        }
    }

    fn fits(&self, offering: &Offering) -> bool {
        offering.sessions().all(|s| {
            self.busy[s.day().index()]
                .iter()
                .all(|placed| !s.overlaps(placed))
        })
    }

    fn place(&mut self, offering: &'a Offering) {
        for s in offering.sessions() {
            self.busy[s.day().index()].push(s);
        }
    }

    fn remove(&mut self, offering: &Offering) {
        // Stack discipline: this offering's sessions are the latest on each day.
        for s in offering.sessions() {
            self.busy[s.day().index()].pop();
        }
    }

    fn budget_exhausted(&self) -> bool {
        if let Some(max) = self.config.max_nodes {
            if self.nodes > max {
                return true;
            }
        }
        if let Some(limit) = self.config.time_limit_ms {
            if self.nodes % CLOCK_CHECK_INTERVAL == 0
                && self.started.elapsed() >= Duration::from_millis(limit)
            {
                return true;
            }
        }
        false
    }
}

//! Prerequisite logic trees.
//!
//! Catalog prerequisites are AND/OR combinations of courses, e.g.
//! "MATH 18 and (CSE 8B or CSE 11)". Trees usually come from an external
//! text-to-tree service (see [`crate::catalog::PrerequisiteParser`]); this
//! module only evaluates and reshapes them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node of a prerequisite tree.
///
/// Serialized as `{"type": "course", "id": "..."}`,
/// `{"type": "all", "of": [...]}` or `{"type": "any", "of": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrereqNode {
    /// A single course requirement.
    Course { id: String },
    /// Every child must be satisfied. Empty = trivially satisfied.
    All { of: Vec<PrereqNode> },
    /// At least one child must be satisfied. Empty = never satisfied.
    Any { of: Vec<PrereqNode> },
}

impl PrereqNode {
    pub fn course(id: impl Into<String>) -> Self {
        PrereqNode::Course { id: id.into() }
    }

    pub fn all(of: Vec<PrereqNode>) -> Self {
        PrereqNode::All { of }
    }

    pub fn any(of: Vec<PrereqNode>) -> Self {
        PrereqNode::Any { of }
    }

    /// Whether the completed courses satisfy this tree.
    pub fn is_satisfied_by(&self, completed: &HashSet<&str>) -> bool {
        match self {
            PrereqNode::Course { id } => completed.contains(id.as_str()),
            PrereqNode::All { of } => of.iter().all(|n| n.is_satisfied_by(completed)),
            PrereqNode::Any { of } => of.iter().any(|n| n.is_satisfied_by(completed)),
        }
    }

    /// Distinct course ids mentioned anywhere in the tree, first-seen order.
    pub fn courses(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.collect_courses(&mut seen, &mut out);
        out
    }

    fn collect_courses<'a>(&'a self, seen: &mut HashSet<&'a str>, out: &mut Vec<&'a str>) {
        match self {
            PrereqNode::Course { id } => {
                if seen.insert(id.as_str()) {
                    out.push(id.as_str());
                }
            }
            PrereqNode::All { of } | PrereqNode::Any { of } => {
                for n in of {
                    n.collect_courses(seen, out);
                }
            }
        }
    }

    /// The unsatisfied part of the tree, or `None` if already satisfied.
    ///
    /// Satisfied children of an `All` are dropped. An unsatisfied `Any` is
    /// returned whole since any one branch would do.
    pub fn missing(&self, completed: &HashSet<&str>) -> Option<PrereqNode> {
        if self.is_satisfied_by(completed) {
            return None;
        }
        match self {
            PrereqNode::All { of } => {
                let rest: Vec<PrereqNode> = of.iter().filter_map(|n| n.missing(completed)).collect();
                Some(PrereqNode::All { of: rest }.simplify())
            }
            other => Some(other.clone().simplify()),
        }
    }

    /// Flattens nested same-kind nodes and unwraps single-child nodes.
    pub fn simplify(self) -> PrereqNode {
        match self {
            PrereqNode::Course { .. } => self,
            PrereqNode::All { of } => Self::flatten(of, true),
            PrereqNode::Any { of } => Self::flatten(of, false),
        }
    }

    fn flatten(children: Vec<PrereqNode>, is_all: bool) -> PrereqNode {
        let mut flat = Vec::with_capacity(children.len());
        for child in children.into_iter().map(PrereqNode::simplify) {
            match (child, is_all) {
                (PrereqNode::All { of }, true) | (PrereqNode::Any { of }, false) => flat.extend(of),
                (other, _) => flat.push(other),
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        if is_all {
            PrereqNode::All { of: flat }
        } else {
            PrereqNode::Any { of: flat }
        }
    }

    /// Tree depth. A single course has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            PrereqNode::Course { .. } => 1,
            PrereqNode::All { of } | PrereqNode::Any { of } => {
                1 + of.iter().map(PrereqNode::depth).max().unwrap_or(0)
            }
        }
    }
}

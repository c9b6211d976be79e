//! Implementation of the phases of an install run.
//!
//! ## Overview
//!
//! Installing a component follows 3 phases:
//! 1. Planning - Expand the requested component into a dependency-first,
//!    deduplicated install plan
//! 2. Resolution - Load each planned component's declaration (cached per run)
//! 3. Synchronization - Copy each component's declared files into the target
//!    asset root under the overwrite policy
//!
//! Phases 2 and 3 run once per plan entry, strictly in plan order, so a
//! dependency's files are on disk before any dependent component is copied.
//! The orchestrator ties the phases together and accumulates diagnostics.

use std::fmt;
use std::path::PathBuf;

// Phase modules
pub mod orchestrator;
pub mod planning;
pub mod sync;

pub use orchestrator::{InstallOptions, InstallOutcome};
pub use planning::{build_dependency_tree, plan, plan_with};

/// Ordered list of component names to install for one request.
///
/// Dependencies come first, every name appears at most once, and the
/// requested component is last whenever it could be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    pub order: Vec<String>,
}

impl InstallPlan {
    pub fn new(order: Vec<String>) -> Self {
        Self { order }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.order.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }

    /// Every entry except the last one, i.e. the dependencies of the
    /// requested component.
    pub fn dependencies(&self) -> &[String] {
        match self.order.split_last() {
            Some((_, deps)) => deps,
            None => &[],
        }
    }
}

impl fmt::Display for InstallPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.order.join(" -> "))
    }
}

/// Overwrite policy for one synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPolicy {
    /// Replace destination files that already exist
    pub force_overwrite: bool,
    /// Directory (relative to the target root) that replaces every declared
    /// target directory; file names are kept
    pub target_subpath_override: Option<PathBuf>,
}

impl SyncPolicy {
    pub fn overwrite() -> Self {
        Self {
            force_overwrite: true,
            target_subpath_override: None,
        }
    }

    pub fn with_subpath(mut self, subpath: impl Into<PathBuf>) -> Self {
        self.target_subpath_override = Some(subpath.into());
        self
    }
}

/// What happened to the files of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Destination paths that were written
    pub copied: Vec<PathBuf>,
    /// Destination paths left untouched because they already existed
    pub skipped: Vec<PathBuf>,
}

impl CopyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_empty() && self.skipped.is_empty()
    }

    /// Append another report's paths, keeping order.
    pub fn merge(&mut self, other: CopyReport) {
        self.copied.extend(other.copied);
        self.skipped.extend(other.skipped);
    }
}

/// Node of a component's dependency tree, used for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub name: String,
    /// Dependencies in declared order
    pub children: Vec<DependencyNode>,
    /// The component could not be resolved
    pub missing: bool,
    /// This edge closes a cycle; children are not expanded
    pub cyclic: bool,
}

impl DependencyNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            missing: false,
            cyclic: false,
        }
    }

    pub fn add_child(&mut self, child: DependencyNode) {
        self.children.push(child);
    }
}

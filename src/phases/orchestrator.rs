//! Orchestrator for the complete install operation
//!
//! This module coordinates the phases to provide a clean API for installing
//! one or more components into a target asset root.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use super::{planning, sync, CopyReport, InstallPlan, SyncPolicy};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::metadata::MetadataResolver;
use crate::registry::Registry;

/// Options for one install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub policy: SyncPolicy,
    /// Expand and install dependencies; when false only the requested
    /// components themselves are installed
    pub include_dependencies: bool,
    /// Checked between plan entries; never interrupts a file copy. Set by
    /// embedding callers. The CLI installs in one pass and leaves it `None`.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            policy: SyncPolicy::default(),
            include_dependencies: true,
            cancel: None,
        }
    }
}

impl InstallOptions {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Files copied for one plan entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReport {
    pub name: String,
    /// The top-level request this entry was planned for
    pub requested_by: String,
    pub report: CopyReport,
}

/// Everything that happened during one install run.
#[derive(Debug, Clone, Default)]
pub struct InstallOutcome {
    /// One plan per requested component, in request order
    pub plans: Vec<(String, InstallPlan)>,
    /// One report per synchronized plan entry, in sync order
    pub components: Vec<ComponentReport>,
    pub diagnostics: Diagnostics,
    /// The run stopped early because cancellation was requested
    pub cancelled: bool,
}

impl InstallOutcome {
    /// All copy reports merged into one.
    pub fn total(&self) -> CopyReport {
        let mut total = CopyReport::new();
        for component in &self.components {
            total.merge(component.report.clone());
        }
        total
    }

    /// Report for a component, if it was synchronized.
    pub fn report_for(&self, name: &str) -> Option<&CopyReport> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.report)
    }
}

/// Plan every requested component without touching the filesystem.
pub fn execute_plan(
    registry: &Registry,
    roots: &[String],
    include_dependencies: bool,
) -> (Vec<(String, InstallPlan)>, Diagnostics) {
    let mut resolver = MetadataResolver::new();
    let mut plans = Vec::with_capacity(roots.len());
    let mut diagnostics = Diagnostics::new();

    for root in roots {
        let (plan, found) = plan_root(registry, &mut resolver, root, include_dependencies);
        diagnostics.extend(found);
        plans.push((root.clone(), plan));
    }

    (plans, diagnostics)
}

/// Execute the complete install operation
///
/// For each requested component, in order:
/// 1. Plan its install (dependencies first, deduplicated within the request)
/// 2. For each plan entry, resolve its declaration from the shared cache
/// 3. Copy the entry's files into `target_root`
///
/// Requests are planned independently: a dependency shared by two requests
/// is synchronized once per request, and the second pass normally reports
/// its files as skipped.
pub fn execute_install(
    registry: &Registry,
    roots: &[String],
    target_root: &Path,
    options: &InstallOptions,
) -> InstallOutcome {
    let mut resolver = MetadataResolver::new();
    let mut outcome = InstallOutcome::default();

    'requests: for root in roots {
        let (plan, found) = plan_root(registry, &mut resolver, root, options.include_dependencies);
        outcome.diagnostics.extend(found);
        info!("Installing '{}': {}", root, plan);

        for name in plan.iter() {
            if options.is_cancelled() {
                info!("Install cancelled before '{}'", name);
                outcome.cancelled = true;
                outcome.plans.push((root.clone(), plan.clone()));
                break 'requests;
            }

            let (Some(entry), Ok(metadata)) = (registry.find(name), resolver.load(registry, name))
            else {
                continue;
            };

            let component_dir = registry.component_dir(entry);
            let (report, found) = sync::execute(&component_dir, &metadata, target_root, &options.policy);
            debug!(
                "'{}': {} copied, {} skipped",
                name,
                report.copied.len(),
                report.skipped.len()
            );
            outcome.diagnostics.extend(found);
            outcome.components.push(ComponentReport {
                name: name.to_string(),
                requested_by: root.clone(),
                report,
            });
        }

        outcome.plans.push((root.clone(), plan));
    }

    outcome
}

fn plan_root(
    registry: &Registry,
    resolver: &mut MetadataResolver,
    root: &str,
    include_dependencies: bool,
) -> (InstallPlan, Diagnostics) {
    if include_dependencies {
        return planning::plan_with(registry, resolver, root);
    }

    let mut diagnostics = Diagnostics::new();
    match resolver.load(registry, root) {
        Ok(_) => (InstallPlan::new(vec![root.to_string()]), diagnostics),
        Err(e) => {
            diagnostics.push(Diagnostic::from_error(&e));
            (InstallPlan::default(), diagnostics)
        }
    }
}

//! Phase 1: Planning the Install
//!
//! This phase expands a requested component into the ordered list of
//! components that must be installed for it.
//!
//! ## Process
//!
//! 1.  **Depth-First Expansion**: Starting at the requested component, each
//!     declared dependency is expanded before the component itself is
//!     appended (post-order), so dependencies always precede their
//!     dependents for an acyclic graph.
//!
//! 2.  **Visited Tracking**: A `HashSet` records every name expanded in this
//!     call. A second visit is a no-op, which both deduplicates shared
//!     dependencies (diamonds) and guarantees termination on cycles.
//!
//! 3.  **Explicit Stack**: The traversal keeps its own frame stack instead of
//!     recursing, so deep dependency chains cannot exhaust the call stack.
//!     The produced order is identical to the recursive formulation.
//!
//! Names that cannot be resolved (unknown to the registry, or with a missing
//! or malformed declaration) are visited once, left out of the plan and
//! reported as diagnostics. A dependency edge back to a component that is
//! still being expanded is reported as a `DependencyCycle` warning; the plan
//! keeps the best-effort order in which each name appears once.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};

use super::{DependencyNode, InstallPlan};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::metadata::{ComponentMetadata, MetadataResolver};
use crate::registry::Registry;

/// A component whose dependencies are being expanded.
struct Frame {
    name: String,
    metadata: Arc<ComponentMetadata>,
    next_dependency: usize,
}

/// Plan the install of `root` with a fresh metadata resolver.
pub fn plan(registry: &Registry, root: &str) -> (InstallPlan, Diagnostics) {
    let mut resolver = MetadataResolver::new();
    plan_with(registry, &mut resolver, root)
}

/// Plan the install of `root`, sharing the caller's metadata cache.
///
/// Each call owns its own visited set; deduplication never spans calls.
pub fn plan_with(
    registry: &Registry,
    resolver: &mut MetadataResolver,
    root: &str,
) -> (InstallPlan, Diagnostics) {
    let mut order = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut in_progress: HashSet<String> = HashSet::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut diagnostics = Diagnostics::new();

    if let Some(frame) = enter(registry, resolver, root, None, &mut visited, &mut diagnostics) {
        in_progress.insert(frame.name.clone());
        stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
        let Some(dependency) = frame
            .metadata
            .dependencies
            .get(frame.next_dependency)
            .cloned()
        else {
            // All dependencies expanded: the component itself comes next
            if let Some(done) = stack.pop() {
                in_progress.remove(&done.name);
                order.push(done.name);
            }
            continue;
        };
        frame.next_dependency += 1;
        let parent = frame.name.clone();

        if visited.contains(&dependency) {
            if in_progress.contains(&dependency) {
                let cycle = describe_cycle(&stack, &dependency);
                warn!("Dependency cycle detected: {}", cycle);
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::DependencyCycle,
                        format!("Dependency cycle detected: {}", cycle),
                    )
                    .with_component(parent),
                );
            }
            continue;
        }

        if let Some(child) = enter(
            registry,
            resolver,
            &dependency,
            Some(&parent),
            &mut visited,
            &mut diagnostics,
        ) {
            in_progress.insert(child.name.clone());
            stack.push(child);
        }
    }

    debug!("Install plan for '{}': {}", root, order.join(", "));
    (InstallPlan::new(order), diagnostics)
}

/// Mark `name` visited and resolve it into a frame, or record why it can't be.
fn enter(
    registry: &Registry,
    resolver: &mut MetadataResolver,
    name: &str,
    required_by: Option<&str>,
    visited: &mut HashSet<String>,
    diagnostics: &mut Diagnostics,
) -> Option<Frame> {
    if !visited.insert(name.to_string()) {
        return None;
    }

    match resolver.load(registry, name) {
        Ok(metadata) => Some(Frame {
            name: name.to_string(),
            metadata,
            next_dependency: 0,
        }),
        Err(e) => {
            let mut diagnostic = Diagnostic::from_error(&e);
            if let Some(parent) = required_by {
                diagnostic.message = format!("{} (required by {})", diagnostic.message, parent);
            }
            warn!("{}", diagnostic.message);
            diagnostics.push(diagnostic);
            None
        }
    }
}

/// Render the in-progress path from `back_to` to the top of the stack,
/// closed by the edge back to `back_to`.
fn describe_cycle(stack: &[Frame], back_to: &str) -> String {
    let mut names: Vec<&str> = stack
        .iter()
        .map(|f| f.name.as_str())
        .skip_while(|n| *n != back_to)
        .collect();
    names.push(back_to);
    names.join(" -> ")
}

/// Build the dependency tree of `root` for display.
///
/// Shared dependencies appear under every component that declares them.
/// Expansion stops at `max_depth` and at edges that lead back to a component
/// on the current path.
pub fn build_dependency_tree(
    registry: &Registry,
    resolver: &mut MetadataResolver,
    root: &str,
    max_depth: usize,
) -> DependencyNode {
    let mut path = Vec::new();
    build_node(registry, resolver, root, max_depth, 0, &mut path)
}

fn build_node(
    registry: &Registry,
    resolver: &mut MetadataResolver,
    name: &str,
    max_depth: usize,
    depth: usize,
    path: &mut Vec<String>,
) -> DependencyNode {
    let mut node = DependencyNode::new(name);

    if path.iter().any(|n| n == name) {
        node.cyclic = true;
        return node;
    }

    let Some(metadata) = resolver.resolve(registry, name) else {
        node.missing = true;
        return node;
    };

    if depth >= max_depth {
        return node;
    }

    path.push(name.to_string());
    for dependency in &metadata.dependencies {
        let child = build_node(registry, resolver, dependency, max_depth, depth + 1, path);
        node.add_child(child);
    }
    path.pop();

    node
}

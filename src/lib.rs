//! # Cocos Components Library
//!
//! This library installs named components from a shared component library
//! into a Cocos Creator project. A component is an opaque bundle of files
//! (scripts, prefabs, textures, ...) plus a `component.json` declaration that
//! lists those files and the other components it depends on.
//!
//! It is used by the `cocos-components` command-line tool but can be
//! embedded in other tooling that needs to materialize components.
//!
//! ## Quick Example
//!
//! ```
//! use cocos_components::phases::planning;
//! use cocos_components::registry::{Registry, RegistryEntry};
//!
//! // A registry whose component directories do not exist yet resolves
//! // nothing, so the plan is empty and the problem is reported instead.
//! let registry = Registry::new("/nonexistent", vec![RegistryEntry::new("button", "button")]);
//! let (plan, diagnostics) = planning::plan(&registry, "button");
//! assert!(plan.is_empty());
//! assert!(diagnostics.has_errors());
//! ```
//!
//! ## Core Concepts
//!
//! - **Registry (`registry`)**: The catalog of installable components, loaded
//!   once per run as an immutable snapshot. Lookups are exact by name.
//! - **Metadata (`metadata`)**: Each component's declaration, loaded lazily
//!   and cached by name for the duration of a run.
//! - **Phases (`phases`)**: Planning a dependency-first install order,
//!   synchronizing each component's files under an overwrite policy, and the
//!   orchestrator that runs them in order.
//! - **Diagnostics (`diagnostics`)**: Per-file and per-component problems are
//!   accumulated as structured records instead of aborting the run.
//! - **Configuration (`config`, `defaults`)**: Project and library settings.
//! - **Library store (`git`)**: Fetching and updating the library checkout.
//!
//! ## Execution Flow
//!
//! 1.  **Planning**: Expand each requested component into an install plan.
//! 2.  **Resolution**: Load each planned component's declaration.
//! 3.  **Synchronization**: Copy declared files and their `.meta` sidecars,
//!     skipping files that already exist unless overwriting is forced.

pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod git;
pub mod metadata;
pub mod output;
pub mod phases;
pub mod registry;
pub mod suggestions;

#[cfg(test)]
mod planning_proptest;

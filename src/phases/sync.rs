//! Phase 3: Synchronizing Files
//!
//! This phase copies the files declared by one component from the library
//! into the target asset root.
//!
//! ## Process
//!
//! For each declared file, in declared order:
//!
//! 1.  **Resolve Paths**: The source is relative to the component directory.
//!     The destination is the declared target path under the target root, or
//!     `<root>/<override>/<file name>` when a subpath override is set. Absolute
//!     paths and `..` parts are rejected with a `CopyFailed` error, so reads
//!     stay inside the component and writes stay inside the target root.
//!
//! 2.  **Check Source**: A missing source produces a `MissingSource` warning
//!     and the file is skipped without touching the destination.
//!
//! 3.  **Check Destination**: An existing destination is left alone and
//!     recorded as skipped unless overwriting is forced.
//!
//! 4.  **Copy**: Parent directories are created and the file is copied as one
//!     step. A failure is reported against that file only.
//!
//! 5.  **Sidecar**: If `<source>.meta` exists it is copied to
//!     `<destination>.meta` under the same overwrite flag. The sidecar follows
//!     the primary file's decision and is never reported on its own.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, trace, warn};

use super::{CopyReport, SyncPolicy};
use crate::defaults::SIDECAR_SUFFIX;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Error, Result};
use crate::metadata::{ComponentMetadata, FileEntry};

/// Execute Phase 3: copy one component's files into `target_root`
///
/// `component_dir` is the component's directory inside the library. Never
/// fails as a whole: per-file problems are returned as diagnostics.
pub fn execute(
    component_dir: &Path,
    metadata: &ComponentMetadata,
    target_root: &Path,
    policy: &SyncPolicy,
) -> (CopyReport, Diagnostics) {
    let mut report = CopyReport::new();
    let mut diagnostics = Diagnostics::new();

    for file in &metadata.files {
        let Some(source) = join_within(component_dir, Path::new(&file.source_relative_path))
        else {
            reject(&mut diagnostics, metadata, PathBuf::from(&file.source_relative_path));
            continue;
        };
        let Some(destination) = destination_path(file, target_root, policy) else {
            let rejected = policy
                .target_subpath_override
                .clone()
                .filter(|subpath| join_within(target_root, subpath).is_none())
                .unwrap_or_else(|| PathBuf::from(&file.target_relative_path));
            reject(&mut diagnostics, metadata, rejected);
            continue;
        };

        trace!("Checking {} -> {}", source.display(), destination.display());

        if !source.exists() {
            let error = Error::MissingSource {
                component: metadata.name.clone(),
                path: source,
            };
            warn!("{}", error);
            diagnostics.push(Diagnostic::from_error(&error));
            continue;
        }

        if destination.exists() && !policy.force_overwrite {
            debug!("Skipping existing {}", destination.display());
            report.skipped.push(destination);
            continue;
        }

        if let Err(e) = copy_file(&source, &destination) {
            warn!("{}", e);
            diagnostics.push(Diagnostic::from_error(&e).with_component(&metadata.name));
            continue;
        }
        debug!("Copied {}", destination.display());

        let sidecar_source = sidecar_path(&source);
        if sidecar_source.exists() {
            let sidecar_destination = sidecar_path(&destination);
            if policy.force_overwrite || !sidecar_destination.exists() {
                if let Err(e) = copy_file(&sidecar_source, &sidecar_destination) {
                    warn!("{}", e);
                    diagnostics.push(Diagnostic::from_error(&e).with_component(&metadata.name));
                }
            }
        }

        report.copied.push(destination);
    }

    (report, diagnostics)
}

/// Where a declared file lands under `target_root`, or `None` if it would
/// land outside it.
pub fn destination_path(
    file: &FileEntry,
    target_root: &Path,
    policy: &SyncPolicy,
) -> Option<PathBuf> {
    let declared = Path::new(&file.target_relative_path);

    match &policy.target_subpath_override {
        Some(subpath) => {
            let file_name = declared.file_name()?;
            join_within(target_root, subpath).map(|dir| dir.join(file_name))
        }
        None => join_within(target_root, declared),
    }
}

/// `root.join(relative)`, or `None` if `relative` is absolute or has `..` parts.
fn join_within(root: &Path, relative: &Path) -> Option<PathBuf> {
    relative
        .components()
        .all(|part| matches!(part, Component::Normal(_) | Component::CurDir))
        .then(|| root.join(relative))
}

fn reject(diagnostics: &mut Diagnostics, metadata: &ComponentMetadata, path: PathBuf) {
    let error = Error::UnsafePath {
        component: metadata.name.clone(),
        path,
    };
    warn!("{}", error);
    diagnostics.push(Diagnostic::from_error(&error));
}

/// `<path>.meta`
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Create the destination's parent directories and copy the file.
fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    let copy_error = |e: std::io::Error| Error::Copy {
        src: source.to_path_buf(),
        dst: destination.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(copy_error)?;
    }
    fs::copy(source, destination).map_err(copy_error)?;
    Ok(())
}

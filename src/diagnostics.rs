//! Structured, non-fatal problems accumulated during a run.
//!
//! Nothing in the install pipeline unwinds on a single bad component or file.
//! Instead each problem becomes a [`Diagnostic`] and the caller decides what
//! the accumulated list means for its exit status.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A requested or referenced name is absent from the registry.
    UnknownComponent,
    /// A component's `component.json` is missing or malformed.
    InvalidMetadata,
    /// A declared source file does not exist.
    MissingSource,
    /// Directory creation or a file copy failed.
    CopyFailed,
    /// A dependency edge points back to a component still being expanded.
    DependencyCycle,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::MissingSource | DiagnosticKind::DependencyCycle => Severity::Warning,
            DiagnosticKind::UnknownComponent
            | DiagnosticKind::InvalidMetadata
            | DiagnosticKind::CopyFailed => Severity::Error,
        }
    }
}

/// A single recorded problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Component the problem belongs to, when known.
    pub component: Option<String>,
    /// File the problem belongs to, for per-file problems.
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            component: None,
            path: None,
            message: message.into(),
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Convert a library error into the diagnostic it represents.
    ///
    /// Errors with no per-item meaning are recorded as copy failures, since
    /// the only place they surface mid-run is file I/O.
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::UnknownComponent { name } => {
                Self::new(DiagnosticKind::UnknownComponent, error.to_string()).with_component(name)
            }
            Error::Metadata {
                component, path, ..
            } => Self::new(DiagnosticKind::InvalidMetadata, error.to_string())
                .with_component(component)
                .with_path(path),
            Error::MissingSource { component, path } => {
                Self::new(DiagnosticKind::MissingSource, error.to_string())
                    .with_component(component)
                    .with_path(path)
            }
            Error::UnsafePath { component, path } => {
                Self::new(DiagnosticKind::CopyFailed, error.to_string())
                    .with_component(component)
                    .with_path(path)
            }
            Error::Copy { dst, .. } => {
                Self::new(DiagnosticKind::CopyFailed, error.to_string()).with_path(dst)
            }
            other => Self::new(DiagnosticKind::CopyFailed, other.to_string()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

/// Ordered collection of diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Diagnostics of one kind, in recorded order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

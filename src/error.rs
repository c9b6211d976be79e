//! # Error Handling
//!
//! This module defines the centralized error type for the `cocos-components`
//! library. It uses `thiserror` to derive a single `Error` enum that covers
//! every failure the library can report, with a `Result<T>` alias used
//! throughout.
//!
//! Most failures during an install run are *not* returned as `Err`. A missing
//! source file, an unknown dependency or a malformed `component.json` only
//! affects one file or one component, so the pipeline records them as
//! [`Diagnostic`](crate::diagnostics::Diagnostic) entries and keeps going.
//! `Error` values still carry the underlying cause and are converted into
//! diagnostics at the point where the pipeline decides to continue.
//!
//! The variants fall into a few groups:
//!
//! - Configuration and library layout (`ConfigParse`, `RegistryLoad`).
//! - Component resolution (`UnknownComponent`, `Metadata`).
//! - File synchronization (`MissingSource`, `Copy`).
//! - The git-backed library store (`GitClone`, `GitCommand`).
//! - Wrapped foreign errors (`Io`, `Json`, `Yaml`).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for cocos-components operations
#[derive(Error, Debug)]
pub enum Error {
    /// The project configuration file could not be parsed.
    ///
    /// Includes an optional hint about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The registry file exists but could not be read or parsed.
    #[error("Failed to load registry from {}: {message}", path.display())]
    RegistryLoad { path: PathBuf, message: String },

    /// A component name was not found in the registry.
    #[error("Component not found in registry: {name}")]
    UnknownComponent { name: String },

    /// A component's declaration is missing or malformed.
    #[error("Invalid metadata for component {component} ({}): {message}", path.display())]
    Metadata {
        component: String,
        path: PathBuf,
        message: String,
    },

    /// A declared source file does not exist in the library.
    #[error("Source file for component {component} does not exist: {}", path.display())]
    MissingSource { component: String, path: PathBuf },

    /// Creating a destination directory or copying a file failed.
    #[error("Failed to copy {} -> {}: {message}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        message: String,
    },

    /// An error occurred while cloning the library repository.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// An error occurred while executing a Git command.
    #[error("Git command failed for {url}: {command} - {stderr}")]
    GitCommand {
        command: String,
        url: String,
        stderr: String,
    },

    /// A declared path is absolute or climbs out of its root.
    #[error("Path for component {component} leaves its root: {}", path.display())]
    UnsafePath { component: String, path: PathBuf },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

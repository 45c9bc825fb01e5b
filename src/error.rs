//! Error types for Siteweave
//!
//! Uses `thiserror` for library errors. Per-node problems that must not stop a
//! page from rendering are reported as [`crate::diagnostics::Diagnostic`]s instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Siteweave operations
pub type WeaveResult<T> = Result<T, WeaveError>;

/// Main error type for Siteweave operations
#[derive(Error, Debug)]
pub enum WeaveError {
    /// A menu tag without a usable `label` attribute
    #[error("menu '{element}' is missing the required 'label' attribute")]
    MissingLabel { element: String },

    /// The element footnotes are collected into does not exist
    #[error("footnote content host <{tag}> not found")]
    ContentHostNotFound { tag: String },

    /// The footnote container exists but holds no list
    #[error("footnote list not found in container '#{container}'")]
    FootnoteListNotFound { container: String },

    /// Activation target that resolves to no wired control
    #[error("no control wired for '{target}'")]
    UnknownControl { target: String },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Per-widget diagnostics
//!
//! Problems that are scoped to a single widget never abort a page. They are
//! recorded here and surfaced by the CLI.

use serde::Serialize;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Menu without a label; it does not render
    MissingLabel,
    /// Menu nested deeper than the supported depth; it was removed
    DepthExceeded { level: u8 },
    /// A second menu carries the root id and is treated as a nested menu
    DuplicateRoot,
    /// Widget still waiting for its content
    PendingContent,
    /// Footnote whose content turned out empty; it was removed
    EmptyFootnote,
    /// No element to collect footnotes into
    ContentHostMissing,
    /// Footnote container without a list
    FootnoteListMissing,
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingLabel => "missing-label",
            Self::DepthExceeded { .. } => "depth-exceeded",
            Self::DuplicateRoot => "duplicate-root",
            Self::PendingContent => "pending-content",
            Self::EmptyFootnote => "empty-footnote",
            Self::ContentHostMissing => "content-host-missing",
            Self::FootnoteListMissing => "footnote-list-missing",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingLabel | Self::ContentHostMissing | Self::FootnoteListMissing => {
                Severity::Error
            }
            Self::DepthExceeded { .. } | Self::DuplicateRoot | Self::EmptyFootnote => {
                Severity::Warning
            }
            Self::PendingContent => Severity::Info,
        }
    }
}

/// A single recorded problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// Identifier of the widget element, when it has one
    pub element: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, element: Option<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            message: message.into(),
            element,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Count diagnostics at or above `min`
pub fn count_at_least(diagnostics: &[Diagnostic], min: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity >= min).count()
}

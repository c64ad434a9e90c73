//! Diagnostics and their severity, as handed to a language-server host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::position::Range;

/// Value of [`Diagnostic::source`] for everything this workspace produces.
pub const DIAGNOSTIC_SOURCE: &str = "mypy";

/// Severity level for a diagnostic.
///
/// Serialized as the LSP numeric code (1 = Error, 2 = Warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DiagnosticSeverity {
    Error = 1,
    Warning = 2,
}

impl DiagnosticSeverity {
    /// Map a checker severity token. Only `"error"` is an error; notes and
    /// anything else the checker prints are warnings.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token == "error" {
            Self::Error
        } else {
            Self::Warning
        }
    }

    /// Convert from LSP numeric severity.
    ///
    /// Returns `None` for codes this workspace never emits.
    #[must_use]
    pub fn from_lsp(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        self == Self::Error
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl From<DiagnosticSeverity> for u8 {
    fn from(value: DiagnosticSeverity) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for DiagnosticSeverity {
    type Error = String;

    // `Self::Error` would be ambiguous with the variant.
    fn try_from(value: u8) -> Result<Self, String> {
        Self::from_lsp(value).ok_or_else(|| format!("unknown diagnostic severity {value}"))
    }
}

/// A single diagnostic reported by the checker.
///
/// Fields are private; [`Diagnostic::new`] is the single construction path so
/// the source tag and range invariant cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    source: &'static str,
    range: Range,
    message: String,
    severity: DiagnosticSeverity,
}

impl Diagnostic {
    #[must_use]
    pub fn new(range: Range, message: String, severity: DiagnosticSeverity) -> Self {
        Self {
            source: DIAGNOSTIC_SOURCE,
            range,
            message,
            severity,
        }
    }

    #[must_use]
    pub fn source(&self) -> &'static str {
        self.source
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    /// Format as `path:line:col: severity: [source] message` (1-indexed for display).
    #[must_use]
    pub fn display_with_path(&self, path: &Path) -> String {
        format!(
            "{}:{}:{}: {}: [{}] {}",
            path.display(),
            self.range.start().line + 1,
            self.range.start().character + 1,
            self.severity.label(),
            self.source,
            self.message,
        )
    }
}

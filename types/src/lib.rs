//! Core domain types for mypyls.
//!
//! Positions, ranges and diagnostics in the shape a language-server host
//! expects, plus the [`Document`] abstraction the checker reads from.

mod diagnostic;
mod document;
mod position;

pub use diagnostic::{DIAGNOSTIC_SOURCE, Diagnostic, DiagnosticSeverity};
pub use document::{Document, TextDocument};
pub use position::{Position, Range};

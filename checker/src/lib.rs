//! Adapter between a language-server host and the mypy type checker.
//!
//! [`line::parse_line`] turns one line of mypy's report into a [`Diagnostic`];
//! [`run::check_document`] runs mypy against a saved file or a shadow copy of
//! unsaved edits; [`MypyPlugin`] is what a host registers.
//!
//! [`Diagnostic`]: mypyls_types::Diagnostic

mod config;
pub mod line;
pub mod plugin;
pub mod run;


pub use config::MypyConfig;
pub use line::{parse_line, parse_report};
pub use plugin::{LintPlugin, MypyPlugin, Workspace};
pub use run::{CheckError, check_document};

//! The hook a language-server host calls to lint a document.

use std::path::{Path, PathBuf};

use mypyls_types::{Diagnostic, Document};

use crate::config::MypyConfig;
use crate::run::check_document;

/// The project a document belongs to. Checks run with its root as the
/// working directory so mypy picks up the project's own configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A linter a host can register.
///
/// The host supplies its configuration, the workspace, the document and
/// whether the document's buffer matches what is on disk.
pub trait LintPlugin {
    fn name(&self) -> &'static str;

    fn lint(
        &self,
        config: &MypyConfig,
        workspace: &Workspace,
        document: &dyn Document,
        is_saved: bool,
    ) -> Vec<Diagnostic>;
}

/// Lints documents with mypy.
///
/// Never fails towards the host: if mypy cannot be run the problem is logged
/// and the document simply has no diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MypyPlugin;

impl LintPlugin for MypyPlugin {
    fn name(&self) -> &'static str {
        "mypy"
    }

    fn lint(
        &self,
        config: &MypyConfig,
        workspace: &Workspace,
        document: &dyn Document,
        is_saved: bool,
    ) -> Vec<Diagnostic> {
        if !config.enabled {
            return Vec::new();
        }
        if !is_saved && !config.live_mode {
            tracing::debug!(
                "live mode off, skipping unsaved {}",
                document.path().display()
            );
            return Vec::new();
        }

        match check_document(config, document, is_saved, Some(workspace.root())) {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                tracing::warn!(
                    "{} check failed for {}: {e}",
                    self.name(),
                    document.path().display()
                );
                Vec::new()
            }
        }
    }
}

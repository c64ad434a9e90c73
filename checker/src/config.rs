//! mypy invocation settings as they appear in config files.

use std::path::PathBuf;

use serde::Deserialize;

/// Settings for invoking mypy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MypyConfig {
    /// Whether the plugin runs at all. Default: true.
    pub enabled: bool,
    /// Program plus leading arguments (e.g. `["python3", "-m", "mypy"]`).
    pub command: Vec<String>,
    /// Extra arguments placed before the ones the adapter always passes.
    pub args: Vec<String>,
    /// Check unsaved buffers through a shadow file. Default: true.
    pub live_mode: bool,
    /// Pass `--strict`.
    pub strict: bool,
    /// Where shadow copies of unsaved buffers are written. Default: the
    /// system temp directory.
    pub shadow_dir: Option<PathBuf>,
}

impl Default for MypyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["mypy".to_string()],
            args: Vec::new(),
            live_mode: true,
            strict: false,
            shadow_dir: None,
        }
    }
}

//! Configuration file loading for mypyls.
//!
//! A TOML file with a `[mypy]` table:
//!
//! ```toml
//! [mypy]
//! command = ["${VIRTUAL_ENV}/bin/mypy"]
//! args = ["--ignore-missing-imports"]
//! live_mode = true
//! strict = false
//! ```
//!
//! Looked up at `<workspace>/mypyls.toml`, then `~/.mypyls/config.toml`.

use std::env;
use std::path::{Path, PathBuf};

use mypyls_checker::MypyConfig;
use serde::Deserialize;

/// File name looked for in the workspace root.
pub const WORKSPACE_CONFIG_FILE: &str = "mypyls.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MypylsConfig {
    #[serde(default)]
    pub mypy: MypyConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl MypylsConfig {
    /// Load configuration for `workspace_root`.
    ///
    /// An `explicit` path must exist and parse. Discovered files that fail to
    /// read or parse are logged and skipped in favour of the defaults.
    pub fn load(explicit: Option<&Path>, workspace_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = std::iter::once(workspace_root.join(WORKSPACE_CONFIG_FILE))
            .chain(Self::path())
            .collect::<Vec<_>>();
        Ok(Self::discover(&candidates))
    }

    /// The per-user config file, `~/.mypyls/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".mypyls").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text and expand `${VAR}` references in the mypy command.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        for value in config.mypy.command.iter_mut().chain(&mut config.mypy.args) {
            *value = expand_env_vars(value);
        }
        Ok(config)
    }

    fn discover(candidates: &[PathBuf]) -> Self {
        let Some(path) = candidates.iter().find(|p| p.exists()) else {
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(config) => {
                tracing::debug!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                tracing::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }
}

/// Replace `${VAR}` with the variable's value; unset variables become empty.
/// An unclosed `${` is kept as written.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let var = &after[..close];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

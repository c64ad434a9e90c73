//! Invoking mypy on a saved file or on a shadow copy of unsaved edits.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use mypyls_types::{Diagnostic, Document};
use tempfile::NamedTempFile;

use crate::config::MypyConfig;
use crate::line::parse_report;

/// Arguments always passed so the report is one diagnostic per line with
/// columns.
const BASE_ARGS: [&str; 2] = ["--no-pretty", "--show-column-numbers"];

/// mypy's exit status for crashes and usage errors (1 just means "found issues").
const FATAL_EXIT_CODE: i32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("no checker command configured")]
    EmptyCommand,
    #[error("{command} not found in PATH")]
    NotFound {
        command: String,
        #[source]
        source: which::Error,
    },
    #[error("spawning {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("writing shadow file for {}: {source}", path.display())]
    ShadowFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Build the checker's argument list (everything after the configured
/// command).
///
/// With a `shadow`, mypy checks `document_path` but reads its content from
/// the shadow file.
#[must_use]
pub fn checker_args(
    config: &MypyConfig,
    document_path: &Path,
    shadow: Option<&Path>,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = config.args.iter().map(OsString::from).collect();
    args.extend(BASE_ARGS.iter().map(OsString::from));
    if config.strict {
        args.push("--strict".into());
    }
    if let Some(shadow) = shadow {
        args.push("--shadow-file".into());
        args.push(document_path.into());
        args.push(shadow.into());
    }
    args.push(document_path.into());
    args
}

/// Run mypy for `document` and collect the diagnostics that belong to it.
///
/// Saved documents are checked from disk. Unsaved ones are written to a
/// temporary shadow file that lives only for the duration of the run.
/// Report lines that do not parse are dropped; only failing to start the
/// checker is an error.
pub fn check_document(
    config: &MypyConfig,
    document: &dyn Document,
    is_saved: bool,
    working_dir: Option<&Path>,
) -> Result<Vec<Diagnostic>, CheckError> {
    if is_saved {
        return execute(config, document, None, working_dir);
    }

    let shadow = write_shadow(document, config.shadow_dir.as_deref())?;
    execute(config, document, Some(shadow.path()), working_dir)
}

fn write_shadow(
    document: &dyn Document,
    dir: Option<&Path>,
) -> Result<NamedTempFile, CheckError> {
    let shadow_err = |source: io::Error| CheckError::ShadowFile {
        path: document.path().to_path_buf(),
        source,
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix("mypyls-").suffix(".py");
    let created = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    };
    let mut file = created.map_err(shadow_err)?;
    file.write_all(document.source().as_bytes())
        .map_err(shadow_err)?;
    file.flush().map_err(shadow_err)?;
    Ok(file)
}

fn execute(
    config: &MypyConfig,
    document: &dyn Document,
    shadow: Option<&Path>,
    working_dir: Option<&Path>,
) -> Result<Vec<Diagnostic>, CheckError> {
    let (program, leading) = config
        .command
        .split_first()
        .ok_or(CheckError::EmptyCommand)?;
    let resolved = which::which(program).map_err(|source| CheckError::NotFound {
        command: program.clone(),
        source,
    })?;

    let args = checker_args(config, document.path(), shadow);
    let mut cmd = Command::new(&resolved);
    cmd.args(leading)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    tracing::debug!(
        "running {} {:?} for {}",
        resolved.display(),
        args,
        document.path().display()
    );
    let output = cmd.output().map_err(|source| CheckError::Spawn {
        command: program.clone(),
        source,
    })?;

    let report = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        tracing::debug!("{program} stderr: {}", stderr.trim_end());
    }
    if output.status.code() == Some(FATAL_EXIT_CODE) && report.trim().is_empty() {
        tracing::warn!(
            "{program} exited with status {FATAL_EXIT_CODE} for {}: {}",
            document.path().display(),
            stderr.trim_end()
        );
    }

    Ok(parse_report(&report, document))
}

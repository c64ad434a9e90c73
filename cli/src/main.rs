//! mypyls CLI - a minimal language-server host for the mypy lint plugin.
//!
//! Reads one document (optionally with unsaved content from another file or
//! stdin), hands it to [`MypyPlugin`] and prints the resulting diagnostics.
//!
//! ```text
//! mypyls check app.py                      # saved: mypy reads app.py
//! mypyls check app.py --shadow /tmp/buf    # unsaved: content from /tmp/buf
//! editor-dump | mypyls check app.py --stdin
//! ```
//!
//! Logs go to stderr (filter with `RUST_LOG`) so stdout stays machine-readable.

use std::env;
use std::io::{self, Read, Write};
use std::path::{self, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mypyls_checker::{LintPlugin, MypyPlugin, Workspace};
use mypyls_config::MypylsConfig;
use mypyls_types::{Diagnostic, Document, TextDocument};

#[derive(Parser)]
#[command(name = "mypyls", version)]
#[command(about = "Type-check a Python document with mypy and report LSP diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one document
    Check(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Path of the document as the editor knows it
    file: PathBuf,
    /// Workspace root (defaults to the current directory)
    #[arg(long)]
    workspace: Option<PathBuf>,
    /// Config file to use instead of discovering one
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read the document's unsaved content from this file
    #[arg(long, conflicts_with = "stdin")]
    shadow: Option<PathBuf>,
    /// Read the document's unsaved content from stdin
    #[arg(long)]
    stdin: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Exit with status 1 when any diagnostic is an error
    #[arg(long)]
    fail_on_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON array of LSP diagnostic objects
    Json,
    /// One `path:line:col: severity: [mypy] message` line per diagnostic
    Text,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => run_check(&args),
    }
}

/// Load the document named on the command line and whether it is saved.
///
/// The path is made absolute against the current directory because the
/// checker runs from the workspace root, not from here.
fn load_document(args: &CheckArgs) -> Result<(TextDocument, bool)> {
    let file = path::absolute(&args.file)
        .with_context(|| format!("resolving {}", args.file.display()))?;

    if let Some(shadow) = &args.shadow {
        let source = std::fs::read_to_string(shadow)
            .with_context(|| format!("reading unsaved content from {}", shadow.display()))?;
        return Ok((TextDocument::new(file, source), false));
    }

    if args.stdin {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("reading unsaved content from stdin")?;
        return Ok((TextDocument::new(file, source), false));
    }

    let document =
        TextDocument::open(&file).with_context(|| format!("reading {}", file.display()))?;
    Ok((document, true))
}

fn run_check(args: &CheckArgs) -> Result<ExitCode> {
    let root = match &args.workspace {
        Some(root) => root.clone(),
        None => env::current_dir().context("resolving current directory")?,
    };
    let config = MypylsConfig::load(args.config.as_deref(), &root)?;
    let (document, is_saved) = load_document(args)?;

    let plugin = MypyPlugin;
    let diagnostics = plugin.lint(&config.mypy, &Workspace::new(root), &document, is_saved);
    tracing::debug!(
        "{} reported {} diagnostics for {}",
        plugin.name(),
        diagnostics.len(),
        document.path().display()
    );

    let mut out = io::stdout().lock();
    write_diagnostics(&mut out, args.format, &document, &diagnostics)?;
    out.flush()?;

    if args.fail_on_error && diagnostics.iter().any(|d| d.severity().is_error()) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn write_diagnostics(
    out: &mut impl Write,
    format: OutputFormat,
    document: &dyn Document,
    diagnostics: &[Diagnostic],
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, diagnostics)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for diagnostic in diagnostics {
                writeln!(out, "{}", diagnostic.display_with_path(document.path()))?;
            }
        }
    }
    Ok(())
}

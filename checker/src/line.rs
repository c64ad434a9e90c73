//! Parsing of mypy's one-diagnostic-per-line report.
//!
//! Lines look like `path:[line:][col:] severity: message`. mypy reports no
//! end column, so the range is widened to the word under the start position.

use std::path::{Component, Path};
use std::sync::LazyLock;

use mypyls_types::{Diagnostic, DiagnosticSeverity, Document, Position, Range};
use regex::{Match, Regex};

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:]+):(?:([0-9]+):)?(?:([0-9]+):)? (\w+): (.*)")
        .expect("line pattern is valid")
});

/// Parse one report line against the document it was produced for.
///
/// Returns `None` for lines that are not diagnostics and for diagnostics that
/// belong to another file.
pub fn parse_line(line: &str, document: &dyn Document) -> Option<Diagnostic> {
    let caps = LINE_PATTERN.captures(line)?;

    let file_path = &caps[1];
    if !reported_path_matches(file_path, document.path()) {
        tracing::warn!(
            "discarding result for {file_path} against {}",
            document.path().display()
        );
        return None;
    }

    let start = Position::new(zero_based(caps.get(2))?, zero_based(caps.get(3))?);

    let word = document.word_at_position(start);
    let len = if word.is_empty() {
        1
    } else {
        u32::try_from(word.chars().count()).unwrap_or(u32::MAX)
    };

    Some(Diagnostic::new(
        Range::on_line(start, len),
        caps[5].to_string(),
        DiagnosticSeverity::from_token(&caps[4]),
    ))
}

/// Parse a whole report, keeping only the lines that yield a diagnostic.
pub fn parse_report(report: &str, document: &dyn Document) -> Vec<Diagnostic> {
    report
        .lines()
        .filter_map(|line| parse_line(line, document))
        .collect()
}

/// 1-based field to 0-based; absent fields count as 1.
fn zero_based(field: Option<Match<'_>>) -> Option<u32> {
    match field {
        None => Some(0),
        Some(m) => m.as_str().parse::<u32>().ok().map(|n| n.saturating_sub(1)),
    }
}

/// Whether `reported` names the same file as the tail of `document`.
///
/// Compared by path components so `a.py` does not match `data.py`; `.`
/// components are ignored on both sides.
fn reported_path_matches(reported: &str, document: &Path) -> bool {
    let reported = significant_components(Path::new(reported));
    !reported.is_empty() && significant_components(document).ends_with(&reported)
}

fn significant_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

//! The document abstraction the checker reads from.

use std::io;
use std::path::{Path, PathBuf};

use crate::position::Position;

/// A document the checker can be run against.
///
/// `source` is the current text, which may differ from what is on disk when
/// the host has unsaved edits.
pub trait Document {
    fn path(&self) -> &Path;

    fn source(&self) -> &str;

    /// The word touching `position`, or an empty string if there is none.
    fn word_at_position(&self, position: Position) -> String;
}

/// In-memory document backed by a path and its current text.
#[derive(Debug, Clone)]
pub struct TextDocument {
    path: PathBuf,
    source: String,
}

impl TextDocument {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Read the document's current content from disk.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        Ok(Self { path, source })
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.split('\n')
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Document for TextDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn word_at_position(&self, position: Position) -> String {
        let Some(line) = self.lines().nth(position.line as usize) else {
            return String::new();
        };

        // Split on a character boundary; columns count scalar values, not bytes.
        let split = line
            .char_indices()
            .nth(position.character as usize)
            .map_or(line.len(), |(idx, _)| idx);
        let (before, after) = line.split_at(split);

        let head_len: usize = before
            .chars()
            .rev()
            .take_while(|c| is_word_char(*c))
            .map(char::len_utf8)
            .sum();
        let tail_len: usize = after
            .chars()
            .take_while(|c| is_word_char(*c))
            .map(char::len_utf8)
            .sum();

        let mut word = String::with_capacity(head_len + tail_len);
        word.push_str(&before[before.len() - head_len..]);
        word.push_str(&after[..tail_len]);
        word
    }
}

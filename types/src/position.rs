//! Zero-based positions and ranges in the shape LSP hosts use.

use serde::{Deserialize, Serialize};

/// Zero-based position within a text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open span between two positions. `end` is never before `start`.
///
/// Fields are private; [`Range::new`] is the only way in so the ordering
/// cannot be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Build a range, clamping `end` up to `start` if it would precede it.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Position {
        self.end
    }

    /// A range on a single line starting at `start` and spanning `len`
    /// characters.
    #[must_use]
    pub fn on_line(start: Position, len: u32) -> Self {
        Self::new(
            start,
            Position::new(start.line, start.character.saturating_add(len)),
        )
    }
}

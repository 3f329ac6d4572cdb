//! Source positions.
//!
//! A [`Position`] is a 0-based byte offset into the original query string.
//! Kept as a newtype (rather than a bare `usize`) so call sites can't
//! accidentally compare it against an unrelated length or index.

/// A 0-based byte offset into the source string a token or node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position(u32);

impl Position {
    pub const fn new(offset: u32) -> Self {
        Position(offset)
    }

    pub const fn offset(self) -> u32 {
        self.0
    }
}

impl From<u32> for Position {
    fn from(offset: u32) -> Self {
        Position(offset)
    }
}

impl From<usize> for Position {
    fn from(offset: usize) -> Self {
        Position(offset as u32)
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.0 as usize
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

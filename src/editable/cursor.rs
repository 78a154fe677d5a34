//! Position, caret and position tracking for the tag editing buffer.

use std::fmt;

use super::buffer::{units, Segment, TagBuffer};

/// A logical location in the buffer, measured in position units
/// (one per text character, one per token).
///
/// Because a token is exactly one unit wide, a position can only ever sit
/// before or after a token, never inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub offset: usize,
}

impl Position {
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    pub const fn zero() -> Self {
        Self { offset: 0 }
    }

    /// Position `units` further along
    pub const fn advance(self, units: usize) -> Self {
        Self {
            offset: self.offset + units,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

/// A caret as reported by the live edit surface.
///
/// Surfaces report carets in one of two conventions: inside a specific node,
/// or on the container between its children. Surface nodes correspond 1:1 to
/// a raw (possibly non-canonical) segment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caret {
    /// Inside the `node`-th surface node, `offset` characters in
    InNode { node: usize, offset: usize },
    /// On the container, immediately before its `child`-th node
    InContainer { child: usize },
}

impl Caret {
    /// Resolve this caret against a surface into a logical [`Position`].
    ///
    /// Returns `None` when the caret lies outside the surface's addressable
    /// region. A caret inside a token resolves before it at offset 0 and
    /// after it otherwise.
    pub fn resolve(&self, surface: &[Segment]) -> Option<Position> {
        match *self {
            Caret::InNode { node, offset } => {
                let segment = surface.get(node)?;
                let before = units(&surface[..node]);
                match segment {
                    Segment::Text(text) => {
                        if offset > text.chars().count() {
                            return None;
                        }
                        Some(Position::new(before + offset))
                    }
                    Segment::Token(_) if offset == 0 => Some(Position::new(before)),
                    Segment::Token(_) => Some(Position::new(before + 1)),
                }
            }
            Caret::InContainer { child } => {
                if child > surface.len() {
                    return None;
                }
                Some(Position::new(units(&surface[..child])))
            }
        }
    }
}

/// Remembers the last caret position captured inside the buffer.
///
/// Insertion always has somewhere to go: the remembered position when it is
/// still inside the buffer, otherwise the end of the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionTracker {
    last_known: Option<Position>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self { last_known: None }
    }

    pub fn last_known(&self) -> Option<Position> {
        self.last_known
    }

    /// Read the surface caret. A caret inside the surface overwrites the
    /// remembered position; an absent or foreign caret leaves it untouched.
    pub fn capture(&mut self, surface: &[Segment], caret: Option<Caret>) -> Option<Position> {
        let position = caret.and_then(|c| c.resolve(surface));
        match position {
            Some(pos) => {
                tracing::trace!(target: "cursor", offset = pos.offset, "captured caret");
                self.last_known = Some(pos);
            }
            None => {
                tracing::trace!(target: "cursor", ?caret, "caret outside buffer");
            }
        }
        position
    }

    /// Remember a position produced by an edit (e.g. just after an inserted token)
    pub fn remember(&mut self, position: Position) {
        self.last_known = Some(position);
    }

    pub fn forget(&mut self) {
        self.last_known = None;
    }

    /// Fallback insertion point: end of buffer
    pub fn default_position(&self, buffer: &TagBuffer) -> Position {
        buffer.end()
    }

    /// Remembered position if still valid for `buffer`, else the default
    pub fn insertion_point(&self, buffer: &TagBuffer) -> Position {
        match self.last_known {
            Some(pos) if buffer.contains(pos) => pos,
            _ => self.default_position(buffer),
        }
    }
}

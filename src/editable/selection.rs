//! Surface selection for the tag editing buffer.

use super::buffer::Segment;
use super::cursor::{Caret, Position};

/// A selection reported by the edit surface, with anchor (start point) and
/// head (caret). A collapsed selection is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Caret,
    /// Where the caret is (moving point)
    pub head: Caret,
}

impl Selection {
    pub fn new(anchor: Caret, head: Caret) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret with no selected range)
    pub fn collapsed(caret: Caret) -> Self {
        Self {
            anchor: caret,
            head: caret,
        }
    }

    /// Check if the selection is collapsed against `surface`.
    ///
    /// Two different caret reports can denote the same position (e.g. end of a
    /// text node vs. the container boundary after it), so this compares the
    /// resolved positions rather than the raw carets.
    pub fn is_collapsed(&self, surface: &[Segment]) -> bool {
        self.anchor == self.head
            || matches!(self.range(surface), Some((start, end)) if start == end)
    }

    /// Resolve to an ordered `(start, end)` position pair, `None` if either
    /// end lies outside the surface.
    pub fn range(&self, surface: &[Segment]) -> Option<(Position, Position)> {
        let anchor = self.anchor.resolve(surface)?;
        let head = self.head.resolve(surface)?;
        Some((anchor.min(head), anchor.max(head)))
    }
}

impl From<Caret> for Selection {
    fn from(caret: Caret) -> Self {
        Self::collapsed(caret)
    }
}

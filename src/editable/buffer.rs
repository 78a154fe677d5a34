//! Segment model for the tag editing buffer.
//!
//! A [`TagBuffer`] is an ordered sequence of [`Segment`]s, each either a run of
//! free text or an atomic token. The buffer is always kept in canonical form:
//! no empty text segments and no two adjacent text segments.

use super::cursor::Position;
use crate::catalog::TagCatalog;

/// Opaque token identifier, a key into the external [`TagCatalog`].
pub type TokenId = String;

/// Zero-width characters that edit surfaces use as caret anchors.
const ZERO_WIDTH: [char; 2] = ['\u{200B}', '\u{FEFF}'];

/// A single unit of the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A run of free-form text
    Text(String),
    /// An atomic inline token, never split or partially addressed
    Token(TokenId),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text(text.into())
    }

    pub fn token(id: impl Into<TokenId>) -> Self {
        Segment::Token(id.into())
    }

    /// Width of the segment in position units: one per character for text,
    /// exactly one for a token.
    pub fn units(&self) -> usize {
        match self {
            Segment::Text(text) => text.chars().count(),
            Segment::Token(_) => 1,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Segment::Token(_))
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Segment::Token(id) => Some(id),
            Segment::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Segment::Text(text) => Some(text),
            Segment::Token(_) => None,
        }
    }

    /// True for text that carries no visible content (empty or zero-width only).
    ///
    /// Tokens are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Segment::Text(text) => text.chars().all(is_zero_width),
            Segment::Token(_) => false,
        }
    }
}

pub(crate) fn is_zero_width(c: char) -> bool {
    ZERO_WIDTH.contains(&c)
}

/// Merge adjacent text segments and drop empty ones.
pub fn normalize<I>(segments: I) -> Vec<Segment>
where
    I: IntoIterator<Item = Segment>,
{
    let mut out: Vec<Segment> = Vec::new();
    for segment in segments {
        match segment {
            Segment::Text(text) if text.is_empty() => {}
            Segment::Text(text) => match out.last_mut() {
                Some(Segment::Text(prev)) => prev.push_str(&text),
                _ => out.push(Segment::Text(text)),
            },
            token @ Segment::Token(_) => out.push(token),
        }
    }
    out
}

/// Total position units covered by a segment slice.
pub fn units(segments: &[Segment]) -> usize {
    segments.iter().map(Segment::units).sum()
}

/// Convert a char offset within `text` to a byte offset (clamped to the end).
pub(crate) fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Where a [`Position`] lands in the segment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Immediately before the segment at this index (`len` means end of buffer)
    Boundary(usize),
    /// Strictly inside a text segment, `offset` characters from its start
    InText { index: usize, offset: usize },
}

/// Canonical ordered sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBuffer {
    pub(super) segments: Vec<Segment>,
}

impl TagBuffer {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Build a buffer from arbitrary segments, normalizing them.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        Self {
            segments: normalize(segments),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total width in position units
    pub fn len_units(&self) -> usize {
        units(&self.segments)
    }

    /// Number of token segments
    pub fn token_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_token()).count()
    }

    /// Position at the very end of the buffer
    pub fn end(&self) -> Position {
        Position::new(self.len_units())
    }

    /// Whether the position lies within the buffer's addressable region
    pub fn contains(&self, position: Position) -> bool {
        position.offset <= self.len_units()
    }

    /// Clamp a position into the buffer
    pub fn clamp(&self, position: Position) -> Position {
        Position::new(position.offset.min(self.len_units()))
    }

    /// Position immediately before the segment at `index`
    pub fn position_of(&self, index: usize) -> Position {
        let index = index.min(self.segments.len());
        Position::new(units(&self.segments[..index]))
    }

    /// Map a position onto the segment sequence. Out-of-range positions map to
    /// the end of the buffer.
    pub fn locate(&self, position: Position) -> Location {
        let mut acc = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            if position.offset == acc {
                return Location::Boundary(index);
            }
            let width = segment.units();
            if let Segment::Text(_) = segment {
                if position.offset < acc + width {
                    return Location::InText {
                        index,
                        offset: position.offset - acc,
                    };
                }
            }
            acc += width;
        }
        Location::Boundary(self.segments.len())
    }

    /// Whether the buffer satisfies the canonical-form invariant
    pub fn is_canonical(&self) -> bool {
        let no_empty = self
            .segments
            .iter()
            .all(|s| !matches!(s, Segment::Text(t) if t.is_empty()));
        let no_adjacent = self
            .segments
            .windows(2)
            .all(|pair| !(pair[0].as_text().is_some() && pair[1].as_text().is_some()));
        no_empty && no_adjacent
    }

    /// Plain-text rendering with tokens shown as their catalog labels
    /// (or their identifier when the catalog has no entry).
    pub fn display_text(&self, catalog: &TagCatalog) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Token(id) => out.push_str(catalog.label(id).unwrap_or(id.as_str())),
            }
        }
        out
    }
}

impl FromIterator<Segment> for TagBuffer {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self::from_segments(iter)
    }
}

impl From<Vec<Segment>> for TagBuffer {
    fn from(segments: Vec<Segment>) -> Self {
        Self::from_segments(segments)
    }
}

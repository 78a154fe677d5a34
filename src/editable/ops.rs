//! Mutation engine: token insertion, atomic token deletion, backspace
//! resolution and reconciliation against the live surface.
//!
//! Every operation leaves the buffer in canonical form.

use super::buffer::{
    char_to_byte, is_zero_width, normalize, units, Location, Segment, TagBuffer, TokenId,
};
use super::cursor::{Caret, Position};
use crate::catalog::TagCatalog;
use crate::codec::{bracketed, CodecOptions};
use crate::error::EditError;

/// Identifies one token in a buffer or surface: its identifier and the
/// position immediately before it.
///
/// Empty text and text merges carry no width, so a reference resolved on a
/// raw surface stays valid against the canonical buffer. Reconciliation that
/// trims or promotes shifts positions; [`SurfaceMap::tag_ref`] re-anchors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagRef {
    pub position: Position,
    pub id: TokenId,
}

impl TagRef {
    pub fn new(position: Position, id: impl Into<TokenId>) -> Self {
        Self {
            position,
            id: id.into(),
        }
    }
}

impl TagBuffer {
    /// Split the text segment straddling `position` (if any) and return the
    /// index at which a new segment should be inserted.
    fn split_at(&mut self, position: Position) -> usize {
        match self.locate(position) {
            Location::Boundary(index) => index,
            Location::InText { index, offset } => {
                let tail = match &mut self.segments[index] {
                    Segment::Text(text) => {
                        let byte = char_to_byte(text, offset);
                        text.split_off(byte)
                    }
                    Segment::Token(_) => return index,
                };
                self.segments.insert(index + 1, Segment::Text(tail));
                index + 1
            }
        }
    }

    fn renormalize(&mut self) {
        self.segments = normalize(std::mem::take(&mut self.segments));
    }

    /// Insert a token at `position` and return the position just after it.
    ///
    /// Positions past the end are clamped to the end of the buffer.
    pub fn insert_token(&mut self, position: Position, id: impl Into<TokenId>) -> Position {
        let id = id.into();
        if !self.contains(position) {
            tracing::warn!(
                offset = position.offset,
                len = self.len_units(),
                "insert position outside buffer, clamping to end"
            );
        }
        let position = self.clamp(position);
        let index = self.split_at(position);
        tracing::debug!(target: "buffer", %id, offset = position.offset, "insert token");
        self.segments.insert(index, Segment::Token(id));
        self.renormalize();
        position.advance(1)
    }

    /// Insert free text at `position` and return the position just after it.
    pub fn insert_text(&mut self, position: Position, text: &str) -> Position {
        let position = self.clamp(position);
        if text.is_empty() {
            return position;
        }
        let index = self.split_at(position);
        self.segments.insert(index, Segment::text(text));
        self.renormalize();
        position.advance(text.chars().count())
    }

    /// Remove exactly the referenced token and return the position where it
    /// stood.
    pub fn delete_token(&mut self, target: &TagRef) -> Result<Position, EditError> {
        let index = match self.locate(target.position) {
            Location::Boundary(index) => Some(index),
            Location::InText { .. } => None,
        };
        let is_target = |index: usize| {
            matches!(self.segments.get(index), Some(Segment::Token(id)) if *id == target.id)
        };
        match index {
            Some(index) if is_target(index) => {
                tracing::debug!(
                    target: "buffer",
                    id = %target.id,
                    offset = target.position.offset,
                    "delete token"
                );
                self.segments.remove(index);
                self.renormalize();
                Ok(target.position)
            }
            _ => Err(EditError::NotFound {
                id: target.id.clone(),
                position: target.position,
            }),
        }
    }

    /// First token with the given identifier
    pub fn find_token(&self, id: &str) -> Option<TagRef> {
        self.tokens().find(|tag| tag.id == id)
    }

    /// All tokens in order
    pub fn tokens(&self) -> impl Iterator<Item = TagRef> + '_ {
        let mut offset = 0;
        self.segments.iter().filter_map(move |segment| {
            let position = Position::new(offset);
            offset += segment.units();
            segment.as_token().map(|id| TagRef::new(position, id))
        })
    }

    /// Replace the buffer with the canonical form of an observed surface.
    ///
    /// Returns whether the content changed, along with the map from surface
    /// positions to positions in the new buffer.
    pub fn reconcile<I>(
        &mut self,
        observed: I,
        options: &CodecOptions,
        catalog: &TagCatalog,
    ) -> (bool, SurfaceMap)
    where
        I: IntoIterator<Item = Segment>,
    {
        let (reconciled, map) = reconcile_mapped(observed, options, catalog);
        let changed = reconciled != *self;
        if changed {
            tracing::debug!(
                target: "buffer",
                before = self.len(),
                after = reconciled.len(),
                "reconciled surface"
            );
        }
        *self = reconciled;
        (changed, map)
    }
}

/// Maps positions on a raw observed surface onto the buffer reconciled
/// from it.
///
/// Trimmed whitespace and the characters of a typed `{identifier}` after
/// its opening brace have no width in the buffer. A surface position inside
/// a typed identifier maps to just after the promoted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceMap {
    /// `offsets[i]` is the buffer offset of surface offset `i`
    offsets: Vec<usize>,
}

impl SurfaceMap {
    /// Map a surface position. Positions past the surface map to the end of
    /// the buffer.
    pub fn position(&self, surface: Position) -> Position {
        let offset = self
            .offsets
            .get(surface.offset)
            .or(self.offsets.last())
            .copied()
            .unwrap_or(0);
        Position::new(offset)
    }

    /// Re-anchor a token reference resolved on the surface
    pub fn tag_ref(&self, target: TagRef) -> TagRef {
        TagRef {
            position: self.position(target.position),
            id: target.id,
        }
    }
}

/// What reconciliation makes of one surface unit
enum Unit {
    Char(char),
    Token(TokenId),
    /// Part of a typed identifier folded into the token before it
    Typed,
    Trimmed,
}

/// Derive the canonical buffer from a raw observed segment list.
///
/// Text runs are trimmed when `options.trim_text` is set, and scanned for
/// `{identifier}` catalog matches when `options.promote_typed_tokens` is set.
pub fn reconcile<I>(observed: I, options: &CodecOptions, catalog: &TagCatalog) -> TagBuffer
where
    I: IntoIterator<Item = Segment>,
{
    reconcile_mapped(observed, options, catalog).0
}

/// [`reconcile`], also returning where each surface position lands in the
/// result.
pub fn reconcile_mapped<I>(
    observed: I,
    options: &CodecOptions,
    catalog: &TagCatalog,
) -> (TagBuffer, SurfaceMap)
where
    I: IntoIterator<Item = Segment>,
{
    let mut surface = Vec::new();
    for segment in normalize(observed) {
        match segment {
            Segment::Token(id) => surface.push(Unit::Token(id)),
            Segment::Text(text) if options.promote_typed_tokens => {
                for piece in bracketed::split(&text, options.validation, catalog) {
                    match piece {
                        Segment::Text(text) => surface.extend(text.chars().map(Unit::Char)),
                        Segment::Token(id) => {
                            // `{` + identifier + `}`, one unit of which becomes the token
                            let typed = id.chars().count() + 1;
                            surface.push(Unit::Token(id));
                            surface.extend((0..typed).map(|_| Unit::Typed));
                        }
                    }
                }
            }
            Segment::Text(text) => surface.extend(text.chars().map(Unit::Char)),
        }
    }
    if options.trim_text {
        trim_runs(&mut surface);
    }

    let mut segments = Vec::new();
    let mut text = String::new();
    let mut offsets = Vec::with_capacity(surface.len() + 1);
    let mut width = 0;
    for unit in surface {
        offsets.push(width);
        match unit {
            Unit::Char(c) => {
                text.push(c);
                width += 1;
            }
            Unit::Token(id) => {
                segments.push(Segment::Text(std::mem::take(&mut text)));
                segments.push(Segment::Token(id));
                width += 1;
            }
            Unit::Typed | Unit::Trimmed => {}
        }
    }
    offsets.push(width);
    segments.push(Segment::Text(text));
    (TagBuffer::from_segments(segments), SurfaceMap { offsets })
}

/// Drop leading and trailing whitespace of every text run between tokens
fn trim_runs(surface: &mut [Unit]) {
    let blank = |unit: &Unit| matches!(unit, Unit::Char(c) if c.is_whitespace());
    for run in surface.split_mut(|unit| !matches!(unit, Unit::Char(_))) {
        let lead = run.iter().take_while(|unit| blank(unit)).count();
        let trail = run[lead..].iter().rev().take_while(|unit| blank(unit)).count();
        let end = run.len() - trail;
        for unit in &mut run[..lead] {
            *unit = Unit::Trimmed;
        }
        for unit in &mut run[end..] {
            *unit = Unit::Trimmed;
        }
    }
}

/// Decide whether a Backspace at `caret` deletes a whole token.
///
/// Resolution order:
/// 1. a caret inside a token targets that token;
/// 2. a caret at the start of a text node right after a token targets it;
/// 3. a caret at a boundary targets the nearest preceding token, skipping
///    blank (empty or zero-width) text nodes on the way back;
/// 4. otherwise `None`: ordinary character deletion applies.
pub fn resolve_backspace_target(surface: &[Segment], caret: Caret) -> Option<TagRef> {
    let target = match caret {
        Caret::InNode { node, offset } => match surface.get(node)? {
            Segment::Token(id) => Some(TagRef::new(Position::new(units(&surface[..node])), id)),
            Segment::Text(text) => {
                let at_start = text.chars().take(offset).all(is_zero_width);
                if !at_start {
                    return None;
                }
                match node.checked_sub(1).and_then(|prev| surface.get(prev)) {
                    Some(Segment::Token(id)) => {
                        Some(TagRef::new(Position::new(units(&surface[..node - 1])), id))
                    }
                    _ => preceding_token(surface, node),
                }
            }
        },
        Caret::InContainer { child } if child <= surface.len() => preceding_token(surface, child),
        Caret::InContainer { .. } => None,
    };
    tracing::trace!(target: "cursor", ?caret, ?target, "backspace target");
    target
}

/// Nearest token before `boundary`, looking through blank text nodes only
fn preceding_token(surface: &[Segment], boundary: usize) -> Option<TagRef> {
    let (index, segment) = surface[..boundary]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, segment)| !segment.is_blank())?;
    segment
        .as_token()
        .map(|id| TagRef::new(Position::new(units(&surface[..index])), id))
}

//! Request and outcome types for the tag editing state.

use super::buffer::{Segment, TokenId};
use super::cursor::Position;
use super::ops::TagRef;
use super::selection::Selection;
use crate::codec::Serialized;

/// Unified request type for all buffer editing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEditMsg {
    // === Insertion ===
    /// Insert a token at the given position, or at the tracked insertion point
    InsertToken {
        id: TokenId,
        position: Option<Position>,
    },
    /// Insert free text at the given position, or at the tracked insertion point
    InsertText {
        text: String,
        position: Option<Position>,
    },

    // === Deletion ===
    /// Backspace with the surface's current selection
    Backspace(Selection),
    /// Remove the first token with this identifier (dismiss affordance)
    RemoveToken(TokenId),
    /// Remove one specific token
    RemoveAt(TagRef),

    // === Synchronization ===
    /// Re-derive the buffer from the raw segments the surface now shows
    Reconcile(Vec<Segment>),
    /// The surface now shows the buffer exactly, as after re-rendering a
    /// changed output
    Rendered,
    /// Replace the whole buffer with a decoded external value
    Load(Serialized),

    // === History ===
    Undo,
    Redo,
}

impl TagEditMsg {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            TagEditMsg::InsertToken { .. } => "InsertToken",
            TagEditMsg::InsertText { .. } => "InsertText",
            TagEditMsg::Backspace(_) => "Backspace",
            TagEditMsg::RemoveToken(_) => "RemoveToken",
            TagEditMsg::RemoveAt(_) => "RemoveAt",
            TagEditMsg::Reconcile(_) => "Reconcile",
            TagEditMsg::Rendered => "Rendered",
            TagEditMsg::Load(_) => "Load",
            TagEditMsg::Undo => "Undo",
            TagEditMsg::Redo => "Redo",
        }
    }
}

/// Result of handling a [`TagEditMsg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The buffer changed; `output` is the new value in the configured form
    /// and `position` the new caret position
    Changed {
        output: Serialized,
        position: Position,
    },
    /// Nothing to do (unknown token, empty history, no-op edit)
    Unchanged,
    /// Not a token deletion: the surface should perform its own character
    /// deletion
    PassThrough,
}

impl EditOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, EditOutcome::Changed { .. })
    }
}

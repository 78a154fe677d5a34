//! Hybrid text/token editing buffer.
//!
//! A document is an ordered sequence of free-text runs and atomic tokens
//! ("tags"). Tokens are inserted and deleted as a whole, never split.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`TagBuffer`] / [`Segment`]: the canonical segment model
//! - [`Position`] / [`Caret`] / [`PositionTracker`]: logical positions, surface
//!   caret reports and the remembered insertion point
//! - [`Selection`]: anchor/head caret pair reported by the surface
//! - [`resolve_backspace_target`] / [`reconcile`]: mutation helpers over raw
//!   surface segments, with [`SurfaceMap`] carrying surface positions into
//!   the buffer
//! - [`TagEditorState`]: one editing session with catalog, tracker and history
//! - [`TagEditMsg`]: unified request type for all editing operations
//!
//! # Example
//!
//! ```
//! use tagbuf::editable::{Position, Segment, TagBuffer};
//!
//! let mut buffer = TagBuffer::from_segments(vec![Segment::text("hello ")]);
//! let after = buffer.insert_token(Position::new(6), "gift");
//!
//! assert_eq!(buffer.segments(), &[Segment::text("hello "), Segment::token("gift")]);
//! assert_eq!(after, Position::new(7));
//! ```

mod buffer;
mod cursor;
mod history;
mod messages;
mod ops;
mod selection;
mod state;

// Re-export main types
pub use buffer::{normalize, units, Location, Segment, TagBuffer, TokenId};
pub use cursor::{Caret, Position, PositionTracker};
pub use history::{EditHistory, EditOperation};
pub use messages::{EditOutcome, TagEditMsg};
pub use ops::{reconcile, reconcile_mapped, resolve_backspace_target, SurfaceMap, TagRef};
pub use selection::Selection;
pub use state::TagEditorState;

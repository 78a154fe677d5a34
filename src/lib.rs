//! tagbuf - hybrid text/token editing buffer
//!
//! This crate provides the document model behind tag-input editors: free text
//! interleaved with atomic inline tokens, caret-aware insertion, atomic token
//! deletion and lossless conversion to and from external forms.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod tracing;

// Re-export commonly used types
pub use catalog::{TagCatalog, TagValidation};
pub use codec::{CodecOptions, SerialForm, Serialized};
pub use config::TagEditorConfig;
pub use editable::{Position, Segment, TagBuffer, TagEditMsg, TagEditorState};
pub use error::{ConfigError, EditError};

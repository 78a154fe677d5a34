//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use tagbuf::catalog::TagCatalog;
use tagbuf::codec::Serialized;
use tagbuf::config::TagEditorConfig;
use tagbuf::editable::{Segment, TagEditorState};

pub fn text(s: &str) -> Segment {
    Segment::text(s)
}

pub fn token(s: &str) -> Segment {
    Segment::token(s)
}

/// Catalog used across tests
pub fn test_catalog() -> TagCatalog {
    TagCatalog::from_iter([
        ("gift", "Gift card"),
        ("name", "First name"),
        ("x", "X"),
        ("a", "A"),
    ])
}

/// Session initialized from a bracketed string with default config
pub fn test_state(initial: &str) -> TagEditorState {
    TagEditorState::from_serialized(
        &Serialized::Bracketed(initial.to_string()),
        TagEditorConfig::default(),
        test_catalog(),
    )
}

/// Session output as a bracketed string
pub fn output_string(state: &TagEditorState) -> String {
    match state.output() {
        Serialized::Bracketed(s) => s,
        Serialized::List(entries) => panic!("expected bracketed output, got {:?}", entries),
    }
}

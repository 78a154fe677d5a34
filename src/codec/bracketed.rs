//! Bracketed-string form: tokens are written as `{identifier}` inside free text.
//!
//! Identifiers rejected by the validation policy stay literal text, braces
//! included. An unterminated `{` never matches the delimiter and is kept as
//! text through the end of input.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::{TagCatalog, TagValidation};
use crate::editable::{Segment, TagBuffer};

/// `{` + one or more non-`}` characters + `}`
fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"\{([^}]+)\}").expect("delimiter pattern is valid"))
}

/// Split `input` into raw segments. The result may contain empty or adjacent
/// text segments; callers normalize.
pub fn split(input: &str, validation: TagValidation, catalog: &TagCatalog) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for captures in delimiter().captures_iter(input) {
        let (Some(whole), Some(id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        segments.push(Segment::text(&input[last..whole.start()]));
        if validation.accepts(id.as_str(), catalog) {
            segments.push(Segment::token(id.as_str()));
        } else {
            tracing::trace!(target: "codec", id = id.as_str(), "unknown token kept as text");
            segments.push(Segment::text(whole.as_str()));
        }
        last = whole.end();
    }
    segments.push(Segment::text(&input[last..]));
    segments
}

/// Decode a bracketed string into a canonical buffer
pub fn decode(input: &str, validation: TagValidation, catalog: &TagCatalog) -> TagBuffer {
    TagBuffer::from_segments(split(input, validation, catalog))
}

/// Encode a buffer: text verbatim, tokens as `{identifier}`
pub fn encode(buffer: &TagBuffer) -> String {
    let mut out = String::new();
    for segment in buffer.segments() {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Token(id) => {
                out.push('{');
                out.push_str(id);
                out.push('}');
            }
        }
    }
    out
}

//! List form: an ordered sequence of typed entries.
//!
//! ```json
//! [{"type": "text", "value": "hello "}, {"type": "tag", "value": "gift"}]
//! ```

use serde::{Deserialize, Serialize};

use super::CodecOptions;
use crate::catalog::TagCatalog;
use crate::editable::{Segment, TagBuffer, TokenId};

/// One entry of the list form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ListEntry {
    Text(String),
    Tag(TokenId),
}

/// Decode entries into a canonical buffer.
///
/// Tag entries rejected by the validation policy degrade to the literal text
/// `{value}`, matching the bracketed form.
pub fn decode(entries: &[ListEntry], options: &CodecOptions, catalog: &TagCatalog) -> TagBuffer {
    entries
        .iter()
        .map(|entry| match entry {
            ListEntry::Text(value) if options.trim_text => Segment::text(value.trim()),
            ListEntry::Text(value) => Segment::text(value.as_str()),
            ListEntry::Tag(id) if options.validation.accepts(id, catalog) => {
                Segment::token(id.as_str())
            }
            ListEntry::Tag(id) => {
                tracing::trace!(target: "codec", %id, "unknown tag entry kept as text");
                Segment::text(format!("{{{id}}}"))
            }
        })
        .collect()
}

/// One entry per segment, in order
pub fn encode(buffer: &TagBuffer) -> Vec<ListEntry> {
    buffer
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => ListEntry::Text(text.clone()),
            Segment::Token(id) => ListEntry::Tag(id.clone()),
        })
        .collect()
}

pub fn to_json(entries: &[ListEntry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}

pub fn from_json(json: &str) -> serde_json::Result<Vec<ListEntry>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TagValidation;

    fn text(s: &str) -> ListEntry {
        ListEntry::Text(s.to_string())
    }

    fn tag(s: &str) -> ListEntry {
        ListEntry::Tag(s.to_string())
    }

    fn catalog() -> TagCatalog {
        TagCatalog::from_iter([("gift", "Gift card")])
    }

    #[test]
    fn test_json_shape() {
        let entries = vec![text("hello "), tag("gift")];
        let json = to_json(&entries).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"text","value":"hello "},{"type":"tag","value":"gift"}]"#
        );
        assert_eq!(from_json(&json).unwrap(), entries);
    }

    #[test]
    fn test_decode_merges_text_entries() {
        let entries = vec![text("a"), text(""), text("b"), tag("gift")];
        let buffer = decode(&entries, &CodecOptions::default(), &catalog());
        assert_eq!(
            buffer.segments(),
            &[Segment::text("ab"), Segment::token("gift")]
        );
    }

    #[test]
    fn test_decode_preserves_whitespace_by_default() {
        let entries = vec![text("  hi  "), tag("gift")];
        let buffer = decode(&entries, &CodecOptions::default(), &catalog());
        assert_eq!(encode(&buffer), entries);
    }

    #[test]
    fn test_decode_trims_when_configured() {
        let options = CodecOptions {
            trim_text: true,
            ..CodecOptions::default()
        };
        let entries = vec![text("  hi  "), tag("gift"), text("   ")];
        let buffer = decode(&entries, &options, &catalog());
        assert_eq!(
            buffer.segments(),
            &[Segment::text("hi"), Segment::token("gift")]
        );
    }

    #[test]
    fn test_unknown_tag_entry_degrades() {
        let entries = vec![text("a"), tag("ghost"), text("b")];
        let buffer = decode(&entries, &CodecOptions::default(), &catalog());
        assert_eq!(buffer.segments(), &[Segment::text("a{ghost}b")]);

        let any = CodecOptions {
            validation: TagValidation::Any,
            ..CodecOptions::default()
        };
        let buffer = decode(&entries, &any, &TagCatalog::new());
        assert_eq!(buffer.token_count(), 1);

        let buffer = decode(&[tag(""), tag("a}b")], &any, &TagCatalog::new());
        assert_eq!(buffer.segments(), &[Segment::token(""), Segment::token("a}b")]);
    }

    #[test]
    fn test_encode_never_emits_empty_entries() {
        let buffer = TagBuffer::from_segments(vec![
            Segment::text(""),
            Segment::token("gift"),
            Segment::text(""),
        ]);
        assert_eq!(encode(&buffer), vec![tag("gift")]);
    }
}

//! Serialization codec for the tag buffer.
//!
//! Two external forms, both lossless for any buffer built through the
//! mutation engine:
//!
//! - [`list`]: ordered `{"type": "text"|"tag", "value": ...}` entries
//! - [`bracketed`]: a single string with tokens written as `{identifier}`

pub mod bracketed;
pub mod list;

use serde::{Deserialize, Serialize};

use crate::catalog::{TagCatalog, TagValidation};
use crate::editable::TagBuffer;

pub use list::ListEntry;

/// Which external form a session reads and emits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerialForm {
    List,
    #[default]
    Bracketed,
}

/// Decoding policy shared by both forms and by surface reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Trim surrounding whitespace of decoded text entries
    pub trim_text: bool,
    /// Which identifiers may become tokens
    pub validation: TagValidation,
    /// Re-scan observed text for `{identifier}` matches on reconcile
    pub promote_typed_tokens: bool,
}

/// A serialized buffer in either external form.
///
/// Serializes untagged: a JSON array for the list form, a JSON string for
/// the bracketed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Serialized {
    List(Vec<ListEntry>),
    Bracketed(String),
}

impl Serialized {
    pub fn form(&self) -> SerialForm {
        match self {
            Serialized::List(_) => SerialForm::List,
            Serialized::Bracketed(_) => SerialForm::Bracketed,
        }
    }

    /// Encode a buffer in the requested form
    pub fn encode(buffer: &TagBuffer, form: SerialForm) -> Self {
        match form {
            SerialForm::List => Serialized::List(list::encode(buffer)),
            SerialForm::Bracketed => Serialized::Bracketed(bracketed::encode(buffer)),
        }
    }

    /// Decode into a canonical buffer
    pub fn decode(&self, options: &CodecOptions, catalog: &TagCatalog) -> TagBuffer {
        match self {
            Serialized::List(entries) => list::decode(entries, options, catalog),
            Serialized::Bracketed(input) => bracketed::decode(input, options.validation, catalog),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<Vec<ListEntry>> for Serialized {
    fn from(entries: Vec<ListEntry>) -> Self {
        Serialized::List(entries)
    }
}

impl From<String> for Serialized {
    fn from(input: String) -> Self {
        Serialized::Bracketed(input)
    }
}

impl From<&str> for Serialized {
    fn from(input: &str) -> Self {
        Serialized::Bracketed(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::{Position, Segment};

    fn catalog() -> TagCatalog {
        TagCatalog::from_iter([("gift", "Gift card")])
    }

    #[test]
    fn test_insert_then_encode_both_forms() {
        let mut buffer = TagBuffer::from_segments(vec![Segment::text("hello ")]);
        buffer.insert_token(Position::new(6), "gift");

        let list = Serialized::encode(&buffer, SerialForm::List);
        assert_eq!(
            list.to_json().unwrap(),
            r#"[{"type":"text","value":"hello "},{"type":"tag","value":"gift"}]"#
        );
        assert_eq!(
            Serialized::encode(&buffer, SerialForm::Bracketed),
            Serialized::Bracketed("hello {gift}".to_string())
        );
    }

    #[test]
    fn test_untagged_json_picks_form() {
        let list = Serialized::from_json(r#"[{"type":"tag","value":"gift"}]"#).unwrap();
        assert_eq!(list.form(), SerialForm::List);
        let string = Serialized::from_json(r#""hi {gift}""#).unwrap();
        assert_eq!(string.form(), SerialForm::Bracketed);

        let options = CodecOptions::default();
        assert_eq!(
            string.decode(&options, &catalog()).segments(),
            &[Segment::text("hi "), Segment::token("gift")]
        );
    }

    #[test]
    fn test_form_serde_names() {
        assert_eq!(serde_json::to_string(&SerialForm::List).unwrap(), r#""list""#);
        assert_eq!(SerialForm::default(), SerialForm::Bracketed);
    }
}

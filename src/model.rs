use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::NoteError;

/// Length of a note identifier: 12 random bytes, hex encoded.
pub const NOTE_ID_LEN: usize = 24;

/// Store-assigned note identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Checks the textual shape of an identifier taken from a request path.
    pub fn parse(raw: &str) -> Result<Self, NoteError> {
        if raw.len() == NOTE_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(NoteId(raw.to_ascii_lowercase()))
        } else {
            Err(NoteError::InvalidId(raw.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_row(id: String) -> Self {
        NoteId(id)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: NoteId,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "NoteText")]
    pub note_text: Option<String>,
}

/// Fields posted by the create and edit forms. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Body of the JSON answer to a delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: &'static str,
    pub item: Note,
}

impl Deleted {
    pub fn new(item: Note) -> Self {
        Deleted { message: "deleted", item }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_object_id_shaped_identifiers() {
        let id = NoteId::parse("5F1B2c3d4e5f6a7b8c9d0e1f").unwrap();
        assert_eq!(id.as_str(), "5f1b2c3d4e5f6a7b8c9d0e1f");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for raw in ["", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "5f1b2c3d4e5f6a7b8c9d0e1f00", "new"] {
            assert!(matches!(NoteId::parse(raw), Err(NoteError::InvalidId(_))), "{raw}");
        }
    }

    #[test]
    fn note_serializes_with_document_field_names() {
        let note = Note {
            id: NoteId::from_row("5f1b2c3d4e5f6a7b8c9d0e1f".into()),
            title: Some("A".into()),
            note_text: None,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"_id": "5f1b2c3d4e5f6a7b8c9d0e1f", "Title": "A", "NoteText": null})
        );
    }
}

//! The note data model.
//!
//! [`Note`] is the value every backend stores and returns. Its identifier is
//! not part of the value: backends address notes by an opaque string id
//! supplied alongside it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored note.
///
/// The field set is fixed; [`set`](crate::NoteBackend::set) always replaces
/// the whole value. Optional fields are omitted from the JSON form when empty,
/// so a plain note encodes as `{"text":"..."}`.
///
/// # Example
///
/// ```
/// use note_api_storage::Note;
///
/// let note = Note::new("hello");
/// assert_eq!(serde_json::to_string(&note).unwrap(), r#"{"text":"hello"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Free-text body of the note.
    pub text: String,

    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-form string fields carried with the note.
    ///
    /// A `BTreeMap` keeps the encoded form deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Note {
    /// Creates a note with the given body and no title or metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds a metadata field, replacing any previous value for `key`.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Payload accepted when creating or updating a note.
///
/// Structurally identical to [`Note`]: the id comes from the request path on
/// update and is generated on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    /// Free-text body of the note.
    pub text: String,

    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-form string fields carried with the note.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl From<CreateNoteRequest> for Note {
    fn from(request: CreateNoteRequest) -> Self {
        Self { text: request.text, title: request.title, metadata: request.metadata }
    }
}

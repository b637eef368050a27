//! JSON encoding shared by the remote backends.
//!
//! Redis and the object store have no schema of their own, so both store a
//! note as its JSON document. Keeping the codec in one place guarantees the
//! two backends agree on the format and that `decode(encode(note)) == note`.

use crate::{
    error::{StorageError, StorageResult},
    types::Note,
};

/// Encodes a note to its stored byte form.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if the note cannot be encoded.
pub fn encode_note(note: &Note) -> StorageResult<Vec<u8>> {
    serde_json::to_vec(note)
        .map_err(|e| StorageError::serialization_with_source("failed to encode note", e))
}

/// Decodes a stored value back into a note.
///
/// `id` is only used to make the error message point at the offending value.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if `bytes` is not a valid encoded
/// note. A malformed value is never reported as missing.
pub fn decode_note(id: &str, bytes: &[u8]) -> StorageResult<Note> {
    serde_json::from_slice(bytes).map_err(|e| {
        StorageError::serialization_with_source(format!("stored value for {id} is malformed"), e)
    })
}

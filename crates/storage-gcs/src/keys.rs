//! Mapping between note ids and object names.
//!
//! A note id becomes a single path segment below the prefix:
//! `{prefix}/{percent-encoded id}`. Everything except ASCII alphanumerics,
//! `-` and `_` is percent-encoded, so UUIDs stay readable, `/` in an id can
//! never create a nested object, and `.`/`..` segments cannot occur.
//!
//! Decoding only accepts names this module could have produced. Anything
//! else under the prefix is a foreign object and is not a note.

use note_api_storage::{StorageError, StorageResult};
use object_store::path::Path;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped in an id segment.
const ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Returns the object name for a note id.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] for the empty id, which has no
/// object name.
pub(crate) fn object_path(prefix: &Path, id: &str) -> StorageResult<Path> {
    if id.is_empty() {
        return Err(StorageError::serialization("note id cannot be empty in an object name"));
    }

    let encoded = utf8_percent_encode(id, ID_ENCODE_SET).to_string();
    Path::parse(format!("{prefix}/{encoded}"))
        .map_err(|e| StorageError::serialization_with_source("invalid object name", e))
}

/// Recovers the note id from an object name, or `None` for a foreign object.
pub(crate) fn note_id(prefix: &Path, location: &Path) -> Option<String> {
    let mut parts = location.prefix_match(prefix)?;
    let segment = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let encoded: &str = segment.as_ref();
    let id = percent_decode_str(encoded).decode_utf8().ok()?;

    // Reject names that decode but are not in canonical form (`%41` for `A`,
    // lowercase hex), so that the mapping stays one-to-one.
    if id.is_empty() || utf8_percent_encode(&id, ID_ENCODE_SET).to_string() != encoded {
        return None;
    }
    Some(id.into_owned())
}

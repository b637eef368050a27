//! Mapping between note ids and Redis keys.
//!
//! A note id is stored under `prefix + id`. `KEYS` takes a glob pattern, so
//! the prefix is escaped before `*` is appended; otherwise a prefix such as
//! `notes[1]:` would match keys it does not own.

/// Returns the Redis key for a note id.
pub(crate) fn redis_key(prefix: &str, id: &str) -> String {
    let mut key = String::with_capacity(prefix.len() + id.len());
    key.push_str(prefix);
    key.push_str(id);
    key
}

/// Recovers the note id from a Redis key, or `None` if the key is outside
/// the prefix.
pub(crate) fn note_id<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    key.strip_prefix(prefix)
}

/// Returns the `KEYS` pattern matching every key under `prefix`.
pub(crate) fn keys_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

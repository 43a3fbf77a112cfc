//! Storage key derivation.

use chrono::{DateTime, Utc};

use crate::storage::StorageKey;

/// Final path segment of a client-supplied file name.
///
/// Both `/` and `\` separate segments. Trailing separators and whitespace
/// are dropped, as the store would drop them from the key; `"dir/cat.png"`,
/// `"C:\\dir\\cat.png"` and `"cat.png /"` all yield `"cat.png"`. A name made
/// only of separators and whitespace yields `""`.
#[must_use]
pub fn base_name(file_name: &str) -> &str {
    let trimmed =
        file_name.trim_end_matches(|c: char| c == '/' || c == '\\' || c.is_whitespace());
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
}

/// Derive `"{epoch_seconds}-{base_name}"` for an upload.
///
/// Two uploads with the same base name in the same second get the same
/// key; the later write replaces the earlier object.
#[must_use]
pub fn generate_key(file_name: &str, now: DateTime<Utc>) -> StorageKey {
    StorageKey::new(format!("{}-{}", now.timestamp(), base_name(file_name)))
}

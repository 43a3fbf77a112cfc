//! Public addresses for stored objects.

use std::fmt;

use serde::Serialize;

use crate::storage::StorageKey;

/// Publicly reachable address of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PublicUrl(String);

impl PublicUrl {
    /// Borrow the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the virtual-hosted-style S3 URL for `key` in `bucket`.
///
/// The key is escaped as one opaque path segment: everything outside the
/// unreserved set, `/` included, is percent-encoded.
#[must_use]
pub fn public_url(bucket: &str, key: &StorageKey) -> PublicUrl {
    PublicUrl(format!(
        "https://{bucket}.s3.amazonaws.com/{}",
        urlencoding::encode(key.as_str())
    ))
}

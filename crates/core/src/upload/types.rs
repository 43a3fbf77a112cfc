//! Upload input types.

/// One uploaded file, as handed over by the request handler.
///
/// `body` is any stream of byte chunks; the service owns it for the
/// duration of the call and drops it on every exit path.
#[derive(Debug)]
pub struct UploadRequest<S> {
    /// Name the client gave the file, possibly with directories.
    pub original_file_name: String,
    /// Client-declared MIME type, passed to storage unchecked.
    pub content_type: String,
    /// File contents.
    pub body: S,
    /// Size the client announced, if any.
    pub declared_size: Option<u64>,
}

impl<S> UploadRequest<S> {
    /// Create a request with no declared size.
    pub fn new(original_file_name: impl Into<String>, content_type: impl Into<String>, body: S) -> Self {
        Self {
            original_file_name: original_file_name.into(),
            content_type: content_type.into(),
            body,
            declared_size: None,
        }
    }

    /// Set the size the client announced.
    #[must_use]
    pub fn with_declared_size(mut self, size: Option<u64>) -> Self {
        self.declared_size = size;
        self
    }
}

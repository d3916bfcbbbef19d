//! Domain types for the upload pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_IMAGE_MIME;
use crate::traits::ByteSource;

/// One user-initiated upload: where the bytes come from, what to call the
/// file, and what MIME type to record. Constructed once per attempt, never
/// persisted.
pub struct UploadRequest {
    /// Source of the file bytes.
    pub source: Box<dyn ByteSource>,
    /// Filename recorded in the multipart part metadata.
    pub file_name: String,
    /// MIME type of the content. `None` means the generic image default.
    pub mime_type: Option<String>,
}

impl UploadRequest {
    /// Creates a request with no explicit MIME type.
    pub fn new(source: Box<dyn ByteSource>, file_name: impl Into<String>) -> Self {
        Self {
            source,
            file_name: file_name.into(),
            mime_type: None,
        }
    }

    /// Sets an explicit MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// MIME type to put on the wire, falling back to the image default.
    pub fn mime_or_default(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME)
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("source", &self.source.describe())
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Outcome of a successful upload. Immutable once constructed; held only in
/// transient display state until the next attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Content identifier returned by the pinning service.
    pub ipfs_hash: String,
    /// Gateway URL a browser can load the content from.
    pub display_url: String,
}

impl UploadResult {
    /// Builds a result from a content identifier and the configured gateway
    /// host. A host without a scheme gets `https://` prepended; one that
    /// already carries a scheme is used as-is.
    pub fn new(ipfs_hash: impl Into<String>, gateway_host: &str) -> Self {
        let ipfs_hash = ipfs_hash.into();
        let base = gateway_host.trim_end_matches('/');
        let display_url = if base.starts_with("http://") || base.starts_with("https://") {
            format!("{}/{}", base, ipfs_hash)
        } else {
            format!("https://{}/{}", base, ipfs_hash)
        };

        Self {
            ipfs_hash,
            display_url,
        }
    }
}

/// What a file picker hands back after the user selected a file.
pub struct PickedFile {
    /// Source of the selected file's bytes.
    pub source: Box<dyn ByteSource>,
    /// MIME type reported by the picker, when it knows one.
    pub mime_type: Option<String>,
}

impl fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickedFile")
            .field("source", &self.source.describe())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

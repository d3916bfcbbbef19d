//! Error types for pinshot.
//!
//! The error surface is deliberately small: a consent failure that happens
//! before any network activity, and one collapsed upload failure for
//! everything after it. Authentication, quota, and network problems all
//! surface as the same kind; callers get a message, not a classification.

use thiserror::Error;

/// Result type alias using `PinshotError`.
pub type Result<T> = std::result::Result<T, PinshotError>;

/// Main error type for all pinshot operations.
#[derive(Debug, Error)]
pub enum PinshotError {
    /// User declined file-access consent. The upload endpoint is never
    /// contacted; the message is surfaced verbatim to the display layer.
    #[error("{0}")]
    PermissionDenied(String),

    /// Upload failed: transport error, non-2xx response, unreadable byte
    /// source, or malformed success payload. The message prefers the
    /// service's own error text when the response body carries one.
    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

impl PinshotError {
    /// Returns true if the failure happened before any network attempt.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, PinshotError::PermissionDenied(_))
    }

    /// Returns true if this is a collapsed upload failure.
    pub fn is_upload_failed(&self) -> bool {
        matches!(self, PinshotError::UploadFailed(_))
    }
}

//! Capability traits for pinshot.
//!
//! These seams separate the upload client from its platform collaborators:
//! where file bytes come from, and how a user consents to and selects a
//! file. The client depends only on the interfaces.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::PickedFile;

/// Interface for obtaining the raw bytes of a file to upload.
///
/// Implementations might be:
/// - A direct local file read (native callers)
/// - A fetch-and-blob round trip (remote-style URIs)
/// - An in-memory buffer (tests, embedding callers)
///
/// Which adapter runs is a capability choice of the calling environment,
/// never a protocol difference: every adapter feeds the same multipart
/// construction.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Reads the full file content. Called once per upload attempt; no
    /// client-side size cap applies.
    async fn read(&self) -> Result<Vec<u8>>;

    /// Short human-readable description of the source, for diagnostics.
    fn describe(&self) -> String;
}

/// Interface for the user-facing file selection collaborator.
///
/// Consent is asked before selection; a decline never reaches the upload
/// client.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Asks for file-access consent. `false` means the user declined.
    async fn request_permission(&self) -> bool;

    /// Lets the user select a file. `None` means the user cancelled, which
    /// is not an error.
    async fn pick(&self) -> Option<PickedFile>;
}

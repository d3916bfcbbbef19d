//! Pick-and-upload flow.
//!
//! Owns the lifecycle around a single upload: consent, selection, filename
//! derivation, the client call, and the state a display layer renders
//! between attempts.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use pinshot_core::constants::{DEFAULT_IMAGE_MIME, UPLOAD_FILENAME_PREFIX};
use pinshot_core::error::{PinshotError, Result};
use pinshot_core::traits::FilePicker;
use pinshot_core::types::{UploadRequest, UploadResult};
use pinshot_ipfs::PinataClient;

/// Transient state of the current or most recent upload attempt.
///
/// Scoped to a single attempt; the next round replaces it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum UploadState {
    /// No upload running and none resolved since the last round started.
    #[default]
    Idle,
    /// An upload is in flight.
    Uploading,
    /// The last attempt failed with a user-facing message.
    Failed(String),
    /// The last attempt completed.
    Completed(UploadResult),
}

/// Drives one upload at a time from a picker through the Pinata client.
///
/// The `&mut self` receiver on [`Uploader::pick_and_upload`] is the
/// single-flight guard: a second round cannot start until the previous one
/// resolved.
pub struct Uploader<P: FilePicker> {
    picker: P,
    client: PinataClient,
    state: UploadState,
    file_name_override: Option<String>,
}

impl<P: FilePicker> Uploader<P> {
    /// Creates an uploader over a picker and a configured client.
    pub fn new(picker: P, client: PinataClient) -> Self {
        Self {
            picker,
            client,
            state: UploadState::Idle,
            file_name_override: None,
        }
    }

    /// Records picked files under a fixed filename instead of a derived one.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name_override = Some(file_name.into());
        self
    }

    /// Current lifecycle state, for a display layer.
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Display URL of the most recent completed upload, if any.
    pub fn last_url(&self) -> Option<&str> {
        match &self.state {
            UploadState::Completed(result) => Some(&result.display_url),
            _ => None,
        }
    }

    /// Runs one pick-and-upload round.
    ///
    /// Returns `Ok(None)` when the user cancels selection. Consent denial
    /// fails the round before the upload endpoint is ever contacted; every
    /// later failure propagates from the client unchanged.
    #[instrument(skip(self))]
    pub async fn pick_and_upload(&mut self) -> Result<Option<UploadResult>> {
        self.state = UploadState::Idle;

        if !self.picker.request_permission().await {
            let err = PinshotError::PermissionDenied(
                "Permission to access the photo library is required".into(),
            );
            self.state = UploadState::Failed(err.to_string());
            return Err(err);
        }

        let Some(picked) = self.picker.pick().await else {
            debug!("Selection cancelled");
            return Ok(None);
        };

        let mime_type = picked.mime_type.clone();
        let file_name = self
            .file_name_override
            .clone()
            .unwrap_or_else(|| derive_file_name(mime_type.as_deref()));

        self.state = UploadState::Uploading;

        let mut request = UploadRequest::new(picked.source, file_name);
        if let Some(mime) = mime_type {
            request = request.with_mime_type(mime);
        }

        match self.client.upload(request).await {
            Ok(result) => {
                self.state = UploadState::Completed(result.clone());
                Ok(Some(result))
            }
            Err(err) => {
                self.state = UploadState::Failed(err.to_string());
                Err(err)
            }
        }
    }
}

/// Derives a filename for a picked image: `upload-<unix-millis><ext>`.
///
/// The name only feeds the multipart filename metadata. The extension comes
/// from the MIME subtype when one is known.
pub fn derive_file_name(mime_type: Option<&str>) -> String {
    let millis = Utc::now().timestamp_millis();
    let ext = extension_for_mime(mime_type.unwrap_or(DEFAULT_IMAGE_MIME));
    format!("{}{}{}", UPLOAD_FILENAME_PREFIX, millis, ext)
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/heic" => ".heic",
        _ => "",
    }
}

//! File pickers.
//!
//! An interactive photo picker lives in the platform layer; what ships here
//! is the path-based stand-in used by the CLI and by embedding callers that
//! already know which file to upload.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use pinshot_core::traits::FilePicker;
use pinshot_core::types::PickedFile;
use pinshot_ipfs::FileSource;

/// Picker over a fixed local path.
///
/// Consent is always granted and "selection" yields the path this picker
/// was built with. MIME type is guessed from the file extension unless
/// overridden.
pub struct PathPicker {
    path: PathBuf,
    mime_override: Option<String>,
}

impl PathPicker {
    /// Creates a picker for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mime_override: None,
        }
    }

    /// Overrides extension-based MIME guessing.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_override = Some(mime_type.into());
        self
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn request_permission(&self) -> bool {
        true
    }

    async fn pick(&self) -> Option<PickedFile> {
        let mime_type = self
            .mime_override
            .clone()
            .or_else(|| guess_mime(&self.path).map(str::to_string));

        Some(PickedFile {
            source: Box::new(FileSource::new(&self.path)),
            mime_type,
        })
    }
}

/// Guesses an image MIME type from a path extension.
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

//! Service constants for pinshot.
//!
//! Endpoint values match the Pinata pinning REST API; naming defaults match
//! what the upload flow records when the caller supplies nothing.

/// Base URL of the Pinata REST API.
pub const PINATA_API_URL: &str = "https://api.pinata.cloud";

/// Upload endpoint path, relative to the API base.
pub const PIN_FILE_ENDPOINT: &str = "/pinning/pinFileToIPFS";

/// Multipart field name the pinning service expects for file content.
pub const FILE_FIELD_NAME: &str = "file";

/// MIME type used when a caller supplies none.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Prefix for derived upload filenames.
pub const UPLOAD_FILENAME_PREFIX: &str = "upload-";

/// Environment variable holding the Pinata JWT (bearer credential).
pub const ENV_PINATA_JWT: &str = "PINATA_JWT";

/// Environment variable holding the gateway host for display URLs.
pub const ENV_PINATA_GATEWAY: &str = "PINATA_GATEWAY";

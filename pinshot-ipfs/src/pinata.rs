//! Pinata upload client.
//!
//! Submits exactly one file per call to the Pinata pinning endpoint and
//! translates the response into a content identifier plus a gateway display
//! URL. There is no retry, no client-side size cap, and no timeout beyond
//! the transport default.

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use pinshot_core::constants::{
    ENV_PINATA_GATEWAY, ENV_PINATA_JWT, FILE_FIELD_NAME, PINATA_API_URL, PIN_FILE_ENDPOINT,
};
use pinshot_core::error::{PinshotError, Result};
use pinshot_core::types::{UploadRequest, UploadResult};

use crate::source::MemorySource;

/// Pinata client configuration.
///
/// Read once at startup and never mutated. An absent JWT is tolerated here;
/// it only surfaces as an authentication failure at upload time.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PinataConfig {
    /// Pinata JWT used as the bearer credential for uploads.
    pub jwt: String,
    /// Gateway host for user-facing display URLs (e.g. "gateway.pinata.cloud").
    pub gateway_host: String,
    /// Base URL of the pinning API. Overridable for tests against a stub
    /// server.
    pub api_url: String,
}

impl PinataConfig {
    /// Creates a config pointing at the production Pinata API.
    pub fn new(jwt: impl Into<String>, gateway_host: impl Into<String>) -> Self {
        Self {
            jwt: jwt.into(),
            gateway_host: gateway_host.into(),
            api_url: PINATA_API_URL.into(),
        }
    }

    /// Points the client at a different API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Reads configuration from the environment (`PINATA_JWT`,
    /// `PINATA_GATEWAY`), loading a `.env` file when present.
    ///
    /// Missing variables become empty strings so that misconfiguration shows
    /// up as a rejected upload, not a startup failure.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::new(
            std::env::var(ENV_PINATA_JWT).unwrap_or_default(),
            std::env::var(ENV_PINATA_GATEWAY).unwrap_or_default(),
        )
    }
}

/// Client for the Pinata file upload endpoint.
///
/// Stateless: every call shares only the immutable config, so sequential or
/// concurrent calls cannot interfere. Single-flight discipline belongs to
/// the caller.
pub struct PinataClient {
    config: PinataConfig,
    http_client: reqwest::Client,
}

impl PinataClient {
    /// Creates a new client with the given config.
    pub fn with_config(config: PinataConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Uploads one file to the pinning service.
    ///
    /// Builds a multipart body with a single `file` part carrying the
    /// filename, MIME type, and raw bytes, then makes exactly one POST
    /// attempt with bearer authentication.
    #[instrument(skip(self, request), fields(file_name = %request.file_name))]
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResult> {
        let data = request.source.read().await?;

        let file_part = reqwest::multipart::Part::bytes(data)
            .file_name(request.file_name.clone())
            .mime_str(request.mime_or_default())
            .map_err(|e| PinshotError::UploadFailed(e.to_string()))?;

        let form = reqwest::multipart::Form::new().part(FILE_FIELD_NAME, file_part);

        let url = format!(
            "{}{}",
            self.config.api_url.trim_end_matches('/'),
            PIN_FILE_ENDPOINT
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.jwt))
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinshotError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Pinata rejected upload");
            return Err(PinshotError::UploadFailed(service_error_message(
                status, &body,
            )));
        }

        let json: PinResponse = response
            .json()
            .await
            .map_err(|e| PinshotError::UploadFailed(e.to_string()))?;

        debug!(cid = %json.ipfs_hash, "Uploaded to Pinata");
        Ok(UploadResult::new(json.ipfs_hash, &self.config.gateway_host))
    }

    /// Uploads an in-memory buffer. Convenience over [`PinataClient::upload`].
    pub async fn upload_bytes(
        &self,
        data: Vec<u8>,
        file_name: impl Into<String>,
        mime_type: Option<&str>,
    ) -> Result<UploadResult> {
        let mut request = UploadRequest::new(Box::new(MemorySource::new(data)), file_name);
        if let Some(mime) = mime_type {
            request = request.with_mime_type(mime);
        }
        self.upload(request).await
    }
}

/// Extracts the service's own error text from a failure body when present,
/// falling back to a generic status-bearing message.
fn service_error_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorField,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ErrorField {
        Message(String),
        Detailed {
            reason: Option<String>,
            details: Option<String>,
        },
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match parsed.error {
            ErrorField::Message(msg) if !msg.is_empty() => return msg,
            ErrorField::Detailed { reason, details } => {
                if let Some(text) = details.or(reason).filter(|t| !t.is_empty()) {
                    return text;
                }
            }
            _ => {}
        }
    }

    format!("Upload failed with status {}: {}", status, body)
}

/// Successful pin response. Only the content identifier is contractual.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: String) -> PinataConfig {
        PinataConfig::new("test-jwt", "gateway.example.com").with_api_url(api_url)
    }

    fn pin_success(hash: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "IpfsHash": hash,
            "PinSize": 5,
            "Timestamp": "2026-01-01T00:00:00.000Z",
        }))
    }

    #[test]
    fn test_config_defaults_to_production_api() {
        let config = PinataConfig::new("jwt", "gateway.pinata.cloud");
        assert_eq!(config.api_url, PINATA_API_URL);
    }

    #[test]
    fn test_service_error_message_prefers_string_form() {
        let msg = service_error_message(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error": "Invalid credentials"}"#,
        );
        assert_eq!(msg, "Invalid credentials");
    }

    #[test]
    fn test_service_error_message_prefers_detailed_form() {
        let msg = service_error_message(
            reqwest::StatusCode::FORBIDDEN,
            r#"{"error": {"reason": "KEY_REVOKED", "details": "This key has been revoked"}}"#,
        );
        assert_eq!(msg, "This key has been revoked");

        let msg = service_error_message(
            reqwest::StatusCode::FORBIDDEN,
            r#"{"error": {"reason": "KEY_REVOKED"}}"#,
        );
        assert_eq!(msg, "KEY_REVOKED");
    }

    #[test]
    fn test_service_error_message_falls_back_to_status() {
        let msg = service_error_message(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert!(msg.contains("500"));
        assert!(msg.contains("oops"));

        let msg = service_error_message(reqwest::StatusCode::BAD_GATEWAY, "");
        assert!(msg.contains("502"));
    }

    #[tokio::test]
    async fn test_upload_builds_display_url_from_gateway() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .and(header("Authorization", "Bearer test-jwt"))
            .and(header("Accept", "application/json"))
            .respond_with(pin_success("Qm123"))
            .mount(&server)
            .await;

        let client = PinataClient::with_config(test_config(server.uri()));
        let result = client
            .upload_bytes(b"hello".to_vec(), "photo.jpg", Some("image/jpeg"))
            .await
            .unwrap();

        assert_eq!(result.ipfs_hash, "Qm123");
        assert_eq!(result.display_url, "https://gateway.example.com/Qm123");
    }

    #[tokio::test]
    async fn test_upload_sends_single_file_part_with_filename() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"photo.png\""))
            .and(body_string_contains("Content-Type: image/png"))
            .respond_with(pin_success("Qm123"))
            .mount(&server)
            .await;

        let client = PinataClient::with_config(test_config(server.uri()));
        let result = client
            .upload_bytes(b"png bytes".to_vec(), "photo.png", Some("image/png"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_upload_defaults_mime_to_generic_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .and(body_string_contains("Content-Type: image/jpeg"))
            .respond_with(pin_success("Qm123"))
            .mount(&server)
            .await;

        let client = PinataClient::with_config(test_config(server.uri()));
        let result = client.upload_bytes(b"hello".to_vec(), "photo", None).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_upload_surfaces_service_error_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let client = PinataClient::with_config(test_config(server.uri()));
        let err = client
            .upload_bytes(b"hello".to_vec(), "photo.jpg", None)
            .await
            .unwrap_err();

        assert!(err.is_upload_failed());
        assert!(err.to_string().contains("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_upload_fails_on_non_2xx_with_nonempty_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PinataClient::with_config(test_config(server.uri()));
        let err = client
            .upload_bytes(b"hello".to_vec(), "photo.jpg", None)
            .await
            .unwrap_err();

        assert!(err.is_upload_failed());
        assert!(!err.to_string().is_empty());
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_upload_fails_on_malformed_success_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let client = PinataClient::with_config(test_config(server.uri()));
        let err = client
            .upload_bytes(b"hello".to_vec(), "photo.jpg", None)
            .await
            .unwrap_err();

        assert!(err.is_upload_failed());
    }

    #[tokio::test]
    async fn test_upload_fails_on_connection_refused() {
        // Grab a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client =
            PinataClient::with_config(test_config(format!("http://127.0.0.1:{}", port)));
        let err = client
            .upload_bytes(b"hello".to_vec(), "photo.jpg", None)
            .await
            .unwrap_err();

        assert!(err.is_upload_failed());
    }

    #[tokio::test]
    async fn test_sequential_uploads_are_independent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(pin_success("Qm111"))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/pinning/pinFileToIPFS"))
            .respond_with(pin_success("Qm222"))
            .mount(&server)
            .await;

        let client = PinataClient::with_config(test_config(server.uri()));

        let first = client
            .upload_bytes(b"first".to_vec(), "first.jpg", None)
            .await
            .unwrap();
        let second = client
            .upload_bytes(b"second".to_vec(), "second.jpg", None)
            .await
            .unwrap();

        assert_eq!(first.display_url, "https://gateway.example.com/Qm111");
        assert_eq!(second.display_url, "https://gateway.example.com/Qm222");
    }
}

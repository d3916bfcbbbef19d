//! Byte-source adapters.
//!
//! The upload client reads file content through the `ByteSource` seam. The
//! adapter in use is a capability of the calling environment; all of them
//! must yield the same bytes for the same content, so the request on the
//! wire never depends on which one ran.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use pinshot_core::error::{PinshotError, Result};
use pinshot_core::traits::ByteSource;

/// Reads bytes directly from a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source over the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for FileSource {
    async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            PinshotError::UploadFailed(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetch-and-blob adapter: resolves a remote-style URI to bytes with an
/// intermediate GET before the upload is constructed.
pub struct HttpSource {
    uri: String,
    http_client: reqwest::Client,
}

impl HttpSource {
    /// Creates a source that fetches the given URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ByteSource for HttpSource {
    async fn read(&self) -> Result<Vec<u8>> {
        let response = self
            .http_client
            .get(&self.uri)
            .send()
            .await
            .map_err(|e| PinshotError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PinshotError::UploadFailed(format!(
                "Failed to fetch {}: HTTP {}",
                self.uri,
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| PinshotError::UploadFailed(e.to_string()))
    }

    fn describe(&self) -> String {
        self.uri.clone()
    }
}

/// In-memory buffer adapter.
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    /// Creates a source over an owned buffer.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn read(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_file_source_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"image bytes").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.read().await.unwrap(), b"image bytes");
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_upload_failure() {
        let source = FileSource::new("/nonexistent/photo.jpg");
        let err = source.read().await.unwrap_err();

        assert!(err.is_upload_failed());
        assert!(err.to_string().contains("/nonexistent/photo.jpg"));
    }

    #[tokio::test]
    async fn test_http_source_fetches_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"image bytes".to_vec()))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/photo.jpg", server.uri()));
        assert_eq!(source.read().await.unwrap(), b"image bytes");
    }

    #[tokio::test]
    async fn test_http_source_non_2xx_is_upload_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/gone.jpg", server.uri()));
        let err = source.read().await.unwrap_err();

        assert!(err.is_upload_failed());
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_adapters_yield_identical_bytes_for_identical_content() {
        let content = b"the same image".to_vec();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&content).unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(content.clone()))
            .mount(&server)
            .await;

        let from_file = FileSource::new(file.path()).read().await.unwrap();
        let from_http = HttpSource::new(format!("{}/photo.jpg", server.uri()))
            .read()
            .await
            .unwrap();
        let from_memory = MemorySource::new(content.clone()).read().await.unwrap();

        assert_eq!(from_file, content);
        assert_eq!(from_file, from_http);
        assert_eq!(from_file, from_memory);
    }
}

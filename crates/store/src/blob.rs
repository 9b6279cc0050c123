//! Remote blob storage.
//!
//! [`VercelBlobStore`] speaks the Vercel Blob REST API: `GET /` lists blobs,
//! `PUT /{pathname}` uploads one, and the returned public `url` serves it.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Default Vercel Blob API base URL.
pub const DEFAULT_API_URL: &str = "https://blob.vercel-storage.com";

/// API version header value the REST endpoints expect.
const API_VERSION: &str = "7";

/// HTTP request timeout for a single call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// A stored blob as reported by the object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobEntry {
    pub pathname: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Remote object storage used for `gallery.json` and uploaded images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Every blob in the store.
    async fn list(&self) -> Result<Vec<BlobEntry>, StoreError>;

    /// Download the content of `entry`.
    async fn fetch(&self, entry: &BlobEntry) -> Result<Vec<u8>, StoreError>;

    /// Create or overwrite the blob at `pathname`.
    async fn put(
        &self,
        pathname: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<BlobEntry, StoreError>;
}

// ---------------------------------------------------------------------------
// BlobConfig
// ---------------------------------------------------------------------------

/// Object store settings derived from the environment.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    pub token: String,
    pub api_url: String,
}

impl BlobConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `BLOB_READ_WRITE_TOKEN` is not set, signalling that
    /// only the local file should be used.
    ///
    /// | Variable                | Required | Default                            |
    /// |-------------------------|----------|------------------------------------|
    /// | `BLOB_READ_WRITE_TOKEN` | yes      | --                                  |
    /// | `BLOB_API_URL`          | no       | `https://blob.vercel-storage.com`  |
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("BLOB_READ_WRITE_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())?;
        Some(Self {
            token,
            api_url: std::env::var("BLOB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// VercelBlobStore
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    blobs: Vec<BlobEntry>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

pub struct VercelBlobStore {
    client: reqwest::Client,
    config: BlobConfig,
}

impl VercelBlobStore {
    pub fn new(config: BlobConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Turn a non-2xx response into [`StoreError::HttpStatus`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|e| e.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
    Err(StoreError::HttpStatus {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ObjectStore for VercelBlobStore {
    async fn list(&self) -> Result<Vec<BlobEntry>, StoreError> {
        let mut blobs = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.endpoint(""))
                .bearer_auth(&self.config.token)
                .header("x-api-version", API_VERSION)
                .query(&[("limit", "1000")]);
            if let Some(c) = &cursor {
                request = request.query(&[("cursor", c.as_str())]);
            }

            let page: ListResponse = check_status(request.send().await?).await?.json().await?;
            blobs.extend(page.blobs);

            match page.cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(blobs)
    }

    async fn fetch(&self, entry: &BlobEntry) -> Result<Vec<u8>, StoreError> {
        let response = check_status(self.client.get(&entry.url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn put(
        &self,
        pathname: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<BlobEntry, StoreError> {
        let response = self
            .client
            .put(self.endpoint(pathname))
            .bearer_auth(&self.config.token)
            .header("x-api-version", API_VERSION)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .header("x-allow-overwrite", "1")
            .body(body)
            .send()
            .await?;

        let entry: BlobEntry = check_status(response).await?.json().await?;
        tracing::info!(pathname = %entry.pathname, url = %entry.url, "Blob stored");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(api_url: &str) -> VercelBlobStore {
        VercelBlobStore::new(BlobConfig {
            token: "vercel_blob_rw_test".into(),
            api_url: api_url.into(),
        })
    }

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(
            store("https://blob.example/").endpoint("/gallery.json"),
            "https://blob.example/gallery.json"
        );
        assert_eq!(store("https://blob.example").endpoint(""), "https://blob.example/");
    }

    #[test]
    fn list_response_parses_camel_case() {
        let page: ListResponse = serde_json::from_str(
            r#"{"blobs":[{"pathname":"gallery.json","url":"https://x/gallery.json","size":12,"uploadedAt":"2025-01-01T00:00:00Z"}],"cursor":"abc","hasMore":true}"#,
        )
        .unwrap();
        assert_eq!(page.blobs[0].pathname, "gallery.json");
        assert_eq!(page.blobs[0].size, Some(12));
        assert!(page.has_more);
        assert_eq!(page.cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn store_error_display_http_status() {
        let err = StoreError::HttpStatus {
            status: 403,
            message: "Access denied".into(),
        };
        assert_eq!(err.to_string(), "Object store returned HTTP 403: Access denied");
    }
}

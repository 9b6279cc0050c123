//! Lenient JSON body extractor.
//!
//! The site's forms post JSON with varying `Content-Type` headers, so
//! [`JsonBody`] parses the raw body regardless of the header and reports
//! malformed input as a JSON 400 instead of axum's plain-text rejection.
//! A body that cannot be buffered keeps its own status (413 past the limit).

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}".as_slice()
        } else {
            bytes.as_ref()
        };

        serde_json::from_slice(body)
            .map(JsonBody)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
    }
}

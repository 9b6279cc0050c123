//! Shared response bodies.

use serde::Serialize;

/// `{ "ok": true }`, returned by the lead endpoints.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// `{ "message": ... }`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

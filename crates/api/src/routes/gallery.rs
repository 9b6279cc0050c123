//! Route definitions for the `/gallery` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery`.
///
/// ```text
/// GET    /list          -> list
/// POST   /upload-blob   -> upload_blob (requires admin)
/// POST   /upload        -> upload (requires admin)
/// POST   /upload-url    -> upload_url (requires admin)
/// GET    /debug         -> debug
/// DELETE /delete/{id}   -> delete (requires admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(gallery::list))
        .route("/upload-blob", post(gallery::upload_blob))
        .route("/upload", post(gallery::upload))
        .route("/upload-url", post(gallery::upload_url))
        .route("/debug", get(gallery::debug))
        .route("/delete/{id}", delete(gallery::delete))
}

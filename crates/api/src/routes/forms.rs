//! Route definitions for the `/forms` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// POST /submit   -> submit
/// GET  /list     -> list (requires admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(forms::submit))
        .route("/list", get(forms::list))
}

//! Route definitions for the public lead forms.

use axum::routing::post;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead routes, merged at the `/api` root.
///
/// ```text
/// POST /lead         -> contact
/// POST /volunteer    -> volunteer
/// POST /newsletter   -> newsletter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lead", post(leads::contact))
        .route("/volunteer", post(leads::volunteer))
        .route("/newsletter", post(leads::newsletter))
}

pub mod auth;
pub mod forms;
pub mod gallery;
pub mod health;
pub mod leads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          admin login
///
/// /lead                                contact form
/// /volunteer                           volunteer form
/// /newsletter                          newsletter signup
///
/// /forms/submit                        generic form submission
/// /forms/list                          stored submissions (admin)
///
/// /gallery/list                        gallery contents
/// /gallery/upload-blob                 add image by URL or base64 (admin)
/// /gallery/upload                      multipart image upload (admin)
/// /gallery/upload-url                  object-store pathname for a file (admin)
/// /gallery/debug                       backing store diagnostics
/// /gallery/delete/{id}                 remove image (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(leads::router())
        .nest("/forms", forms::router())
        .nest("/gallery", gallery::router())
}

use std::sync::Arc;

use lifesavers_notify::NotificationDispatcher;
use lifesavers_store::{GalleryStore, SubmissionStore};

use crate::captcha::CaptchaVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Sends admin notifications and auto-replies for leads.
    pub dispatcher: Arc<NotificationDispatcher>,
    pub gallery: Arc<GalleryStore>,
    pub submissions: Arc<SubmissionStore>,
    /// `None` when no reCAPTCHA secret is configured.
    pub captcha: Option<Arc<dyn CaptchaVerifier>>,
}

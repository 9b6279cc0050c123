use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lifesavers_core::error::CoreError;
use lifesavers_notify::DispatchError;
use lifesavers_store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, dispatch and storage errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent
/// `{ "ok": false, "error": ..., "code": ... }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lifesavers_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Sending the lead emails failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Reading or writing the gallery / submissions failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An extractor rejected the request body; keeps the rejection's status
    /// (e.g. 413 when the body limit is exceeded).
    #[error("Rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// A downstream service failed; the message is shown to the client.
    #[error("Dependency error: {0}")]
    Dependency(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Wrap an extractor rejection, keeping its status code.
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Rejected {
            status,
            message: message.into(),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Dispatch(err) => match err {
                DispatchError::MissingTemplate { category, var } => {
                    tracing::error!(%category, var, "Auto-reply template not configured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIG_ERROR",
                        err.to_string(),
                    )
                }
                DispatchError::AdminNotify(e) => {
                    tracing::error!(error = %e, "Admin notification failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DEPENDENCY_ERROR",
                        "Failed to send emails.".to_string(),
                    )
                }
                DispatchError::AutoReply(e) => {
                    tracing::error!(error = %e, "Auto-reply failed");
                    (StatusCode::BAD_GATEWAY, "AUTO_REPLY_FAILED", err.to_string())
                }
            },

            AppError::Store(err) => match err {
                StoreError::Core(core) => classify_core_error(core),
                StoreError::NotConfigured => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    "Object storage is not configured (set BLOB_READ_WRITE_TOKEN)".to_string(),
                ),
                other => {
                    tracing::error!(error = %other, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DEPENDENCY_ERROR",
                        "Storage operation failed".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Rejected { status, message } => {
                let code = match *status {
                    StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                    s if s.is_server_error() => "INTERNAL_ERROR",
                    _ => "BAD_REQUEST",
                };
                (*status, code, message.clone())
            }
            AppError::Dependency(msg) => {
                tracing::error!(error = %msg, "Dependency error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DEPENDENCY_ERROR",
                    msg.clone(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "ok": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a [`CoreError`] to an HTTP status, error code, and message.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Config(msg) => {
            tracing::error!(error = %msg, "Configuration error");
            (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg.clone())
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

use lifesavers_core::error::CoreError;

/// Error type for gallery and submission persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Domain error, e.g. deleting an id that does not exist.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("Object store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The object store answered with a non-2xx status.
    #[error("Object store returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The operation needs the object store but no token is configured.
    #[error("Object storage is not configured")]
    NotConfigured,
}

use std::path::PathBuf;

use lifesavers_notify::MailConfig;
use lifesavers_store::BlobConfig;

use crate::auth::credentials::AdminCredentials;
use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Read once at start-up and shared immutably through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`; `*` allows any.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding `gallery.json`, `submissions.json` and `images/`.
    pub data_dir: PathBuf,
    /// Largest accepted request body, uploads included.
    pub max_body_bytes: usize,
    pub admin: AdminCredentials,
    pub jwt: JwtConfig,
    pub mail: MailConfig,
    /// `None` when no object store token is set.
    pub blob: Option<BlobConfig>,
    /// reCAPTCHA secret; verification is skipped without it.
    pub recaptcha_secret: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `*`                        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATA_DIR`             | `.`                        |
    /// | `MAX_BODY_BYTES`       | `15728640` (15 MiB)        |
    /// | `RECAPTCHA_SECRET_KEY` | --                         |
    ///
    /// Admin, JWT, mail and blob settings are documented on their own
    /// `from_env` constructors.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| ".".into()));

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| (15 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let recaptcha_secret = std::env::var("RECAPTCHA_SECRET_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_dir,
            max_body_bytes,
            admin: AdminCredentials::from_env(),
            jwt: JwtConfig::from_env(),
            mail: MailConfig::from_env(),
            blob: BlobConfig::from_env(),
            recaptcha_secret,
        }
    }
}

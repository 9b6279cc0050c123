use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lifesavers_api::captcha::{CaptchaVerifier, RecaptchaVerifier};
use lifesavers_api::config::ServerConfig;
use lifesavers_api::router::build_app_router;
use lifesavers_api::state::AppState;
use lifesavers_notify::{Mailer, NotificationDispatcher, ResendMailer};
use lifesavers_store::{GalleryStore, ObjectStore, SubmissionStore, VercelBlobStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifesavers_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        data_dir = %config.data_dir.display(),
        "Loaded server configuration"
    );

    // --- Email ---
    let mailer: Arc<dyn Mailer> = Arc::new(ResendMailer::from_config(&config.mail));
    if !mailer.is_configured() {
        tracing::warn!("RESEND_API_KEY is not set; lead emails will fail");
    }
    let dispatcher = NotificationDispatcher::new(
        mailer,
        config.mail.admin_emails.clone(),
        config.mail.templates.clone(),
    );

    // --- Storage ---
    let remote: Option<Arc<dyn ObjectStore>> = config.blob.clone().map(|blob| {
        tracing::info!(api_url = %blob.api_url, "Object storage enabled");
        Arc::new(VercelBlobStore::new(blob)) as Arc<dyn ObjectStore>
    });
    if remote.is_none() {
        tracing::info!("BLOB_READ_WRITE_TOKEN not set; gallery uses the local file only");
    }
    let gallery = GalleryStore::new(&config.data_dir, remote);
    let submissions = SubmissionStore::new(&config.data_dir);

    // --- Captcha ---
    let captcha = config
        .recaptcha_secret
        .clone()
        .map(|secret| Arc::new(RecaptchaVerifier::new(secret)) as Arc<dyn CaptchaVerifier>);

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        dispatcher: Arc::new(dispatcher),
        gallery: Arc::new(gallery),
        submissions: Arc::new(submissions),
        captcha,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use lifesavers_api::auth::credentials::AdminCredentials;
use lifesavers_api::auth::jwt::{generate_access_token, JwtConfig, ROLE_ADMIN};
use lifesavers_api::config::ServerConfig;
use lifesavers_api::router::build_app_router;
use lifesavers_api::state::AppState;
use lifesavers_notify::{
    MailConfig, MailError, Mailer, NotificationDispatcher, OutboundEmail, SendReceipt, TemplateIds,
};
use lifesavers_store::{BlobEntry, GalleryStore, ObjectStore, StoreError, SubmissionStore};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const ADMIN_EMAIL: &str = "ops@example.org";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Records every email; sends whose index is in `fail_on` fail.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub fail_on: Vec<usize>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailError> {
        let mut sent = self.sent.lock().unwrap();
        let index = sent.len();
        sent.push(email.clone());
        if self.fail_on.contains(&index) {
            return Err(MailError::HttpStatus {
                status: 500,
                message: "provider unavailable".into(),
            });
        }
        Ok(SendReceipt {
            id: Some(format!("msg-{index}")),
        })
    }
}

/// In-memory object store. While `fail_reads` is set, fetches fail with 503.
#[derive(Default)]
pub struct MemoryObjectStore {
    pub blobs: Mutex<BTreeMap<String, Vec<u8>>>,
    pub fail_reads: AtomicBool,
}

impl MemoryObjectStore {
    pub fn get(&self, pathname: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(pathname).cloned()
    }

    pub fn insert(&self, pathname: &str, body: &[u8]) {
        self.blobs
            .lock()
            .unwrap()
            .insert(pathname.to_string(), body.to_vec());
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list(&self) -> Result<Vec<BlobEntry>, StoreError> {
        Ok(self
            .blobs
            .lock()
            .unwrap()
            .iter()
            .map(|(path, bytes)| BlobEntry {
                pathname: path.clone(),
                url: format!("https://blob.test/{path}"),
                size: Some(bytes.len() as u64),
            })
            .collect())
    }

    async fn fetch(&self, entry: &BlobEntry) -> Result<Vec<u8>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::HttpStatus {
                status: 503,
                message: "unavailable".into(),
            });
        }
        self.get(&entry.pathname).ok_or(StoreError::HttpStatus {
            status: 404,
            message: "not found".into(),
        })
    }

    async fn put(&self, pathname: &str, body: Vec<u8>, _: &str) -> Result<BlobEntry, StoreError> {
        let size = body.len() as u64;
        self.blobs.lock().unwrap().insert(pathname.to_string(), body);
        Ok(BlobEntry {
            pathname: pathname.to_string(),
            url: format!("https://blob.test/{pathname}"),
            size: Some(size),
        })
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Knobs for [`build_test_app_with`].
pub struct TestOptions {
    pub templates: TemplateIds,
    pub admin_emails: Vec<&'static str>,
    /// Indices of mailer sends that fail.
    pub fail_sends: Vec<usize>,
    pub remote: bool,
    pub max_body_bytes: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            templates: all_templates(),
            admin_emails: vec![ADMIN_EMAIL],
            fail_sends: Vec::new(),
            remote: false,
            max_body_bytes: 15 * 1024 * 1024,
        }
    }
}

pub fn all_templates() -> TemplateIds {
    TemplateIds {
        volunteer: Some("tpl-volunteer".into()),
        donor: Some("tpl-donor".into()),
        sponsor: Some("tpl-sponsor".into()),
        collaboration: Some("tpl-collab".into()),
        newsletter: Some("tpl-newsletter".into()),
    }
}

/// The app under test together with its fakes and data directory.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub mailer: Arc<RecordingMailer>,
    pub blobs: Option<Arc<MemoryObjectStore>>,
    /// Keeps the data directory alive for the test's duration.
    pub data_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn data_path(&self, name: &str) -> PathBuf {
        self.data_dir.path().join(name)
    }

    pub fn admin_token(&self) -> String {
        generate_access_token(ADMIN_USERNAME, ROLE_ADMIN, &self.config.jwt).unwrap()
    }
}

/// Build a test `ServerConfig` with safe defaults rooted at `data_dir`.
pub fn test_config(data_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir,
        max_body_bytes: 15 * 1024 * 1024,
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: Some(ADMIN_PASSWORD.to_string()),
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 60,
        },
        mail: MailConfig::default(),
        blob: None,
        recaptcha_secret: None,
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(TestOptions::default())
}

/// Build the full application router with in-memory fakes for the mailer
/// and object store, so tests exercise the same middleware stack as
/// production.
pub fn build_test_app_with(options: TestOptions) -> TestApp {
    let data_dir = tempfile::tempdir().unwrap();
    let mut config = test_config(data_dir.path().to_path_buf());
    config.max_body_bytes = options.max_body_bytes;

    let mailer = Arc::new(RecordingMailer {
        sent: Mutex::new(Vec::new()),
        fail_on: options.fail_sends,
    });
    let admins = options
        .admin_emails
        .iter()
        .map(|a| a.parse().unwrap())
        .collect();
    let dispatcher = NotificationDispatcher::new(
        Arc::clone(&mailer) as Arc<dyn Mailer>,
        admins,
        options.templates,
    );

    let blobs = options.remote.then(|| Arc::new(MemoryObjectStore::default()));
    let remote = blobs
        .as_ref()
        .map(|b| Arc::clone(b) as Arc<dyn ObjectStore>);

    let state = AppState {
        config: Arc::new(config.clone()),
        dispatcher: Arc::new(dispatcher),
        gallery: Arc::new(GalleryStore::new(data_dir.path(), remote)),
        submissions: Arc::new(SubmissionStore::new(data_dir.path())),
        captcha: None,
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        mailer,
        blobs,
        data_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

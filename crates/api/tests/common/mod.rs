#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use track1_api::auth::jwt::{issue_token, JwtConfig};
use track1_api::config::{MediaConfig, ServerConfig};
use track1_api::router::build_app_router;
use track1_api::services::TrackService;
use track1_api::state::AppState;
use track1_core::ffprobe::{DurationProbe, ProbeError};
use track1_core::types::DbId;
use track1_db::models::account::CreateAccount;
use track1_db::repositories::{ProducerRepo, VocalRepo};
use track1_storage::{InMemoryMediaStore, MediaStore};

pub const BEAT_BUCKET: &str = "test-beats";
pub const WAV_BUCKET: &str = "test-wavs";
pub const DEFAULT_JACKET: &str =
    "https://test-beats.s3.ap-northeast-2.amazonaws.com/default-jacket.png";
pub const FIXED_DURATION: f64 = 187.25;

const MULTIPART_BOUNDARY: &str = "track1-test-boundary";

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Duration probe that reports the same length for every file.
pub struct FixedProbe(pub f64);

#[async_trait::async_trait]
impl DurationProbe for FixedProbe {
    async fn duration_secs(&self, _location: &str) -> Result<f64, ProbeError> {
        Ok(self.0)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub fn test_media() -> MediaConfig {
    MediaConfig {
        region: "ap-northeast-2".to_string(),
        beat_bucket: BEAT_BUCKET.to_string(),
        wav_bucket: WAV_BUCKET.to_string(),
        default_jacket_image: DEFAULT_JACKET.to_string(),
        storage_timeout_secs: 5,
        ffprobe_bin: "ffprobe".to_string(),
        probe_timeout_secs: 5,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        media: test_media(),
    }
}

/// A track service over the in-memory store and a fixed probe.
pub fn track_service(pool: PgPool, store: Arc<InMemoryMediaStore>) -> TrackService {
    TrackService::new(
        pool,
        store,
        Arc::new(FixedProbe(FIXED_DURATION)),
        test_media(),
    )
}

/// Router plus handles on the collaborators tests inspect.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryMediaStore>,
    pub config: ServerConfig,
}

impl TestApp {
    /// A fresh clone of the router, ready for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn token(&self, user_id: DbId, role: &str) -> String {
        issue_token(user_id, role, &self.config.jwt)
            .expect("token generation should succeed")
    }
}

/// Build the full application router with the production middleware
/// stack, an in-memory media store and a fixed-duration probe.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let config = test_config();
    let store = Arc::new(InMemoryMediaStore::new());
    let tracks = Arc::new(track_service(pool.clone(), store.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        store: store.clone(),
        tracks,
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        config,
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

fn account(login_id: &str) -> CreateAccount {
    CreateAccount {
        login_id: login_id.to_string(),
        name: format!("{login_id} name"),
        profile_image: format!("https://img.example/{login_id}.png"),
    }
}

pub async fn seed_producer(pool: &PgPool, login_id: &str) -> DbId {
    ProducerRepo::create(pool, &account(login_id))
        .await
        .expect("producer creation should succeed")
        .id
}

pub async fn seed_vocal(pool: &PgPool, login_id: &str) -> DbId {
    VocalRepo::create(pool, &account(login_id))
        .await
        .expect("vocal creation should succeed")
        .id
}

/// Store an object the way an upload would and return its location.
pub async fn put_object(store: &InMemoryMediaStore, bucket: &str, key: &str) -> String {
    store
        .put(bucket, key, vec![0u8; 16], "application/octet-stream")
        .await
        .expect("in-memory put should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router should respond")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
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

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

/// Encode `parts` as a `multipart/form-data` body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("response body should be UTF-8")
}

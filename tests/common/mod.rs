//! Shared helpers for router-level tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use dropgox::{
    app::build_router,
    middleware::http::HttpLimits,
    services::{
        auth::{Authenticator, VerificationKey},
        storage::LocalFileStore,
    },
    state::AppState,
};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub const SERVICE_ID: &str = "dropgox-backend";
pub const HMAC_SECRET: &[u8] = b"integration-test-secret";
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

pub const SERVICE_PUBLIC_PEM: &str = include_str!("../fixtures/service_public.pem");
pub const SERVICE_PRIVATE_PEM: &str = include_str!("../fixtures/service_private.pem");
pub const FOREIGN_PRIVATE_PEM: &str = include_str!("../fixtures/foreign_private.pem");

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn error_code(&self) -> String {
        self.json()["error"]["code"].as_str().unwrap().to_string()
    }
}

impl TestApp {
    /// Deployment configured with the RSA service public key.
    pub async fn rsa() -> Self {
        Self::with_key(VerificationKey::from_rsa_pem(SERVICE_PUBLIC_PEM).unwrap()).await
    }

    /// Deployment configured with the shared HMAC secret.
    pub async fn hmac() -> Self {
        Self::with_key(VerificationKey::from_secret(HMAC_SECRET).unwrap()).await
    }

    async fn with_key(key: VerificationKey) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let files = LocalFileStore::open(dir.path()).await.unwrap();
        let auth = Authenticator::new(key, SERVICE_ID, 0);
        let state = AppState::new(Arc::new(auth), Arc::new(files));
        let router = build_router(state.clone(), HttpLimits::new(MAX_UPLOAD_BYTES));

        Self { router, state, dir }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        send(self.router.clone(), req).await
    }
}

pub async fn send(router: Router, req: Request<Body>) -> TestResponse {
    let res = router.oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let body = res.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Live claims for `aud`, subject `user-1`.
pub fn claims(aud: Value) -> Value {
    json!({
        "sub": "user-1",
        "aud": aud,
        "iat": now(),
        "exp": now() + 300,
    })
}

pub fn rsa_token(private_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
}

pub fn hmac_token(secret: &[u8], claims: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

/// Valid RS256 token for this service (`aud = [service]`).
pub fn service_token() -> String {
    rsa_token(SERVICE_PRIVATE_PEM, &claims(json!([SERVICE_ID])))
}

pub fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub const BOUNDARY: &str = "dropgox-test-boundary";

/// multipart/form-data body with a single `field` part.
pub fn multipart_body(field: &str, filename: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload(token: Option<&str>, filename: &str, contents: &[u8]) -> Request<Body> {
    let body = multipart_body("file", filename, contents);
    let mut builder = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len());
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(token));
    }
    builder.body(Body::from(body)).unwrap()
}

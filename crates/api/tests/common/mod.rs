//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) on top of a `#[sqlx::test]`-provided pool, plus small
//! request/response helpers around `tower::ServiceExt`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use taskup_api::auth::jwt::{self, JwtConfig};
use taskup_api::config::ServerConfig;
use taskup_api::router::build_app_router;
use taskup_api::state::AppState;
use taskup_api::storage::FileStore;
use taskup_api::ws::ChatRooms;
use taskup_core::verification::VerificationCodes;
use taskup_db::models::user::{CreateUser, User};
use taskup_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: std::env::temp_dir().join("taskup-test-uploads"),
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        smtp: None,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        chat_rooms: Arc::new(ChatRooms::new()),
        verification: Arc::new(VerificationCodes::new()),
        mailer: None,
        files: Arc::new(FileStore::new(config.upload_dir.clone())),
    };
    build_app_router(state, &config)
}

/// Insert a user directly through the repository layer.
pub async fn seed_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: "Api".to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
        },
        "$argon2id$fake-hash",
    )
    .await
    .unwrap()
}

/// A valid access token for the given user.
pub fn token_for(user: &User) -> String {
    jwt::generate_access_token(user.id, &test_config().jwt).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

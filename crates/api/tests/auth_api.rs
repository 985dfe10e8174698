//! HTTP-level integration tests for the `/auth` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

fn register_body(email: &str) -> serde_json::Value {
    json!({
        "first_name": "Alice",
        "last_name": "Archer",
        "email": email,
        "password": "a-long-enough-password",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_login_me(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        None,
        register_body("alice@auth.test"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["email"], "alice@auth.test");
    assert!(
        user.get("password_hash").is_none(),
        "password hash must never be serialized"
    );

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        None,
        json!({ "email": "alice@auth.test", "password": "a-long-enough-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let tokens = body_json(response).await;
    let access = tokens["access_token"].as_str().unwrap().to_string();
    assert!(tokens["refresh_token"].as_str().unwrap().len() >= 64);

    let response = get(app, "/api/v1/auth/me", Some(&access)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["email"], "alice@auth.test");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = build_test_app(pool);

    let first = post_json(
        app.clone(),
        "/api/v1/auth/register",
        None,
        register_body("dup@auth.test"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        app,
        "/api/v1/auth/register",
        None,
        register_body("dup@auth.test"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_weak_password_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        json!({
            "first_name": "Bob",
            "last_name": "Brief",
            "email": "bob@auth.test",
            "password": "short",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);

    post_json(
        app.clone(),
        "/api/v1/auth/register",
        None,
        register_body("carol@auth.test"),
    )
    .await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "carol@auth.test", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    let app = build_test_app(pool);

    post_json(
        app.clone(),
        "/api/v1/auth/register",
        None,
        register_body("dave@auth.test"),
    )
    .await;
    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        None,
        json!({ "email": "dave@auth.test", "password": "a-long-enough-password" }),
    )
    .await;
    let tokens = body_json(login).await;
    let refresh = tokens["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and yields a different token.
    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        None,
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"].as_str().unwrap(), refresh);

    // The presented token was revoked by the rotation.
    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        None,
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

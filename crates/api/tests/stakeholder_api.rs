//! HTTP-level tests for stakeholders: percentage bounds and duplicate
//! handling.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, post_json, put_json, seed_user, token_for};
use serde_json::json;
use sqlx::PgPool;

async fn setup_project(
    app: axum::Router,
    owner_token: &str,
) -> String {
    let response = post_json(
        app,
        "/api/v1/projects",
        Some(owner_token),
        json!({ "name": "Stakes" }),
    )
    .await;
    let project = body_json(response).await;
    project["id"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_percentage_bounds(pool: PgPool) {
    let owner = seed_user(&pool, "owner@stake.test").await;
    let token = token_for(&owner);
    let app = build_test_app(pool.clone());
    let id = setup_project(app.clone(), &token).await;

    // 0 and 100 are both inside the bound.
    for (i, pct) in [0.0, 100.0].into_iter().enumerate() {
        let user = seed_user(&pool, &format!("holder{i}@stake.test")).await;
        let response = post_json(
            app.clone(),
            &format!("/api/v1/projects/{id}/stakeholders"),
            Some(&token),
            json!({ "project_id": id, "user_id": user.id, "percentage": pct }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED, "percentage {pct}");
    }

    // -1 and 101 are rejected before anything is written.
    for pct in [-1.0, 101.0] {
        let user = seed_user(&pool, &format!("bad{pct}@stake.test")).await;
        let response = post_json(
            app.clone(),
            &format!("/api/v1/projects/{id}/stakeholders"),
            Some(&token),
            json!({ "project_id": id, "user_id": user.id, "percentage": pct }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "percentage {pct}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_percentage_validated(pool: PgPool) {
    let owner = seed_user(&pool, "owner@stakeupd.test").await;
    let holder = seed_user(&pool, "holder@stakeupd.test").await;
    let token = token_for(&owner);
    let app = build_test_app(pool);
    let id = setup_project(app.clone(), &token).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{id}/stakeholders"),
        Some(&token),
        json!({ "project_id": id, "user_id": holder.id, "percentage": 50.0 }),
    )
    .await;
    let stakeholder = body_json(response).await;
    let sid = stakeholder["id"].as_str().unwrap().to_string();

    let response = put_json(
        app.clone(),
        &format!("/api/v1/stakeholders/{sid}"),
        Some(&token),
        json!({ "percentage": 101.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        app,
        &format!("/api/v1/stakeholders/{sid}"),
        Some(&token),
        json!({ "percentage": 75.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["percentage"], 75.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_and_owner_stakeholder_rejected(pool: PgPool) {
    let owner = seed_user(&pool, "owner@stakedup.test").await;
    let holder = seed_user(&pool, "holder@stakedup.test").await;
    let token = token_for(&owner);
    let app = build_test_app(pool);
    let id = setup_project(app.clone(), &token).await;

    // The owner cannot hold a stake in their own project.
    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{id}/stakeholders"),
        Some(&token),
        json!({ "project_id": id, "user_id": owner.id, "percentage": 10.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{id}/stakeholders"),
        Some(&token),
        json!({ "project_id": id, "user_id": holder.id, "percentage": 10.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{id}/stakeholders"),
        Some(&token),
        json!({ "project_id": id, "user_id": holder.id, "percentage": 20.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // After a soft delete the pair can be added again.
    let listed = body_json(
        common::get(
            app.clone(),
            &format!("/api/v1/projects/{id}/stakeholders"),
            Some(&token),
        )
        .await,
    )
    .await;
    let sid = listed[0]["id"].as_str().unwrap().to_string();
    let response = delete(app.clone(), &format!("/api/v1/stakeholders/{sid}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{id}/stakeholders"),
        Some(&token),
        json!({ "project_id": id, "user_id": holder.id, "percentage": 20.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

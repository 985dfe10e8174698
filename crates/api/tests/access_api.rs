//! HTTP-level tests for the access asymmetry: members read, only the
//! owner restructures.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, seed_user, token_for};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_member_reads_owner_restructures(pool: PgPool) {
    let owner = seed_user(&pool, "owner@asym.test").await;
    let member = seed_user(&pool, "member@asym.test").await;
    let third = seed_user(&pool, "third@asym.test").await;
    let owner_token = token_for(&owner);
    let member_token = token_for(&member);
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        Some(&owner_token),
        json!({ "name": "Asymmetric" }),
    )
    .await;
    let project = body_json(response).await;
    let id = project["id"].as_str().unwrap().to_string();

    post_json(
        app.clone(),
        &format!("/api/v1/projects/{id}/members"),
        Some(&owner_token),
        json!({ "user_id": member.id }),
    )
    .await;

    // Member: reads succeed.
    for uri in [
        format!("/api/v1/projects/{id}"),
        format!("/api/v1/projects/{id}/tasks"),
        format!("/api/v1/projects/{id}/teams"),
        format!("/api/v1/projects/{id}/members"),
    ] {
        let response = get(app.clone(), &uri, Some(&member_token)).await;
        assert_eq!(response.status(), StatusCode::OK, "member read of {uri}");
    }

    // Member: restructuring fails with 403 across the board.
    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{id}/members"),
        Some(&member_token),
        json!({ "user_id": third.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN, "member add_member");

    let response = post_json(
        app.clone(),
        "/api/v1/teams",
        Some(&member_token),
        json!({ "project_id": id, "name": "Rogue team" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN, "member create_team");

    let response = delete(app.clone(), &format!("/api/v1/projects/{id}"), Some(&member_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN, "member delete_project");

    let response = post_json(
        app,
        &format!("/api/v1/projects/{id}/stakeholders"),
        Some(&member_token),
        json!({ "project_id": id, "user_id": third.id, "percentage": 10.0 }),
    )
    .await;
    assert_eq!(
        response.status(),
        StatusCode::FORBIDDEN,
        "member add_stakeholder"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_stranger_forbidden_missing_not_found(pool: PgPool) {
    let owner = seed_user(&pool, "owner@404v403.test").await;
    let stranger = seed_user(&pool, "stranger@404v403.test").await;
    let owner_token = token_for(&owner);
    let stranger_token = token_for(&stranger);
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        Some(&owner_token),
        json!({ "name": "Private" }),
    )
    .await;
    let project = body_json(response).await;
    let id = project["id"].as_str().unwrap().to_string();

    // Existing project, no relationship: 403.
    let response = get(app.clone(), &format!("/api/v1/projects/{id}"), Some(&stranger_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");

    // Missing project: 404, even for the same caller.
    let missing = uuid::Uuid::new_v4();
    let response = get(
        app,
        &format!("/api/v1/projects/{missing}"),
        Some(&stranger_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_team_restructure_requires_creator(pool: PgPool) {
    let owner = seed_user(&pool, "owner@teamauth.test").await;
    let member = seed_user(&pool, "member@teamauth.test").await;
    let owner_token = token_for(&owner);
    let member_token = token_for(&member);
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        Some(&owner_token),
        json!({ "name": "Team home" }),
    )
    .await;
    let project = body_json(response).await;
    let id = project["id"].as_str().unwrap().to_string();
    post_json(
        app.clone(),
        &format!("/api/v1/projects/{id}/members"),
        Some(&owner_token),
        json!({ "user_id": member.id }),
    )
    .await;

    let response = post_json(
        app.clone(),
        "/api/v1/teams",
        Some(&owner_token),
        json!({ "project_id": id, "name": "Locked" }),
    )
    .await;
    let team = body_json(response).await;
    let team_id = team["id"].as_str().unwrap().to_string();

    let response = delete(app.clone(), &format!("/api/v1/teams/{team_id}"), Some(&member_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        app,
        &format!("/api/v1/teams/{team_id}/members"),
        Some(&member_token),
        json!({ "user_id": member.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

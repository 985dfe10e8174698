//! Handlers for risks, their analyses, and their response plans.
//!
//! Project membership (owner or member) is the gate for every
//! operation here; risk work is collaborative, not owner-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskup_core::error::CoreError;
use taskup_core::graph::EntityKind;
use taskup_core::types::DbId;
use taskup_db::models::risk::{
    CreateRisk, CreateRiskAnalysis, CreateRiskResponsePlan, Risk, RiskAnalysis, RiskResponsePlan,
    UpdateRisk, UpdateRiskAnalysis, UpdateRiskResponsePlan,
};
use taskup_db::repositories::{
    CascadeOutcome, LifecycleRepo, RiskAnalysisRepo, RiskRepo, RiskResponsePlanRepo,
};

use crate::authz::require_access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

fn risk_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Risk", id })
}

/// POST /api/v1/risks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateRisk>,
) -> AppResult<(StatusCode, Json<Risk>)> {
    require_access(&state.pool, input.project_id, user.user_id).await?;
    let risk = RiskRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(risk)))
}

/// GET /api/v1/projects/{id}/risks
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Risk>>> {
    require_access(&state.pool, project_id, user.user_id).await?;
    let risks = RiskRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(risks))
}

/// GET /api/v1/risks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Risk>> {
    let risk = RiskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;
    Ok(Json(risk))
}

/// PUT /api/v1/risks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRisk>,
) -> AppResult<Json<Risk>> {
    let risk = RiskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let updated = RiskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/risks/{id} -- takes analyses and response plans with
/// it. Repeat deletion is a no-op success.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let risk = RiskRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let outcome = LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::Risk, id).await?;
    let message = match outcome {
        CascadeOutcome::Deleted => "Risk and its related data soft-deleted successfully",
        CascadeOutcome::AlreadyDeleted => "Risk already deleted",
        CascadeOutcome::NotFound => return Err(risk_not_found(id)),
    };
    Ok(Json(MessageResponse::new(message)))
}

// ---------------------------------------------------------------------------
// Analyses
// ---------------------------------------------------------------------------

/// POST /api/v1/risks/{id}/analyses
pub async fn create_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateRiskAnalysis>,
) -> AppResult<(StatusCode, Json<RiskAnalysis>)> {
    let risk = RiskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let analysis = RiskAnalysisRepo::create(&state.pool, id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

/// GET /api/v1/risks/{id}/analyses
pub async fn list_analyses(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<RiskAnalysis>>> {
    let risk = RiskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let analyses = RiskAnalysisRepo::list_by_risk(&state.pool, id).await?;
    Ok(Json(analyses))
}

/// PUT /api/v1/risk-analyses/{id}
pub async fn update_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRiskAnalysis>,
) -> AppResult<Json<RiskAnalysis>> {
    let analysis = RiskAnalysisRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Risk analysis",
            id,
        }))?;
    let risk = RiskRepo::find_by_id(&state.pool, analysis.risk_id)
        .await?
        .ok_or_else(|| risk_not_found(analysis.risk_id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let updated = RiskAnalysisRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Risk analysis",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/risk-analyses/{id}
pub async fn delete_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let analysis = RiskAnalysisRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Risk analysis",
            id,
        }))?;
    let risk = RiskRepo::find_by_id(&state.pool, analysis.risk_id)
        .await?
        .ok_or_else(|| risk_not_found(analysis.risk_id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::RiskAnalysis, id).await?;
    Ok(Json(MessageResponse::new("Risk analysis deleted successfully")))
}

// ---------------------------------------------------------------------------
// Response plans
// ---------------------------------------------------------------------------

/// POST /api/v1/risks/{id}/response-plans
pub async fn create_response_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateRiskResponsePlan>,
) -> AppResult<(StatusCode, Json<RiskResponsePlan>)> {
    let risk = RiskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let plan = RiskResponsePlanRepo::create(&state.pool, id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/risks/{id}/response-plans
pub async fn list_response_plans(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<RiskResponsePlan>>> {
    let risk = RiskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| risk_not_found(id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let plans = RiskResponsePlanRepo::list_by_risk(&state.pool, id).await?;
    Ok(Json(plans))
}

/// PUT /api/v1/risk-plans/{id}
pub async fn update_response_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRiskResponsePlan>,
) -> AppResult<Json<RiskResponsePlan>> {
    let plan = RiskResponsePlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Risk response plan",
            id,
        }))?;
    let risk = RiskRepo::find_by_id(&state.pool, plan.risk_id)
        .await?
        .ok_or_else(|| risk_not_found(plan.risk_id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    let updated = RiskResponsePlanRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Risk response plan",
            id,
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/risk-plans/{id}
pub async fn delete_response_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let plan = RiskResponsePlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Risk response plan",
            id,
        }))?;
    let risk = RiskRepo::find_by_id(&state.pool, plan.risk_id)
        .await?
        .ok_or_else(|| risk_not_found(plan.risk_id))?;
    require_access(&state.pool, risk.project_id, user.user_id).await?;

    LifecycleRepo::soft_delete_tree(&state.pool, EntityKind::RiskResponsePlan, id).await?;
    Ok(Json(MessageResponse::new(
        "Risk response plan deleted successfully",
    )))
}

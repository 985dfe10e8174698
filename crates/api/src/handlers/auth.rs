//! Handlers for the `/auth` resource: registration, email
//! verification, login, token refresh, and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use taskup_core::error::CoreError;
use taskup_db::models::user::{CreateUser, User};
use taskup_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::jwt;
use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Verification request body.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Resend-code request body.
#[derive(Debug, Deserialize)]
pub struct ResendCodeRequest {
    pub email: String,
}

/// Refresh / logout request body.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair plus profile returned on login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    password::validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )));
    }

    let hash = password::hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
        },
        &hash,
    )
    .await?;

    send_verification(&state, &user.email).await;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !state.verification.verify(&input.email, &input.code) {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid or expired verification code".into(),
        )));
    }

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("No account for this email".into()))?;
    UserRepo::mark_verified(&state.pool, user.id).await?;

    Ok(Json(MessageResponse::new("Email verified successfully")))
}

/// POST /api/v1/auth/resend-code
pub async fn resend_code(
    State(state): State<AppState>,
    Json(input): Json<ResendCodeRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("No account for this email".into()))?;
    if user.is_verified {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already verified".into(),
        )));
    }

    send_verification(&state, &user.email).await;
    Ok(Json(MessageResponse::new("Verification code sent")))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let verified = password::verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(invalid());
    }

    issue_tokens(&state, user).await.map(Json)
}

/// POST /api/v1/auth/refresh
///
/// Rotates the refresh token: the presented token's session is revoked
/// and a new session is created.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let hash = jwt::hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_valid_by_hash(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

    SessionRepo::revoke_by_hash(&state.pool, &hash).await?;
    issue_tokens(&state, user).await.map(Json)
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<MessageResponse>> {
    let hash = jwt::hash_refresh_token(&input.refresh_token);
    SessionRepo::revoke_by_hash(&state.pool, &hash).await?;
    Ok(Json(MessageResponse::new("Logged out")))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<User>> {
    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;
    Ok(Json(profile))
}

/// Issue an access/refresh token pair and persist the refresh session.
async fn issue_tokens(state: &AppState, user: User) -> AppResult<TokenResponse> {
    let access_token = jwt::generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("token generation failed: {e}")))?;

    let refresh_token = jwt::generate_refresh_token();
    let expires_at =
        chrono::Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(
        &state.pool,
        user.id,
        &jwt::hash_refresh_token(&refresh_token),
        expires_at,
    )
    .await?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        user,
    })
}

/// Issue a verification code and send it, if mail is configured.
///
/// Failures here never fail the surrounding request; registration must
/// succeed even when the relay is down.
async fn send_verification(state: &AppState, email: &str) {
    state.verification.purge_expired();
    let Some(code) = state.verification.issue(email) else {
        tracing::debug!(%email, "verification code request throttled");
        return;
    };

    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer.send_verification_code(email, &code).await {
                tracing::error!(error = %e, %email, "failed to send verification email");
            }
        }
        None => {
            tracing::warn!(%email, "SMTP not configured; skipping verification email");
        }
    }
}

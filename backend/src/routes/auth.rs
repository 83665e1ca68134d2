//! Authentication routes
//!
//! Endpoints for registration, login, password reset and email
//! confirmation. Each handler maps 1:1 onto an engine operation;
//! password hashing always runs on the blocking thread pool.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gatekeeper_shared::types::{
    AccountResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
    ResetPasswordRequest, SendConfirmationRequest, SessionToken,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", post(reset_password))
        .route("/send-confirmation", post(send_confirmation))
        .route("/confirm-email/:token", post(confirm_email))
        .route("/me", get(me))
}

/// Register a new account
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    let account = AuthService::register(
        &state.db,
        state.notifications(),
        &req.username,
        &req.email,
        &req.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Login with username and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionToken>> {
    let token = AuthService::login(&state.db, state.jwt(), &req.username, &req.password).await?;
    Ok(Json(token))
}

/// Start the password reset flow
///
/// POST /api/v1/auth/forgot-password
async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::request_password_reset(&state.db, state.notifications(), &req.email).await?;
    Ok(Json(MessageResponse {
        message: "Password reset email sent".to_string(),
    }))
}

/// Complete a password reset with an emailed token
///
/// POST /api/v1/auth/reset-password/:token
async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::reset_password(&state.db, &token, &req.password).await?;
    Ok(Json(MessageResponse {
        message: "Password has been reset".to_string(),
    }))
}

/// Re-send the confirmation link for an email address
///
/// POST /api/v1/auth/send-confirmation
async fn send_confirmation(
    State(state): State<AppState>,
    Json(req): Json<SendConfirmationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::request_email_confirmation(&state.db, state.notifications(), &req.email).await?;
    Ok(Json(MessageResponse {
        message: "Confirmation email sent".to_string(),
    }))
}

/// Confirm an email address with an emailed token
///
/// POST /api/v1/auth/confirm-email/:token
async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::confirm_email(&state.db, &token).await?;
    Ok(Json(MessageResponse {
        message: "Email confirmed".to_string(),
    }))
}

/// Get the authenticated account (requires a valid session token)
///
/// GET /api/v1/auth/me
async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<AccountResponse>> {
    let account = AuthService::profile(&state.db, auth_user.account_id).await?;
    Ok(Json(account))
}

//! Sign-in, sign-out, and the password-reset relays.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::api::relay;
use crate::auth::{self, Credentials};
use crate::bpool;
use crate::errors::AppError;
use crate::session::{self, SessionUser, SessionView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// POST /auth/login — authenticate, enforce the admin gate, establish the
/// session. Navigation to the dashboard afterwards is the caller's move.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<SessionView>), AppError> {
    let user = auth::authenticate(&state.bpool, &credentials).await?;

    let token = session::issue(
        &user,
        &state.config.session_secret,
        state.config.session_ttl_hours,
    )?;

    tracing::info!(user_id = %user.id, "admin signed in");

    let view = SessionView {
        user: SessionUser {
            id: user.id,
            email: user.email,
            role: user.role,
        },
        access_token: user.access_token,
        refresh_token: user.refresh_token,
    };

    Ok((jar.add(session::session_cookie(token)), Json(view)))
}

/// POST /auth/logout — one of the two session write points; the other is
/// login.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(session::removal_cookie()),
        StatusCode::NO_CONTENT,
    )
}

/// POST /auth/forgot-password
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EmailRequest>,
) -> Result<Response, AppError> {
    let resp = bpool::auth::forget_password(&state.bpool, &req.email).await?;
    relay(resp).await
}

/// POST /auth/verify-otp
pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Response, AppError> {
    let resp = bpool::auth::verify_code(&state.bpool, &req.email, &req.otp).await?;
    relay(resp).await
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Response, AppError> {
    let resp = bpool::auth::reset_password(&state.bpool, &req.email, &req.new_password).await?;
    relay(resp).await
}

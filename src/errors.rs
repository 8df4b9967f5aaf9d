use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or a backend-side login rejection. Carries the
    /// human-readable message shown on the login form.
    #[error("{0}")]
    AuthFailed(String),

    /// The backend authenticated the credentials but the account is not an
    /// admin. This gate runs before any session is created.
    #[error("Access denied: Admins only.")]
    AdminsOnly,

    /// 2xx login response without an access token.
    #[error("Invalid login response")]
    InvalidLoginResponse,

    /// Missing, expired, or upstream-invalidated session. Rendered as a
    /// redirect to the login page, never as a JSON error.
    #[error("session expired")]
    SessionExpired,

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Session loss bypasses the normal error envelope entirely.
        if matches!(self, AppError::SessionExpired) {
            return Redirect::to("/auth/login").into_response();
        }

        let (status, error_type, code, msg) = match &self {
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "invalid_request",
                msg.clone(),
            ),
            AppError::AuthFailed(msg) => (
                StatusCode::UNAUTHORIZED,
                "authentication_error",
                "login_failed",
                msg.clone(),
            ),
            AppError::AdminsOnly => (
                StatusCode::FORBIDDEN,
                "permission_error",
                "not_admin",
                self.to_string(),
            ),
            AppError::InvalidLoginResponse => (
                StatusCode::BAD_GATEWAY,
                "authentication_error",
                "invalid_login_response",
                self.to_string(),
            ),
            AppError::SessionExpired => unreachable!("handled above"),
            AppError::Upstream(e) => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                "upstream_failed",
                e.clone(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal_server_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": msg,
                "type": error_type,
                "code": code,
            }
        }));

        (status, body).into_response()
    }
}

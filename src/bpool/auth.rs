//! Authentication endpoints. Login parsing and the admin gate live in
//! `crate::auth`; this module only issues the raw calls.

use reqwest::Response;
use serde_json::json;

use crate::errors::AppError;
use crate::upstream::ApiClient;

/// POST /users/login
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<Response, AppError> {
    client
        .post_json(None, "/users/login", &json!({ "email": email, "password": password }))
        .await
}

/// POST /auth/forget-password
pub async fn forget_password(client: &ApiClient, email: &str) -> Result<Response, AppError> {
    client
        .post_json(None, "/auth/forget-password", &json!({ "email": email }))
        .await
}

/// POST /auth/verify-code
pub async fn verify_code(client: &ApiClient, email: &str, otp: &str) -> Result<Response, AppError> {
    client
        .post_json(None, "/auth/verify-code", &json!({ "email": email, "otp": otp }))
        .await
}

/// POST /auth/reset-password
pub async fn reset_password(
    client: &ApiClient,
    email: &str,
    new_password: &str,
) -> Result<Response, AppError> {
    client
        .post_json(
            None,
            "/auth/reset-password",
            &json!({ "email": email, "newPassword": new_password }),
        )
        .await
}

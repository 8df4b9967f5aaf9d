//! Credential sign-in flow.
//!
//! Validates the submitted credentials, calls the backend login endpoint,
//! and layers the admin-only authorization gate on top of the backend's
//! authentication. Every rejection carries a human-readable message; there
//! is no silent-failure path. No retries — the user resubmits the form.

use serde::Deserialize;

use crate::bpool;
use crate::errors::AppError;
use crate::upstream::ApiClient;

const GENERIC_LOGIN_ERROR: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The backend's authoritative login payload, reduced to the fields a
/// session is built from.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    #[serde(rename = "_id")]
    id: Option<String>,
    email: Option<String>,
    role: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Authenticate against the BPOOL backend and enforce the admin gate.
///
/// Outcomes:
/// - missing email/password → validation error, no network call
/// - backend rejection → the backend's `message` if present, else a
///   generic fallback
/// - 2xx without an access token → "Invalid login response"
/// - valid credentials but `role != "admin"` → "Access denied: Admins only."
/// - otherwise the authenticated user, ready for session creation
pub async fn authenticate(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<AuthenticatedUser, AppError> {
    let email = credentials.email.trim();
    if email.is_empty() || credentials.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".into(),
        ));
    }

    let resp = bpool::auth::login(client, email, &credentials.password)
        .await
        .map_err(|e| match e {
            // Network failure still has to surface as a readable message on
            // the login form.
            AppError::Upstream(msg) => AppError::AuthFailed(msg),
            other => other,
        })?;

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.unwrap_or_default();

    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or(GENERIC_LOGIN_ERROR)
            .to_string();
        tracing::info!(%status, "login rejected by backend");
        return Err(AppError::AuthFailed(message));
    }

    let envelope: LoginEnvelope =
        serde_json::from_value(body).map_err(|_| AppError::InvalidLoginResponse)?;
    let data = envelope.data.ok_or(AppError::InvalidLoginResponse)?;

    let access_token = match data.access_token {
        Some(token) if !token.is_empty() => token,
        _ => return Err(AppError::InvalidLoginResponse),
    };

    // Authorization gate, after authentication and before any session
    // exists. The backend accepted the credentials; this application still
    // only admits admins.
    let role = data.role.unwrap_or_default();
    if role != "admin" {
        tracing::info!(%role, "non-admin login attempt blocked");
        return Err(AppError::AdminsOnly);
    }

    Ok(AuthenticatedUser {
        id: data.id.unwrap_or_default(),
        email: data.email.unwrap_or_else(|| email.to_string()),
        role,
        access_token,
        refresh_token: data.refresh_token.unwrap_or_default(),
    })
}

//! Admin session tokens.
//!
//! A session is a signed JWT carried in the `bpool_session` cookie. Claims
//! are minted exactly once, from the backend's authoritative login payload,
//! and are immutable until sign-out or expiry — there is no refresh step.
//! Reading the session back must expose the same `id`, `role` and
//! `accessToken` that login issued.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::AppState;

pub const SESSION_COOKIE: &str = "bpool_session";

/// Claims carried by the session token. `access_token` / `refresh_token`
/// are the opaque bearer credentials issued by the BPOOL backend; they ride
/// along so every outbound API call can be authenticated without another
/// lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Backend user id.
    pub sub: String,
    pub email: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Sign a session token for a freshly authenticated user.
pub fn issue(user: &AuthenticatedUser, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        access_token: user.access_token.clone(),
        refresh_token: user.refresh_token.clone(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign session token: {}", e)))
}

/// Verify a session token and extract its claims. Expired or tampered
/// tokens fail — callers treat that as "no session".
pub fn verify(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::SessionExpired)
}

/// Build the session cookie. No max-age: the cookie lives for the browser
/// session, the JWT `exp` claim bounds its validity.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that clears the session on sign-out.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .build()
}

// ── Session exposure ─────────────────────────────────────────

/// The session as the UI sees it: identity on the `user` sub-object, the
/// backend tokens as top-level fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: SessionUser,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl From<&SessionClaims> for SessionView {
    fn from(claims: &SessionClaims) -> Self {
        SessionView {
            user: SessionUser {
                id: claims.sub.clone(),
                email: claims.email.clone(),
                role: claims.role.clone(),
            },
            access_token: claims.access_token.clone(),
            refresh_token: claims.refresh_token.clone(),
        }
    }
}

/// Extractor: handlers that take `SessionClaims` get the verified session
/// or a redirect to the login page.
#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(SESSION_COOKIE).ok_or(AppError::SessionExpired)?;
        verify(cookie.value(), &state.config.session_secret)
    }
}

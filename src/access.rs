//! Route access gating for the dashboard and auth subtrees.
//!
//! The decision itself is a pure function of the request path and the
//! verified session claims — no I/O. The axum middleware around it only
//! reads the session cookie and issues the redirect.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::session::{self, SessionClaims, SESSION_COOKIE};
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Redirect to the login page, with the reason as a query parameter so
    /// the form can explain why the user landed there.
    RedirectToLogin(DeniedReason),
    /// Signed-in admins have no business on the auth pages.
    RedirectToDashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeniedReason {
    Unauthorized,
    NotAdmin,
}

impl DeniedReason {
    pub fn as_query(&self) -> &'static str {
        match self {
            DeniedReason::Unauthorized => "unauthorized",
            DeniedReason::NotAdmin => "not_admin",
        }
    }
}

/// Decide what to do with a navigation. An invalid or expired session token
/// must be passed here as `None` — it counts as unauthenticated.
pub fn decide(path: &str, session: Option<&SessionClaims>) -> AccessDecision {
    let is_admin = session.map(SessionClaims::is_admin).unwrap_or(false);

    if path == "/dashboard" || path.starts_with("/dashboard/") {
        return match session {
            None => AccessDecision::RedirectToLogin(DeniedReason::Unauthorized),
            Some(_) if !is_admin => AccessDecision::RedirectToLogin(DeniedReason::NotAdmin),
            Some(_) => AccessDecision::Allow,
        };
    }

    // Sign-out is an action, not a navigation. It must stay reachable for
    // the one population that actually holds a session, or no session could
    // ever be destroyed.
    if path == "/auth/logout" {
        return AccessDecision::Allow;
    }

    // Auth pages stay reachable for everyone except signed-in admins, so
    // login and password-reset flows keep working.
    if (path == "/auth" || path.starts_with("/auth/")) && is_admin {
        return AccessDecision::RedirectToDashboard;
    }

    AccessDecision::Allow
}

/// Middleware evaluated on every request before routing-level handlers run.
pub async fn gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|c| session::verify(c.value(), &state.config.session_secret).ok());

    match decide(req.uri().path(), claims.as_ref()) {
        AccessDecision::Allow => next.run(req).await,
        AccessDecision::RedirectToLogin(reason) => {
            tracing::debug!(path = %req.uri().path(), reason = reason.as_query(), "access denied");
            Redirect::to(&format!("/auth/login?error={}", reason.as_query())).into_response()
        }
        AccessDecision::RedirectToDashboard => Redirect::to("/dashboard").into_response(),
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::access;
use crate::errors::AppError;
use crate::AppState;

pub mod auth;
pub mod dashboard;

/// Build the full application: routes, access gate, CORS, tracing, and the
/// response-hardening middleware.
pub fn app(state: Arc<AppState>) -> Router {
    let dashboard_origin = state.config.dashboard_origin.clone();

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .nest("/auth", auth_router())
        .nest("/dashboard", dashboard_router())
        .layer(middleware::from_fn_with_state(state.clone(), access::gate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer({
            use axum::http::{HeaderName, Method};
            use tower_http::cors::{AllowOrigin, CorsLayer};
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(move |origin, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str == dashboard_origin
                        || origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                }))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([HeaderName::from_static("content-type")])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
}

fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/reset-password", post(auth::reset_password))
}

fn dashboard_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/session", get(dashboard::session))
        .route("/bookings", get(dashboard::list_bookings))
        .route("/bookings/:id", get(dashboard::booking_details))
        .route(
            "/vehicles",
            get(dashboard::list_vehicles).post(dashboard::create_vehicle),
        )
        .route(
            "/vehicles/:id",
            get(dashboard::vehicle_details)
                .put(dashboard::update_vehicle)
                .delete(dashboard::delete_vehicle),
        )
        .route("/drivers", get(dashboard::list_drivers))
        .route("/drivers/:id", get(dashboard::driver_details))
        .route(
            "/routes",
            get(dashboard::list_routes).post(dashboard::create_route),
        )
        .route(
            "/routes/:id",
            get(dashboard::route_details)
                .put(dashboard::update_route)
                .delete(dashboard::delete_route),
        )
        .route("/parents", get(dashboard::list_parents))
        .route("/parents/:id", get(dashboard::parent_details))
        .route("/payments", get(dashboard::list_payments))
        .route("/settings/change-password", post(dashboard::change_password))
}

/// Hand a backend response to the caller untouched: same status, same
/// content type, same body. Error handling stays local to the consumer.
pub(crate) async fn relay(resp: reqwest::Response) -> Result<Response, AppError> {
    let status = resp.status();
    let content_type = resp.headers().get(CONTENT_TYPE).cloned();

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let mut out = Response::new(Body::from(bytes));
    *out.status_mut() = status;
    if let Some(ct) = content_type {
        out.headers_mut().insert(CONTENT_TYPE, ct);
    }
    Ok(out)
}

/// Middleware: injects a unique X-Request-Id into every response so the
/// dashboard can correlate errors with gateway logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

/// Middleware: hardening headers on every response. The gateway fronts a
/// browser dashboard, so the usual sniffing/framing/caching protections
/// apply.
async fn security_headers_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let mut resp = next.run(req).await;
    let headers = resp.headers_mut();

    headers.insert("X-Content-Type-Options", "nosniff".parse().unwrap());
    headers.insert("X-Frame-Options", "DENY".parse().unwrap());
    headers.insert("Cache-Control", "no-store".parse().unwrap());
    // Session tokens must not leak through referrers.
    headers.insert("Referrer-Policy", "no-referrer".parse().unwrap());
    headers.remove("Server");

    resp
}

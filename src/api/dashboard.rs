//! Dashboard relays. Every handler reads the verified session via the
//! `SessionClaims` extractor and passes its access token explicitly into
//! the façade — there is no ambient session anywhere downstream.
//!
//! Responses are the backend's, verbatim. Pagination defaults match the
//! dashboard tables: page 1, 10 rows.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use axum::Json;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use crate::api::relay;
use crate::bpool;
use crate::errors::AppError;
use crate::session::{SessionClaims, SessionView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct PaymentsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_payment_status")]
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

fn default_payment_status() -> String {
    "completed".into()
}

/// GET /dashboard/session — materialize the session for the UI.
pub async fn session(session: SessionClaims) -> Json<SessionView> {
    Json(SessionView::from(&session))
}

// ── Bookings ─────────────────────────────────────────────────

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Query(q): Query<PageQuery>,
) -> Result<Response, AppError> {
    let resp =
        bpool::bookings::all_bookings(&state.bpool, Some(&session.access_token), q.page, q.limit)
            .await?;
    relay(resp).await
}

pub async fn booking_details(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let resp =
        bpool::bookings::booking_details(&state.bpool, Some(&session.access_token), &id).await?;
    relay(resp).await
}

// ── Vehicles ─────────────────────────────────────────────────

pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Query(q): Query<PageQuery>,
) -> Result<Response, AppError> {
    let resp =
        bpool::vehicles::all_vehicles(&state.bpool, Some(&session.access_token), q.page, q.limit)
            .await?;
    relay(resp).await
}

pub async fn vehicle_details(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let resp =
        bpool::vehicles::vehicle_details(&state.bpool, Some(&session.access_token), &id).await?;
    relay(resp).await
}

pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = forward_form(multipart).await?;
    let resp =
        bpool::vehicles::create_vehicle(&state.bpool, Some(&session.access_token), form).await?;
    relay(resp).await
}

pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = forward_form(multipart).await?;
    let resp =
        bpool::vehicles::update_vehicle(&state.bpool, Some(&session.access_token), &id, form)
            .await?;
    relay(resp).await
}

pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let resp =
        bpool::vehicles::delete_vehicle(&state.bpool, Some(&session.access_token), &id).await?;
    relay(resp).await
}

// ── Drivers ──────────────────────────────────────────────────

pub async fn list_drivers(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Query(q): Query<PageQuery>,
) -> Result<Response, AppError> {
    let resp =
        bpool::drivers::all_drivers(&state.bpool, Some(&session.access_token), q.page, q.limit)
            .await?;
    relay(resp).await
}

pub async fn driver_details(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let resp =
        bpool::drivers::driver_details(&state.bpool, Some(&session.access_token), &id).await?;
    relay(resp).await
}

// ── Routes ───────────────────────────────────────────────────

pub async fn list_routes(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
) -> Result<Response, AppError> {
    let resp = bpool::routes::all_routes(&state.bpool, Some(&session.access_token)).await?;
    relay(resp).await
}

pub async fn route_details(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let resp = bpool::routes::route_details(&state.bpool, Some(&session.access_token), &id).await?;
    relay(resp).await
}

pub async fn create_route(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let resp =
        bpool::routes::create_route(&state.bpool, Some(&session.access_token), &body).await?;
    relay(resp).await
}

pub async fn update_route(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let resp =
        bpool::routes::update_route(&state.bpool, Some(&session.access_token), &id, &body).await?;
    relay(resp).await
}

pub async fn delete_route(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let resp = bpool::routes::delete_route(&state.bpool, Some(&session.access_token), &id).await?;
    relay(resp).await
}

// ── Parents ──────────────────────────────────────────────────

pub async fn list_parents(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Query(q): Query<PageQuery>,
) -> Result<Response, AppError> {
    let resp =
        bpool::parents::all_parents(&state.bpool, Some(&session.access_token), q.page, q.limit)
            .await?;
    relay(resp).await
}

pub async fn parent_details(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let resp =
        bpool::parents::parent_details(&state.bpool, Some(&session.access_token), &id).await?;
    relay(resp).await
}

// ── Payments ─────────────────────────────────────────────────

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Query(q): Query<PaymentsQuery>,
) -> Result<Response, AppError> {
    let resp = bpool::payments::all_payments(
        &state.bpool,
        Some(&session.access_token),
        q.page,
        q.limit,
        &q.status,
    )
    .await?;
    relay(resp).await
}

// ── Settings ─────────────────────────────────────────────────

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    session: SessionClaims,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Response, AppError> {
    let resp = bpool::user::change_password(
        &state.bpool,
        Some(&session.access_token),
        &req.old_password,
        &req.new_password,
    )
    .await?;
    relay(resp).await
}

/// Re-assemble an inbound multipart body into an outbound one, field by
/// field. File parts keep their filename and declared content type.
async fn forward_form(mut multipart: Multipart) -> Result<Form, AppError> {
    let mut form = Form::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut part = Part::bytes(data.to_vec());
        if let Some(file_name) = file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| AppError::Validation(e.to_string()))?;
        }
        form = form.part(name, part);
    }

    Ok(form)
}

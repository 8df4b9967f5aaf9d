//! Route endpoints. The backend's path scheme here is irregular
//! (`get-all`, `get/{id}`, `add`) — preserved as-is, it is their contract.

use reqwest::Response;
use serde_json::Value;

use crate::errors::AppError;
use crate::upstream::ApiClient;

/// GET /routes/get-all
pub async fn all_routes(client: &ApiClient, token: Option<&str>) -> Result<Response, AppError> {
    client.get(token, "/routes/get-all", &[]).await
}

/// GET /routes/get/{id}
pub async fn route_details(
    client: &ApiClient,
    token: Option<&str>,
    route_id: &str,
) -> Result<Response, AppError> {
    client.get(token, &format!("/routes/get/{}", route_id), &[]).await
}

/// POST /routes/add
pub async fn create_route(
    client: &ApiClient,
    token: Option<&str>,
    body: &Value,
) -> Result<Response, AppError> {
    client.post_json(token, "/routes/add", body).await
}

/// PUT /routes/{id}
pub async fn update_route(
    client: &ApiClient,
    token: Option<&str>,
    route_id: &str,
    body: &Value,
) -> Result<Response, AppError> {
    client.put_json(token, &format!("/routes/{}", route_id), body).await
}

/// DELETE /routes/{id}
pub async fn delete_route(
    client: &ApiClient,
    token: Option<&str>,
    route_id: &str,
) -> Result<Response, AppError> {
    client.delete(token, &format!("/routes/{}", route_id)).await
}

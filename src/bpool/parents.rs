//! Parent endpoints.

use reqwest::Response;

use crate::bpool::page_query;
use crate::errors::AppError;
use crate::upstream::ApiClient;

/// GET /users/parents?page&limit
pub async fn all_parents(
    client: &ApiClient,
    token: Option<&str>,
    page: u32,
    limit: u32,
) -> Result<Response, AppError> {
    client.get(token, "/users/parents", &page_query(page, limit)).await
}

/// GET /users/parents/{id}
pub async fn parent_details(
    client: &ApiClient,
    token: Option<&str>,
    parent_id: &str,
) -> Result<Response, AppError> {
    client
        .get(token, &format!("/users/parents/{}", parent_id), &[])
        .await
}

//! Driver endpoints.

use reqwest::Response;

use crate::bpool::page_query;
use crate::errors::AppError;
use crate::upstream::ApiClient;

/// GET /users/all/drivers-with-details?page&limit
pub async fn all_drivers(
    client: &ApiClient,
    token: Option<&str>,
    page: u32,
    limit: u32,
) -> Result<Response, AppError> {
    client
        .get(token, "/users/all/drivers-with-details", &page_query(page, limit))
        .await
}

/// GET /driver-details/{id}
pub async fn driver_details(
    client: &ApiClient,
    token: Option<&str>,
    driver_id: &str,
) -> Result<Response, AppError> {
    client
        .get(token, &format!("/driver-details/{}", driver_id), &[])
        .await
}

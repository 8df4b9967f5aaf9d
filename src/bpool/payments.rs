//! Payment endpoints (PayPal-backed on the BPOOL side).

use reqwest::Response;

use crate::bpool::page_query;
use crate::errors::AppError;
use crate::upstream::ApiClient;

/// GET /paypal/all?page&limit&status
pub async fn all_payments(
    client: &ApiClient,
    token: Option<&str>,
    page: u32,
    limit: u32,
    status: &str,
) -> Result<Response, AppError> {
    let mut query = page_query(page, limit);
    query.push(("status", status.to_string()));
    client.get(token, "/paypal/all", &query).await
}

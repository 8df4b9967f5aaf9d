//! Vehicle endpoints. Create and update are multipart: the admin uploads
//! fitness and insurance documents alongside the registration fields.

use reqwest::multipart::Form;
use reqwest::Response;

use crate::bpool::page_query;
use crate::errors::AppError;
use crate::upstream::ApiClient;

/// GET /vehicles?page&limit
pub async fn all_vehicles(
    client: &ApiClient,
    token: Option<&str>,
    page: u32,
    limit: u32,
) -> Result<Response, AppError> {
    client.get(token, "/vehicles", &page_query(page, limit)).await
}

/// GET /vehicles/{id}
pub async fn vehicle_details(
    client: &ApiClient,
    token: Option<&str>,
    vehicle_id: &str,
) -> Result<Response, AppError> {
    client.get(token, &format!("/vehicles/{}", vehicle_id), &[]).await
}

/// POST /vehicles (multipart)
pub async fn create_vehicle(
    client: &ApiClient,
    token: Option<&str>,
    form: Form,
) -> Result<Response, AppError> {
    client.post_multipart(token, "/vehicles", form).await
}

/// PUT /vehicles/{id} (multipart)
pub async fn update_vehicle(
    client: &ApiClient,
    token: Option<&str>,
    vehicle_id: &str,
    form: Form,
) -> Result<Response, AppError> {
    client
        .put_multipart(token, &format!("/vehicles/{}", vehicle_id), form)
        .await
}

/// DELETE /vehicles/{id}
pub async fn delete_vehicle(
    client: &ApiClient,
    token: Option<&str>,
    vehicle_id: &str,
) -> Result<Response, AppError> {
    client.delete(token, &format!("/vehicles/{}", vehicle_id)).await
}

//! Booking endpoints.

use reqwest::Response;

use crate::bpool::page_query;
use crate::errors::AppError;
use crate::upstream::ApiClient;

/// GET /schedule-booking/all-booking?page&limit
pub async fn all_bookings(
    client: &ApiClient,
    token: Option<&str>,
    page: u32,
    limit: u32,
) -> Result<Response, AppError> {
    client
        .get(token, "/schedule-booking/all-booking", &page_query(page, limit))
        .await
}

/// GET /schedule-booking/{id}
pub async fn booking_details(
    client: &ApiClient,
    token: Option<&str>,
    booking_id: &str,
) -> Result<Response, AppError> {
    client
        .get(token, &format!("/schedule-booking/{}", booking_id), &[])
        .await
}

//! Account settings for the signed-in admin.

use reqwest::Response;
use serde_json::json;

use crate::errors::AppError;
use crate::upstream::ApiClient;

/// POST /user/change-password
pub async fn change_password(
    client: &ApiClient,
    token: Option<&str>,
    old_password: &str,
    new_password: &str,
) -> Result<Response, AppError> {
    client
        .post_json(
            token,
            "/user/change-password",
            &json!({ "oldPassword": old_password, "newPassword": new_password }),
        )
        .await
}

//! Request interceptors for the BPOOL API client.
//!
//! Composed at client construction time as an ordered middleware pipeline:
//! 1. `AttachBearer` — injects `Authorization: Bearer <token>` when the
//!    request carries a session token extension.
//! 2. `MultipartGuard` — drops an explicit boundary-less content-type from
//!    multipart requests so the transport sets the correct one.
//!
//! The session token travels as a per-request extension, set explicitly by
//! the caller — there is no ambient session lookup anywhere in this layer.

use http::Extensions;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Per-request session token. Absent on unauthenticated calls (login,
/// password reset).
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub struct AttachBearer;

#[async_trait::async_trait]
impl Middleware for AttachBearer {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if let Some(BearerToken(token)) = extensions.get::<BearerToken>() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    req.headers_mut().insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("session access token is not a valid header value; request sent unauthenticated");
                }
            }
        }
        next.run(req, extensions).await
    }
}

pub struct MultipartGuard;

#[async_trait::async_trait]
impl Middleware for MultipartGuard {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        strip_boundaryless_multipart(req.headers_mut());
        next.run(req, extensions).await
    }
}

/// A multipart content-type without a boundary parameter cannot have come
/// from the transport layer, only from an over-eager caller — and it would
/// make the body unparseable. Remove it; the transport sets its own.
/// Returns whether a header was removed.
pub fn strip_boundaryless_multipart(headers: &mut HeaderMap) -> bool {
    let hazardous = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data") && !v.contains("boundary="))
        .unwrap_or(false);

    if hazardous {
        headers.remove(CONTENT_TYPE);
    }
    hazardous
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaryless_multipart_content_type_is_removed() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("multipart/form-data"));

        assert!(strip_boundaryless_multipart(&mut headers));
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn transport_set_multipart_content_type_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=9f3a0b"),
        );

        assert!(!strip_boundaryless_multipart(&mut headers));
        assert!(headers.get(CONTENT_TYPE).is_some());
    }

    #[test]
    fn json_content_type_is_untouched() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        assert!(!strip_boundaryless_multipart(&mut headers));
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }
}

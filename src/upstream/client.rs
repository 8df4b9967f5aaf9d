//! HTTP client for the BPOOL REST API.
//!
//! Thin wrapper over reqwest + reqwest-middleware. The session token is an
//! explicit argument on every call; `None` sends the request
//! unauthenticated. Responses come back verbatim except for status 401,
//! which is terminal for the session — it becomes `AppError::SessionExpired`
//! and never reaches the caller's error handling.

use reqwest::multipart::Form;
use reqwest::{Method, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};

use crate::errors::AppError;
use crate::upstream::interceptor::{AttachBearer, BearerToken, MultipartGuard};

pub struct ApiClient {
    base_url: String,
    http: ClientWithMiddleware,
}

impl ApiClient {
    /// Build the client and compose the interceptor pipeline. No explicit
    /// timeouts: a hung request is bounded only by transport defaults.
    pub fn new(base_url: &str) -> Self {
        let reqwest_client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("failed to build HTTP client");

        let http = ClientBuilder::new(reqwest_client)
            .with(AttachBearer)
            .with(MultipartGuard)
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(
        &self,
        token: Option<&str>,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let rb = self.request(Method::GET, path, token).query(query);
        self.send(rb, token.is_some()).await
    }

    pub async fn post_json(
        &self,
        token: Option<&str>,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Response, AppError> {
        let rb = self.request(Method::POST, path, token).json(body);
        self.send(rb, token.is_some()).await
    }

    pub async fn put_json(
        &self,
        token: Option<&str>,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Response, AppError> {
        let rb = self.request(Method::PUT, path, token).json(body);
        self.send(rb, token.is_some()).await
    }

    pub async fn delete(&self, token: Option<&str>, path: &str) -> Result<Response, AppError> {
        let rb = self.request(Method::DELETE, path, token);
        self.send(rb, token.is_some()).await
    }

    pub async fn post_multipart(
        &self,
        token: Option<&str>,
        path: &str,
        form: Form,
    ) -> Result<Response, AppError> {
        let rb = self.request(Method::POST, path, token).multipart(form);
        self.send(rb, token.is_some()).await
    }

    pub async fn put_multipart(
        &self,
        token: Option<&str>,
        path: &str,
        form: Form,
    ) -> Result<Response, AppError> {
        let rb = self.request(Method::PUT, path, token).multipart(form);
        self.send(rb, token.is_some()).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let rb = self.http.request(method, url);
        match token {
            Some(t) => rb.with_extension(BearerToken(t.to_owned())),
            None => rb,
        }
    }

    async fn send(&self, rb: RequestBuilder, authenticated: bool) -> Result<Response, AppError> {
        let resp = rb.send().await.map_err(|e| {
            tracing::warn!("BPOOL API request failed: {}", e);
            AppError::Upstream(e.to_string())
        })?;

        // On a session-bearing call, 401 means the backend no longer honors
        // our access token. The session is dead; no refresh, no retry. A 401
        // on an unauthenticated call (login, password reset) is an ordinary
        // rejection and passes through to the caller.
        if authenticated && resp.status() == StatusCode::UNAUTHORIZED {
            tracing::info!(url = %resp.url(), "upstream returned 401, invalidating session");
            return Err(AppError::SessionExpired);
        }

        Ok(resp)
    }
}

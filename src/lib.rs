//! BPOOL admin gateway.
//!
//! Backend-for-frontend for the BPOOL school-transport admin dashboard:
//! credential sign-in against the BPOOL REST API with an admin-only gate,
//! JWT session cookies, route-level access gating, and verbatim relays of
//! the entity endpoints through an interceptor-equipped HTTP client.

pub mod access;
pub mod api;
pub mod auth;
pub mod bpool;
pub mod cli;
pub mod config;
pub mod errors;
pub mod session;
pub mod upstream;

use config::Config;
use upstream::ApiClient;

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub config: Config,
    pub bpool: ApiClient,
}

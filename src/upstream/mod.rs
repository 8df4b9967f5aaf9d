//! Outbound HTTP access to the BPOOL REST API.
//!
//! `client` owns the reqwest client and its middleware stack; `interceptor`
//! holds the request/response transformers composed onto it.

pub mod client;
pub mod interceptor;

pub use client::ApiClient;

//! Typed catalogue of BPOOL backend operations, grouped by entity.
//!
//! Every function builds a well-formed request against a known path and
//! returns the backend's response verbatim — no reshaping, no pagination
//! math. Pagination (`page`, `limit`) and filters (`status`) pass straight
//! through as query parameters; the backend decides page counts. List
//! envelopes are `{data: {data: [...], meta: {totalPages}}}` with `meta`
//! occasionally missing, so consumers default it defensively.

pub mod auth;
pub mod bookings;
pub mod drivers;
pub mod parents;
pub mod payments;
pub mod routes;
pub mod user;
pub mod vehicles;

fn page_query(page: u32, limit: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("limit", limit.to_string())]
}

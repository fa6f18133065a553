//! counter-server — order-count aggregator over the Shopify Admin API
//!
//! One HTTP service replacing a sequence of near-duplicate serverless
//! handlers. Each historical handler variant is a named counting strategy
//! selected by configuration; the request/response shape never changes:
//! resolve a date window, issue sequential count/list queries upstream,
//! apply arithmetic, answer `{ "count": <int> }`.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod strategy;
pub mod window;

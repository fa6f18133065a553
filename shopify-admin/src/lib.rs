//! shopify-admin — typed client for the Shopify Admin REST API
//!
//! Covers the small slice of the Admin API the order aggregator needs:
//! - Order counting (`orders/count.json`) with date/status filters
//! - Order listing (`orders.json`, single page, no cursor handling)
//! - Collection membership lookups for product exclusion
//!
//! The [`OrdersApi`] trait is the seam between the HTTP client and the
//! aggregation logic, so counting strategies can be exercised against a stub.

mod client;
mod error;
mod filter;
mod types;

pub use client::{AdminClient, OrdersApi};
pub use error::{ClientError, ClientResult};
pub use filter::OrderFilter;
pub use types::{Collection, FinancialStatus, FulfillmentStatus, LineItem, Order, tags_match};

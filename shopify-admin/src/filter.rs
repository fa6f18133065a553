//! Order query filter

use serde::{Deserialize, Serialize};

use crate::types::{FinancialStatus, FulfillmentStatus};

/// Filter fields for order count/list queries.
///
/// Every field is single-valued: the Admin API does not support repeated
/// filter keys, so a strategy that needs two statuses issues two queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Order status pass-through (`any`, `open`, `closed`, ...). Sent to
    /// the upstream as given; invalid values surface as upstream 4xx.
    pub status: Option<String>,
    pub created_at_min: Option<String>,
    pub created_at_max: Option<String>,
    pub financial_status: Option<FinancialStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
    /// Page size for listing queries (max 250)
    pub limit: Option<u32>,
}

impl OrderFilter {
    /// Filter scoped to a creation-date window.
    pub fn in_window(created_at_min: impl Into<String>, created_at_max: impl Into<String>) -> Self {
        Self {
            created_at_min: Some(created_at_min.into()),
            created_at_max: Some(created_at_max.into()),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn financial(mut self, status: FinancialStatus) -> Self {
        self.financial_status = Some(status);
        self
    }

    pub fn fulfillment(mut self, status: FulfillmentStatus) -> Self {
        self.fulfillment_status = Some(status);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the filter as query pairs in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(min) = &self.created_at_min {
            pairs.push(("created_at_min", min.clone()));
        }
        if let Some(max) = &self.created_at_max {
            pairs.push(("created_at_max", max.clone()));
        }
        if let Some(financial) = self.financial_status {
            pairs.push(("financial_status", financial.as_str().to_string()));
        }
        if let Some(fulfillment) = self.fulfillment_status {
            pairs.push(("fulfillment_status", fulfillment.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

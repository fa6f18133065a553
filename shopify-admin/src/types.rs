//! Wire types for the Admin API order endpoints

use serde::{Deserialize, Serialize};

/// Payment state of an order, as the Admin API filters and reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    Authorized,
    Pending,
    Paid,
    Refunded,
    Voided,
    Cancelled,
    /// Statuses outside the modeled set (e.g. partially_paid) are
    /// tolerated on read; they never match a configured status set.
    #[serde(other)]
    Other,
}

impl FinancialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Voided => "voided",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for FinancialStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "authorized" => Ok(Self::Authorized),
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            "voided" => Ok(Self::Voided),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown financial status: {other}")),
        }
    }
}

/// Shipment state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    Fulfilled,
    Cancelled,
    #[serde(other)]
    Other,
}

impl FulfillmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }
}

/// One purchased product line within an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Absent for custom/deleted products
    pub product_id: Option<i64>,
    pub quantity: i64,
}

/// Order as returned by `orders.json` (only the fields the aggregator reads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub financial_status: Option<FinancialStatus>,
    #[serde(default)]
    pub fulfillment_status: Option<FulfillmentStatus>,
    /// One comma-separated string on the wire, e.g. `"daraz, repeat-customer"`
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// True if any of the order's tags contains `token` case-insensitively.
    pub fn has_tag_like(&self, token: &str) -> bool {
        tags_match(&self.tags, token)
    }
}

/// Case-insensitive substring match of `token` against a comma-separated
/// tag string. `"Daraz-Promo"` and `"DARAZ"` both match token `"daraz"`.
pub fn tags_match(tags: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let token = token.to_ascii_lowercase();
    tags.split(',')
        .map(|t| t.trim().to_ascii_lowercase())
        .any(|t| t.contains(&token))
}

/// Collection reference from `custom_collections.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub title: String,
}

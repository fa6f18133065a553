//! Counting strategies
//!
//! The historical deployment was a sequence of near-duplicate handlers,
//! each changing only the counting formula. Here each variant is one named
//! strategy over the two upstream primitives (`count_orders`,
//! `list_orders`); the handler stays a single linear sequence of
//! sequential upstream calls followed by arithmetic.

pub mod listing;
pub mod signed;

use shopify_admin::{OrderFilter, OrdersApi};

use crate::config::Config;
use crate::error::AppError;
use crate::window::Window;

/// Named counting strategy (env: COUNT_STRATEGY)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// One count query; the upstream count is returned unchanged
    Passthrough,
    /// `(paid + pending) - (refunded + voided + cancelled)`
    NetPaid,
    /// Paid minus cancelled/refunded, plus paid-and-fulfilled
    FulfillmentAdjusted,
    /// List the window, keep configured statuses, drop tag-matched orders
    TagFiltered,
    /// As tag-filtered, but sum line-item quantities minus excluded products
    UnitCount,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::NetPaid => "net-paid",
            Self::FulfillmentAdjusted => "fulfillment-adjusted",
            Self::TagFiltered => "tag-filtered",
            Self::UnitCount => "unit-count",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "passthrough" => Ok(Self::Passthrough),
            "net-paid" => Ok(Self::NetPaid),
            "fulfillment-adjusted" => Ok(Self::FulfillmentAdjusted),
            "tag-filtered" => Ok(Self::TagFiltered),
            "unit-count" => Ok(Self::UnitCount),
            other => Err(format!("unknown counting strategy: {other}")),
        }
    }
}

/// Evaluate the configured strategy over the resolved window.
///
/// `status_override` is the inbound `status` query parameter; only the
/// pass-through strategy forwards it (the others fix their own filters).
pub async fn evaluate(
    api: &dyn OrdersApi,
    config: &Config,
    window: &Window,
    status_override: Option<&str>,
) -> Result<i64, AppError> {
    match config.strategy {
        StrategyKind::Passthrough => {
            let mut filter =
                OrderFilter::in_window(&window.created_at_min, &window.created_at_max);
            if let Some(status) = status_override {
                filter = filter.status(status);
            }
            Ok(api.count_orders(&filter).await?)
        }
        StrategyKind::NetPaid => signed::evaluate(api, window, &signed::NET_PAID).await,
        StrategyKind::FulfillmentAdjusted => {
            signed::evaluate(api, window, &signed::FULFILLMENT_ADJUSTED).await
        }
        StrategyKind::TagFiltered => listing::count_orders(api, config, window).await,
        StrategyKind::UnitCount => listing::unit_count(api, config, window).await,
    }
}

//! Aggregator configuration
//!
//! All configuration is read once at process start into an explicit
//! `Config` struct. The required-variable check is a pure validation step
//! (`missing_vars`) so handlers can short-circuit without touching the
//! environment, and tests can construct configs directly.

use std::time::Duration;

use shopify_admin::FinancialStatus;

use crate::strategy::StrategyKind;
use crate::window::WindowConfig;

pub const DEFAULT_API_VERSION: &str = "2025-07";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://acetech.pk";
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Aggregator configuration
#[derive(Clone)]
pub struct Config {
    /// Shop domain, e.g. `my-shop.myshopify.com` (env: SHOPIFY_STORE_DOMAIN)
    pub shop_domain: Option<String>,
    /// Admin API access token (env: SHOPIFY_ADMIN_API_TOKEN, secret)
    pub access_token: Option<String>,
    /// Admin API version segment
    pub api_version: String,
    pub http_port: u16,
    /// Browser origin allowed by CORS
    pub allowed_origin: String,
    /// Counting strategy (env: COUNT_STRATEGY)
    pub strategy: StrategyKind,
    /// Date window the counting queries are scoped to
    pub window: WindowConfig,
    /// Financial statuses kept by listing strategies (env: LIST_STATUSES)
    pub list_statuses: Vec<FinancialStatus>,
    /// Orders tagged with this token (case-insensitive substring) are dropped
    pub exclude_tag: Option<String>,
    /// Products in this collection never contribute to unit counts
    pub exclude_collection_id: Option<i64>,
    /// Collection-title fragment matched per product, e.g. `accessories`
    pub exclude_collection_name: Option<String>,
    /// Reject requests declaring a different shop domain with 403
    pub enforce_shop_origin: bool,
    /// Upstream request bound in seconds; 0 disables the bound
    pub upstream_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let strategy = match std::env::var("COUNT_STRATEGY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}, falling back to net-paid");
                StrategyKind::NetPaid
            }),
            Err(_) => StrategyKind::NetPaid,
        };

        let list_statuses = std::env::var("LIST_STATUSES")
            .map(|raw| parse_statuses(&raw))
            .unwrap_or_else(|_| vec![FinancialStatus::Paid]);

        let config = Self {
            shop_domain: std::env::var("SHOPIFY_STORE_DOMAIN")
                .ok()
                .filter(|s| !s.is_empty()),
            access_token: std::env::var("SHOPIFY_ADMIN_API_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
            api_version: std::env::var("SHOPIFY_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            allowed_origin: std::env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.into()),
            strategy,
            window: WindowConfig::from_env(),
            list_statuses,
            exclude_tag: std::env::var("EXCLUDE_TAG").ok().filter(|s| !s.is_empty()),
            exclude_collection_id: std::env::var("EXCLUDE_COLLECTION_ID")
                .ok()
                .and_then(|v| v.parse().ok()),
            exclude_collection_name: std::env::var("EXCLUDE_COLLECTION_NAME")
                .ok()
                .filter(|s| !s.is_empty()),
            enforce_shop_origin: std::env::var("ENFORCE_SHOP_ORIGIN")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        if config.strategy == StrategyKind::TagFiltered && config.exclude_tag.is_none() {
            tracing::warn!(
                "COUNT_STRATEGY=tag-filtered without EXCLUDE_TAG degrades to a status-filtered count"
            );
        }

        config
    }

    /// Names of the required variables that are absent, in declaration order.
    /// Empty means the upstream client can be constructed.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.shop_domain.as_deref().is_none_or(str::is_empty) {
            missing.push("SHOPIFY_STORE_DOMAIN");
        }
        if self.access_token.as_deref().is_none_or(str::is_empty) {
            missing.push("SHOPIFY_ADMIN_API_TOKEN");
        }
        missing
    }

    /// Upstream request bound; `None` leaves calls unbounded
    pub fn upstream_timeout(&self) -> Option<Duration> {
        (self.upstream_timeout_secs > 0).then(|| Duration::from_secs(self.upstream_timeout_secs))
    }
}

// The access token never reaches logs, not even through Debug.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("shop_domain", &self.shop_domain)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("api_version", &self.api_version)
            .field("http_port", &self.http_port)
            .field("allowed_origin", &self.allowed_origin)
            .field("strategy", &self.strategy)
            .field("window", &self.window)
            .field("list_statuses", &self.list_statuses)
            .field("exclude_tag", &self.exclude_tag)
            .field("exclude_collection_id", &self.exclude_collection_id)
            .field("exclude_collection_name", &self.exclude_collection_name)
            .field("enforce_shop_origin", &self.enforce_shop_origin)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

/// Parse a comma-separated financial status list; unknown entries are
/// skipped with a warning.
fn parse_statuses(raw: &str) -> Vec<FinancialStatus> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| match s.parse::<FinancialStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!("LIST_STATUSES: {e}, entry skipped");
                None
            }
        })
        .collect()
}

//! Listing strategies
//!
//! These variants fetch one page of full orders and do the filtering
//! in-memory: keep orders whose financial status is in the configured set,
//! drop orders matching the exclusion tag, then either count the survivors
//! or sum their line-item quantities minus excluded products.

use std::collections::{BTreeSet, HashSet};

use shopify_admin::{FinancialStatus, Order, OrderFilter, OrdersApi};

use crate::config::Config;
use crate::error::AppError;
use crate::window::Window;

/// Upstream page-size cap. Orders beyond one page are silently dropped;
/// a full page is logged as the known pagination limitation.
pub const PAGE_LIMIT: u32 = 250;

async fn fetch_window(api: &dyn OrdersApi, window: &Window) -> Result<Vec<Order>, AppError> {
    let filter = OrderFilter::in_window(&window.created_at_min, &window.created_at_max)
        .status("any")
        .limit(PAGE_LIMIT);
    let orders = api.list_orders(&filter).await?;
    if orders.len() as u32 >= PAGE_LIMIT {
        tracing::warn!(
            page_limit = PAGE_LIMIT,
            "order listing filled one page; orders beyond it are not counted"
        );
    }
    Ok(orders)
}

/// Keep orders whose financial status is in `statuses` and whose tags do
/// not match `exclude_tag`.
pub fn retain_countable(
    orders: Vec<Order>,
    statuses: &[FinancialStatus],
    exclude_tag: Option<&str>,
) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| {
            order
                .financial_status
                .is_some_and(|status| statuses.contains(&status))
        })
        .filter(|order| !exclude_tag.is_some_and(|token| order.has_tag_like(token)))
        .collect()
}

/// Sum line-item quantities, skipping items whose product is excluded.
/// Items without a product id cannot be in the excluded set and count.
pub fn unit_total(orders: &[Order], excluded_products: &HashSet<i64>) -> i64 {
    orders
        .iter()
        .flat_map(|order| &order.line_items)
        .filter(|item| {
            item.product_id
                .is_none_or(|id| !excluded_products.contains(&id))
        })
        .map(|item| item.quantity)
        .sum()
}

/// Resolve the excluded-product set: either every product of a configured
/// collection id, or per-product membership checks against a collection
/// title fragment. The per-product path issues one upstream call per
/// distinct product id, sequentially and uncached within the request.
pub async fn excluded_products(
    api: &dyn OrdersApi,
    config: &Config,
    orders: &[Order],
) -> Result<HashSet<i64>, AppError> {
    if let Some(collection_id) = config.exclude_collection_id {
        return Ok(api.collection_products(collection_id).await?.into_iter().collect());
    }

    let Some(fragment) = &config.exclude_collection_name else {
        return Ok(HashSet::new());
    };
    let fragment = fragment.to_lowercase();

    let product_ids: BTreeSet<i64> = orders
        .iter()
        .flat_map(|order| &order.line_items)
        .filter_map(|item| item.product_id)
        .collect();
    if !product_ids.is_empty() {
        tracing::warn!(
            products = product_ids.len(),
            "resolving collection memberships one upstream call per product"
        );
    }

    let mut excluded = HashSet::new();
    for product_id in product_ids {
        let collections = api.product_collections(product_id).await?;
        if collections
            .iter()
            .any(|c| c.title.to_lowercase().contains(&fragment))
        {
            excluded.insert(product_id);
        }
    }
    Ok(excluded)
}

/// `tag-filtered`: number of surviving orders.
pub async fn count_orders(
    api: &dyn OrdersApi,
    config: &Config,
    window: &Window,
) -> Result<i64, AppError> {
    let orders = fetch_window(api, window).await?;
    let kept = retain_countable(orders, &config.list_statuses, config.exclude_tag.as_deref());
    Ok(kept.len() as i64)
}

/// `unit-count`: total line-item quantity of surviving orders, excluding
/// items whose product belongs to the excluded set.
pub async fn unit_count(
    api: &dyn OrdersApi,
    config: &Config,
    window: &Window,
) -> Result<i64, AppError> {
    let orders = fetch_window(api, window).await?;
    let kept = retain_countable(orders, &config.list_statuses, config.exclude_tag.as_deref());
    let excluded = excluded_products(api, config, &kept).await?;
    Ok(unit_total(&kept, &excluded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ALLOWED_ORIGIN, DEFAULT_API_VERSION};
    use crate::strategy::StrategyKind;
    use crate::window::WindowConfig;
    use async_trait::async_trait;
    use shopify_admin::{ClientResult, Collection, LineItem};
    use std::sync::Mutex;

    fn order(id: i64, status: Option<FinancialStatus>, tags: &str, items: &[(Option<i64>, i64)]) -> Order {
        Order {
            id,
            financial_status: status,
            fulfillment_status: None,
            tags: tags.to_string(),
            line_items: items
                .iter()
                .map(|&(product_id, quantity)| LineItem {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_retain_by_status_set() {
        let orders = vec![
            order(1, Some(FinancialStatus::Paid), "", &[]),
            order(2, Some(FinancialStatus::Pending), "", &[]),
            order(3, Some(FinancialStatus::Refunded), "", &[]),
            order(4, None, "", &[]),
        ];
        let kept = retain_countable(
            orders,
            &[FinancialStatus::Paid, FinancialStatus::Pending],
            None,
        );
        assert_eq!(kept.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_retain_drops_tag_matches_case_insensitively() {
        let orders = vec![
            order(1, Some(FinancialStatus::Paid), "Daraz-Promo", &[]),
            order(2, Some(FinancialStatus::Paid), "DARAZ", &[]),
            order(3, Some(FinancialStatus::Paid), "retail, repeat", &[]),
        ];
        let kept = retain_countable(orders, &[FinancialStatus::Paid], Some("daraz"));
        assert_eq!(kept.iter().map(|o| o.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_unit_total_skips_excluded_products() {
        let orders = vec![
            order(
                1,
                Some(FinancialStatus::Paid),
                "",
                &[(Some(111), 2), (Some(222), 3), (None, 1)],
            ),
        ];
        let excluded: HashSet<i64> = [111].into_iter().collect();
        assert_eq!(unit_total(&orders, &excluded), 4);
        assert_eq!(unit_total(&orders, &HashSet::new()), 6);
    }

    struct MembershipApi {
        accessory_products: Vec<i64>,
        lookups: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl OrdersApi for MembershipApi {
        async fn count_orders(&self, _filter: &OrderFilter) -> ClientResult<i64> {
            unreachable!()
        }

        async fn list_orders(&self, _filter: &OrderFilter) -> ClientResult<Vec<Order>> {
            unreachable!()
        }

        async fn collection_products(&self, _collection_id: i64) -> ClientResult<Vec<i64>> {
            Ok(self.accessory_products.clone())
        }

        async fn product_collections(&self, product_id: i64) -> ClientResult<Vec<Collection>> {
            self.lookups.lock().unwrap().push(product_id);
            if self.accessory_products.contains(&product_id) {
                Ok(vec![Collection {
                    id: 99,
                    title: "Mobile Accessories".into(),
                }])
            } else {
                Ok(vec![Collection {
                    id: 7,
                    title: "Phones".into(),
                }])
            }
        }
    }

    fn test_config() -> Config {
        Config {
            shop_domain: Some("my-shop.myshopify.com".into()),
            access_token: Some("shpat_test".into()),
            api_version: DEFAULT_API_VERSION.into(),
            http_port: 3000,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.into(),
            strategy: StrategyKind::UnitCount,
            window: WindowConfig::rolling(14),
            list_statuses: vec![FinancialStatus::Paid],
            exclude_tag: None,
            exclude_collection_id: None,
            exclude_collection_name: None,
            enforce_shop_origin: false,
            upstream_timeout_secs: 8,
        }
    }

    #[tokio::test]
    async fn test_excluded_products_by_collection_id() {
        let api = MembershipApi {
            accessory_products: vec![111, 333],
            lookups: Mutex::new(Vec::new()),
        };
        let mut config = test_config();
        config.exclude_collection_id = Some(42);

        let excluded = excluded_products(&api, &config, &[]).await.unwrap();
        assert_eq!(excluded, [111, 333].into_iter().collect());
        // collection-id path never resolves per-product memberships
        assert!(api.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_excluded_products_by_title_fragment_queries_distinct_ids() {
        let api = MembershipApi {
            accessory_products: vec![111],
            lookups: Mutex::new(Vec::new()),
        };
        let mut config = test_config();
        config.exclude_collection_name = Some("Accessories".into());

        let orders = vec![
            order(
                1,
                Some(FinancialStatus::Paid),
                "",
                &[(Some(111), 1), (Some(222), 2)],
            ),
            order(2, Some(FinancialStatus::Paid), "", &[(Some(111), 5)]),
        ];
        let excluded = excluded_products(&api, &config, &orders).await.unwrap();
        assert_eq!(excluded, [111].into_iter().collect());
        assert_eq!(*api.lookups.lock().unwrap(), vec![111, 222]);
    }

    #[tokio::test]
    async fn test_no_exclusion_configured_yields_empty_set() {
        let api = MembershipApi {
            accessory_products: vec![111],
            lookups: Mutex::new(Vec::new()),
        };
        let excluded = excluded_products(&api, &test_config(), &[]).await.unwrap();
        assert!(excluded.is_empty());
    }
}

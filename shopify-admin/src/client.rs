//! HTTP client for the Admin API order endpoints

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, header};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::filter::OrderFilter;
use crate::types::{Collection, Order};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(serde::Deserialize)]
struct CountResponse {
    count: i64,
}

#[derive(serde::Deserialize)]
struct OrdersResponse {
    orders: Vec<Order>,
}

#[derive(serde::Deserialize)]
struct CollectionProductsResponse {
    products: Vec<ProductRef>,
}

#[derive(serde::Deserialize)]
struct ProductRef {
    id: i64,
}

#[derive(serde::Deserialize)]
struct CustomCollectionsResponse {
    custom_collections: Vec<Collection>,
}

/// Order API trait — the seam between aggregation logic and the network.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `orders/count.json` — number of orders matching the filter.
    async fn count_orders(&self, filter: &OrderFilter) -> ClientResult<i64>;

    /// `orders.json` — one page of orders matching the filter. No cursor
    /// handling: orders beyond the upstream page size are not returned.
    async fn list_orders(&self, filter: &OrderFilter) -> ClientResult<Vec<Order>>;

    /// `collections/{id}/products.json` — product ids in a collection.
    async fn collection_products(&self, collection_id: i64) -> ClientResult<Vec<i64>>;

    /// `custom_collections.json?product_id=N` — collections a product
    /// belongs to. One upstream call per product; callers resolving
    /// memberships for many products pay one round trip each.
    async fn product_collections(&self, product_id: i64) -> ClientResult<Vec<Collection>>;
}

/// Network client for a single shop's Admin API
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Build a client for `https://{shop}/admin/api/{api_version}`.
    ///
    /// The access token is installed as a sensitive default header so it
    /// never appears in request logs. `timeout: None` leaves upstream
    /// calls unbounded.
    pub fn new(
        shop: &str,
        token: &str,
        api_version: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut token_value =
            HeaderValue::from_str(token).map_err(|_| ClientError::InvalidToken)?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, token_value);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: format!(
                "https://{}/admin/api/{}",
                shop.trim_end_matches('/'),
                api_version
            ),
        })
    }

    /// Base URL of the shop's versioned Admin API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "Shopify Admin API request");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %path, "Shopify Admin API returned non-success");
            return Err(ClientError::Api { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl OrdersApi for AdminClient {
    async fn count_orders(&self, filter: &OrderFilter) -> ClientResult<i64> {
        let response: CountResponse = self
            .get_json("orders/count.json", &filter.query_pairs())
            .await?;
        Ok(response.count)
    }

    async fn list_orders(&self, filter: &OrderFilter) -> ClientResult<Vec<Order>> {
        let response: OrdersResponse = self.get_json("orders.json", &filter.query_pairs()).await?;
        Ok(response.orders)
    }

    async fn collection_products(&self, collection_id: i64) -> ClientResult<Vec<i64>> {
        let path = format!("collections/{collection_id}/products.json");
        let response: CollectionProductsResponse = self.get_json(&path, &[]).await?;
        Ok(response.products.into_iter().map(|p| p.id).collect())
    }

    async fn product_collections(&self, product_id: i64) -> ClientResult<Vec<Collection>> {
        let query = [("product_id", product_id.to_string())];
        let response: CustomCollectionsResponse =
            self.get_json("custom_collections.json", &query).await?;
        Ok(response.custom_collections)
    }
}

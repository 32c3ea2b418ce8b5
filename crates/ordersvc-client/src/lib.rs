use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::Order;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct OrdersClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct OrdersClient {
    base: Url,
    client: reqwest::Client,
}

/// Order body for create/update calls. `status` defaults server-side to
/// "Open" when omitted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub shipping_price: f64,
    pub date_created: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub items: Vec<NewItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewItem {
    pub item_price: f64,
    pub sku: i64,
}

impl OrdersClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<OrdersClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(OrdersClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn create_order(&self, req: &NewOrder) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("orders")?)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_order(&self, id: i64) -> anyhow::Result<Order> {
        let res = self
            .client
            .get(self.url(&format!("orders/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_orders(
        &self,
        name: Option<&str>,
        status: Option<&str>,
    ) -> anyhow::Result<Vec<Order>> {
        let mut req = self.client.get(self.url("orders")?);
        if let Some(name) = name {
            req = req.query(&[("name", name)]);
        }
        if let Some(status) = status {
            req = req.query(&[("status", status)]);
        }
        let res = req.send().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_order(&self, id: i64, req: &NewOrder) -> anyhow::Result<Order> {
        let res = self
            .client
            .put(self.url(&format!("orders/{id}"))?)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_order(&self, id: i64) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("orders/{id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn cancel_order(&self, id: i64) -> anyhow::Result<Order> {
        let res = self
            .client
            .put(self.url(&format!("orders/{id}/cancel"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn add_item(&self, order_id: i64, req: &NewItem) -> anyhow::Result<Item> {
        let res = self
            .client
            .post(self.url(&format!("orders/{order_id}/items"))?)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn list_items(&self, order_id: i64) -> anyhow::Result<Vec<Item>> {
        let res = self
            .client
            .get(self.url(&format!("orders/{order_id}/items"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn get_item(&self, order_id: i64, item_id: i64) -> anyhow::Result<Item> {
        let res = self
            .client
            .get(self.url(&format!("orders/{order_id}/items/{item_id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_item(
        &self,
        order_id: i64,
        item_id: i64,
        req: &NewItem,
    ) -> anyhow::Result<Item> {
        let res = self
            .client
            .put(self.url(&format!("orders/{order_id}/items/{item_id}"))?)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_item(&self, order_id: i64, item_id: i64) -> anyhow::Result<()> {
        self.client
            .delete(self.url(&format!("orders/{order_id}/items/{item_id}"))?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl OrdersClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<OrdersClient> {
        if let Some(client) = self.client {
            return Ok(OrdersClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(OrdersClient {
            base: self.base,
            client,
        })
    }
}

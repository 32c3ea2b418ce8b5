use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::order_service::OrderService;
use crate::errors::AppError;
use crate::inbound::http::extract::StrictJson;
use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::{Order, STATUS_OPEN};
use ordersvc_types::ports::order_repository::{OrderFilter, OrderRepository};

fn default_status() -> String {
    STATUS_OPEN.to_string()
}

/// Order body for POST / PUT. Ids coming in the body are ignored; the store
/// (on create) or the path (on update) decides them.
#[derive(Deserialize)]
pub struct OrderPayload {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub shipping_price: f64,
    pub date_created: NaiveDate,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub items: Vec<ItemPayload>,
}

/// Item body for POST / PUT. Any `order_id` in the body loses to the path.
#[derive(Deserialize)]
pub struct ItemPayload {
    pub item_price: f64,
    pub sku: i64,
}

impl ItemPayload {
    fn into_item(self, order_id: i64) -> Item {
        Item {
            id: None,
            order_id,
            item_price: self.item_price,
            sku: self.sku,
        }
    }
}

impl OrderPayload {
    fn into_order(self) -> Order {
        let items = self
            .items
            .into_iter()
            // order_id placeholder; the repository rewrites it on insert.
            .map(|item| item.into_item(0))
            .collect();
        Order {
            id: None,
            name: self.name,
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            shipping_price: self.shipping_price,
            date_created: self.date_created,
            status: self.status,
            items,
        }
    }
}

#[derive(Deserialize)]
pub struct ListOrdersParams {
    pub name: Option<String>,
    pub status: Option<String>,
}

pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Orders REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": {
            "orders": "/orders",
            "items": "/orders/{id}/items",
        },
    }))
}

pub async fn create_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    StrictJson(payload): StrictJson<OrderPayload>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Order>), AppError>
where
    R: OrderRepository,
{
    let order = service.create_order(payload.into_order()).await?;
    let location = format!("/orders/{}", order.id.unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(order)))
}

pub async fn list_orders<R>(
    State(service): State<Arc<OrderService<R>>>,
    Query(params): Query<ListOrdersParams>,
) -> Result<Json<Vec<Order>>, AppError>
where
    R: OrderRepository,
{
    let filter = OrderFilter {
        name: params.name,
        status: params.status,
    };
    Ok(Json(service.list_orders(filter).await?))
}

pub async fn get_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository,
{
    Ok(Json(service.get_order(id).await?))
}

pub async fn update_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<i64>,
    StrictJson(payload): StrictJson<OrderPayload>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository,
{
    Ok(Json(service.update_order(id, payload.into_order()).await?))
}

pub async fn delete_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError>
where
    R: OrderRepository,
{
    service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn cancel_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError>
where
    R: OrderRepository,
{
    Ok(Json(service.cancel_order(id).await?))
}

pub async fn create_item<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(order_id): Path<i64>,
    StrictJson(payload): StrictJson<ItemPayload>,
) -> Result<(StatusCode, Json<Item>), AppError>
where
    R: OrderRepository,
{
    let item = service
        .add_item(order_id, payload.into_item(order_id))
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(order_id): Path<i64>,
) -> Result<Json<Vec<Item>>, AppError>
where
    R: OrderRepository,
{
    Ok(Json(service.list_items(order_id).await?))
}

pub async fn get_item<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path((order_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<Item>, AppError>
where
    R: OrderRepository,
{
    Ok(Json(service.get_item(order_id, item_id).await?))
}

pub async fn update_item<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path((order_id, item_id)): Path<(i64, i64)>,
    StrictJson(payload): StrictJson<ItemPayload>,
) -> Result<Json<Item>, AppError>
where
    R: OrderRepository,
{
    let item = service
        .update_item(order_id, item_id, payload.into_item(order_id))
        .await?;
    Ok(Json(item))
}

pub async fn delete_item<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path((order_id, item_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError>
where
    R: OrderRepository,
{
    service.delete_item(order_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

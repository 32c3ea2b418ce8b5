use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::Order;
use ordersvc_types::ports::order_repository::{OrderFilter, OrderRepository, RepoError};

/// In-memory adapter. Orders are stored with an empty item list; items live
/// in their own map keyed by item id, and get attached on every read so the
/// cascade behaves like the database one.
#[derive(Clone)]
pub struct InMemoryRepo {
    orders: Arc<DashMap<i64, Order>>,
    items: Arc<DashMap<i64, Item>>,
    next_order_id: Arc<AtomicI64>,
    next_item_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(DashMap::new()),
            items: Arc::new(DashMap::new()),
            next_order_id: Arc::new(AtomicI64::new(1)),
            next_item_id: Arc::new(AtomicI64::new(1)),
        }
    }

    fn items_for(&self, order_id: i64) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .items
            .iter()
            .filter(|kv| kv.value().order_id == order_id)
            .map(|kv| kv.value().clone())
            .collect();
        items.sort_by_key(|item| item.id);
        items
    }

    fn with_items(&self, mut order: Order) -> Order {
        if let Some(id) = order.id {
            order.items = self.items_for(id);
        }
        order
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create(&self, mut order: Order) -> Result<Order, RepoError> {
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        order.id = Some(id);
        let embedded = std::mem::take(&mut order.items);
        self.orders.insert(id, order.clone());
        for mut item in embedded {
            let item_id = self.next_item_id.fetch_add(1, Ordering::SeqCst);
            item.id = Some(item_id);
            item.order_id = id;
            self.items.insert(item_id, item);
        }
        Ok(self.with_items(order))
    }

    async fn find(&self, id: i64) -> Result<Option<Order>, RepoError> {
        Ok(self
            .orders
            .get(&id)
            .map(|r| self.with_items(r.clone())))
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, RepoError> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|kv| {
                filter.name.as_deref().map_or(true, |n| kv.value().name == n)
                    && filter
                        .status
                        .as_deref()
                        .map_or(true, |s| kv.value().status == s)
            })
            .map(|kv| self.with_items(kv.value().clone()))
            .collect();
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }

    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError> {
        let Some(id) = order.id else {
            return Ok(None);
        };
        match self.orders.get_mut(&id) {
            Some(mut stored) => {
                let mut updated = order;
                // Items are managed through the item operations, never here.
                updated.items = Vec::new();
                *stored = updated.clone();
                drop(stored);
                Ok(Some(self.with_items(updated)))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let existed = self.orders.remove(&id).is_some();
        if existed {
            self.items.retain(|_, item| item.order_id != id);
        }
        Ok(existed)
    }

    async fn create_item(&self, mut item: Item) -> Result<Item, RepoError> {
        let id = self.next_item_id.fetch_add(1, Ordering::SeqCst);
        item.id = Some(id);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepoError> {
        Ok(self.items.get(&id).map(|r| r.clone()))
    }

    async fn list_items(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        Ok(self.items_for(order_id))
    }

    async fn update_item(&self, item: Item) -> Result<Option<Item>, RepoError> {
        let Some(id) = item.id else {
            return Ok(None);
        };
        match self.items.get_mut(&id) {
            Some(mut stored) => {
                *stored = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete_item(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.items.remove(&id).is_some())
    }
}

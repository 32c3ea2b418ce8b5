use async_trait::async_trait;

use crate::domain::item::Item;
use crate::domain::order::Order;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}

/// Equality filters for the order listing; `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub name: Option<String>,
    pub status: Option<String>,
}

/// Every operation commits synchronously and immediately; there is no
/// batching and no transaction spanning multiple logical operations.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Inserts the order (embedded items included), ignoring any
    /// client-supplied ids, and returns it with generated ids.
    async fn create(&self, order: Order) -> Result<Order, RepoError>;
    /// Returns the order with its items attached, or `None`.
    async fn find(&self, id: i64) -> Result<Option<Order>, RepoError>;
    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, RepoError>;
    /// Overwrites the scalar columns of the row with `order.id`; items are
    /// managed through the item operations. `None` if the row is absent.
    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError>;
    /// Removes the row and, via the cascade, its items. Reports whether the
    /// row existed.
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;

    async fn create_item(&self, item: Item) -> Result<Item, RepoError>;
    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepoError>;
    async fn list_items(&self, order_id: i64) -> Result<Vec<Item>, RepoError>;
    async fn update_item(&self, item: Item) -> Result<Option<Item>, RepoError>;
    async fn delete_item(&self, id: i64) -> Result<bool, RepoError>;
}

#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::Order;
use ordersvc_types::ports::order_repository::{OrderFilter, OrderRepository, RepoError};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub struct Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    memory: memory::InMemoryRepo,
    #[cfg(feature = "sqlite")]
    sqlite: sqlite::SqliteRepo,
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            memory: memory::InMemoryRepo::new(),
        })
    }

    #[cfg(feature = "sqlite")]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or("sqlite://orders.db");
        let sqlite = sqlite::SqliteRepo::new(url).await?;
        Ok(Self { sqlite })
    }
}

// With both features enabled the SQLite adapter backs the facade; the
// in-memory one stays available for tests that construct it directly.
#[cfg(all(feature = "memory", not(feature = "sqlite")))]
#[async_trait::async_trait]
impl OrderRepository for Repo {
    async fn create(&self, order: Order) -> Result<Order, RepoError> {
        self.memory.create(order).await
    }

    async fn find(&self, id: i64) -> Result<Option<Order>, RepoError> {
        self.memory.find(id).await
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, RepoError> {
        self.memory.list(filter).await
    }

    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError> {
        self.memory.update(order).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        self.memory.delete(id).await
    }

    async fn create_item(&self, item: Item) -> Result<Item, RepoError> {
        self.memory.create_item(item).await
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepoError> {
        self.memory.find_item(id).await
    }

    async fn list_items(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        self.memory.list_items(order_id).await
    }

    async fn update_item(&self, item: Item) -> Result<Option<Item>, RepoError> {
        self.memory.update_item(item).await
    }

    async fn delete_item(&self, id: i64) -> Result<bool, RepoError> {
        self.memory.delete_item(id).await
    }
}

#[cfg(feature = "sqlite")]
#[async_trait::async_trait]
impl OrderRepository for Repo {
    async fn create(&self, order: Order) -> Result<Order, RepoError> {
        self.sqlite.create(order).await
    }

    async fn find(&self, id: i64) -> Result<Option<Order>, RepoError> {
        self.sqlite.find(id).await
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, RepoError> {
        self.sqlite.list(filter).await
    }

    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError> {
        self.sqlite.update(order).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        self.sqlite.delete(id).await
    }

    async fn create_item(&self, item: Item) -> Result<Item, RepoError> {
        self.sqlite.create_item(item).await
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepoError> {
        self.sqlite.find_item(id).await
    }

    async fn list_items(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        self.sqlite.list_items(order_id).await
    }

    async fn update_item(&self, item: Item) -> Result<Option<Item>, RepoError> {
        self.sqlite.update_item(item).await
    }

    async fn delete_item(&self, id: i64) -> Result<bool, RepoError> {
        self.sqlite.delete_item(id).await
    }
}

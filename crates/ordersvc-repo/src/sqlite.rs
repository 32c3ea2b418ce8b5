use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::Order;
use ordersvc_types::ports::order_repository::{OrderFilter, OrderRepository, RepoError};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};

pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i64,
    name: String,
    street: String,
    city: String,
    state: String,
    postal_code: String,
    shipping_price: f64,
    date_created: String,
    status: String,
}

impl DbOrder {
    fn into_order(self, items: Vec<Item>) -> Result<Order, RepoError> {
        let date_created = NaiveDate::parse_from_str(&self.date_created, "%Y-%m-%d")
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(Order {
            id: Some(self.id),
            name: self.name,
            street: self.street,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            shipping_price: self.shipping_price,
            date_created,
            status: self.status,
            items,
        })
    }
}

#[derive(FromRow)]
struct DbItem {
    id: i64,
    order_id: i64,
    item_price: f64,
    sku: i64,
}

impl From<DbItem> for Item {
    fn from(row: DbItem) -> Self {
        Item {
            id: Some(row.id),
            order_id: row.order_id,
            item_price: row.item_price,
            sku: row.sku,
        }
    }
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        // The items table relies on ON DELETE CASCADE, so foreign key
        // enforcement must be on for every connection in the pool.
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file.
        let ddl = include_str!("../migrations/0001_create_orders.sql");
        sqlx::raw_sql(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    async fn items_for(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        let rows: Vec<DbItem> = sqlx::query_as(
            "SELECT id, order_id, item_price, sku FROM items WHERE order_id = ? ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn assemble(&self, row: DbOrder) -> Result<Order, RepoError> {
        let items = self.items_for(row.id).await?;
        row.into_order(items)
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn create(&self, order: Order) -> Result<Order, RepoError> {
        let res = sqlx::query(
            "INSERT INTO orders (name, street, city, state, postal_code, shipping_price, date_created, status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&order.name)
        .bind(&order.street)
        .bind(&order.city)
        .bind(&order.state)
        .bind(&order.postal_code)
        .bind(order.shipping_price)
        .bind(order.date_created.to_string())
        .bind(&order.status)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        let order_id = res.last_insert_rowid();

        for item in &order.items {
            sqlx::query("INSERT INTO items (order_id, item_price, sku) VALUES (?, ?, ?)")
                .bind(order_id)
                .bind(item.item_price)
                .bind(item.sku)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::DbError(e.to_string()))?;
        }

        match self.find(order_id).await? {
            Some(created) => Ok(created),
            None => Err(RepoError::DbError(format!(
                "order {order_id} missing right after insert"
            ))),
        }
    }

    async fn find(&self, id: i64) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(
            "SELECT id, name, street, city, state, postal_code, shipping_price, date_created, status
             FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, RepoError> {
        let mut sql = String::from(
            "SELECT id, name, street, city, state, postal_code, shipping_price, date_created, status
             FROM orders",
        );
        let mut clauses: Vec<&str> = Vec::new();
        if filter.name.is_some() {
            clauses.push("name = ?");
        }
        if filter.status.is_some() {
            clauses.push("status = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query_as::<_, DbOrder>(&sql);
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }
        if let Some(status) = &filter.status {
            query = query.bind(status);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.assemble(row).await?);
        }
        Ok(orders)
    }

    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError> {
        let Some(id) = order.id else {
            return Ok(None);
        };
        let res = sqlx::query(
            "UPDATE orders SET name = ?, street = ?, city = ?, state = ?, postal_code = ?,
             shipping_price = ?, date_created = ?, status = ? WHERE id = ?",
        )
        .bind(&order.name)
        .bind(&order.street)
        .bind(&order.city)
        .bind(&order.state)
        .bind(&order.postal_code)
        .bind(order.shipping_price)
        .bind(order.date_created.to_string())
        .bind(&order.status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.find(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(res.rows_affected() > 0)
    }

    async fn create_item(&self, item: Item) -> Result<Item, RepoError> {
        let res = sqlx::query("INSERT INTO items (order_id, item_price, sku) VALUES (?, ?, ?)")
            .bind(item.order_id)
            .bind(item.item_price)
            .bind(item.sku)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(Item {
            id: Some(res.last_insert_rowid()),
            ..item
        })
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepoError> {
        let row: Option<DbItem> =
            sqlx::query_as("SELECT id, order_id, item_price, sku FROM items WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(row.map(Item::from))
    }

    async fn list_items(&self, order_id: i64) -> Result<Vec<Item>, RepoError> {
        self.items_for(order_id).await
    }

    async fn update_item(&self, item: Item) -> Result<Option<Item>, RepoError> {
        let Some(id) = item.id else {
            return Ok(None);
        };
        let res =
            sqlx::query("UPDATE items SET order_id = ?, item_price = ?, sku = ? WHERE id = ?")
                .bind(item.order_id)
                .bind(item.item_price)
                .bind(item.sku)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::DbError(e.to_string()))?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_item(id).await
    }

    async fn delete_item(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(res.rows_affected() > 0)
    }
}

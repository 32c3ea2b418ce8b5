use crate::errors::AppError;
use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::Order;
use ordersvc_types::ports::order_repository::{OrderFilter, OrderRepository};

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

fn order_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Order with id '{id}' could not be found."))
}

fn item_not_found(order_id: i64, item_id: i64) -> AppError {
    AppError::NotFound(format!(
        "Item with id '{item_id}' could not be found on order '{order_id}'."
    ))
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_order(&self, mut order: Order) -> Result<Order, AppError> {
        // The id must be absent so the store assigns the next key.
        order.id = None;
        Ok(self.repo.create(order).await?)
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, AppError> {
        match self.repo.find(id).await? {
            Some(order) => Ok(order),
            None => Err(order_not_found(id)),
        }
    }

    pub async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list(filter).await?)
    }

    pub async fn update_order(&self, id: i64, mut order: Order) -> Result<Order, AppError> {
        order.id = Some(id);
        match self.repo.update(order).await? {
            Some(order) => Ok(order),
            None => Err(order_not_found(id)),
        }
    }

    /// Idempotent: deleting an absent order is still a success.
    pub async fn delete_order(&self, id: i64) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        Ok(())
    }

    /// The only modeled status transition: Open -> Cancelled. Anything not
    /// Open is rejected with a conflict and left unchanged.
    pub async fn cancel_order(&self, id: i64) -> Result<Order, AppError> {
        let mut order = self.get_order(id).await?;
        if !order.is_open() {
            return Err(AppError::Conflict(format!(
                "Order with id '{id}' is '{}' and can no longer be cancelled.",
                order.status
            )));
        }
        order.cancel();
        match self.repo.update(order).await? {
            Some(order) => Ok(order),
            None => Err(order_not_found(id)),
        }
    }

    pub async fn add_item(&self, order_id: i64, mut item: Item) -> Result<Item, AppError> {
        self.get_order(order_id).await?;
        item.id = None;
        // The path's order id wins over anything in the body.
        item.order_id = order_id;
        Ok(self.repo.create_item(item).await?)
    }

    pub async fn list_items(&self, order_id: i64) -> Result<Vec<Item>, AppError> {
        self.get_order(order_id).await?;
        Ok(self.repo.list_items(order_id).await?)
    }

    pub async fn get_item(&self, order_id: i64, item_id: i64) -> Result<Item, AppError> {
        match self.repo.find_item(item_id).await? {
            Some(item) if item.order_id == order_id => Ok(item),
            _ => Err(item_not_found(order_id, item_id)),
        }
    }

    pub async fn update_item(
        &self,
        order_id: i64,
        item_id: i64,
        mut item: Item,
    ) -> Result<Item, AppError> {
        self.get_item(order_id, item_id).await?;
        item.id = Some(item_id);
        item.order_id = order_id;
        match self.repo.update_item(item).await? {
            Some(item) => Ok(item),
            None => Err(item_not_found(order_id, item_id)),
        }
    }

    /// Idempotent, like order deletion. An item under a different order is
    /// treated as absent and left alone.
    pub async fn delete_item(&self, order_id: i64, item_id: i64) -> Result<(), AppError> {
        if let Some(item) = self.repo.find_item(item_id).await? {
            if item.order_id == order_id {
                self.repo.delete_item(item_id).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ordersvc_types::domain::order::{STATUS_CANCELLED, STATUS_OPEN, STATUS_SHIPPED};

    fn sample_order(name: &str) -> Order {
        Order {
            id: None,
            name: name.into(),
            street: "123 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            postal_code: "62704".into(),
            shipping_price: 9.99,
            date_created: NaiveDate::from_ymd_opt(2023, 3, 14).unwrap(),
            status: STATUS_OPEN.into(),
            items: Vec::new(),
        }
    }

    fn sample_item(order_id: i64) -> Item {
        Item {
            id: None,
            order_id,
            item_price: 19.99,
            sku: 4242,
        }
    }

    #[tokio::test]
    async fn create_and_get_order_in_memory() {
        let repo = ordersvc_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo);

        let created = svc.create_order(sample_order("Alice")).await.unwrap();
        let id = created.id.expect("id assigned");

        let got = svc.get_order(id).await.unwrap();
        assert_eq!(got.name, "Alice");
        assert_eq!(got.status, STATUS_OPEN);
    }

    #[tokio::test]
    async fn create_strips_any_client_supplied_id() {
        let repo = ordersvc_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo);

        let mut order = sample_order("Sneaky");
        order.id = Some(999);
        let created = svc.create_order(order).await.unwrap();
        assert_ne!(created.id, Some(999));
    }

    #[tokio::test]
    async fn update_and_idempotent_delete() {
        let repo = ordersvc_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo);

        let order = svc.create_order(sample_order("Bob")).await.unwrap();
        let id = order.id.unwrap();

        let mut changed = order.clone();
        changed.name = "Robert".into();
        let updated = svc.update_order(id, changed).await.unwrap();
        assert_eq!(updated.name, "Robert");

        svc.delete_order(id).await.unwrap();
        assert!(matches!(
            svc.get_order(id).await,
            Err(AppError::NotFound(_))
        ));

        // Second delete of the same id still succeeds.
        svc.delete_order(id).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_open_order_and_reject_shipped() {
        let repo = ordersvc_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo);

        let open = svc.create_order(sample_order("Open")).await.unwrap();
        let cancelled = svc.cancel_order(open.id.unwrap()).await.unwrap();
        assert_eq!(cancelled.status, STATUS_CANCELLED);

        let mut shipped = sample_order("Shipped");
        shipped.status = STATUS_SHIPPED.into();
        let shipped = svc.create_order(shipped).await.unwrap();
        let res = svc.cancel_order(shipped.id.unwrap()).await;
        assert!(matches!(res, Err(AppError::Conflict(_))));

        // Status stays untouched after the rejected cancel.
        let got = svc.get_order(shipped.id.unwrap()).await.unwrap();
        assert_eq!(got.status, STATUS_SHIPPED);
    }

    #[tokio::test]
    async fn item_flow_under_an_order() {
        let repo = ordersvc_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo);

        let order = svc.create_order(sample_order("Owner")).await.unwrap();
        let order_id = order.id.unwrap();

        let item = svc.add_item(order_id, sample_item(0)).await.unwrap();
        let item_id = item.id.unwrap();
        assert_eq!(item.order_id, order_id);

        let listed = svc.list_items(order_id).await.unwrap();
        assert_eq!(listed.len(), 1);

        let mut changed = item.clone();
        changed.sku = 7;
        let updated = svc.update_item(order_id, item_id, changed).await.unwrap();
        assert_eq!(updated.sku, 7);

        svc.delete_item(order_id, item_id).await.unwrap();
        assert!(matches!(
            svc.get_item(order_id, item_id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn items_are_scoped_to_their_order() {
        let repo = ordersvc_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo);

        let first = svc.create_order(sample_order("First")).await.unwrap();
        let second = svc.create_order(sample_order("Second")).await.unwrap();
        let item = svc
            .add_item(first.id.unwrap(), sample_item(0))
            .await
            .unwrap();

        // Reading or deleting through the wrong order is a 404 / no-op.
        let wrong = svc.get_item(second.id.unwrap(), item.id.unwrap()).await;
        assert!(matches!(wrong, Err(AppError::NotFound(_))));

        svc.delete_item(second.id.unwrap(), item.id.unwrap())
            .await
            .unwrap();
        assert!(svc
            .get_item(first.id.unwrap(), item.id.unwrap())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn not_found_paths() {
        let repo = ordersvc_repo::memory::InMemoryRepo::new();
        let svc = OrderService::new(repo);

        assert!(matches!(
            svc.get_order(404).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            svc.update_order(404, sample_order("Ghost")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            svc.cancel_order(404).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            svc.add_item(404, sample_item(0)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            svc.list_items(404).await,
            Err(AppError::NotFound(_))
        ));
    }
}

#![cfg(feature = "sqlite")]

use std::path::PathBuf;

use chrono::NaiveDate;
use ordersvc_repo::sqlite::SqliteRepo;
use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::{Order, STATUS_OPEN, STATUS_SHIPPED};
use ordersvc_types::ports::order_repository::{OrderFilter, OrderRepository};

fn temp_db_url() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut path = PathBuf::from(dir.path());
    path.push("orders-test.db");
    let url = format!("sqlite://{}", path.display());
    (dir, url)
}

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

#[tokio::test]
async fn sqlite_repo_crud_flow() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    let created = repo.create(sample_order("Test")).await.unwrap();
    let id = created.id.expect("id assigned on create");
    assert_eq!(created.status, STATUS_OPEN);

    let fetched = repo.find(id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Test");
    assert_eq!(
        fetched.date_created,
        NaiveDate::from_ymd_opt(2023, 3, 14).unwrap()
    );

    let listed = repo.list(OrderFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);

    let mut changed = fetched.clone();
    changed.name = "Renamed".into();
    changed.status = STATUS_SHIPPED.into();
    let updated = repo.update(changed).await.unwrap().unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.status, STATUS_SHIPPED);

    let deleted = repo.delete(id).await.unwrap();
    assert!(deleted);
    assert!(repo.find(id).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_repo_handles_missing_rows() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    assert!(repo.find(42).await.unwrap().is_none());

    let mut ghost = sample_order("Ghost");
    ghost.id = Some(42);
    assert!(repo.update(ghost).await.unwrap().is_none());

    assert!(!repo.delete(42).await.unwrap());
    assert!(repo.find_item(42).await.unwrap().is_none());
    assert!(!repo.delete_item(42).await.unwrap());
}

#[tokio::test]
async fn sqlite_repo_cascades_item_deletes() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    let order = repo.create(sample_order("Cascade")).await.unwrap();
    let order_id = order.id.unwrap();

    let item = repo
        .create_item(Item {
            id: None,
            order_id,
            item_price: 19.99,
            sku: 4242,
        })
        .await
        .unwrap();
    let item_id = item.id.unwrap();

    assert_eq!(repo.list_items(order_id).await.unwrap().len(), 1);

    // The foreign key cascade removes the item row, not application code.
    assert!(repo.delete(order_id).await.unwrap());
    assert!(repo.find_item(item_id).await.unwrap().is_none());
    assert!(repo.list_items(order_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_repo_persists_embedded_items_and_filters() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    let mut order = sample_order("Embedded");
    order.items = vec![
        Item {
            id: None,
            order_id: 0,
            item_price: 1.5,
            sku: 7,
        },
        Item {
            id: None,
            order_id: 0,
            item_price: 2.5,
            sku: 8,
        },
    ];
    let created = repo.create(order).await.unwrap();
    assert_eq!(created.items.len(), 2);
    assert!(created.items.iter().all(|i| i.id.is_some()));

    repo.create(sample_order("Other")).await.unwrap();

    let by_name = repo
        .list(OrderFilter {
            name: Some("Embedded".into()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].items.len(), 2);

    let by_status = repo
        .list(OrderFilter {
            name: None,
            status: Some(STATUS_OPEN.into()),
        })
        .await
        .unwrap();
    assert_eq!(by_status.len(), 2);
}

#[tokio::test]
async fn sqlite_repo_item_updates() {
    let (_dir, url) = temp_db_url();
    let repo = SqliteRepo::new(&url).await.unwrap();

    let order = repo.create(sample_order("ItemUpdate")).await.unwrap();
    let order_id = order.id.unwrap();
    let item = repo
        .create_item(Item {
            id: None,
            order_id,
            item_price: 3.0,
            sku: 99,
        })
        .await
        .unwrap();

    let mut changed = item.clone();
    changed.item_price = 4.0;
    let updated = repo.update_item(changed).await.unwrap().unwrap();
    assert_eq!(updated.item_price, 4.0);
    assert_eq!(updated.sku, 99);

    let mut ghost = item;
    ghost.id = Some(9999);
    assert!(repo.update_item(ghost).await.unwrap().is_none());
}

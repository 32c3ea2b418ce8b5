use chrono::NaiveDate;
use ordersvc_api::application::order_service::OrderService;
use ordersvc_repo::memory::InMemoryRepo;
use ordersvc_types::domain::item::Item;
use ordersvc_types::domain::order::{Order, STATUS_CANCELLED, STATUS_OPEN};
use ordersvc_types::ports::order_repository::OrderFilter;

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

// End-to-end service flow against the in-memory adapter.
#[tokio::test]
async fn create_list_cancel_delete_flow() {
    let svc = OrderService::new(InMemoryRepo::new());

    let order = svc.create_order(sample_order("Eve")).await.unwrap();
    let id = order.id.unwrap();

    let list = svc.list_orders(OrderFilter::default()).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, Some(id));

    let item = svc
        .add_item(
            id,
            Item {
                id: None,
                order_id: id,
                item_price: 7.0,
                sku: 700,
            },
        )
        .await
        .unwrap();
    assert_eq!(svc.list_items(id).await.unwrap().len(), 1);

    let cancelled = svc.cancel_order(id).await.unwrap();
    assert_eq!(cancelled.status, STATUS_CANCELLED);
    // The items survive a cancel; it is a status change, not a delete.
    assert_eq!(svc.list_items(id).await.unwrap().len(), 1);

    svc.delete_order(id).await.unwrap();
    let after_delete = svc.list_orders(OrderFilter::default()).await.unwrap();
    assert!(after_delete.is_empty());
    assert!(svc.get_item(id, item.id.unwrap()).await.is_err());
}

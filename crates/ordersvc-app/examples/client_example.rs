///  To run :
///  cargo r --example client_example
use chrono::NaiveDate;
use ordersvc_api::application::order_service::OrderService;
use ordersvc_api::inbound::http::{HttpServer, HttpServerConfig};
use ordersvc_client::{NewItem, NewOrder, OrdersClient};
use ordersvc_repo::build_repo;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start the server on an ephemeral port.
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // Use a temp file-backed SQLite DB so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("orders.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let repo = build_repo(Some(&db_url)).await?;
    let service = OrderService::new(repo);
    let server = HttpServer::new(
        service,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        if let Err(err) = server.run().await {
            eprintln!("server exited: {err}");
        }
    });
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let client = OrdersClient::new(&addr)?;

    let order = client
        .create_order(&NewOrder {
            name: "Walk-through".into(),
            street: "35th Street".into(),
            city: "Manhattan".into(),
            state: "NY".into(),
            postal_code: "78912".into(),
            shipping_price: 12.0,
            date_created: NaiveDate::from_ymd_opt(2023, 3, 14).unwrap(),
            status: None,
            items: Vec::new(),
        })
        .await?;
    let order_id = order.id.expect("id assigned");
    println!("created order {order_id} with status {}", order.status);

    let item = client
        .add_item(
            order_id,
            &NewItem {
                item_price: 19.99,
                sku: 4242,
            },
        )
        .await?;
    println!("added item {:?} (sku {})", item.id, item.sku);

    let items = client.list_items(order_id).await?;
    println!("order now has {} item(s)", items.len());

    let cancelled = client.cancel_order(order_id).await?;
    println!("order is now {}", cancelled.status);

    client.delete_order(order_id).await?;
    println!("order deleted; items went with it");

    handle.abort();
    Ok(())
}

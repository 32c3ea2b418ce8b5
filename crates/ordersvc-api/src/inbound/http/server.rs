use axum::{
    routing::{delete, get, post, put},
    serve, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::inbound::http::handlers;
use ordersvc_types::ports::order_repository::OrderRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

pub struct HttpServer<R>
where
    R: OrderRepository,
{
    pub service: Arc<OrderService<R>>,
    pub config: HttpServerConfig,
}

impl<R> HttpServer<R>
where
    R: OrderRepository,
{
    pub async fn new(service: OrderService<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub fn router(&self) -> Router {
        let svc = self.service.clone();
        Router::new()
            .route("/", get(handlers::index))
            .route("/orders", post(handlers::create_order::<R>))
            .route("/orders", get(handlers::list_orders::<R>))
            .route("/orders/{id}", get(handlers::get_order::<R>))
            .route("/orders/{id}", put(handlers::update_order::<R>))
            .route("/orders/{id}", delete(handlers::delete_order::<R>))
            .route("/orders/{id}/cancel", put(handlers::cancel_order::<R>))
            .route("/orders/{id}/items", post(handlers::create_item::<R>))
            .route("/orders/{id}/items", get(handlers::list_items::<R>))
            .route(
                "/orders/{id}/items/{item_id}",
                get(handlers::get_item::<R>),
            )
            .route(
                "/orders/{id}/items/{item_id}",
                put(handlers::update_item::<R>),
            )
            .route(
                "/orders/{id}/items/{item_id}",
                delete(handlers::delete_item::<R>),
            )
            .with_state(svc)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let app = self.router().layer(trace_layer);

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

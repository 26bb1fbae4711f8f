use axum::{middleware, routing::get, Router};

use crate::api::handlers;
use crate::system;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D400 Order Summary Dashboard
        .route(
            "/api/d400/order_summary",
            get(handlers::d400_order_summary::get_order_summary)
                .post(handlers::d400_order_summary::post_order_summary),
        )
        // D401 Order History
        .route(
            "/api/d401/orders",
            get(handlers::d401_order_history::list_orders),
        )
        .route(
            "/api/d401/orders/by-user/:user_id",
            get(handlers::d401_order_history::list_user_orders),
        )
        .route(
            "/api/d401/orders/:id/products",
            get(handlers::d401_order_history::get_ordered_products),
        )
        .layer(middleware::from_fn(system::middleware::request_logger))
}

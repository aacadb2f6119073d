//! # Routes
//!
//! Axum router configuration for the checkout adapter.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Platform stand-in:
///   - POST /api/v1/orders - Create an order
///
/// - Checkout:
///   - POST /api/v1/orders/{order_id}/session - Create hosted-checkout session
///   - GET  /checkout/return - Browser return from the widget
///   - GET  /checkout/cancel - Cancel page
///
/// - Payment operations:
///   - POST /api/v1/payments/{order_id}/capture
///   - POST /api/v1/payments/{order_id}/refund
///   - POST /api/v1/payments/{order_id}/void
///
/// - Webhooks:
///   - POST /webhook/reepay - Reepay notification handler
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Browser-facing return/cancel pages
    let checkout_routes = Router::new()
        .route("/return", get(handlers::checkout_return))
        .route("/cancel", get(handlers::checkout_cancel));

    let api_routes = Router::new()
        .route("/orders", post(handlers::create_order))
        .route("/orders/{order_id}/session", post(handlers::create_session))
        .route("/payments/{order_id}/capture", post(handlers::capture_payment))
        .route("/payments/{order_id}/refund", post(handlers::refund_payment))
        .route("/payments/{order_id}/void", post(handlers::void_payment));

    // Webhook routes (no CORS, must accept raw body)
    let webhook_routes = Router::new().route("/reepay", post(handlers::reepay_webhook));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/checkout", checkout_routes)
        .nest("/api/v1", api_routes)
        .nest("/webhook", webhook_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

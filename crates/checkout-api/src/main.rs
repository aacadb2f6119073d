//! # Reepay Checkout Adapter
//!
//! Thin adapter between the commerce platform and Reepay's hosted
//! checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export REEPAY_MODE=test
//! export REEPAY_TEST_PRIVATE_KEY=priv_...
//! export REEPAY_LIVE_PRIVATE_KEY=priv_...
//! export BASE_URL=https://shop.example
//!
//! # Run the server
//! reepay-checkout
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Reepay mode: {}",
        state.gateway.client().config().mode.as_str()
    );

    // Make sure Reepay delivers notifications to this deployment
    let notify_url = state.config.notify_url();
    if state.gateway.register_webhook(&notify_url).await {
        info!("Webhook registered: {}", notify_url);
    } else {
        warn!("Webhook not saved (already registered, or Reepay unreachable)");
    }

    // Create router
    let app = routes::create_router(state);

    info!("Reepay checkout adapter listening on http://{}", addr);

    if !is_prod {
        info!("Session: POST http://{}/api/v1/orders/{{id}}/session", addr);
        info!("Webhook: POST http://{}/webhook/reepay", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! # Application State
//!
//! Shared state for the Axum application: the Reepay gateway plus the
//! platform stores the handlers read from.

use crate::platform::{MemoryStore, TracingDispatcher};
use checkout_core::{BoxedOrderStore, BoxedPaymentStore};
use checkout_reepay::{ReepayClient, ReepayConfig, ReepayGateway};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for return/cancel/notify callbacks
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Where the widget's Accept event redirects the browser
    pub fn return_url(&self) -> String {
        format!("{}/checkout/return", self.base_url)
    }

    /// Where the widget's Cancel event redirects the browser
    pub fn cancel_url(&self) -> String {
        format!("{}/checkout/cancel", self.base_url)
    }

    /// The server-to-server notification endpoint registered with Reepay
    pub fn notify_url(&self) -> String {
        format!("{}/webhook/reepay", self.base_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The Reepay gateway
    pub gateway: Arc<ReepayGateway>,
    /// Order storage (platform stand-in)
    pub orders: BoxedOrderStore,
    /// Payment storage (platform stand-in)
    pub payments: BoxedPaymentStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let reepay = ReepayConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Reepay config: {}", e))?;
        Self::with_config(config, reepay)
    }

    /// Create state with explicit configs (used by tests)
    pub fn with_config(config: AppConfig, reepay: ReepayConfig) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let orders: BoxedOrderStore = store.clone();
        let payments: BoxedPaymentStore = store;

        let client = ReepayClient::new(reepay)
            .map_err(|e| anyhow::anyhow!("Failed to build Reepay client: {}", e))?;

        let gateway = Arc::new(ReepayGateway::new(
            client,
            orders.clone(),
            payments.clone(),
            Arc::new(TracingDispatcher),
        ));

        Ok(Self {
            gateway,
            orders,
            payments,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("BASE_URL");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_callback_urls() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: "https://shop.example".to_string(),
            environment: "test".to_string(),
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.return_url(), "https://shop.example/checkout/return");
        assert_eq!(config.cancel_url(), "https://shop.example/checkout/cancel");
        assert_eq!(config.notify_url(), "https://shop.example/webhook/reepay");
    }
}

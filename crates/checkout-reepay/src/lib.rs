//! # checkout-reepay
//!
//! Reepay hosted-checkout integration for the commerce platform.
//!
//! This crate provides:
//!
//! 1. **ReepayClient** - the REST client for the Reepay checkout and
//!    core APIs (create session, fetch invoice, settle, refund, void,
//!    webhook registration)
//! 2. **SessionInitiator** - builds a charge session from an order;
//!    the returned session id drives the client-side checkout widget
//! 3. **ReepayGateway** - the two reconciliation entry points (browser
//!    return and webhook notification) plus capture/refund/void
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_reepay::{ReepayClient, ReepayConfig, ReepayGateway};
//!
//! let config = ReepayConfig::from_env()?;
//! let client = ReepayClient::new(config)?;
//! let gateway = ReepayGateway::new(client, orders, payments, events);
//!
//! // Session initiation
//! let session = gateway.create_session("1001", return_url, cancel_url).await?;
//! // hand session.session_id to the checkout widget
//!
//! // Browser came back
//! gateway.on_return(&invoice_param).await?;
//!
//! // Webhook notification
//! gateway.on_notify(&body).await?;
//! ```
//!
//! The local payment state only ever advances after a fresh invoice
//! fetch from the Reepay API confirms it; nothing from the browser or
//! the webhook body is trusted on its own.

pub mod client;
pub mod config;
pub mod gateway;
pub mod session;

// Re-exports
pub use client::{ChargeCustomer, ChargeOrder, ChargeSessionRequest, ReepayClient};
pub use config::{CheckoutType, GatewayMode, ReepayConfig};
pub use gateway::ReepayGateway;
pub use session::{CheckoutSession, SessionInitiator};

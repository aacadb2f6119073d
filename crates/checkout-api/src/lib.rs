//! # checkout-api
//!
//! HTTP layer for the Reepay checkout adapter.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Session-initiation endpoint for the client-side checkout widget
//! - The two reconciliation entry points (browser return, webhook)
//! - Capture/refund/void operation endpoints
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/orders` | Create order (platform stand-in) |
//! | POST | `/api/v1/orders/:id/session` | Create checkout session |
//! | GET | `/checkout/return` | Browser return |
//! | GET | `/checkout/cancel` | Cancel page |
//! | POST | `/api/v1/payments/:id/capture` | Capture |
//! | POST | `/api/v1/payments/:id/refund` | Refund |
//! | POST | `/api/v1/payments/:id/void` | Void |
//! | POST | `/webhook/reepay` | Reepay notification |

pub mod handlers;
pub mod platform;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};

//! # checkout-core
//!
//! Core types and traits for the Reepay hosted-checkout adapter.
//!
//! This crate provides:
//! - `Price` and `Currency` for order/payment amounts
//! - `Order` and `Payment` records owned by the hosting commerce platform
//! - `Invoice` — the processor-side state record, fetched and never stored
//! - `OrderStore`, `PaymentStore`, `EventDispatcher` seams to the platform
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{Order, Payment, Price, Currency};
//!
//! let order = Order::new("1042", Price::new(199.0, Currency::DKK), "jo@example.com", billing);
//! let payment = Payment::new("1", &order.id);
//!
//! // The gateway crate drives the payment through its states
//! // after re-fetching the authoritative invoice from the processor.
//! ```

pub mod error;
pub mod handle;
pub mod invoice;
pub mod money;
pub mod order;
pub mod payment;
pub mod store;

// Re-exports for convenience
pub use error::{CheckoutError, CheckoutResult};
pub use handle::{base_order_id, suffixed_handle};
pub use invoice::{Invoice, InvoiceState};
pub use money::{Currency, Price};
pub use order::{Address, CheckoutStep, Order, OrderState};
pub use payment::{Payment, PaymentState};
pub use store::{
    BoxedEventDispatcher, BoxedOrderStore, BoxedPaymentStore, EventDispatcher, OrderStore,
    PaymentStore,
};

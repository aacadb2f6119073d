//! # Platform Seams
//!
//! Traits the hosting commerce platform implements for the gateway:
//! order/payment storage plus the checkout-completion event sink. The
//! original integration resolved these through a DI container; here
//! they are explicit constructor-injected trait objects.

use crate::error::CheckoutResult;
use crate::order::Order;
use crate::payment::Payment;
use async_trait::async_trait;
use std::sync::Arc;

/// Order storage owned by the commerce platform
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Load an order by id, `None` when unknown
    async fn load(&self, order_id: &str) -> CheckoutResult<Option<Order>>;

    /// Persist an order
    async fn save(&self, order: &Order) -> CheckoutResult<()>;
}

/// Payment storage owned by the commerce platform
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Find the payment attached to an order, `None` when there is none
    async fn find_by_order(&self, order_id: &str) -> CheckoutResult<Option<Payment>>;

    /// Persist a payment
    async fn save(&self, payment: &Payment) -> CheckoutResult<()>;
}

/// Checkout lifecycle events dispatched to the platform
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// An offsite payment completed an order's checkout
    async fn checkout_completed(&self, order: &Order) -> CheckoutResult<()>;
}

/// Type aliases for shared trait objects
pub type BoxedOrderStore = Arc<dyn OrderStore>;
pub type BoxedPaymentStore = Arc<dyn PaymentStore>;
pub type BoxedEventDispatcher = Arc<dyn EventDispatcher>;

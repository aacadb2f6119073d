//! # Platform Stand-in
//!
//! In-memory implementations of the commerce-platform seams. The real
//! deployment hands the gateway the platform's own order/payment
//! storage and event bus; this stand-in backs the demo binary and the
//! integration tests.

use async_trait::async_trait;
use checkout_core::{CheckoutResult, EventDispatcher, Order, OrderStore, Payment, PaymentStore};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

/// In-memory order and payment storage
#[derive(Default)]
pub struct MemoryStore {
    orders: Mutex<HashMap<String, Order>>,
    payments: Mutex<HashMap<String, Payment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn load(&self, order_id: &str) -> CheckoutResult<Option<Order>> {
        Ok(self.orders.lock().unwrap().get(order_id).cloned())
    }

    async fn save(&self, order: &Order) -> CheckoutResult<()> {
        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn find_by_order(&self, order_id: &str) -> CheckoutResult<Option<Payment>> {
        Ok(self.payments.lock().unwrap().get(order_id).cloned())
    }

    async fn save(&self, payment: &Payment) -> CheckoutResult<()> {
        self.payments
            .lock()
            .unwrap()
            .insert(payment.order_id.clone(), payment.clone());
        Ok(())
    }
}

/// Event sink that logs checkout completions
pub struct TracingDispatcher;

#[async_trait]
impl EventDispatcher for TracingDispatcher {
    async fn checkout_completed(&self, order: &Order) -> CheckoutResult<()> {
        info!(
            "Checkout completed for order {}: total={}",
            order.id,
            order.total.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Address, Currency, Price};

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        let order = Order::new(
            "1001",
            Price::new(100.0, Currency::DKK),
            "jo@example.com",
            Address::default(),
        );
        OrderStore::save(&store, &order).await.unwrap();

        let loaded = store.load("1001").await.unwrap().unwrap();
        assert_eq!(loaded.id, "1001");
        assert!(store.load("missing").await.unwrap().is_none());

        let payment = Payment::new("1001", "1001");
        PaymentStore::save(&store, &payment).await.unwrap();
        assert!(store.find_by_order("1001").await.unwrap().is_some());
    }
}

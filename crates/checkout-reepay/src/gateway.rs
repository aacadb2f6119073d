//! # Reepay Gateway
//!
//! The offsite payment gateway: session initiation, the two
//! reconciliation entry points (browser return and asynchronous
//! webhook), and the capture/refund/void operations.
//!
//! Reconciliation never trusts client input. The return URL and the
//! webhook body only carry the invoice handle to look up; the payment
//! state is advanced solely on what a fresh invoice fetch from the
//! Reepay API reports.

use crate::client::ReepayClient;
use crate::session::{CheckoutSession, SessionInitiator};
use checkout_core::{
    base_order_id, BoxedEventDispatcher, BoxedOrderStore, BoxedPaymentStore, CheckoutError,
    CheckoutResult, CheckoutStep, InvoiceState, Order, Payment, PaymentState, Price,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Webhook notification body. Reepay sends more fields (`id`,
/// `event_type`, `customer`, ...); only the invoice handle matters here
/// because the state is re-fetched anyway.
#[derive(Debug, Deserialize)]
struct NotificationBody {
    invoice: String,
}

/// The Reepay offsite payment gateway
pub struct ReepayGateway {
    client: ReepayClient,
    orders: BoxedOrderStore,
    payments: BoxedPaymentStore,
    events: BoxedEventDispatcher,
}

impl ReepayGateway {
    pub fn new(
        client: ReepayClient,
        orders: BoxedOrderStore,
        payments: BoxedPaymentStore,
        events: BoxedEventDispatcher,
    ) -> Self {
        Self {
            client,
            orders,
            payments,
            events,
        }
    }

    pub fn client(&self) -> &ReepayClient {
        &self.client
    }

    /// Initiate a hosted-checkout session for an order. Creates the
    /// pending payment record if the platform has none yet and persists
    /// the (possibly rewritten) invoice handle on it before returning.
    #[instrument(skip(self))]
    pub async fn create_session(
        &self,
        order_id: &str,
        return_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession> {
        let order = self.load_order(order_id).await?;

        let session = SessionInitiator::new(&self.client)
            .create_session(&order, return_url, cancel_url)
            .await?;

        let mut payment = match self.payments.find_by_order(order_id).await? {
            Some(payment) => payment,
            None => Payment::new(order_id, order_id),
        };
        payment.remote_id = Some(session.handle.clone());
        payment.test = self.client.config().is_test_mode();
        self.payments.save(&payment).await?;
        self.orders.save(&order).await?;

        Ok(session)
    }

    /// Synchronous return entry point: the browser came back from the
    /// widget carrying the invoice handle as a query parameter.
    #[instrument(skip(self))]
    pub async fn on_return(&self, invoice_param: &str) -> CheckoutResult<()> {
        let order_id = base_order_id(invoice_param);

        let Some(order) = self.orders.load(order_id).await? else {
            warn!("Return for unknown order {}", order_id);
            return Ok(());
        };

        self.reconcile(&order, invoice_param).await
    }

    /// Asynchronous notification entry point. Waits before acting: the
    /// browser-return path normally places the order first and this
    /// callback must not race it. If the order already progressed past
    /// draft (a duplicate delivery, or the return path won), the order
    /// transition is skipped but payment reconciliation still runs.
    #[instrument(skip(self, body))]
    pub async fn on_notify(&self, body: &[u8]) -> CheckoutResult<()> {
        let notification: NotificationBody = serde_json::from_slice(body)
            .map_err(|e| CheckoutError::InvalidRequest(format!("notification body: {}", e)))?;

        let delay = self.client.config().notify_delay_secs;
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_secs(delay)).await;
        }

        let order_id = base_order_id(&notification.invoice);

        let Some(mut order) = self.orders.load(order_id).await? else {
            warn!("Notification for unknown order {}", order_id);
            return Ok(());
        };

        if order.awaiting_payment() {
            order.checkout_step = CheckoutStep::Complete;
            self.events.checkout_completed(&order).await?;
            order.place();
            order.unlock();
            self.orders.save(&order).await?;
            info!("Order {} placed via notification", order.id);
        } else {
            info!("Order {} already past draft, skipping order transition", order.id);
        }

        self.reconcile(&order, &notification.invoice).await
    }

    /// Shared reconciliation tail. Fetches the authoritative invoice by
    /// its raw (possibly suffixed) handle and applies the local state
    /// transition it warrants. An absent invoice or one outside
    /// `authorized`/`settled` defers: no mutation, no error.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn reconcile(&self, order: &Order, raw_handle: &str) -> CheckoutResult<()> {
        let Some(mut payment) = self.payments.find_by_order(&order.id).await? else {
            warn!("No payment for order {}, nothing to reconcile", order.id);
            return Ok(());
        };

        let Some(invoice) = self.client.get_invoice(raw_handle).await else {
            info!("Invoice {} not available, deferring reconciliation", raw_handle);
            return Ok(());
        };

        let state = match invoice.state {
            InvoiceState::Authorized => PaymentState::Authorization,
            InvoiceState::Settled => PaymentState::Completed,
            other => {
                info!(
                    "Invoice {} in state {:?}, deferring reconciliation",
                    raw_handle, other
                );
                return Ok(());
            }
        };

        payment.state = state;
        payment.amount = Some(order.total);
        payment.remote_id = Some(raw_handle.to_string());
        payment.remote_state = Some(state.as_str().to_string());
        payment.test = self.client.config().is_test_mode();
        payment.authorized_at = Some(Utc::now());
        self.payments.save(&payment).await?;

        info!(
            "Reconciled payment for order {}: state={}, amount={}",
            order.id,
            state,
            order.total.display()
        );
        Ok(())
    }

    /// Capture (settle) an authorized payment. A processor error is
    /// fatal to the attempt and nothing is persisted.
    #[instrument(skip(self))]
    pub async fn capture(&self, order_id: &str, amount: Price) -> CheckoutResult<()> {
        let mut payment = self.load_payment(order_id).await?;
        let remote_id = Self::remote_id(&payment)?;

        self.client
            .settle(&remote_id, amount.minor_units())
            .await
            .map_err(|e| {
                CheckoutError::InvalidRequest(format!("Could not capture the payment: {}", e))
            })?;

        payment.state = PaymentState::Completed;
        payment.amount = Some(amount);
        self.payments.save(&payment).await?;

        info!("Captured {} for order {}", amount.display(), order_id);
        Ok(())
    }

    /// Refund a captured payment, partially or in full. Only allowed
    /// from the completed/partially-refunded states; the amount may not
    /// exceed what is still outstanding. The new state is computed
    /// before the remote call but persisted only after it succeeds.
    #[instrument(skip(self))]
    pub async fn refund(&self, order_id: &str, amount: Option<Price>) -> CheckoutResult<()> {
        let mut payment = self.load_payment(order_id).await?;

        if !payment.refundable() {
            return Err(CheckoutError::Precondition {
                expected: "completed or partially_refunded".to_string(),
                actual: payment.state.to_string(),
            });
        }

        let total = payment.amount.ok_or_else(|| {
            CheckoutError::Internal(format!("payment for order {} has no amount", order_id))
        })?;
        let outstanding = payment.outstanding().unwrap_or(Price::zero(total.currency));
        let amount = amount.unwrap_or(outstanding);

        // Compare in integer hundredths: the outstanding amount is a
        // float subtraction and the exact displayed remainder must not
        // be rejected over a ULP.
        if amount.hundredths() > outstanding.hundredths() {
            return Err(CheckoutError::InvalidRequest(format!(
                "Refund amount {} exceeds outstanding {}",
                amount.display(),
                outstanding.display()
            )));
        }

        let refunded = payment
            .refunded
            .unwrap_or(Price::zero(total.currency))
            .add(&amount);

        let new_state = if refunded.hundredths() < total.hundredths() {
            PaymentState::PartiallyRefunded
        } else {
            PaymentState::Refunded
        };

        let remote_id = Self::remote_id(&payment)?;
        self.client
            .refund(&remote_id, amount.minor_units())
            .await
            .map_err(|e| {
                CheckoutError::InvalidRequest(format!("Could not refund the payment: {}", e))
            })?;

        payment.state = new_state;
        payment.refunded = Some(refunded);
        self.payments.save(&payment).await?;

        info!(
            "Refunded {} for order {}: state={}",
            amount.display(),
            order_id,
            new_state
        );
        Ok(())
    }

    /// Void an authorization before capture
    #[instrument(skip(self))]
    pub async fn void(&self, order_id: &str) -> CheckoutResult<()> {
        let mut payment = self.load_payment(order_id).await?;

        if payment.state != PaymentState::Authorization {
            return Err(CheckoutError::Precondition {
                expected: "authorization".to_string(),
                actual: payment.state.to_string(),
            });
        }

        let remote_id = Self::remote_id(&payment)?;
        self.client.void(&remote_id).await.map_err(|e| {
            CheckoutError::InvalidRequest(format!("Could not void the payment: {}", e))
        })?;

        payment.state = PaymentState::AuthorizationVoided;
        self.payments.save(&payment).await?;

        info!("Voided authorization for order {}", order_id);
        Ok(())
    }

    /// Register the notification URL in the Reepay account settings.
    /// Performed when the gateway configuration is saved; idempotent.
    pub async fn register_webhook(&self, notify_url: &str) -> bool {
        let saved = self.client.update_webhook(notify_url).await;
        if saved {
            info!("Webhook URL saved in Reepay account: {}", notify_url);
        }
        saved
    }

    async fn load_order(&self, order_id: &str) -> CheckoutResult<Order> {
        self.orders
            .load(order_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })
    }

    async fn load_payment(&self, order_id: &str) -> CheckoutResult<Payment> {
        self.payments
            .find_by_order(order_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound {
                entity: "payment",
                id: order_id.to_string(),
            })
    }

    fn remote_id(payment: &Payment) -> CheckoutResult<String> {
        payment.remote_id.clone().ok_or_else(|| {
            CheckoutError::InvalidRequest(format!(
                "payment {} has no remote invoice handle",
                payment.id
            ))
        })
    }
}

//! # Session Initiator
//!
//! Builds a hosted-checkout session from an order and submits it to the
//! Reepay checkout API. The returned session id is consumed once by the
//! client-side widget.

use crate::client::{ChargeCustomer, ChargeOrder, ChargeSessionRequest, ReepayClient};
use crate::config::CheckoutType;
use checkout_core::{suffixed_handle, CheckoutResult, InvoiceState, Order};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};

/// Configuration surface handed to the browser widget.
///
/// The widget emits three events: Accept redirects to `return_url` with
/// `id`/`invoice`/`customer` query parameters, Cancel redirects to
/// `cancel_url`, Error is surfaced to the shopper.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    pub session_id: String,
    /// Invoice handle the session was created under (possibly suffixed)
    pub handle: String,
    pub checkout_type: CheckoutType,
    pub return_url: String,
    pub cancel_url: String,
}

/// Builds and submits charge sessions
pub struct SessionInitiator<'a> {
    client: &'a ReepayClient,
}

impl<'a> SessionInitiator<'a> {
    pub fn new(client: &'a ReepayClient) -> Self {
        Self { client }
    }

    /// Derive the invoice handle for an order. Normally the order id
    /// itself; when a prior attempt already moved an invoice under that
    /// handle past `created`, the processor has committed it to another
    /// amount/state, so a fresh timestamp-suffixed handle is used.
    async fn derive_handle(&self, order_id: &str) -> String {
        match self.client.get_invoice(order_id).await {
            Some(invoice) if invoice.state != InvoiceState::Created => {
                let handle = suffixed_handle(order_id, Utc::now().timestamp());
                info!(
                    "Invoice {} already in state {:?}, using fresh handle {}",
                    order_id, invoice.state, handle
                );
                handle
            }
            _ => order_id.to_string(),
        }
    }

    /// Create a charge session for an order. A processor rejection comes
    /// back as `CheckoutError::Gateway`; callers show the shopper a
    /// generic failure and keep the detail in the logs.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn create_session(
        &self,
        order: &Order,
        return_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession> {
        let config = self.client.config();
        let handle = self.derive_handle(&order.id).await;

        let request = ChargeSessionRequest {
            order: ChargeOrder {
                handle: handle.clone(),
                amount: order.total.minor_units(),
                locale: config.locale.clone(),
                currency: order.total.currency.as_str().to_string(),
                customer: ChargeCustomer {
                    first_name: order.billing.given_name.clone(),
                    last_name: order.billing.family_name.clone(),
                    postal_code: order.billing.postal_code.clone(),
                    email: order.email.clone(),
                    address: order.billing.address_line.clone(),
                    city: order.billing.city.clone(),
                    country: order.billing.country.clone(),
                },
            },
            cancel_url: cancel_url.to_string(),
            accept_url: return_url.to_string(),
            settle: config.instant_settle,
            payment_methods: config.payment_methods.clone(),
        };

        let session_id = self.client.create_charge_session(&request).await?;

        Ok(CheckoutSession {
            session_id,
            handle,
            checkout_type: config.checkout_type,
            return_url: return_url.to_string(),
            cancel_url: cancel_url.to_string(),
        })
    }
}

//! # Order Types
//!
//! The order record as the hosting commerce platform exposes it to the
//! gateway. Read-mostly from this crate's perspective: the only writes
//! are the checkout-step/state advance performed by the notification
//! handler when an order completes offsite.

use crate::money::Price;
use serde::{Deserialize, Serialize};

/// Billing address fields forwarded to the processor session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub given_name: String,
    pub family_name: String,
    pub postal_code: String,
    pub address_line: String,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
}

/// Where the shopper is in the checkout flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Payment,
    Complete,
}

/// Order workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Still in checkout, not yet placed
    Draft,
    /// Placed via the `place` transition
    Placed,
}

/// An order owned by the commerce platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Platform order ID; also the base of the processor invoice handle
    pub id: String,

    /// Order total
    pub total: Price,

    /// Customer email
    pub email: String,

    /// Billing profile
    pub billing: Address,

    /// Current checkout step
    pub checkout_step: CheckoutStep,

    /// Workflow state
    pub state: OrderState,

    /// Locked while an offsite payment is in flight
    pub locked: bool,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        total: Price,
        email: impl Into<String>,
        billing: Address,
    ) -> Self {
        Self {
            id: id.into(),
            total,
            email: email.into(),
            billing,
            checkout_step: CheckoutStep::Payment,
            state: OrderState::Draft,
            locked: true,
        }
    }

    /// True while the order sits at the payment step of a draft
    /// checkout, i.e. the notification handler may still complete it.
    pub fn awaiting_payment(&self) -> bool {
        self.checkout_step == CheckoutStep::Payment && self.state == OrderState::Draft
    }

    /// Apply the `place` transition
    pub fn place(&mut self) {
        self.state = OrderState::Placed;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}

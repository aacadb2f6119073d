//! # Payment Types
//!
//! The local payment record mirroring a processor invoice. Mutated only
//! by reconciliation and by the capture/refund/void operations; the
//! authoritative state always comes from a fresh invoice fetch.

use crate::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Local payment workflow states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    /// Created, nothing confirmed by the processor yet
    Pending,
    /// Invoice authorized, capture still outstanding
    Authorization,
    /// Authorization voided before capture
    AuthorizationVoided,
    /// Captured in full
    Completed,
    /// Partially refunded
    PartiallyRefunded,
    /// Fully refunded
    Refunded,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Pending => "pending",
            PaymentState::Authorization => "authorization",
            PaymentState::AuthorizationVoided => "authorization_voided",
            PaymentState::Completed => "completed",
            PaymentState::PartiallyRefunded => "partially_refunded",
            PaymentState::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment record owned by the commerce platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Platform payment ID
    pub id: String,

    /// Order this payment belongs to
    pub order_id: String,

    /// Local workflow state
    pub state: PaymentState,

    /// Confirmed amount (set at reconciliation/capture)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Price>,

    /// Cumulative refunded amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded: Option<Price>,

    /// Processor invoice handle (possibly `-<timestamp>` suffixed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,

    /// Processor-side state as last seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_state: Option<String>,

    /// Created against the test environment
    pub test: bool,

    /// When the authorization was confirmed locally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorized_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn new(id: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            order_id: order_id.into(),
            state: PaymentState::Pending,
            amount: None,
            refunded: None,
            remote_id: None,
            remote_state: None,
            test: false,
            authorized_at: None,
        }
    }

    /// Refunds are only allowed from captured states
    pub fn refundable(&self) -> bool {
        matches!(
            self.state,
            PaymentState::Completed | PaymentState::PartiallyRefunded
        )
    }

    /// Amount still available to refund
    pub fn outstanding(&self) -> Option<Price> {
        let amount = self.amount?;
        let refunded = self
            .refunded
            .unwrap_or_else(|| Price::zero(amount.currency));
        Some(Price::new(amount.number - refunded.number, amount.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_refundable_states() {
        let mut payment = Payment::new("1", "1001");
        assert!(!payment.refundable());

        payment.state = PaymentState::Completed;
        assert!(payment.refundable());

        payment.state = PaymentState::PartiallyRefunded;
        assert!(payment.refundable());

        payment.state = PaymentState::Authorization;
        assert!(!payment.refundable());
    }

    #[test]
    fn test_outstanding() {
        let mut payment = Payment::new("1", "1001");
        assert!(payment.outstanding().is_none());

        payment.amount = Some(Price::new(100.0, Currency::DKK));
        assert_eq!(payment.outstanding().unwrap().number, 100.0);

        payment.refunded = Some(Price::new(40.0, Currency::DKK));
        assert_eq!(payment.outstanding().unwrap().number, 60.0);
    }

    #[test]
    fn test_state_strings() {
        assert_eq!(PaymentState::AuthorizationVoided.as_str(), "authorization_voided");
        assert_eq!(PaymentState::PartiallyRefunded.to_string(), "partially_refunded");
    }
}

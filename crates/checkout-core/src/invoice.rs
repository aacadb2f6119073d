//! # Invoice Types
//!
//! The processor-side invoice record. Always fetched fresh from the
//! Reepay API and never persisted locally; it is the source of truth
//! that reconciliation trusts over anything the browser sends back.

use serde::{Deserialize, Serialize};

/// Invoice states we act on. Anything the processor reports beyond
/// `authorized`/`settled` is carried as `Other` and treated as
/// non-terminal: reconciliation defers rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceState {
    Created,
    Authorized,
    Settled,
    Other(String),
}

impl From<String> for InvoiceState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "created" => InvoiceState::Created,
            "authorized" => InvoiceState::Authorized,
            "settled" => InvoiceState::Settled,
            _ => InvoiceState::Other(s),
        }
    }
}

impl From<InvoiceState> for String {
    fn from(state: InvoiceState) -> Self {
        match state {
            InvoiceState::Created => "created".to_string(),
            InvoiceState::Authorized => "authorized".to_string(),
            InvoiceState::Settled => "settled".to_string(),
            InvoiceState::Other(s) => s,
        }
    }
}

/// A processor invoice, as returned by `GET /v1/invoice/{handle}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice handle (our order id, possibly suffixed)
    pub handle: String,

    /// Processor-side state
    pub state: InvoiceState,

    /// Amount in minor units
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parsing() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"handle": "1001", "state": "authorized", "amount": 19900}"#,
        )
        .unwrap();

        assert_eq!(invoice.state, InvoiceState::Authorized);
        assert_eq!(invoice.amount, 19900);
    }

    #[test]
    fn test_unknown_state_is_other() {
        let invoice: Invoice =
            serde_json::from_str(r#"{"handle": "1001", "state": "dunning", "amount": 500}"#)
                .unwrap();

        assert_eq!(invoice.state, InvoiceState::Other("dunning".to_string()));
    }
}

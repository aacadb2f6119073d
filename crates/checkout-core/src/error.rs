//! # Checkout Error Types
//!
//! Typed error handling for the checkout adapter.
//! All fallible operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data (also carries processor messages from failed
    /// capture/refund/void calls)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The processor rejected a request (invalid payload, auth failure).
    /// Shown to the shopper as a generic checkout failure; the detail
    /// stays in the logs.
    #[error("Gateway error: {message}")]
    Gateway { message: String },

    /// Network/HTTP error on a mutating processor call. Read calls
    /// swallow transport failures into `None` instead of raising this.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Operation attempted from a disallowed payment state
    #[error("Precondition failed: payment state is {actual}, expected {expected}")]
    Precondition { expected: String, actual: String },

    /// Order or payment record not found
    #[error("Not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::Gateway { .. } => 502,
            CheckoutError::Transport(_) => 503,
            CheckoutError::Precondition { .. } => 409,
            CheckoutError::NotFound { .. } => 404,
            CheckoutError::Serialization(_) => 500,
            CheckoutError::Internal(_) => 500,
        }
    }

    /// Message safe to show a shopper. Gateway detail is reduced to a
    /// generic failure so processor error bodies never reach the browser.
    pub fn shopper_message(&self) -> &str {
        match self {
            CheckoutError::Gateway { .. } => "Error occurred during payment with Reepay checkout",
            CheckoutError::InvalidRequest(msg) => msg,
            CheckoutError::Precondition { .. } => "The payment is not in a state that allows this operation",
            _ => "Payment service is temporarily unavailable",
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(
            CheckoutError::Gateway {
                message: "bad payload".into()
            }
            .status_code(),
            502
        );
        assert_eq!(
            CheckoutError::Precondition {
                expected: "completed".into(),
                actual: "pending".into()
            }
            .status_code(),
            409
        );
    }

    #[test]
    fn test_gateway_detail_not_leaked() {
        let err = CheckoutError::Gateway {
            message: "secret key sk_x rejected".into(),
        };
        assert!(!err.shopper_message().contains("sk_x"));
    }
}

//! # Request Handlers
//!
//! Axum request handlers for the checkout adapter: session initiation,
//! the browser-return and webhook reconciliation entry points, and the
//! capture/refund/void operations.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use checkout_core::{Address, CheckoutError, Currency, Order, Price};
use checkout_reepay::CheckoutType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create order request (platform stand-in)
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub id: String,
    pub total: f64,
    #[serde(default)]
    pub currency: Currency,
    pub email: String,
    #[serde(default)]
    pub billing: Address,
}

/// Session creation response: the widget configuration surface
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub checkout_type: CheckoutType,
    pub return_url: String,
    pub cancel_url: String,
}

/// Capture request; amount in the order's currency
#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    pub amount: f64,
}

/// Refund request; omitting the amount refunds what is outstanding
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "reepay-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create an order (platform stand-in endpoint)
#[instrument(skip(state, request), fields(order_id = %request.id))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), (StatusCode, Json<ErrorResponse>)> {
    let order = Order::new(
        request.id,
        Price::new(request.total, request.currency),
        request.email,
        request.billing,
    );

    state
        .orders
        .save(&order)
        .await
        .map_err(checkout_error_to_response)?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Create a hosted-checkout session for an order. The browser widget
/// consumes the returned session id; a processor rejection surfaces as
/// a generic checkout failure, never the processor's own message.
#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<CreateSessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let return_url = state.config.return_url();
    let cancel_url = state.config.cancel_url();

    let session = state
        .gateway
        .create_session(&order_id, &return_url, &cancel_url)
        .await
        .map_err(|e| {
            error!("Failed to create session for order {}: {}", order_id, e);
            let code = e.status_code();
            (
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                Json(ErrorResponse::new(e.shopper_message(), code)),
            )
        })?;

    info!("Created session {} for order {}", session.session_id, order_id);

    Ok(Json(CreateSessionResponse {
        session_id: session.session_id,
        checkout_type: session.checkout_type,
        return_url: session.return_url,
        cancel_url: session.cancel_url,
    }))
}

/// Synchronous browser return from the checkout widget. The `invoice`
/// query parameter is untrusted; reconciliation re-fetches the invoice
/// before touching the payment.
#[instrument(skip(state, params))]
pub async fn checkout_return(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let invoice = params.get("invoice").cloned().unwrap_or_default();

    if invoice.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing invoice parameter", 400)),
        ));
    }

    state
        .gateway
        .on_return(&invoice)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(Html(format!(
        r#"
<!DOCTYPE html>
<html>
<head><title>Payment Received</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; text-align: center;">
        <h1>Thank you!</h1>
        <p>Invoice: <code>{}</code></p>
        <p style="color: #666;">Your payment is being processed.</p>
    </div>
</body>
</html>
"#,
        escape_html(&invoice)
    )))
}

/// Cancel page the widget redirects to on its Cancel event
pub async fn checkout_cancel() -> impl IntoResponse {
    Html(
        r#"
<!DOCTYPE html>
<html>
<head><title>Payment Cancelled</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; text-align: center;">
        <h1>Payment Cancelled</h1>
        <p style="color: #666;">No charges were made.</p>
    </div>
</body>
</html>
"#,
    )
}

/// Asynchronous server-to-server notification from Reepay. The body is
/// untrusted JSON; only the invoice handle is read from it and the
/// state comes from a fresh invoice fetch.
#[instrument(skip(state, body))]
pub async fn reepay_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .gateway
        .on_notify(&body)
        .await
        .map_err(|e| {
            error!("Webhook processing failed: {}", e);
            checkout_error_to_response(e)
        })?;

    Ok(StatusCode::OK)
}

/// Capture an authorized payment
#[instrument(skip(state, request))]
pub async fn capture_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(request): Json<CaptureRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let currency = order_currency(&state, &order_id).await?;

    state
        .gateway
        .capture(&order_id, Price::new(request.amount, currency))
        .await
        .map_err(checkout_error_to_response)?;

    Ok(StatusCode::OK)
}

/// Refund a captured payment (partially or in full)
#[instrument(skip(state, request))]
pub async fn refund_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(request): Json<RefundRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let amount = match request.amount {
        Some(number) => {
            let currency = order_currency(&state, &order_id).await?;
            Some(Price::new(number, currency))
        }
        None => None,
    };

    state
        .gateway
        .refund(&order_id, amount)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(StatusCode::OK)
}

/// Void an authorization before capture
#[instrument(skip(state))]
pub async fn void_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .gateway
        .void(&order_id)
        .await
        .map_err(checkout_error_to_response)?;

    Ok(StatusCode::OK)
}

/// The invoice query parameter is attacker-controlled; escape it before
/// reflecting it into the return page.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

async fn order_currency(
    state: &AppState,
    order_id: &str,
) -> Result<Currency, (StatusCode, Json<ErrorResponse>)> {
    let order = state
        .orders
        .load(order_id)
        .await
        .map_err(checkout_error_to_response)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!("Order not found: {}", order_id), 404)),
            )
        })?;
    Ok(order.total.currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("1001-1697040000"), "1001-1697040000");
    }

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_checkout_error_conversion() {
        let err = CheckoutError::Precondition {
            expected: "completed".into(),
            actual: "pending".into(),
        };
        let (status, _json) = checkout_error_to_response(err);
        assert_eq!(status, StatusCode::CONFLICT);

        let err = CheckoutError::Gateway {
            message: "bad payload".into(),
        };
        let (status, _json) = checkout_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}

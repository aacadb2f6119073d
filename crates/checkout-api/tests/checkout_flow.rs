//! End-to-end flow tests against the full router, with the Reepay API
//! mocked out.

use axum_test::TestServer;
use checkout_api::{routes, AppConfig, AppState};
use checkout_core::{PaymentState, PaymentStore};
use checkout_reepay::{GatewayMode, ReepayConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: "https://shop.example".to_string(),
        environment: "test".to_string(),
    }
}

async fn test_state(server: &MockServer) -> AppState {
    let reepay = ReepayConfig::new(GatewayMode::Test, "priv_test_key", "unused")
        .with_api_base_url(server.uri())
        .with_checkout_api_base_url(server.uri())
        .with_notify_delay_secs(0);

    AppState::with_config(app_config(), reepay).unwrap()
}

fn order_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "total": 199.0,
        "currency": "DKK",
        "email": "jo@example.com",
        "billing": {
            "given_name": "Jo",
            "family_name": "Hansen",
            "postal_code": "2100",
            "address_line": "Nørrebrogade 1",
            "city": "København",
            "country": "DK"
        }
    })
}

#[tokio::test]
async fn session_creation_returns_widget_config() {
    let reepay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoice/1001"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&reepay)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/session/charge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cs_widget"})))
        .mount(&reepay)
        .await;

    let state = test_state(&reepay).await;
    let server = TestServer::new(routes::create_router(state)).unwrap();

    let response = server.post("/api/v1/orders").json(&order_body("1001")).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let response = server.post("/api/v1/orders/1001/session").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["session_id"], "cs_widget");
    assert_eq!(body["checkout_type"], "window");
    assert_eq!(body["return_url"], "https://shop.example/checkout/return");
    assert_eq!(body["cancel_url"], "https://shop.example/checkout/cancel");
}

#[tokio::test]
async fn session_failure_hides_processor_detail() {
    let reepay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoice/1001"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&reepay)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/session/charge"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Invalid key priv_test_key for live request"
        })))
        .mount(&reepay)
        .await;

    let state = test_state(&reepay).await;
    let server = TestServer::new(routes::create_router(state)).unwrap();

    server.post("/api/v1/orders").json(&order_body("1001")).await;
    let response = server.post("/api/v1/orders/1001/session").await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("priv_test_key"));
}

#[tokio::test]
async fn webhook_settles_payment_through_invoice_refetch() {
    let reepay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoice/1001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "handle": "1001",
            "state": "settled",
            "amount": 19900
        })))
        .mount(&reepay)
        .await;

    let state = test_state(&reepay).await;
    let payments = state.payments.clone();
    let server = TestServer::new(routes::create_router(state)).unwrap();

    server.post("/api/v1/orders").json(&order_body("1001")).await;

    let response = server
        .post("/webhook/reepay")
        .json(&json!({"invoice": "1001", "id": "evt_1"}))
        .await;
    response.assert_status_ok();

    let payment = payments.find_by_order("1001").await.unwrap().unwrap();
    assert_eq!(payment.state, PaymentState::Completed);
    assert_eq!(payment.amount.unwrap().number, 199.0);
    assert!(payment.test);
}

#[tokio::test]
async fn browser_return_reconciles_and_renders_page() {
    let reepay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoice/1001-1697040000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "handle": "1001-1697040000",
            "state": "authorized",
            "amount": 19900
        })))
        .mount(&reepay)
        .await;

    let state = test_state(&reepay).await;
    let payments = state.payments.clone();
    let server = TestServer::new(routes::create_router(state)).unwrap();

    server.post("/api/v1/orders").json(&order_body("1001")).await;

    let response = server
        .get("/checkout/return")
        .add_query_param("invoice", "1001-1697040000")
        .await;
    response.assert_status_ok();

    let payment = payments.find_by_order("1001").await.unwrap().unwrap();
    assert_eq!(payment.state, PaymentState::Authorization);
    assert_eq!(payment.remote_id.as_deref(), Some("1001-1697040000"));
}

#[tokio::test]
async fn return_page_escapes_invoice_parameter() {
    let reepay = MockServer::start().await;
    let state = test_state(&reepay).await;
    let server = TestServer::new(routes::create_router(state)).unwrap();

    let response = server
        .get("/checkout/return")
        .add_query_param("invoice", "1001<script>alert(1)</script>")
        .await;
    response.assert_status_ok();

    let page = response.text();
    assert!(!page.contains("<script>alert(1)</script>"));
    assert!(page.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn refund_from_pending_payment_is_conflict() {
    let reepay = MockServer::start().await;
    let state = test_state(&reepay).await;
    let payments = state.payments.clone();
    let server = TestServer::new(routes::create_router(state)).unwrap();

    server.post("/api/v1/orders").json(&order_body("1001")).await;

    // seed a pending payment the way session creation would
    let payment = checkout_core::Payment::new("1001", "1001");
    payments.save(&payment).await.unwrap();

    let response = server
        .post("/api/v1/payments/1001/refund")
        .json(&json!({}))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
}

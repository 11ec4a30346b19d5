//! Integration tests for the REST gateway
//!
//! A local wiremock server stands in for the trading backend, so these run
//! offline and check the exact requests the client puts on the wire.

mod common;

use common::api_responses;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use trading_gateway_client::{
    ClientError, Endpoint, Gateway, GatewayRestClient, Order, OrderType, Side, Strategy,
    TradingClient, ValidationError,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a client against the mock server
fn create_test_client(server: &MockServer) -> TradingClient {
    TradingClient::new(GatewayRestClient::new(&server.uri()).expect("Failed to create REST client"))
}

// ============================================================================
// Orders
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_place_order_posts_sparse_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/place_order"))
        .and(body_json(json!({
            "orderID": "253",
            "strategyID": "1",
            "qty": 1.0,
            "side": "BUY",
            "orderType": "LMT",
            "price": 1.0,
            "secType": "STK",
            "symbol": "TSLA",
            "exchange": "SMART",
            "currency": "USD"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_responses::order_submitted("253")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client
        .place_order(&common::sample_limit_order("253"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, api_responses::order_submitted("253"));
}

#[tokio::test]
async fn test_option_order_carries_derivative_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/place_order"))
        .and(body_json(json!({
            "orderID": "77",
            "strategyID": "2",
            "qty": 3.0,
            "side": "SELL",
            "orderType": "MKT",
            "secType": "OPT",
            "symbol": "AAPL",
            "exchange": "SMART",
            "currency": "USD",
            "lastTradeDateOrContractMonth": "20251219",
            "strike": 150.0,
            "right": "C"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let order = Order::builder("77", "2", common::aapl_call())
        .qty(dec!(3))
        .side(Side::Sell)
        .order_type(OrderType::Market)
        .build()
        .unwrap();

    let client = create_test_client(&server);
    assert!(client.place_order(&order).await.unwrap().is_success());
}

#[tokio::test]
async fn test_order_lifecycle_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/253"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_responses::order_submitted("253")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/orders/253"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_responses::order_cancelled("253")))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);

    let (status, body) = client.get_order("253").await.unwrap().into_parts();
    assert_eq!(status, 200);
    assert_eq!(body["status"], json!("Submitted"));

    let (status, body) = client.cancel_order("253").await.unwrap().into_parts();
    assert_eq!(status, 200);
    assert_eq!(body["status"], json!("Cancelled"));
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Order not found"})))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client.get_order("missing").await.unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.body, json!({"detail": "Order not found"}));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.cancel_order("").await;
    assert!(matches!(
        result,
        Err(ClientError::Validation(ValidationError::MissingField("orderID")))
    ));

    // a market order with a price cannot even be built
    let rejected = Order::builder("1", "1", common::tsla())
        .qty(dec!(1))
        .side(Side::Buy)
        .order_type(OrderType::Market)
        .price(dec!(10))
        .build();
    assert_eq!(rejected, Err(ValidationError::MarketOrderPrice));
}

// ============================================================================
// Market data
// ============================================================================

#[tokio::test]
async fn test_market_data_subscription_updates_strategy() {
    let server = MockServer::start().await;
    let expected = json!({
        "strategyID": "1",
        "secType": "FUT",
        "symbol": "ES",
        "exchange": "CME",
        "currency": "USD",
        "lastTradeDateOrContractMonth": "202512"
    });
    Mock::given(method("POST"))
        .and(path("/data/subscribe"))
        .and(body_json(expected.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"subscribed": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/data/unsubscribe"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"subscribed": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let mut strategy = common::sample_strategy();

    client
        .subscribe_market_data(&mut strategy, common::es_future())
        .await
        .unwrap();
    assert_eq!(strategy.subscribed_data(), &[common::es_future()]);

    client
        .unsubscribe_market_data(&mut strategy, &common::es_future())
        .await
        .unwrap();
    assert!(strategy.subscribed_data().is_empty());
}

#[tokio::test]
async fn test_rejected_subscription_is_not_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/data/subscribe"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "unknown contract"})))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let mut strategy = common::sample_strategy();

    let response = client
        .subscribe_market_data(&mut strategy, common::tsla())
        .await
        .unwrap();
    assert_eq!(response.status, 422);
    assert!(strategy.subscribed_data().is_empty());
}

// ============================================================================
// Strategies and system
// ============================================================================

#[tokio::test]
async fn test_strategy_registration_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/strategy/register"))
        .and(body_json(json!({"strategyID": "s-1", "name": "mean reversion", "cash": 25000.0})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"registered": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/strategy/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"strategyID": "s-1", "cash": 25000.0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/strategy/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"removed": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let strategy = Strategy::new("s-1", "mean reversion", dec!(25000));

    assert_eq!(client.register_strategy(&strategy).await.unwrap().status, 201);
    assert_eq!(
        client.get_strategy_info("s-1").await.unwrap().body["cash"],
        json!(25000.0)
    );
    assert!(client.unregister_strategy("s-1").await.unwrap().is_success());
}

#[tokio::test]
async fn test_system_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_responses::system_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client.get_system_health().await.unwrap();
    assert_eq!(response.body, api_responses::system_ok());
}

// ============================================================================
// Raw transport behaviour
// ============================================================================

#[tokio::test]
async fn test_empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/orders/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let gateway = GatewayRestClient::new(&server.uri()).unwrap();
    let response = gateway
        .send(Endpoint::CancelOrder("9".into()), None)
        .await
        .unwrap();

    assert_eq!(response.status, 204);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/system/status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let gateway = GatewayRestClient::new(&server.uri()).unwrap();
    let result = gateway.send(Endpoint::SystemStatus, None).await;

    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // port 9 (discard) is not listening in test environments
    let gateway = GatewayRestClient::new("http://127.0.0.1:9").unwrap();
    let result = gateway.send(Endpoint::SystemStatus, None).await;

    assert!(matches!(result, Err(ClientError::HttpRequest(_))));
}

//! Resource clients against a mock backend.

use std::time::Duration;

use serde_json::json;
use tally_api::{ApiClient, ApiConfig, ApiError};
use tally_core::{Coordinates, Money, OrderState, Product};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new(server.uri()).request_timeout(Duration::from_secs(2))).unwrap()
}

fn sample_order_state() -> OrderState {
    let mut order = OrderState::new();
    let latte = Product::new("1", "Latte", Money::from_cents(250));
    let scone = Product::new("2", "Scone", Money::from_cents(300));
    order.add(&latte);
    order.add(&latte);
    order.add(&scone);
    order
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_products_skip_bad_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "productName": "Latte", "price": "2.50", "productImage": "a.png"},
            {"id": "2", "productName": "Mystery", "price": "n/a"},
            {"id": "3", "productName": "Tea", "price": 1.25}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = client_for(&server).products().list().await.unwrap();

    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Latte", "Tea"]);
    assert_eq!(products[1].price, Money::from_cents(125));
}

#[tokio::test]
async fn test_products_degrade_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Product"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.products().list().await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus { status: 500, .. }));
    assert!(client.products().list_or_empty().await.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Order"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).orders().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Product"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(
        ApiConfig::new(server.uri()).request_timeout(Duration::from_millis(200)),
    )
    .unwrap();

    let err = client.products().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout { .. }), "got {err:?}");
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_order_history_skips_bad_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "1",
                "createdAt": "2026-10-18T09:15:00.000Z",
                "Products": [{"productId": "1", "productName": "Latte", "price": "2.50", "quantity": 2}],
                "Total": "5.00"
            },
            {"id": "2", "createdAt": "yesterday"},
            {"id": "3", "createdAt": "2026-10-18T10:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let orders = client_for(&server).orders().list().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].total_amount(), Some(Money::from_cents(500)));
    assert_eq!(orders[1].total_amount(), None);
}

#[tokio::test]
async fn test_create_order_requires_201() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Order"))
        .and(body_partial_json(json!({
            "Total": "8.00",
            "id": "order-1",
            "Products": [
                {"productId": "1", "productName": "Latte", "price": "2.50", "quantity": 2},
                {"productId": "2", "productName": "Scone", "price": "3.00", "quantity": 1}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "order-1",
            "createdAt": "2026-10-18T14:30:00.000Z",
            "Products": [],
            "Total": "8.00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = sample_order_state()
        .to_submission("order-1", "2026-10-18T14:30:00Z".parse().unwrap())
        .unwrap();

    let created = client_for(&server).orders().create(&payload).await.unwrap();
    assert_eq!(created.id, "order-1");
    assert_eq!(created.total_amount(), Some(Money::from_cents(800)));
}

#[tokio::test]
async fn test_create_order_rejects_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = sample_order_state()
        .to_submission("order-2", "2026-10-18T14:30:00Z".parse().unwrap())
        .unwrap();

    let err = client_for(&server).orders().create(&payload).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::UnexpectedStatus { status: 200, ref method, .. } if method == "POST"
    ));
}

#[tokio::test]
async fn test_create_order_without_echo_uses_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Order"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let payload = sample_order_state()
        .to_submission("order-3", "2026-10-18T14:30:00Z".parse().unwrap())
        .unwrap();

    let created = client_for(&server).orders().create(&payload).await.unwrap();
    assert_eq!(created.id, "order-3");
    assert_eq!(created.products.len(), 2);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_append_location_keeps_history_and_extra_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Register/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7",
            "name": "Mai",
            "username": "mai",
            "password": "pw",
            "shift": "morning",
            "location": [{"latitude": 1.0, "longitude": 2.0}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/Register/7"))
        .and(body_partial_json(json!({
            "password": "pw",
            "shift": "morning",
            "location": [
                {"latitude": 1.0, "longitude": 2.0},
                {"latitude": 10.5, "longitude": 106.25}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "7",
            "name": "Mai",
            "username": "mai",
            "password": "pw",
            "shift": "morning",
            "location": [
                {"latitude": 1.0, "longitude": 2.0},
                {"latitude": 10.5, "longitude": 106.25}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .users()
        .append_location("7", Coordinates::new(10.5, 106.25))
        .await
        .unwrap();
    assert_eq!(user.location.len(), 2);
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Register/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("\"Not found\""))
        .mount(&server)
        .await;

    let err = client_for(&server).users().get("99").await.unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound(ref id) if id == "99"));
}

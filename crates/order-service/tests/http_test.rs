use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use order_service::clock::SystemClock;
use order_service::config::ServiceConfig;
use order_service::http;
use order_service::lifecycle::OrderSystem;
use order_service::model::{CustomerCreate, ProductCreate};
use order_service::rate_limiter::RateLimitConfig;
use order_service::reminder::LogSink;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

async fn system_with_limit(limit: u32) -> OrderSystem {
    let config = ServiceConfig {
        rate_limit: RateLimitConfig {
            limit,
            window: Duration::from_secs(60),
        },
        ..ServiceConfig::default()
    };
    let system = OrderSystem::new(&config, Arc::new(LogSink), Arc::new(SystemClock));
    system.seed_discounts().await.unwrap();
    system
        .customer_client
        .register(CustomerCreate::new("Alice", "alice@example.com"))
        .await
        .unwrap();
    system
        .product_client
        .add_product(ProductCreate::new("Headphones", 100.0, ["electronic"]))
        .await
        .unwrap();
    system
}

fn place_order(body: Value, from: [u8; 4]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/place-order")
        .header("content-type", "application/json")
        .extension(ConnectInfo(SocketAddr::from((from, 40_000))))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_place_order_returns_acknowledgment() {
    let system = system_with_limit(100).await;
    let app = http::router(system.app_state());

    let (status, body) = send(
        &app,
        place_order(
            json!({ "customer_id": "customer_1", "product_ids": ["product_1"], "discount_code": "IC003" }),
            [10, 0, 0, 1],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_id"], "order_1");
    assert_eq!(body["message"], "Order placed successfully");

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_pipeline_errors_map_to_status_codes() {
    let system = system_with_limit(100).await;
    let app = http::router(system.app_state());
    let from = [10, 0, 0, 2];

    let (status, body) = send(
        &app,
        place_order(json!({ "customer_id": "customer_1", "product_ids": [] }), from),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("at least one product"));

    let (status, _) = send(
        &app,
        place_order(json!({ "customer_id": "customer_9", "product_ids": ["product_1"] }), from),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let malformed = Request::builder()
        .method("POST")
        .uri("/place-order")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rate_limit_is_charged_per_remote_ip() {
    let system = system_with_limit(2).await;
    let app = http::router(system.app_state());
    let order = json!({ "customer_id": "customer_1", "product_ids": ["product_1"] });

    for _ in 0..2 {
        let (status, _) = send(&app, place_order(order.clone(), [192, 168, 1, 5])).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, place_order(order.clone(), [192, 168, 1, 5])).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["message"], "Too many requests");

    // Failed requests are charged too, and other clients are unaffected.
    let (status, _) = send(&app, place_order(json!({}), [192, 168, 1, 6])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, place_order(order, [192, 168, 1, 6])).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(system.rate_limiter.active_count("192.168.1.5").await.unwrap(), 2);
    assert_eq!(system.rate_limiter.active_count("192.168.1.6").await.unwrap(), 2);

    drop(app);
    system.shutdown().await.unwrap();
}

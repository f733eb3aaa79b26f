use doc_store::tracing::setup_tracing;
use order_service::clock::SystemClock;
use order_service::config::ServiceConfig;
use order_service::http;
use order_service::lifecycle::OrderSystem;
use order_service::model::{CustomerCreate, ProductCreate};
use order_service::reminder::LogSink;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = ServiceConfig::from_env().map_err(|e| e.to_string())?;
    info!(bind_addr = %config.bind_addr, "Starting order service");

    let mut system = OrderSystem::new(&config, Arc::new(LogSink), Arc::new(SystemClock));
    let seeded = system.seed_discounts().await.map_err(|e| e.to_string())?;
    info!(seeded, "Discount catalog ready");

    if std::env::var("ORDER_SERVICE_SEED_DEMO").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true")) {
        seed_demo(&system).await?;
    }

    system.start_daily_trigger(config.reminder_at);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", config.bind_addr))?;
    let app = http::router(system.app_state());

    info!(addr = %config.bind_addr, "Listening");
    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    if let Err(e) = &served {
        error!(error = %e, "Server error");
    }

    system.shutdown().await?;
    served.map_err(|e| format!("server error: {e}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Registers a demo customer and a few products so the service can be tried out.
async fn seed_demo(system: &OrderSystem) -> Result<(), String> {
    let customer_id = system
        .customer_client
        .register(CustomerCreate::new("Alice", "alice@example.com"))
        .await
        .map_err(|e| e.to_string())?;
    info!(%customer_id, "Demo customer registered");

    let catalog = [
        ProductCreate::new("Noise-cancelling headphones", 199.0, ["electronic", "audio"]),
        ProductCreate::new("Espresso cup", 12.5, ["kitchen"]),
        ProductCreate::new("Desk lamp", 45.0, ["home"]),
    ];
    for params in catalog {
        let product_id = system
            .product_client
            .add_product(params)
            .await
            .map_err(|e| e.to_string())?;
        info!(%product_id, "Demo product added");
    }
    Ok(())
}

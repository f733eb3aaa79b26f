use chrono::{DateTime, FixedOffset, TimeZone};
use doc_store::mock::MockCollection;
use doc_store::StoreError;
use order_service::clients::{CustomerClient, OrderClient};
use order_service::clock::{Clock, ManualClock};
use order_service::config::ServiceConfig;
use order_service::lifecycle::OrderSystem;
use order_service::model::{
    Customer, CustomerCreate, CustomerId, LineItem, Order, OrderStatus, ProductCreate, ProductId,
};
use order_service::pipeline::PlaceOrderRequest;
use order_service::reminder::{MemorySink, ReminderScheduler, SweepState};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

// 22:00 local, two hours before midnight.
fn evening() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 6, 22, 0, 0)
        .unwrap()
}

const UNTIL_MIDNIGHT: Duration = Duration::from_secs(2 * 3600);

/// Local time that advances with the (paused) tokio clock.
struct RuntimeClock {
    base: DateTime<FixedOffset>,
    started: tokio::time::Instant,
}

impl Clock for RuntimeClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let elapsed = chrono::TimeDelta::from_std(self.started.elapsed()).unwrap();
        self.base + elapsed
    }
}

/// Local time that runs 100 ppm behind the tokio clock.
struct SlowClock {
    base: DateTime<FixedOffset>,
    started: tokio::time::Instant,
}

impl Clock for SlowClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let elapsed = self.started.elapsed().mul_f64(0.9999);
        self.base + chrono::TimeDelta::from_std(elapsed).unwrap()
    }
}

struct Harness {
    system: OrderSystem,
    sink: MemorySink,
}

async fn harness() -> Harness {
    harness_with_clock(Arc::new(ManualClock::new(evening()))).await
}

async fn harness_with_clock(clock: Arc<dyn Clock>) -> Harness {
    let sink = MemorySink::new();
    let config = ServiceConfig {
        checkout_url: "https://shop.test/checkout".into(),
        ..ServiceConfig::default()
    };
    let system = OrderSystem::new(&config, Arc::new(sink.clone()), clock);
    Harness { system, sink }
}

async fn register(system: &OrderSystem, name: &str) -> CustomerId {
    system
        .customer_client
        .register(CustomerCreate::new(name, format!("{}@example.com", name.to_lowercase())))
        .await
        .unwrap()
}

async fn add_product(system: &OrderSystem, name: &str, price: f64) -> ProductId {
    system
        .product_client
        .add_product(ProductCreate::new(name, price, ["home"]))
        .await
        .unwrap()
}

async fn place(system: &OrderSystem, customer: CustomerId, products: &[ProductId]) {
    system
        .pipeline
        .place_order(PlaceOrderRequest {
            customer_id: customer.to_string(),
            product_ids: products.iter().map(ToString::to_string).collect(),
            discount_code: None,
        })
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_three_pending_orders_fire_together_at_midnight() {
    let Harness { system, sink } = harness().await;
    let alice = register(&system, "Alice").await;
    let bob = register(&system, "Bob").await;
    let lamp = add_product(&system, "Lamp", 45.0).await;
    let mug = add_product(&system, "Mug", 12.5).await;

    place(&system, alice, &[lamp]).await;
    place(&system, alice, &[mug]).await;
    place(&system, bob, &[lamp, mug]).await;

    let report = system.reminders.run_daily_sweep().await;
    assert_eq!(report.triggered_at, evening());
    assert_eq!(report.scheduled.len(), 3);
    assert!(report.scheduled.iter().all(|r| r.fire_at == report.fire_at));
    assert_eq!(
        report.fire_at,
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 7, 0, 0, 0)
            .unwrap()
    );
    assert_eq!(system.reminders.outstanding(), 3);
    assert_eq!(system.reminders.state(), SweepState::Idle);

    sleep(UNTIL_MIDNIGHT - Duration::from_secs(1)).await;
    assert!(sink.notifications().is_empty());

    sleep(Duration::from_secs(2)).await;
    let sent = sink.notifications();
    assert_eq!(sent.len(), 3);
    assert_eq!(system.reminders.outstanding(), 0);

    let bob_mail = sent.iter().find(|n| n.customer_id == bob).unwrap();
    assert_eq!(bob_mail.recipient, "bob@example.com");
    assert!(bob_mail.body.starts_with("Dear Bob,"));
    assert!(bob_mail.body.contains("- Lamp: $45.00\n- Mug: $12.50\n"));
    assert!(bob_mail.body.contains("https://shop.test/checkout"));

    // One reminder per order: Alice gets two, each listing both pending products.
    let alice_mails: Vec<_> = sent.iter().filter(|n| n.customer_id == alice).collect();
    assert_eq!(alice_mails.len(), 2);
    assert!(alice_mails
        .iter()
        .all(|n| n.body.contains("- Lamp: $45.00\n- Mug: $12.50\n")));

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_orders_paid_after_the_sweep_are_still_reminded() {
    let Harness { system, sink } = harness().await;
    let alice = register(&system, "Alice").await;
    let lamp = add_product(&system, "Lamp", 45.0).await;
    place(&system, alice, &[lamp]).await;

    let report = system.reminders.run_daily_sweep().await;
    let order_id = report.scheduled[0].order_id;
    system
        .order_client
        .update_status(order_id, OrderStatus::Paid)
        .await
        .unwrap();

    sleep(UNTIL_MIDNIGHT + Duration::from_secs(1)).await;
    let sent = sink.notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].order_id, order_id);
    // The product list is read at firing time, so the paid order is no longer in it.
    assert!(!sent[0].body.contains("Lamp"));

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failed_customer_lookup_degrades_only_that_reminder() {
    let Harness { system, sink } = harness().await;
    let alice = register(&system, "Alice").await;
    let lamp = add_product(&system, "Lamp", 45.0).await;
    place(&system, alice, &[lamp]).await;

    // An order whose customer was never registered.
    let ghost = CustomerId(99);
    let mut orphan = Order::pending(ghost, evening(), Vec::new());
    orphan.line_items.push(LineItem {
        product_id: lamp,
        name: "Lamp".into(),
        price: 45.0,
        categories: Default::default(),
    });
    system.order_client.insert_order(orphan).await.unwrap();

    let report = system.reminders.run_daily_sweep().await;
    assert_eq!(report.scheduled.len(), 2);

    sleep(UNTIL_MIDNIGHT + Duration::from_secs(1)).await;
    let sent = sink.notifications();
    assert_eq!(sent.len(), 2);

    let degraded = sent.iter().find(|n| n.customer_id == ghost).unwrap();
    assert_eq!(degraded.recipient, "");
    assert!(degraded.body.starts_with("Dear ,"));

    let intact = sent.iter().find(|n| n.customer_id == alice).unwrap();
    assert_eq!(intact.recipient, "alice@example.com");

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_discards_unsent_reminders() {
    let Harness { system, sink } = harness().await;
    let alice = register(&system, "Alice").await;
    let lamp = add_product(&system, "Lamp", 45.0).await;
    place(&system, alice, &[lamp]).await;

    system.reminders.run_daily_sweep().await;
    assert_eq!(system.reminders.outstanding(), 1);

    system.reminders.shutdown();
    assert_eq!(system.reminders.outstanding(), 0);

    sleep(UNTIL_MIDNIGHT * 2).await;
    assert!(sink.notifications().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_enumeration_failure_schedules_nothing() {
    let mut orders = MockCollection::<Order>::new();
    let customers = MockCollection::<Customer>::new();
    orders.expect_find().return_err(StoreError::ActorClosed);

    let sink = MemorySink::new();
    let scheduler = ReminderScheduler::new(
        OrderClient::new(orders.client()),
        CustomerClient::new(customers.client()),
        Arc::new(sink.clone()),
        Arc::new(ManualClock::new(evening())),
        "https://shop.test/checkout",
    );

    let report = scheduler.run_daily_sweep().await;
    assert!(report.scheduled.is_empty());
    assert_eq!(scheduler.outstanding(), 0);
    assert_eq!(scheduler.state(), SweepState::Idle);

    // The next cycle is unaffected.
    orders.expect_find().return_ok(Vec::new());
    assert!(scheduler.run_daily_sweep().await.scheduled.is_empty());
    orders.verify();
    assert_eq!(customers.requests(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_daily_trigger_sweeps_at_the_configured_time() {
    let clock = Arc::new(RuntimeClock {
        base: evening(),
        started: tokio::time::Instant::now(),
    });
    let Harness { mut system, sink } = harness_with_clock(clock).await;
    let alice = register(&system, "Alice").await;
    let lamp = add_product(&system, "Lamp", 45.0).await;
    place(&system, alice, &[lamp]).await;

    // The sweep runs at 23:00 and the reminder fires an hour later.
    system.start_daily_trigger(chrono::NaiveTime::from_hms_opt(23, 0, 0).unwrap());

    sleep(Duration::from_secs(3600) + Duration::from_secs(1)).await;
    assert!(sink.notifications().is_empty());
    assert_eq!(system.reminders.outstanding(), 1);

    sleep(Duration::from_secs(3600)).await;
    assert_eq!(sink.notifications().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_daily_trigger_sweeps_once_when_wall_clock_lags() {
    let clock = Arc::new(SlowClock {
        base: evening(),
        started: tokio::time::Instant::now(),
    });
    let Harness { mut system, sink } = harness_with_clock(clock).await;
    let alice = register(&system, "Alice").await;
    let lamp = add_product(&system, "Lamp", 45.0).await;
    place(&system, alice, &[lamp]).await;

    // The timer wakes while the wall clock still reads just before 23:00.
    system.start_daily_trigger(chrono::NaiveTime::from_hms_opt(23, 0, 0).unwrap());

    sleep(Duration::from_secs(3600) + Duration::from_secs(1)).await;
    assert_eq!(system.reminders.outstanding(), 1);

    sleep(Duration::from_secs(2 * 3600)).await;
    assert_eq!(sink.notifications().len(), 1);
    assert_eq!(system.reminders.outstanding(), 0);

    system.shutdown().await.unwrap();
}

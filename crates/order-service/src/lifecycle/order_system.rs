use crate::clients::{CustomerClient, DiscountClient, OrderClient, ProductClient};
use crate::clock::Clock;
use crate::config::ServiceConfig;
use crate::discount_actor::DiscountError;
use crate::http::AppState;
use crate::model::DiscountRule;
use crate::pipeline::OrderPipeline;
use crate::rate_limiter::{self, RateLimiter};
use crate::reminder::{NotificationSink, ReminderScheduler};
use crate::{customer_actor, discount_actor, order_actor, product_actor};
use chrono::NaiveTime;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running service: four collections, the rate limiter, the order pipeline
/// and the reminder scheduler.
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub discount_client: DiscountClient,
    pub rate_limiter: RateLimiter,
    pub pipeline: OrderPipeline,
    pub reminders: ReminderScheduler,

    /// Actor tasks, awaited on shutdown.
    handles: Vec<JoinHandle<()>>,
    trigger: Option<JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns every actor and wires the clients together.
    ///
    /// `clock` timestamps new orders and drives the reminder sweep; `sink` receives
    /// the rendered reminders.
    pub fn new(config: &ServiceConfig, sink: Arc<dyn NotificationSink>, clock: Arc<dyn Clock>) -> Self {
        let buffer = config.store_buffer;

        let (customer_actor, customers) = customer_actor::new(buffer);
        let (product_actor, products) = product_actor::new(buffer);
        let (order_actor, orders) = order_actor::new(buffer);
        let (discount_actor, discounts) = discount_actor::new(buffer);
        let (limiter_actor, rate_limiter) = rate_limiter::new(config.rate_limit, buffer);

        let handles = vec![
            tokio::spawn(customer_actor.run()),
            tokio::spawn(product_actor.run()),
            tokio::spawn(order_actor.run()),
            tokio::spawn(discount_actor.run()),
            tokio::spawn(limiter_actor.run()),
        ];

        let customer_client = CustomerClient::new(customers);
        let product_client = ProductClient::new(products);
        let order_client = OrderClient::new(orders);
        let discount_client = DiscountClient::new(discounts);

        let pipeline = OrderPipeline::new(
            customer_client.clone(),
            product_client.clone(),
            discount_client.clone(),
            order_client.clone(),
        )
        .with_clock(clock.clone());

        let reminders = ReminderScheduler::new(
            order_client.clone(),
            customer_client.clone(),
            sink,
            clock,
            config.checkout_url.clone(),
        );

        info!(store_buffer = buffer, "Order system started");

        Self {
            customer_client,
            product_client,
            order_client,
            discount_client,
            rate_limiter,
            pipeline,
            reminders,
            handles,
            trigger: None,
        }
    }

    /// Stores the built-in discount catalog. Returns how many rules were stored.
    pub async fn seed_discounts(&self) -> Result<usize, DiscountError> {
        let catalog = DiscountRule::builtin_catalog();
        let count = catalog.len();
        for rule in catalog {
            let code = rule.code.clone();
            let id = self.discount_client.insert_rule(rule).await?;
            info!(%id, %code, "Discount rule seeded");
        }
        Ok(count)
    }

    /// Starts the daily reminder sweep at local time `at`, replacing any running trigger.
    pub fn start_daily_trigger(&mut self, at: NaiveTime) {
        if let Some(previous) = self.trigger.replace(self.reminders.spawn_daily_trigger(at)) {
            previous.abort();
        }
        info!(%at, "Daily reminder trigger started");
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            pipeline: self.pipeline.clone(),
            limiter: self.rate_limiter.clone(),
        }
    }

    /// Stops the trigger and reminder timers, then waits for every actor to exit.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order system");
        let Self {
            customer_client,
            product_client,
            order_client,
            discount_client,
            rate_limiter,
            pipeline,
            reminders,
            handles,
            trigger,
        } = self;

        if let Some(trigger) = trigger {
            trigger.abort();
            let _ = trigger.await;
        }
        reminders.shutdown();

        drop(customer_client);
        drop(product_client);
        drop(order_client);
        drop(discount_client);
        drop(rate_limiter);
        drop(pipeline);
        drop(reminders);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(format!("Actor task failed: {}", e));
            }
        }

        info!("Order system shut down");
        Ok(())
    }
}

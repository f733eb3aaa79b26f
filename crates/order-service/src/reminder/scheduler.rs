use super::sink::{render_reminder, Notification, NotificationSink};
use crate::clients::{CustomerClient, OrderClient};
use crate::clock::{duration_until, next_local_midnight, next_occurrence, Clock};
use crate::model::{CustomerId, OrderId, OrderStatus};
use chrono::{DateTime, FixedOffset, NaiveTime};
use doc_store::StoreClient;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{error, info, instrument, warn, Instrument};

/// Where the scheduler is within a trigger cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    Idle,
    Enumerating,
    /// Arming one timer per pending order found.
    Scheduling(usize),
}

/// A reminder armed by a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledReminder {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub fire_at: DateTime<FixedOffset>,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    pub triggered_at: DateTime<FixedOffset>,
    /// The local midnight every reminder of this sweep fires at.
    pub fire_at: DateTime<FixedOffset>,
    pub scheduled: Vec<ScheduledReminder>,
}

/// What a reminder task needs to render and send one reminder.
#[derive(Clone)]
struct Courier {
    orders: OrderClient,
    customers: CustomerClient,
    sink: Arc<dyn NotificationSink>,
    checkout_url: Arc<str>,
}

impl Courier {
    /// Looks up the recipient and products, then emits. A failed lookup degrades
    /// the reminder (blank recipient, empty product list) instead of dropping it.
    async fn deliver(self, order_id: OrderId, customer_id: CustomerId) {
        let (name, email) = match self.customers.find_by_id(customer_id).await {
            Ok(Some(customer)) => (customer.name, customer.email),
            Ok(None) => {
                warn!("Customer not found, sending degraded reminder");
                (String::new(), String::new())
            }
            Err(e) => {
                warn!(error = %e, "Customer lookup failed, sending degraded reminder");
                (String::new(), String::new())
            }
        };

        let items = self
            .orders
            .find_products_by_customer(customer_id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Product lookup failed, sending degraded reminder");
                Vec::new()
            });

        let notification = Notification {
            order_id,
            customer_id,
            recipient: email,
            body: render_reminder(&name, &items, &self.checkout_url),
        };
        match self.sink.emit(notification).await {
            Ok(()) => info!(products = items.len(), "Reminder sent"),
            Err(e) => error!(error = %e, "Reminder not delivered"),
        }
    }
}

struct Inner {
    courier: Courier,
    clock: Arc<dyn Clock>,
    timers: Mutex<Vec<JoinHandle<()>>>,
    state: Mutex<SweepState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Schedules pending-order reminders. Cheap to clone; clones share the timers.
#[derive(Clone)]
pub struct ReminderScheduler {
    inner: Arc<Inner>,
}

impl ReminderScheduler {
    pub fn new(
        orders: OrderClient,
        customers: CustomerClient,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        checkout_url: impl Into<String>,
    ) -> Self {
        let checkout_url: String = checkout_url.into();
        Self {
            inner: Arc::new(Inner {
                courier: Courier {
                    orders,
                    customers,
                    sink,
                    checkout_url: Arc::from(checkout_url),
                },
                clock,
                timers: Mutex::new(Vec::new()),
                state: Mutex::new(SweepState::Idle),
            }),
        }
    }

    pub fn state(&self) -> SweepState {
        *lock(&self.inner.state)
    }

    fn set_state(&self, state: SweepState) {
        *lock(&self.inner.state) = state;
    }

    /// Enumerates pending orders and arms one reminder per order, all due at the
    /// next local midnight after now.
    ///
    /// Never fails: if the orders cannot be enumerated the cycle ends with nothing
    /// scheduled.
    pub async fn run_daily_sweep(&self) -> SweepReport {
        self.sweep_for(self.inner.clock.now()).await
    }

    /// Sweeps on behalf of the trigger instant `triggered_at`. The reminders are
    /// due at the first local midnight after it, however far the wall clock is
    /// from that instant right now.
    #[instrument(skip(self))]
    async fn sweep_for(&self, triggered_at: DateTime<FixedOffset>) -> SweepReport {
        let fire_at = next_local_midnight(triggered_at);
        let deadline = Instant::now() + duration_until(self.inner.clock.now(), fire_at);
        let mut report = SweepReport {
            triggered_at,
            fire_at,
            scheduled: Vec::new(),
        };

        self.set_state(SweepState::Enumerating);
        let pending = match self.inner.courier.orders.find_by_status(OrderStatus::Pending).await {
            Ok(pending) => pending,
            Err(e) => {
                error!(error = %e, "Could not enumerate pending orders");
                self.set_state(SweepState::Idle);
                return report;
            }
        };

        self.set_state(SweepState::Scheduling(pending.len()));
        {
            let mut timers = lock(&self.inner.timers);
            timers.retain(|timer| !timer.is_finished());

            for order in pending {
                let courier = self.inner.courier.clone();
                let span = tracing::info_span!("reminder", order_id = %order.id, customer_id = %order.customer_id);
                let (order_id, customer_id) = (order.id, order.customer_id);
                timers.push(tokio::spawn(
                    async move {
                        sleep_until(deadline).await;
                        courier.deliver(order_id, customer_id).await;
                    }
                    .instrument(span),
                ));
                report.scheduled.push(ScheduledReminder {
                    order_id,
                    customer_id,
                    fire_at,
                });
            }
        }

        info!(scheduled = report.scheduled.len(), %fire_at, "Reminders scheduled");
        self.set_state(SweepState::Idle);
        report
    }

    /// Reminders armed but not yet sent.
    pub fn outstanding(&self) -> usize {
        let mut timers = lock(&self.inner.timers);
        timers.retain(|timer| !timer.is_finished());
        timers.len()
    }

    /// Aborts every outstanding reminder.
    pub fn shutdown(&self) {
        let timers: Vec<JoinHandle<()>> = lock(&self.inner.timers).drain(..).collect();
        let aborted = timers.iter().filter(|timer| !timer.is_finished()).count();
        for timer in timers {
            timer.abort();
        }
        info!(aborted, "Reminder scheduler stopped");
    }

    /// Sweeps once a day at local time `at`.
    ///
    /// Each target is swept exactly once. The following target is taken after
    /// the later of the wall clock and the target just swept, so a wall clock
    /// running behind the timer cannot bring the same target back.
    pub fn spawn_daily_trigger(&self, at: NaiveTime) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let clock = Arc::clone(&scheduler.inner.clock);
            let mut target = next_occurrence(clock.now(), at);
            loop {
                info!(next_sweep = %target, "Waiting for daily reminder sweep");
                sleep(duration_until(clock.now(), target)).await;
                scheduler.sweep_for(target).await;
                target = next_occurrence(clock.now().max(target), at);
            }
        })
    }
}

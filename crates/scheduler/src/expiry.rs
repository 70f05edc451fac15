use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde_json::json;
use shared::{
    abstract_trait::{DynExpiryStore, DynNotificationGateway},
    model::Product,
};
use tokio::{sync::Mutex, task::AbortHandle};
use tracing::{error, info, warn};

/// What the scheduler needs to know about a product in order to arm
/// its expiry timer.
#[derive(Debug, Clone)]
pub struct ExpiryRequest {
    pub product_id: i32,
    pub code: String,
    pub name: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ExpiryRequest {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.product_id,
            code: product.code.clone(),
            name: product.name.clone(),
            expires_at: product.expire_date.map(|dt| dt.and_utc()),
        }
    }
}

struct PendingTimer {
    generation: u64,
    code: String,
    name: String,
    abort: AbortHandle,
}

struct SchedulerInner {
    store: DynExpiryStore,
    gateway: DynNotificationGateway,
    pending: Mutex<HashMap<i32, PendingTimer>>,
    generation: AtomicU64,
}

/// Arms one countdown per product and auto-deletes the product when it
/// runs out.
///
/// Each product id holds at most one pending timer. Scheduling again for
/// the same id replaces the previous timer, so the latest expiry date
/// always wins. When a timer fires, its map entry is claimed first and
/// the claim decides ownership: a timer whose entry is gone or has been
/// superseded does nothing. Deleting a row that is already gone is
/// treated as a normal outcome and expiry notifications are still sent;
/// only a store failure abandons the expiry without notifying.
#[derive(Clone)]
pub struct ExpiryScheduler {
    inner: Arc<SchedulerInner>,
}

impl ExpiryScheduler {
    pub fn new(store: DynExpiryStore, gateway: DynNotificationGateway) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                store,
                gateway,
                pending: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Arms the expiry countdown for a product, replacing any timer that
    /// is already pending for the same id. A missing, unparseable or
    /// non-future expiry date is skipped with a log line and leaves no
    /// timer behind.
    pub async fn schedule(&self, request: ExpiryRequest) {
        let ExpiryRequest {
            product_id,
            code,
            name,
            expires_at,
        } = request;

        let Some(fire_at) = expires_at else {
            warn!("⚠️ Invalid or past expire date for {name}, skipping scheduler");
            return;
        };

        let delay = match (fire_at - Utc::now()).to_std() {
            Ok(delay) if delay > Duration::ZERO => delay,
            _ => {
                warn!("⚠️ Invalid or past expire date for {name}, skipping scheduler");
                return;
            }
        };

        let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);

        // The lock is held across spawn and insert so the timer task,
        // however short the delay, cannot observe the map before its own
        // entry exists.
        let mut pending = self.inner.pending.lock().await;

        if let Some(previous) = pending.remove(&product_id) {
            previous.abort.abort();
            info!("🔄 Replacing expiry timer for {code}");
        }

        let task = tokio::spawn({
            let scheduler = self.clone();
            async move {
                tokio::time::sleep(delay).await;
                scheduler.fire(product_id, generation).await;
            }
        });

        pending.insert(
            product_id,
            PendingTimer {
                generation,
                code,
                name: name.clone(),
                abort: task.abort_handle(),
            },
        );
        drop(pending);

        info!(
            "⏳ Countdown scheduled for {name} at {}",
            fire_at.to_rfc3339()
        );
    }

    /// Cancels the pending timer for a product. Returns `false` when no
    /// timer is pending, which callers treat as "nothing to do".
    pub async fn cancel(&self, product_id: i32) -> bool {
        let removed = self.inner.pending.lock().await.remove(&product_id);

        match removed {
            Some(timer) => {
                timer.abort.abort();
                info!("🛑 Expiry timer cancelled for {}", timer.code);
                true
            }
            None => false,
        }
    }

    pub async fn is_scheduled(&self, product_id: i32) -> bool {
        self.inner.pending.lock().await.contains_key(&product_id)
    }

    pub async fn pending_count(&self) -> usize {
        self.inner.pending.lock().await.len()
    }

    /// Runs when a countdown elapses. Claiming the map entry is the
    /// liveness check: if the entry is gone or belongs to a newer timer,
    /// this invocation lost the race and backs off.
    async fn fire(&self, product_id: i32, generation: u64) {
        let claimed = {
            let mut pending = self.inner.pending.lock().await;
            match pending.get(&product_id) {
                Some(timer) if timer.generation == generation => pending.remove(&product_id),
                _ => None,
            }
        };

        let Some(timer) = claimed else {
            return;
        };

        let deleted = match self.inner.store.delete_by_id(product_id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                error!(
                    "❌ Failed to auto-delete expired product {}: {e}",
                    timer.code
                );
                return;
            }
        };

        if deleted {
            info!("🕒 Product expired and auto-deleted: {}", timer.name);
        } else {
            info!("🕒 Product already removed before expiry fired: {}", timer.name);
        }

        let gateway = Arc::clone(&self.inner.gateway);
        let code = timer.code.clone();
        let name = timer.name.clone();
        tokio::spawn(async move {
            let payload = json!({ "code": code, "name": name });
            if let Err(e) = gateway.publish_event("productExpired", payload).await {
                error!("❌ Failed to publish productExpired event: {e}");
            }
        });

        let gateway = Arc::clone(&self.inner.gateway);
        let name = timer.name;
        tokio::spawn(async move {
            let body = format!("{name} has been removed as it reached expiry.");
            if let Err(e) = gateway.send_push("⚠️ Product Expired", &body).await {
                error!("❌ Failed to send expiry push notification: {e}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration as StdDuration;

    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;
    use serde_json::Value;
    use shared::{
        abstract_trait::{ExpiryStoreTrait, NotificationGatewayTrait},
        errors::{NotifyError, RepositoryError},
    };
    use tokio::time::sleep;

    use super::*;

    #[derive(Clone, Copy)]
    enum StoreResponse {
        Deleted,
        Missing,
        Error,
    }

    struct FakeStore {
        deletes: StdMutex<Vec<i32>>,
        response: StoreResponse,
    }

    #[async_trait]
    impl ExpiryStoreTrait for FakeStore {
        async fn delete_by_id(&self, product_id: i32) -> Result<bool, RepositoryError> {
            self.deletes.lock().unwrap().push(product_id);
            match self.response {
                StoreResponse::Deleted => Ok(true),
                StoreResponse::Missing => Ok(false),
                StoreResponse::Error => Err(RepositoryError::Custom("connection reset".into())),
            }
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        events: StdMutex<Vec<(String, Value)>>,
        pushes: StdMutex<Vec<(String, String)>>,
        failing: bool,
    }

    #[async_trait]
    impl NotificationGatewayTrait for FakeGateway {
        async fn publish_event(&self, event: &str, payload: Value) -> Result<(), NotifyError> {
            self.events.lock().unwrap().push((event.to_string(), payload));
            if self.failing {
                return Err(NotifyError::Channel("no subscribers".into()));
            }
            Ok(())
        }

        async fn send_push(&self, title: &str, body: &str) -> Result<(), NotifyError> {
            self.pushes
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            if self.failing {
                return Err(NotifyError::Http("push gateway down".into()));
            }
            Ok(())
        }
    }

    fn fixture(response: StoreResponse) -> (ExpiryScheduler, Arc<FakeStore>, Arc<FakeGateway>) {
        let store = Arc::new(FakeStore {
            deletes: StdMutex::new(Vec::new()),
            response,
        });
        let gateway = Arc::new(FakeGateway::default());
        let scheduler = ExpiryScheduler::new(store.clone(), gateway.clone());
        (scheduler, store, gateway)
    }

    fn request(
        product_id: i32,
        code: &str,
        name: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> ExpiryRequest {
        ExpiryRequest {
            product_id,
            code: code.to_string(),
            name: name.to_string(),
            expires_at,
        }
    }

    fn in_secs(secs: i64) -> Option<DateTime<Utc>> {
        Some(Utc::now() + ChronoDuration::seconds(secs))
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay_and_notifies() {
        let (scheduler, store, gateway) = fixture(StoreResponse::Deleted);

        scheduler.schedule(request(1, "P1", "Milk", in_secs(2))).await;
        assert!(scheduler.is_scheduled(1).await);
        assert!(store.deletes.lock().unwrap().is_empty());

        sleep(StdDuration::from_secs(3)).await;
        settle().await;

        assert_eq!(*store.deletes.lock().unwrap(), vec![1]);
        assert!(!scheduler.is_scheduled(1).await);

        let events = gateway.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "productExpired");
        assert_eq!(events[0].1, json!({ "code": "P1", "name": "Milk" }));

        let pushes = gateway.pushes.lock().unwrap();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].0, "⚠️ Product Expired");
        assert_eq!(pushes[0].1, "Milk has been removed as it reached expiry.");
    }

    #[tokio::test(start_paused = true)]
    async fn past_or_missing_expiry_is_skipped() {
        let (scheduler, store, gateway) = fixture(StoreResponse::Deleted);

        scheduler.schedule(request(1, "P1", "Milk", in_secs(-5))).await;
        scheduler.schedule(request(2, "P2", "Bread", in_secs(0))).await;
        scheduler.schedule(request(3, "P3", "Cheese", None)).await;

        assert_eq!(scheduler.pending_count().await, 0);

        sleep(StdDuration::from_secs(60)).await;
        settle().await;

        assert!(store.deletes.lock().unwrap().is_empty());
        assert!(gateway.events.lock().unwrap().is_empty());
        assert!(gateway.pushes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_pending_timer() {
        let (scheduler, store, gateway) = fixture(StoreResponse::Deleted);

        scheduler.schedule(request(7, "P7", "Yogurt", in_secs(60))).await;
        scheduler.schedule(request(7, "P7", "Yogurt", in_secs(2))).await;
        assert_eq!(scheduler.pending_count().await, 1);

        sleep(StdDuration::from_secs(3)).await;
        settle().await;

        assert_eq!(*store.deletes.lock().unwrap(), vec![7]);

        // The replaced timer must never fire, even past its original deadline.
        sleep(StdDuration::from_secs(120)).await;
        settle().await;

        assert_eq!(*store.deletes.lock().unwrap(), vec![7]);
        assert_eq!(gateway.events.lock().unwrap().len(), 1);
        assert_eq!(gateway.pushes.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_expiry() {
        let (scheduler, store, gateway) = fixture(StoreResponse::Deleted);

        scheduler.schedule(request(5, "P5", "Juice", in_secs(2))).await;
        assert!(scheduler.cancel(5).await);
        assert_eq!(scheduler.pending_count().await, 0);

        sleep(StdDuration::from_secs(10)).await;
        settle().await;

        assert!(store.deletes.lock().unwrap().is_empty());
        assert!(gateway.events.lock().unwrap().is_empty());
        assert!(gateway.pushes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_without_timer_is_a_noop() {
        let (scheduler, _store, _gateway) = fixture(StoreResponse::Deleted);

        assert!(!scheduler.cancel(42).await);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_reports_nothing_pending() {
        let (scheduler, store, gateway) = fixture(StoreResponse::Deleted);

        scheduler.schedule(request(3, "P3", "Cheese", in_secs(1))).await;

        sleep(StdDuration::from_secs(2)).await;
        settle().await;

        assert!(!scheduler.cancel(3).await);
        assert_eq!(*store.deletes.lock().unwrap(), vec![3]);
        assert_eq!(gateway.events.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_row_still_notifies() {
        let (scheduler, store, gateway) = fixture(StoreResponse::Missing);

        scheduler.schedule(request(4, "P4", "Bread", in_secs(1))).await;

        sleep(StdDuration::from_secs(2)).await;
        settle().await;

        assert_eq!(*store.deletes.lock().unwrap(), vec![4]);
        assert_eq!(gateway.events.lock().unwrap().len(), 1);
        assert_eq!(gateway.pushes.lock().unwrap().len(), 1);
        assert!(!scheduler.is_scheduled(4).await);
    }

    #[tokio::test(start_paused = true)]
    async fn store_error_abandons_without_notifying() {
        let (scheduler, store, gateway) = fixture(StoreResponse::Error);

        scheduler.schedule(request(9, "P9", "Butter", in_secs(1))).await;

        sleep(StdDuration::from_secs(30)).await;
        settle().await;

        // One attempt, no retry, and no notifications on failure.
        assert_eq!(*store.deletes.lock().unwrap(), vec![9]);
        assert!(gateway.events.lock().unwrap().is_empty());
        assert!(gateway.pushes.lock().unwrap().is_empty());
        assert!(!scheduler.is_scheduled(9).await);
    }

    #[tokio::test(start_paused = true)]
    async fn notification_failures_are_swallowed() {
        let store = Arc::new(FakeStore {
            deletes: StdMutex::new(Vec::new()),
            response: StoreResponse::Deleted,
        });
        let gateway = Arc::new(FakeGateway {
            failing: true,
            ..Default::default()
        });
        let scheduler = ExpiryScheduler::new(store.clone(), gateway.clone());

        scheduler.schedule(request(6, "P6", "Cream", in_secs(1))).await;

        sleep(StdDuration::from_secs(2)).await;
        settle().await;

        assert_eq!(*store.deletes.lock().unwrap(), vec![6]);
        assert_eq!(gateway.events.lock().unwrap().len(), 1);
        assert_eq!(gateway.pushes.lock().unwrap().len(), 1);
        assert!(!scheduler.is_scheduled(6).await);
    }

    #[tokio::test(start_paused = true)]
    async fn products_expire_independently() {
        let (scheduler, store, _gateway) = fixture(StoreResponse::Deleted);

        scheduler.schedule(request(1, "P1", "Milk", in_secs(1))).await;
        scheduler.schedule(request(2, "P2", "Bread", in_secs(3))).await;
        assert_eq!(scheduler.pending_count().await, 2);

        sleep(StdDuration::from_secs(2)).await;
        settle().await;

        assert_eq!(*store.deletes.lock().unwrap(), vec![1]);
        assert!(scheduler.is_scheduled(2).await);

        sleep(StdDuration::from_secs(2)).await;
        settle().await;

        assert_eq!(*store.deletes.lock().unwrap(), vec![1, 2]);
        assert_eq!(scheduler.pending_count().await, 0);
    }
}

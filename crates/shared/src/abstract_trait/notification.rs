use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::errors::NotifyError;

pub type DynNotificationGateway = Arc<dyn NotificationGatewayTrait + Send + Sync>;

/// Fan-out surface for both notification channels. Callers treat both as
/// best-effort: failures are logged at the call site, never propagated.
#[async_trait]
pub trait NotificationGatewayTrait {
    /// Publish an event to every live realtime subscriber.
    async fn publish_event(&self, event: &str, payload: Value) -> Result<(), NotifyError>;

    /// Send an out-of-band push notification.
    async fn send_push(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

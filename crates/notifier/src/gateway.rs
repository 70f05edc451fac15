use async_trait::async_trait;
use serde_json::Value;
use shared::{abstract_trait::NotificationGatewayTrait, errors::NotifyError};

use crate::{push::PushClient, realtime::RealtimeHub};

/// Fans notifications out to the realtime stream and the push gateway.
#[derive(Debug, Clone)]
pub struct Notifier {
    hub: RealtimeHub,
    push: PushClient,
}

impl Notifier {
    pub fn new(hub: RealtimeHub, push: PushClient) -> Self {
        Self { hub, push }
    }
}

#[async_trait]
impl NotificationGatewayTrait for Notifier {
    async fn publish_event(&self, event: &str, payload: Value) -> Result<(), NotifyError> {
        self.hub.broadcast(event, payload);
        Ok(())
    }

    async fn send_push(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.push.send(title, body).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::config::PushConfig;

    use super::*;

    #[tokio::test]
    async fn publish_event_reaches_realtime_subscribers() {
        let hub = RealtimeHub::default();
        let push = PushClient::new(&PushConfig {
            gateway_url: "http://localhost:0/push".to_string(),
            recipient: "ExponentPushToken[test]".to_string(),
        });
        let notifier = Notifier::new(hub.clone(), push);

        let mut subscriber = hub.subscribe();

        notifier
            .publish_event("productDeleted", json!("P1"))
            .await
            .unwrap();

        let event = subscriber.recv().await.unwrap();
        assert_eq!(event.event, "productDeleted");
        assert_eq!(event.payload, json!("P1"));
    }
}

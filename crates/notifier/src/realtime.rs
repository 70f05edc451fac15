use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

/// A named event fanned out to every connected realtime client.
#[derive(Debug, Clone)]
pub struct RealtimeEvent {
    pub event: String,
    pub payload: Value,
}

/// In-process broadcast channel backing the realtime event stream.
///
/// Publishing with no connected clients is a normal outcome, the event
/// is simply dropped. Slow clients that fall behind the channel
/// capacity miss events rather than blocking publishers.
#[derive(Debug, Clone)]
pub struct RealtimeHub {
    sender: broadcast::Sender<RealtimeEvent>,
}

impl RealtimeHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.sender.subscribe()
    }

    /// Sends the event to all current subscribers and returns how many
    /// received it.
    pub fn broadcast(&self, event: &str, payload: Value) -> usize {
        let reached = self
            .sender
            .send(RealtimeEvent {
                event: event.to_string(),
                payload,
            })
            .unwrap_or(0);

        if reached == 0 {
            debug!("📡 No realtime subscribers for {event}");
        }

        reached
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new(128)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn delivers_events_to_subscribers() {
        let hub = RealtimeHub::default();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        let reached = hub.broadcast("productExpired", json!({ "code": "P1", "name": "Milk" }));
        assert_eq!(reached, 2);

        let event = first.recv().await.unwrap();
        assert_eq!(event.event, "productExpired");
        assert_eq!(event.payload, json!({ "code": "P1", "name": "Milk" }));

        let event = second.recv().await.unwrap();
        assert_eq!(event.event, "productExpired");
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_is_dropped() {
        let hub = RealtimeHub::default();

        let reached = hub.broadcast("productDeleted", json!("P9"));
        assert_eq!(reached, 0);
        assert_eq!(hub.subscriber_count(), 0);
    }
}

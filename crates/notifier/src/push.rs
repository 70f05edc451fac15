use reqwest::Client;
use serde_json::{Value, json};
use shared::{config::PushConfig, errors::NotifyError};
use tracing::info;

/// Sends push notifications through an Expo-compatible push gateway.
#[derive(Debug, Clone)]
pub struct PushClient {
    http: Client,
    gateway_url: String,
    recipient: String,
}

impl PushClient {
    pub fn new(config: &PushConfig) -> Self {
        Self {
            http: Client::new(),
            gateway_url: config.gateway_url.clone(),
            recipient: config.recipient.clone(),
        }
    }

    pub async fn send(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let message = message_payload(&self.recipient, title, body);

        let response = self
            .http
            .post(&self.gateway_url)
            .json(&message)
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Http(format!(
                "push gateway returned {}",
                response.status()
            )));
        }

        info!("✅ Push notification sent: {title}");

        Ok(())
    }
}

fn message_payload(recipient: &str, title: &str, body: &str) -> Value {
    json!([{
        "to": recipient,
        "sound": "default",
        "title": title,
        "body": body,
        "data": { "title": title, "body": body },
    }])
}

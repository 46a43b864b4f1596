//! Webhook notification channel
//!
//! Hands each email to a mail relay HTTP API via a single POST request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Channel, ChannelError, ChannelResult, DeliveryStatus};
use crate::notifications::Notification;

/// Webhook channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Relay endpoint
    pub url: String,
    /// Sender address placed in the payload
    pub from: String,
    /// Optional authentication token (sent as Bearer token)
    pub auth_token: Option<String>,
    /// Custom headers to include in requests
    #[serde(default)]
    pub headers: std::collections::HashMap<String, String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl WebhookConfig {
    /// Create a new webhook configuration
    pub fn new(url: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            from: from.into(),
            auth_token: None,
            headers: std::collections::HashMap::new(),
            timeout_secs: default_timeout(),
        }
    }

    /// Set authentication token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.url).map_err(|e| format!("Invalid webhook URL: {e}"))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err("Webhook URL must start with http:// or https://".to_string());
        }

        if self.from.trim().is_empty() {
            return Err("Sender address cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Webhook notification channel
///
/// # Payload Format
///
/// ```json
/// {
///   "from": "hr@example.com",
///   "to": "asha@example.com",
///   "subject": "TalentSync Interview Schedule",
///   "html": "<html>...</html>"
/// }
/// ```
///
/// Any 2xx response counts as delivered. Anything else is returned as an
/// error without retrying.
pub struct WebhookChannel {
    config: WebhookConfig,
    client: Client,
}

impl WebhookChannel {
    /// Create a new webhook channel
    pub fn new(config: WebhookConfig) -> ChannelResult<Self> {
        config.validate().map_err(ChannelError::InvalidConfig)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Get the webhook URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Build the webhook payload from a notification
    fn build_payload(&self, notification: &Notification) -> serde_json::Value {
        serde_json::json!({
            "from": self.config.from,
            "to": notification.to,
            "subject": notification.subject,
            "html": notification.html_body,
        })
    }
}

#[async_trait]
impl Channel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, notification: &Notification) -> ChannelResult<DeliveryStatus> {
        let payload = self.build_payload(notification);

        let mut request = self.client.post(&self.config.url);

        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request.json(&payload).send().await?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!(
                recipient = %notification.to,
                status = %status,
                "Webhook relay accepted email"
            );
            return Ok(DeliveryStatus::success_with_message(
                "webhook",
                format!("Delivered to {}", self.config.url),
            ));
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());

        if status.is_server_error() {
            Err(ChannelError::Unavailable(format!("HTTP {status}: {body}")))
        } else {
            Err(ChannelError::Rejected(format!("HTTP {status}: {body}")))
        }
    }
}

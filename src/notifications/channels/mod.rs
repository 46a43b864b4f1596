//! Notification channels for delivering interview schedules
//!
//! A channel accepts one rendered [`Notification`] and makes exactly one
//! delivery attempt. Retrying, queueing and batching are left to callers.

pub mod smtp;
pub mod webhook;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::{SenderConfig, TransportKind};
use crate::notifications::Notification;

pub use smtp::{SmtpChannel, SmtpConfig};
pub use webhook::{WebhookChannel, WebhookConfig};

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Errors that can occur during channel operations
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// SMTP session failed
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Email could not be assembled
    #[error("Message build failed: {0}")]
    Message(#[from] lettre::error::Error),

    /// Recipient or sender address is malformed
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Message body could not be rendered
    #[error("Template error: {0}")]
    Template(String),

    /// Invalid channel configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Remote side refused the message
    #[error("Delivery rejected: {0}")]
    Rejected(String),

    /// Channel temporarily unavailable
    #[error("Channel temporarily unavailable: {0}")]
    Unavailable(String),
}

/// Response from sending a notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryStatus {
    /// Whether the notification was successfully delivered
    pub success: bool,
    /// Channel that delivered (or failed to deliver) the notification
    pub channel: String,
    /// Optional message about the delivery
    pub message: Option<String>,
    /// Timestamp of delivery attempt
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl DeliveryStatus {
    /// Create a successful delivery status
    pub fn success(channel: impl Into<String>) -> Self {
        Self {
            success: true,
            channel: channel.into(),
            message: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create a successful delivery status with a message
    pub fn success_with_message(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            channel: channel.into(),
            message: Some(message.into()),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create a failed delivery status
    pub fn failure(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            channel: channel.into(),
            message: Some(message.into()),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "SUCCESS" } else { "FAILED" };
        write!(f, "[{status}] {}", self.channel)?;
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

/// Trait for notification channels
///
/// `send` makes a single attempt. A failed attempt is returned as `Err` so
/// the caller can record it against the recipient.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Get the channel name
    fn name(&self) -> &str;

    /// Deliver one notification
    async fn send(&self, notification: &Notification) -> ChannelResult<DeliveryStatus>;
}

/// Build the configured transport
pub fn build_channel(sender: &SenderConfig) -> ChannelResult<Arc<dyn Channel>> {
    match sender.transport {
        TransportKind::Smtp => {
            let config = SmtpConfig::new(&sender.smtp_host, &sender.email, &sender.password)
                .with_port(sender.smtp_port)
                .with_display_name(&sender.display_name)
                .with_timeout(sender.timeout_secs);
            Ok(Arc::new(SmtpChannel::new(config)?))
        }
        TransportKind::Webhook => {
            let url = sender.webhook_url.as_deref().ok_or_else(|| {
                ChannelError::InvalidConfig("webhook transport requires webhook_url".to_string())
            })?;
            let mut config = WebhookConfig::new(url, &sender.email).with_timeout(sender.timeout_secs);
            if !sender.password.is_empty() {
                config = config.with_auth_token(&sender.password);
            }
            Ok(Arc::new(WebhookChannel::new(config)?))
        }
    }
}

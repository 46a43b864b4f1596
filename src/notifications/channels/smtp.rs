//! SMTP notification channel
//!
//! Sends HTML email through an implicit-TLS relay (SMTPS, port 465) using
//! login credentials of the fixed sender account.

use async_trait::async_trait;
use lettre::address::Address;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{Channel, ChannelError, ChannelResult, DeliveryStatus};
use crate::notifications::Notification;

/// SMTP channel configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay host
    pub host: String,
    /// Relay port (implicit TLS)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sender address, also the login user
    pub username: String,
    /// Login password
    pub password: String,
    /// Display name shown in the From header
    #[serde(default)]
    pub display_name: Option<String>,
    /// Connection and command timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    465
}

fn default_timeout() -> u64 {
    30
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SmtpConfig {
    /// Create a new SMTP configuration
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            username: username.into(),
            password: password.into(),
            display_name: None,
            timeout_secs: default_timeout(),
        }
    }

    /// Set relay port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set sender display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("SMTP host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }

        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err("SMTP credentials are required".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Mailbox used in the From header
    pub fn sender_mailbox(&self) -> ChannelResult<Mailbox> {
        let address = parse_address(&self.username)?;
        Ok(Mailbox::new(self.display_name.clone(), address))
    }
}

fn parse_address(raw: &str) -> ChannelResult<Address> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| ChannelError::InvalidAddress {
            address: raw.to_string(),
            reason: e.to_string(),
        })
}

/// SMTP notification channel
///
/// # Example
///
/// ```rust,ignore
/// use talentsync::notifications::channels::{SmtpChannel, SmtpConfig};
///
/// let config = SmtpConfig::new("smtp.gmail.com", "hr@example.com", "app-password")
///     .with_display_name("TalentSync Team");
/// let channel = SmtpChannel::new(config)?;
/// channel.send(&notification).await?;
/// ```
pub struct SmtpChannel {
    config: SmtpConfig,
    sender: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpChannel {
    /// Create a new SMTP channel
    ///
    /// No connection is opened until the first send, and every send opens
    /// its own connection.
    pub fn new(config: SmtpConfig) -> ChannelResult<Self> {
        config.validate().map_err(ChannelError::InvalidConfig)?;
        let sender = config.sender_mailbox()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            config,
            sender,
            transport,
        })
    }

    /// Relay address as `host:port`
    pub fn relay(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Assemble the MIME message for a notification
    pub fn build_message(&self, notification: &Notification) -> ChannelResult<Message> {
        let recipient = Mailbox::new(None, parse_address(&notification.to)?);

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(notification.html_body.clone())?;

        Ok(message)
    }
}

#[async_trait]
impl Channel for SmtpChannel {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, notification: &Notification) -> ChannelResult<DeliveryStatus> {
        let message = self.build_message(notification)?;
        let response = self.transport.send(message).await?;

        if !response.is_positive() {
            return Err(ChannelError::Rejected(format!(
                "{}: {}",
                response.code(),
                response.message().collect::<Vec<_>>().join(" ")
            )));
        }

        tracing::debug!(
            recipient = %notification.to,
            relay = %self.relay(),
            "Email accepted by relay"
        );

        Ok(DeliveryStatus::success_with_message(
            "smtp",
            format!("Accepted for {}", notification.to),
        ))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(to: &str) -> Notification {
        Notification {
            to: to.to_string(),
            recipient_name: "Asha".to_string(),
            subject: "TalentSync Interview Schedule".to_string(),
            html_body: "<p>Dear Asha,</p>".to_string(),
        }
    }

    #[test]
    fn test_smtp_config_validation() {
        let valid = SmtpConfig::new("smtp.gmail.com", "hr@example.com", "secret");
        assert!(valid.validate().is_ok());
        assert_eq!(valid.port, 465);

        assert!(SmtpConfig::new("", "hr@example.com", "secret")
            .validate()
            .is_err());
        assert!(SmtpConfig::new("smtp.gmail.com", "hr@example.com", "")
            .validate()
            .is_err());
        assert!(SmtpConfig::new("smtp.gmail.com", "hr@example.com", "secret")
            .with_timeout(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = SmtpConfig::new("smtp.gmail.com", "hr@example.com", "hunter2");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_invalid_sender_rejected() {
        let config = SmtpConfig::new("smtp.gmail.com", "not-an-address", "secret");
        assert!(matches!(
            SmtpChannel::new(config),
            Err(ChannelError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_new_outside_runtime() {
        // Building the transport must not need a reactor
        let config = SmtpConfig::new("smtp.gmail.com", "hr@example.com", "secret");
        let channel = SmtpChannel::new(config).unwrap();
        drop(channel);
    }

    #[tokio::test]
    async fn test_build_message() {
        let config = SmtpConfig::new("smtp.gmail.com", "hr@example.com", "secret")
            .with_display_name("TalentSync Team");
        let channel = SmtpChannel::new(config).unwrap();
        assert_eq!(channel.relay(), "smtp.gmail.com:465");

        let message = channel.build_message(&notification("asha@example.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: TalentSync Interview Schedule"));
        assert!(raw.contains("To: asha@example.com"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn test_bad_recipient_is_an_error() {
        let config = SmtpConfig::new("smtp.gmail.com", "hr@example.com", "secret");
        let channel = SmtpChannel::new(config).unwrap();

        let err = channel.build_message(&notification("broken")).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidAddress { .. }));
        assert!(err.to_string().contains("broken"));
    }
}

//! Candidate notifications
//!
//! Every assignment produced by the allocator is rendered into an email and
//! handed to one delivery channel. Each recipient gets a single best-effort
//! attempt and its outcome is kept as a value.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │                 Notifier                   │
//! │  - MessageComposer (handlebars template)   │
//! │  - bounded concurrent sends                │
//! │  - DeliveryOutcome per assignment          │
//! └────────────────────────────────────────────┘
//!                     │
//!              ┌──────┴──────┐
//!              ▼             ▼
//!        ┌─────────┐   ┌─────────┐
//!        │  SMTP   │   │ Webhook │
//!        │ Channel │   │ Channel │
//!        └─────────┘   └─────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use talentsync::notifications::{MessageComposer, Notifier};
//! use talentsync::notifications::channels::{SmtpChannel, SmtpConfig};
//!
//! let channel = SmtpChannel::new(SmtpConfig::new("smtp.gmail.com", sender, password))?;
//! let notifier = Notifier::new(Arc::new(channel), MessageComposer::new()?);
//!
//! for outcome in notifier.notify_all(&assignments).await {
//!     println!("{} -> {}", outcome.assignment.candidate.name, outcome.status);
//! }
//! ```

pub mod channels;
pub mod message;
mod notifier;

use serde::{Deserialize, Serialize};

// Re-exports
pub use channels::{build_channel, Channel, ChannelError, ChannelResult, DeliveryStatus};
pub use message::MessageComposer;
pub use notifier::{DeliveryOutcome, Notifier, DEFAULT_MAX_CONCURRENT_SENDS};

/// A rendered email ready for a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient address
    pub to: String,
    /// Recipient display name
    pub recipient_name: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}

//! Per-recipient delivery of interview schedules

use futures::stream::{self, StreamExt};
use std::sync::Arc;

use super::channels::{Channel, DeliveryStatus};
use super::message::MessageComposer;
use crate::models::Assignment;

/// Default number of sends in flight at once
pub const DEFAULT_MAX_CONCURRENT_SENDS: usize = 4;

/// Outcome of notifying one assigned candidate
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// The assignment that was announced
    pub assignment: Assignment,
    /// Delivery result
    pub status: DeliveryStatus,
}

impl DeliveryOutcome {
    /// Whether the channel accepted the message
    pub fn is_delivered(&self) -> bool {
        self.status.success
    }

    /// Failure detail, if any
    pub fn error(&self) -> Option<&str> {
        if self.status.success {
            None
        } else {
            self.status.message.as_deref()
        }
    }
}

/// Formats and sends one message per assignment
///
/// Every assignment gets exactly one attempt. Failures are captured in the
/// returned [`DeliveryOutcome`] and never stop the rest of the batch.
pub struct Notifier {
    channel: Arc<dyn Channel>,
    composer: Arc<MessageComposer>,
    max_concurrent_sends: usize,
}

impl Notifier {
    /// Create a notifier
    pub fn new(channel: Arc<dyn Channel>, composer: MessageComposer) -> Self {
        Self {
            channel,
            composer: Arc::new(composer),
            max_concurrent_sends: DEFAULT_MAX_CONCURRENT_SENDS,
        }
    }

    /// Set the number of sends in flight at once (minimum 1)
    pub fn with_max_concurrent_sends(mut self, limit: usize) -> Self {
        self.max_concurrent_sends = limit.max(1);
        self
    }

    /// Channel name
    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// Send limit
    pub fn max_concurrent_sends(&self) -> usize {
        self.max_concurrent_sends
    }

    /// Notify a single assigned candidate
    pub async fn notify(&self, assignment: &Assignment) -> DeliveryOutcome {
        let channel = self.channel.name().to_string();
        let slot = assignment.slot_label();

        let result = match self.composer.compose(assignment) {
            Ok(notification) => self.channel.send(&notification).await,
            Err(e) => Err(e),
        };

        let status = match result {
            Ok(status) if status.success => {
                tracing::info!(
                    recipient = %assignment.candidate.contact,
                    slot = %slot,
                    channel = %channel,
                    "Interview schedule sent"
                );
                status
            }
            Ok(status) => {
                tracing::error!(
                    recipient = %assignment.candidate.contact,
                    slot = %slot,
                    channel = %channel,
                    error = status.message.as_deref().unwrap_or("delivery refused"),
                    "Channel refused interview schedule"
                );
                status
            }
            Err(e) => {
                tracing::error!(
                    recipient = %assignment.candidate.contact,
                    slot = %slot,
                    channel = %channel,
                    error = %e,
                    "Failed to send interview schedule"
                );
                DeliveryStatus::failure(channel, e.to_string())
            }
        };

        DeliveryOutcome {
            assignment: assignment.clone(),
            status,
        }
    }

    /// Notify every assigned candidate
    ///
    /// Up to `max_concurrent_sends` sends run at once. Outcomes are returned
    /// in the same order as `assignments`.
    pub async fn notify_all(&self, assignments: &[Assignment]) -> Vec<DeliveryOutcome> {
        // Indexing keeps the stream free of higher-ranked borrows so the
        // future stays Send
        stream::iter(0..assignments.len())
            .map(|i| self.notify(&assignments[i]))
            .buffered(self.max_concurrent_sends)
            .collect()
            .await
    }
}

//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use talentsync::models::Candidate;
use talentsync::notifications::{
    Channel, ChannelError, ChannelResult, DeliveryStatus, MessageComposer, Notification, Notifier,
};
use talentsync::scheduler::{FixedClock, SlotAllocator};
use talentsync::service::SchedulingService;
use talentsync::storage::CandidateRepository;

/// Channel that records every notification and fails for chosen recipients
#[derive(Default)]
pub struct RecordingChannel {
    failing: HashSet<String>,
    sent: Mutex<Vec<Notification>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send addressed to `recipient`
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            failing: recipients.iter().map(|r| r.to_string()).collect(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Notifications handed to the channel, in completion order
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> ChannelResult<DeliveryStatus> {
        self.sent.lock().unwrap().push(notification.clone());

        if self.failing.contains(&notification.to) {
            return Err(ChannelError::Rejected(format!(
                "550 mailbox unavailable: {}",
                notification.to
            )));
        }

        Ok(DeliveryStatus::success("recording"))
    }
}

/// Monday 2024-06-03 10:00
pub fn monday_morning() -> NaiveDateTime {
    at(2024, 6, 3, 10)
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// `count` candidates ranked 1..=count
pub fn ranked_candidates(count: usize) -> Vec<Candidate> {
    (1..=count)
        .map(|i| Candidate::new(format!("Candidate {i}"), format!("c{i}@example.com"), i as i64))
        .collect()
}

/// Service with the default allocator, a fixed clock and the given channel
pub fn service_with(
    store: Arc<dyn CandidateRepository>,
    channel: Arc<RecordingChannel>,
    now: NaiveDateTime,
) -> SchedulingService {
    let notifier = Notifier::new(channel, MessageComposer::new().unwrap());
    SchedulingService::new(
        store,
        SlotAllocator::default(),
        notifier,
        Arc::new(FixedClock(now)),
    )
}

//! Scheduling service
//!
//! One run reads the whole ranked collection, allocates slots, sends one
//! notification per candidate and folds the per-recipient outcomes into a
//! [`ScheduleSummary`]. The store handle, transport and clock are injected
//! at construction.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::metrics::{self, CollectionScope, RunOutcome};
use crate::models::{
    Assignment, Candidate, FailedEntry, ScheduleSummary, ScheduledEntry, FAILURE_PREFIX,
    SCHEDULED_MESSAGE,
};
use crate::notifications::{build_channel, DeliveryOutcome, MessageComposer, Notifier};
use crate::scheduler::{Calendar, Clock, SlotAllocator};
use crate::storage::SharedCandidateRepository;

/// Message reported to callers when a run fails as a whole
pub fn failure_message(err: &Error) -> String {
    format!("{FAILURE_PREFIX}: {err}")
}

/// Runs interview scheduling against a candidate store
pub struct SchedulingService {
    store: SharedCandidateRepository,
    allocator: SlotAllocator,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
    default_collection: String,
}

impl SchedulingService {
    /// Create a service from its collaborators
    pub fn new(
        store: SharedCandidateRepository,
        allocator: SlotAllocator,
        notifier: Notifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            allocator,
            notifier,
            clock,
            default_collection: crate::config::DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Build the service described by `config` around an open store
    pub fn from_config(config: &Config, store: SharedCandidateRepository) -> Result<Self> {
        let channel = build_channel(&config.sender)?;

        let composer = match &config.message.template_path {
            Some(path) => MessageComposer::with_template(path)?,
            None => MessageComposer::new()?,
        }
        .with_subject(&config.message.subject)
        .with_support_link(&config.message.support_link)
        .with_signature(&config.sender.display_name);

        let notifier = Notifier::new(channel, composer)
            .with_max_concurrent_sends(config.sender.max_concurrent_sends);

        let allocator = config.schedule.allocator()?;
        let clock = config.schedule.clock()?;

        tracing::debug!(
            transport = notifier.channel_name(),
            slots_per_day = allocator.capacity_per_day(),
            "Scheduling service configured"
        );

        Ok(Self::new(store, allocator, notifier, Arc::new(clock))
            .with_default_collection(&config.store.collection))
    }

    /// Set the collection used when a trigger names none
    pub fn with_default_collection(mut self, collection: impl Into<String>) -> Self {
        self.default_collection = collection.into();
        self
    }

    /// Collection used when a trigger names none
    pub fn default_collection(&self) -> &str {
        &self.default_collection
    }

    /// Slot allocator
    pub fn allocator(&self) -> &SlotAllocator {
        &self.allocator
    }

    /// Calendar the allocator would use for `date`
    pub fn calendar(&self, date: NaiveDate) -> Calendar {
        self.allocator.calendar_for(date)
    }

    /// Read the whole collection, ascending by rank
    pub async fn fetch_candidates(&self, collection: &str) -> Result<Vec<Candidate>> {
        let store = Arc::clone(&self.store);
        let collection = collection.to_string();

        let candidates = tokio::task::spawn_blocking(move || store.fetch_ranked(&collection))
            .await
            .map_err(|e| Error::with_source("Candidate fetch task failed", e))??;

        Ok(candidates)
    }

    /// Allocate slots for already ranked candidates at the current instant
    pub fn plan(&self, candidates: &[Candidate]) -> Vec<Assignment> {
        self.allocator.allocate(candidates, self.clock.now())
    }

    /// Run one scheduling pass over `collection`
    pub async fn run(&self, collection: &str) -> Result<ScheduleSummary> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("schedule_run", %run_id, collection);

        async {
            let scope = if collection == self.default_collection {
                CollectionScope::Default
            } else {
                CollectionScope::Other
            };
            let _timer = metrics::start_run_timer(scope);

            let candidates = match self.fetch_candidates(collection).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read candidates");
                    metrics::record_run(RunOutcome::Failed, 0);
                    return Err(e);
                }
            };

            if candidates.is_empty() {
                tracing::warn!("No candidates found to schedule interviews");
                metrics::record_run(RunOutcome::Empty, 0);
                return Ok(ScheduleSummary::empty());
            }

            let assignments = self.plan(&candidates);
            if let Some(first) = assignments.first() {
                tracing::info!(
                    candidates = candidates.len(),
                    first_day = %first.slot.date(),
                    "Allocated interview slots"
                );
            }

            let outcomes = self.notifier.notify_all(&assignments).await;
            let summary = self.summarize(outcomes);

            tracing::info!(
                scheduled = summary.scheduled.len(),
                failed = summary.failed.len(),
                "Scheduling run finished"
            );
            metrics::record_run(RunOutcome::Completed, summary.scheduled.len());

            Ok(summary)
        }
        .instrument(span)
        .await
    }

    /// Run against the default collection
    pub async fn run_default(&self) -> Result<ScheduleSummary> {
        self.run(&self.default_collection).await
    }

    fn summarize(&self, outcomes: Vec<DeliveryOutcome>) -> ScheduleSummary {
        let mut summary = ScheduleSummary {
            message: SCHEDULED_MESSAGE.to_string(),
            scheduled: Vec::with_capacity(outcomes.len()),
            failed: Vec::new(),
        };

        for outcome in outcomes {
            metrics::record_delivery(self.notifier.channel_name(), outcome.is_delivered());

            if outcome.is_delivered() {
                summary
                    .scheduled
                    .push(ScheduledEntry::from(&outcome.assignment));
            } else {
                let error = outcome.error().unwrap_or("delivery failed").to_string();
                let entry = ScheduledEntry::from(&outcome.assignment);
                summary.failed.push(FailedEntry {
                    name: entry.name,
                    contact: entry.contact,
                    slot_label: entry.slot_label,
                    error,
                });
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{Channel, ChannelResult, DeliveryStatus, Notification};
    use crate::scheduler::FixedClock;
    use crate::storage::MockCandidateRepository;
    use async_trait::async_trait;

    struct AcceptAll;

    #[async_trait]
    impl Channel for AcceptAll {
        fn name(&self) -> &str {
            "accept-all"
        }

        async fn send(&self, _notification: &Notification) -> ChannelResult<DeliveryStatus> {
            Ok(DeliveryStatus::success("accept-all"))
        }
    }

    fn service(store: MockCandidateRepository) -> SchedulingService {
        let now = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let notifier = Notifier::new(Arc::new(AcceptAll), MessageComposer::new().unwrap());
        SchedulingService::new(
            Arc::new(store),
            SlotAllocator::default(),
            notifier,
            Arc::new(FixedClock(now)),
        )
    }

    #[tokio::test]
    async fn test_run_reports_every_candidate() {
        let store = MockCandidateRepository::with_candidates(
            "selected",
            vec![
                Candidate::new("Ravi", "ravi@example.com", 2),
                Candidate::new("Asha", "asha@example.com", 1),
            ],
        );

        let summary = service(store).run_default().await.unwrap();

        assert_eq!(summary.message, SCHEDULED_MESSAGE);
        assert_eq!(summary.scheduled[0].name, "Asha");
        assert_eq!(summary.scheduled[0].slot_label, "2024-06-05 09:00 IST");
        assert_eq!(summary.scheduled[1].name, "Ravi");
        assert_eq!(summary.scheduled[1].slot_label, "2024-06-05 09:30 IST");
        assert!(summary.failed.is_empty());
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let summary = service(MockCandidateRepository::new())
            .run("selected")
            .await
            .unwrap();
        assert_eq!(summary, ScheduleSummary::empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_aggregate_error() {
        let store = MockCandidateRepository::new();
        store.fail_with("connection refused");

        let err = service(store).run("selected").await.unwrap_err();
        let message = failure_message(&err);
        assert!(message.starts_with("Failed to schedule interviews: "));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_run_future_is_send() {
        fn assert_send<T: Send>(_: T) {}

        let svc = service(MockCandidateRepository::new());
        assert_send(svc.run("selected"));
        assert_send(svc.run_default());
    }

    #[tokio::test]
    async fn test_caller_collections_share_one_duration_series() {
        let _ = metrics::init_metrics();
        let svc = service(MockCandidateRepository::new());

        for i in 0..25 {
            svc.run(&format!("junk-{i}")).await.unwrap();
        }
        svc.run_default().await.unwrap();

        let text = metrics::encode_metrics().unwrap();
        let series = text
            .lines()
            .filter(|line| line.starts_with("talentsync_run_duration_seconds_count"))
            .count();
        assert!(series <= 2, "unexpected duration series: {series}");
        assert!(!text.contains("junk-"));
    }

    #[test]
    fn test_default_collection() {
        let svc = service(MockCandidateRepository::new()).with_default_collection("waitlist");
        assert_eq!(svc.default_collection(), "waitlist");
    }
}

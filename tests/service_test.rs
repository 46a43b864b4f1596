//! Scheduling run integration tests

mod common;

use std::sync::Arc;

use common::{monday_morning, ranked_candidates, service_with, RecordingChannel};
use talentsync::models::{Candidate, NO_CANDIDATES_MESSAGE, SCHEDULED_MESSAGE};
use talentsync::service::failure_message;
use talentsync::storage::{CandidateRepository, MockCandidateRepository, SqliteCandidateRepository};

// ============================================================================
// Run Outcomes
// ============================================================================

#[tokio::test]
async fn test_empty_collection_sends_nothing() {
    let channel = Arc::new(RecordingChannel::new());
    let service = service_with(
        Arc::new(MockCandidateRepository::new()),
        Arc::clone(&channel),
        monday_morning(),
    );

    let summary = service.run("selected").await.unwrap();

    assert_eq!(summary.message, NO_CANDIDATES_MESSAGE);
    assert!(summary.scheduled.is_empty());
    assert!(summary.failed.is_empty());
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn test_every_candidate_is_notified_in_rank_order() {
    let store = MockCandidateRepository::with_candidates("selected", ranked_candidates(20));
    let channel = Arc::new(RecordingChannel::new());
    let service = service_with(Arc::new(store), Arc::clone(&channel), monday_morning());

    let summary = service.run("selected").await.unwrap();

    assert_eq!(summary.message, SCHEDULED_MESSAGE);
    assert_eq!(summary.scheduled.len(), 20);
    assert!(summary.failed.is_empty());
    assert_eq!(channel.sent().len(), 20);

    // Monday + 2 = Wednesday, 17 slots, then Thursday
    assert_eq!(summary.scheduled[0].name, "Candidate 1");
    assert_eq!(summary.scheduled[0].slot_label, "2024-06-05 09:00 IST");
    assert_eq!(summary.scheduled[16].slot_label, "2024-06-05 17:00 IST");
    assert_eq!(summary.scheduled[17].slot_label, "2024-06-06 09:00 IST");
    assert_eq!(summary.scheduled[19].name, "Candidate 20");
}

#[tokio::test]
async fn test_message_carries_name_and_slot() {
    let store = MockCandidateRepository::with_candidates(
        "selected",
        vec![Candidate::new("Asha", "asha@example.com", 1)],
    );
    let channel = Arc::new(RecordingChannel::new());
    let service = service_with(Arc::new(store), Arc::clone(&channel), monday_morning());

    service.run("selected").await.unwrap();

    let sent = channel.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "asha@example.com");
    assert_eq!(sent[0].subject, "TalentSync Interview Schedule");
    assert!(sent[0].html_body.contains("Dear Asha,"));
    assert!(sent[0].html_body.contains("2024-06-05 09:00 IST"));
}

#[tokio::test]
async fn test_single_delivery_failure_is_isolated() {
    let store = MockCandidateRepository::with_candidates("selected", ranked_candidates(3));
    let channel = Arc::new(RecordingChannel::failing_for(&["c2@example.com"]));
    let service = service_with(Arc::new(store), Arc::clone(&channel), monday_morning());

    let summary = service.run("selected").await.unwrap();

    // All three were attempted
    assert_eq!(channel.sent().len(), 3);

    let scheduled: Vec<_> = summary.scheduled.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(scheduled, vec!["Candidate 1", "Candidate 3"]);

    // The failed candidate keeps the slot it was allocated
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].name, "Candidate 2");
    assert_eq!(summary.failed[0].slot_label, "2024-06-05 09:30 IST");
    assert!(summary.failed[0].error.contains("550"));
    assert_eq!(summary.scheduled[1].slot_label, "2024-06-05 10:00 IST");
}

#[tokio::test]
async fn test_store_failure_aborts_run() {
    let store = MockCandidateRepository::with_candidates("selected", ranked_candidates(3));
    store.fail_with("connection refused");
    let channel = Arc::new(RecordingChannel::new());
    let service = service_with(Arc::new(store), Arc::clone(&channel), monday_morning());

    let err = service.run("selected").await.unwrap_err();

    assert!(failure_message(&err).starts_with("Failed to schedule interviews: "));
    assert!(failure_message(&err).contains("connection refused"));
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn test_run_against_sqlite_store() {
    let store = SqliteCandidateRepository::in_memory().unwrap();
    store
        .insert_all(
            "selected",
            &[
                Candidate::new("Third", "third@example.com", 3),
                Candidate::new("First", "first@example.com", 1),
                Candidate::new("Second", "second@example.com", 2),
            ],
        )
        .unwrap();

    let channel = Arc::new(RecordingChannel::new());
    let service = service_with(Arc::new(store), channel, monday_morning());

    let summary = service.run_default().await.unwrap();
    let names: Vec<_> = summary.scheduled.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_repeated_runs_allocate_identically() {
    let store = Arc::new(MockCandidateRepository::with_candidates(
        "selected",
        ranked_candidates(5),
    ));
    let channel = Arc::new(RecordingChannel::new());
    let service = service_with(store, Arc::clone(&channel), monday_morning());

    let first = service.run("selected").await.unwrap();
    let second = service.run("selected").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(channel.sent().len(), 10);
}

//! Core data structures for talentsync
//!
//! This module defines the candidate records read from the store, the
//! slot assignments produced by the allocator, and the run summary returned
//! to callers.

use serde::{Deserialize, Serialize};

use crate::scheduler::calendar::TimeSlot;

/// Summary message when the collection is empty
pub const NO_CANDIDATES_MESSAGE: &str = "No candidates found to schedule interviews.";

/// Summary message after a completed run
pub const SCHEDULED_MESSAGE: &str = "Interviews scheduled and emails sent";

/// Prefix of the aggregate failure message
pub const FAILURE_PREFIX: &str = "Failed to schedule interviews";

// ============================================================================
// Candidate
// ============================================================================

/// A ranked candidate as stored in the candidate collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name
    pub name: String,

    /// Contact address (email)
    #[serde(alias = "email")]
    pub contact: String,

    /// Lower ranks are scheduled first
    pub rank: i64,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(name: impl Into<String>, contact: impl Into<String>, rank: i64) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            rank,
        }
    }
}

// ============================================================================
// Assignment
// ============================================================================

/// A candidate paired with exactly one interview slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Zero-based position in the ranked input
    pub position: usize,

    /// Assigned candidate
    pub candidate: Candidate,

    /// Assigned slot
    pub slot: TimeSlot,
}

impl Assignment {
    /// Rendered slot label
    pub fn slot_label(&self) -> String {
        self.slot.label()
    }
}

// ============================================================================
// Run Summary
// ============================================================================

/// One successfully notified candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub name: String,
    pub contact: String,
    pub slot_label: String,
}

impl From<&Assignment> for ScheduledEntry {
    fn from(assignment: &Assignment) -> Self {
        Self {
            name: assignment.candidate.name.clone(),
            contact: assignment.candidate.contact.clone(),
            slot_label: assignment.slot_label(),
        }
    }
}

/// A candidate whose notification could not be delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedEntry {
    pub name: String,
    pub contact: String,
    pub slot_label: String,
    pub error: String,
}

/// Result of one scheduling run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Human readable outcome
    pub message: String,

    /// Notified candidates, in rank order
    pub scheduled: Vec<ScheduledEntry>,

    /// Candidates whose notification failed, in rank order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedEntry>,
}

impl ScheduleSummary {
    /// Summary for an empty candidate collection
    pub fn empty() -> Self {
        Self {
            message: NO_CANDIDATES_MESSAGE.to_string(),
            scheduled: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Number of candidates handled, delivered or not
    pub fn total(&self) -> usize {
        self.scheduled.len() + self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_candidate_accepts_email_field() {
        let json = r#"{"name": "Asha", "email": "asha@example.com", "rank": 1}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate, Candidate::new("Asha", "asha@example.com", 1));
    }

    #[test]
    fn test_scheduled_entry_from_assignment() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let assignment = Assignment {
            position: 0,
            candidate: Candidate::new("Ravi", "ravi@example.com", 2),
            slot: TimeSlot::new(start, "IST"),
        };

        let entry = ScheduledEntry::from(&assignment);
        assert_eq!(entry.slot_label, "2024-06-03 09:30 IST");
        assert_eq!(entry.contact, "ravi@example.com");
    }

    #[test]
    fn test_summary_serialization_omits_empty_failures() {
        let json = serde_json::to_value(ScheduleSummary::empty()).unwrap();
        assert_eq!(json["message"], NO_CANDIDATES_MESSAGE);
        assert_eq!(json["scheduled"], serde_json::json!([]));
        assert!(json.get("failed").is_none());
    }
}

//! talentsync - Interview slot scheduler
//!
//! Assigns ranked candidates to interview slots on business days and
//! notifies each candidate of their slot.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`scheduler`] - Working-hours calendars, business days and slot allocation
//! - [`models`] - Candidates, assignments and run summaries
//! - [`storage`] - Ranked candidate store (SQLite)
//! - [`notifications`] - Message rendering and delivery channels
//! - [`service`] - One scheduling run, end to end
//! - [`server`] - HTTP trigger and auxiliary endpoints
//! - [`config`] - Configuration management and settings
//! - [`metrics`] - Prometheus metrics
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use talentsync::config::Config;
//! use talentsync::service::SchedulingService;
//! use talentsync::storage::SqliteCandidateRepository;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let store = Arc::new(SqliteCandidateRepository::new(&config.store.sqlite_path)?);
//!     let service = SchedulingService::from_config(&config, store)?;
//!     let summary = service.run_default().await?;
//!     println!("{}", summary.message);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod notifications;
pub mod scheduler;
pub mod server;
pub mod service;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::{Assignment, Candidate, ScheduleSummary};
    pub use crate::scheduler::{SlotAllocator, TimeSlot, WorkingHours};
    pub use crate::service::SchedulingService;
    pub use crate::storage::{CandidateRepository, SqliteCandidateRepository};
}

// Direct re-exports for convenience
pub use models::{Assignment, Candidate, ScheduleSummary};

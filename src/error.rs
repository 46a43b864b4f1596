//! Unified error handling for the talentsync crate
//!
//! This module provides a unified error type that consolidates the
//! domain-specific errors raised during a scheduling run into a single
//! `Error` enum, while keeping the domain errors available on their own.
//!
//! # Usage
//!
//! ```rust,ignore
//! use talentsync::error::{Error, StoreError};
//!
//! fn describe(err: &Error) -> &'static str {
//!     match err {
//!         Error::Store(StoreError::Unavailable(_)) => "store unreachable",
//!         Error::Store(_) => "store failure",
//!         _ => "other failure",
//!     }
//! }
//! ```

use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::notifications::channels::ChannelError;
pub use crate::scheduler::error::SchedulerError;
pub use crate::storage::StoreError;

/// Unified error type for the talentsync crate
#[derive(Error, Debug)]
pub enum Error {
    /// Candidate store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Scheduler configuration errors
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Message rendering and delivery errors
    #[error("Notification error: {0}")]
    Notification(#[from] ChannelError),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

//! Candidate data store
//!
//! The store is an external collaborator: it owns the candidate records and
//! the scheduler only ever reads a whole ranked collection at the start of a
//! run. The handle is opened once at service start and passed in explicitly.

pub mod repository;

pub use repository::{
    create_sqlite_repository, CandidateRepository, MockCandidateRepository,
    SharedCandidateRepository, SqliteCandidateRepository,
};

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by candidate stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem failure while opening the store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection name is empty
    #[error("Invalid collection name: '{0}'")]
    InvalidCollection(String),

    /// Store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A previous panic poisoned the connection lock
    #[error("Store connection lock poisoned")]
    LockPoisoned,
}

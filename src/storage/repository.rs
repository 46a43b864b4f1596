//! Repository Pattern for the candidate store
//!
//! The scheduler only needs one read: every candidate of a named collection,
//! ordered by ascending rank, ties kept in insertion order. The trait keeps
//! that contract independent from the backend so tests can swap in the
//! in-memory implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             SchedulingService               │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │            CandidateRepository              │
//! └─────────────────────────────────────────────┘
//!              │                     │
//!              ▼                     ▼
//! ┌─────────────────────┐ ┌─────────────────────┐
//! │       SQLite        │ │        Mock         │
//! │   Implementation    │ │   Implementation    │
//! └─────────────────────┘ └─────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use talentsync::storage::{CandidateRepository, SqliteCandidateRepository};
//!
//! let repo = SqliteCandidateRepository::new("data/candidates.db")?;
//! let ranked = repo.fetch_ranked("selected")?;
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use rusqlite::{params, Connection};

use super::{StoreError, StoreResult};
use crate::models::Candidate;

// ============================================================================
// Repository Trait
// ============================================================================

/// Read access to ranked candidate collections
pub trait CandidateRepository: Send + Sync {
    /// Every candidate of `collection`, ascending by rank, ties in insertion order
    fn fetch_ranked(&self, collection: &str) -> StoreResult<Vec<Candidate>>;

    /// Append a candidate to `collection`
    fn insert(&self, collection: &str, candidate: &Candidate) -> StoreResult<()>;

    /// Number of candidates in `collection`
    fn count(&self, collection: &str) -> StoreResult<usize>;

    /// Append several candidates, preserving their order
    fn insert_all(&self, collection: &str, candidates: &[Candidate]) -> StoreResult<usize> {
        for candidate in candidates {
            self.insert(collection, candidate)?;
        }
        Ok(candidates.len())
    }
}

/// Shared repository handle
pub type SharedCandidateRepository = Arc<dyn CandidateRepository>;

fn check_collection(collection: &str) -> StoreResult<()> {
    if collection.trim().is_empty() {
        return Err(StoreError::InvalidCollection(collection.to_string()));
    }
    Ok(())
}

// ============================================================================
// SQLite Implementation
// ============================================================================

/// SQLite implementation of CandidateRepository
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection.
pub struct SqliteCandidateRepository {
    conn: Mutex<Connection>,
}

impl SqliteCandidateRepository {
    /// Open (or create) a SQLite candidate store
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;

        tracing::info!(path = %path.display(), "Candidate store opened");
        Ok(repo)
    }

    /// Create in-memory repository (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;
        Ok(repo)
    }

    /// Close the underlying connection
    pub fn close(self) -> StoreResult<()> {
        let conn = self.conn.into_inner().map_err(|_| StoreError::LockPoisoned)?;
        conn.close().map_err(|(_, e)| StoreError::Database(e))?;
        tracing::info!("Candidate store closed");
        Ok(())
    }

    fn connection(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Create database schema
    fn create_schema(&self) -> StoreResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS candidates (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    collection TEXT NOT NULL,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    rank INTEGER NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_candidates_collection_rank
                    ON candidates(collection, rank, id);
                "#,
        )?;

        Ok(())
    }
}

impl CandidateRepository for SqliteCandidateRepository {
    fn fetch_ranked(&self, collection: &str) -> StoreResult<Vec<Candidate>> {
        check_collection(collection)?;

        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT name, email, rank FROM candidates
             WHERE collection = ?1
             ORDER BY rank ASC, id ASC",
        )?;

        let candidates = stmt
            .query_map(params![collection], |row| {
                Ok(Candidate {
                    name: row.get(0)?,
                    contact: row.get(1)?,
                    rank: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(candidates)
    }

    fn insert(&self, collection: &str, candidate: &Candidate) -> StoreResult<()> {
        check_collection(collection)?;

        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO candidates (collection, name, email, rank) VALUES (?1, ?2, ?3, ?4)",
            params![collection, candidate.name, candidate.contact, candidate.rank],
        )?;

        Ok(())
    }

    fn count(&self, collection: &str) -> StoreResult<usize> {
        check_collection(collection)?;

        let conn = self.connection()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM candidates WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }

    fn insert_all(&self, collection: &str, candidates: &[Candidate]) -> StoreResult<usize> {
        check_collection(collection)?;

        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO candidates (collection, name, email, rank) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for candidate in candidates {
                stmt.execute(params![
                    collection,
                    candidate.name,
                    candidate.contact,
                    candidate.rank
                ])?;
            }
        }
        tx.commit()?;

        Ok(candidates.len())
    }
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

/// In-memory mock implementation of CandidateRepository
///
/// Can be switched into a failing mode to exercise store outages.
pub struct MockCandidateRepository {
    collections: RwLock<HashMap<String, Vec<Candidate>>>,
    failure: RwLock<Option<String>>,
}

impl MockCandidateRepository {
    /// Create new mock repository
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
        }
    }

    /// Create a mock holding `candidates` in `collection`
    pub fn with_candidates(collection: &str, candidates: Vec<Candidate>) -> Self {
        let repo = Self::new();
        if let Ok(mut collections) = repo.collections.write() {
            collections.insert(collection.to_string(), candidates);
        }
        repo
    }

    /// Make every subsequent call fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut failure) = self.failure.write() {
            *failure = Some(message.into());
        }
    }

    fn check_failure(&self) -> StoreResult<()> {
        let failure = self.failure.read().map_err(|_| StoreError::LockPoisoned)?;
        match failure.as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockCandidateRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateRepository for MockCandidateRepository {
    fn fetch_ranked(&self, collection: &str) -> StoreResult<Vec<Candidate>> {
        check_collection(collection)?;
        self.check_failure()?;

        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut candidates = collections.get(collection).cloned().unwrap_or_default();
        // Stable sort keeps insertion order for equal ranks
        candidates.sort_by_key(|c| c.rank);
        Ok(candidates)
    }

    fn insert(&self, collection: &str, candidate: &Candidate) -> StoreResult<()> {
        check_collection(collection)?;
        self.check_failure()?;

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(candidate.clone());
        Ok(())
    }

    fn count(&self, collection: &str) -> StoreResult<usize> {
        check_collection(collection)?;
        self.check_failure()?;

        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

/// Open a SQLite repository as a shared handle
pub fn create_sqlite_repository(path: impl AsRef<Path>) -> StoreResult<SharedCandidateRepository> {
    Ok(Arc::new(SqliteCandidateRepository::new(path)?))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repos() -> Vec<Box<dyn CandidateRepository>> {
        vec![
            Box::new(SqliteCandidateRepository::in_memory().unwrap()),
            Box::new(MockCandidateRepository::new()),
        ]
    }

    #[test]
    fn test_fetch_ranked_orders_by_rank() {
        for repo in create_test_repos() {
            repo.insert("selected", &Candidate::new("C", "c@example.com", 3))
                .unwrap();
            repo.insert("selected", &Candidate::new("A", "a@example.com", 1))
                .unwrap();
            repo.insert("selected", &Candidate::new("B", "b@example.com", 2))
                .unwrap();

            let names: Vec<_> = repo
                .fetch_ranked("selected")
                .unwrap()
                .into_iter()
                .map(|c| c.name)
                .collect();
            assert_eq!(names, vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn test_equal_ranks_keep_insertion_order() {
        for repo in create_test_repos() {
            let batch = vec![
                Candidate::new("second-rank-first", "x@example.com", 2),
                Candidate::new("tie-1", "t1@example.com", 1),
                Candidate::new("tie-2", "t2@example.com", 1),
                Candidate::new("tie-3", "t3@example.com", 1),
            ];
            assert_eq!(repo.insert_all("selected", &batch).unwrap(), 4);

            let names: Vec<_> = repo
                .fetch_ranked("selected")
                .unwrap()
                .into_iter()
                .map(|c| c.name)
                .collect();
            assert_eq!(
                names,
                vec!["tie-1", "tie-2", "tie-3", "second-rank-first"]
            );
        }
    }

    #[test]
    fn test_collections_are_isolated() {
        for repo in create_test_repos() {
            repo.insert("selected", &Candidate::new("A", "a@example.com", 1))
                .unwrap();
            repo.insert("waitlist", &Candidate::new("B", "b@example.com", 1))
                .unwrap();

            assert_eq!(repo.count("selected").unwrap(), 1);
            assert_eq!(repo.count("waitlist").unwrap(), 1);
            assert!(repo.fetch_ranked("unknown").unwrap().is_empty());
        }
    }

    #[test]
    fn test_empty_collection_name_rejected() {
        for repo in create_test_repos() {
            assert!(matches!(
                repo.fetch_ranked("  "),
                Err(StoreError::InvalidCollection(_))
            ));
        }
    }

    #[test]
    fn test_mock_failure_mode() {
        let repo = MockCandidateRepository::with_candidates(
            "selected",
            vec![Candidate::new("A", "a@example.com", 1)],
        );
        assert_eq!(repo.count("selected").unwrap(), 1);

        repo.fail_with("connection refused");
        let err = repo.fetch_ranked("selected").unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_sqlite_close() {
        let repo = SqliteCandidateRepository::in_memory().unwrap();
        assert!(repo.close().is_ok());
    }
}

//! On-disk candidate store tests

use talentsync::models::Candidate;
use talentsync::storage::{
    create_sqlite_repository, CandidateRepository, SqliteCandidateRepository, StoreError,
};
use tempfile::TempDir;

#[test]
fn test_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data").join("talentsync.db");

    let store = SqliteCandidateRepository::new(&path).unwrap();
    assert!(path.exists());
    assert_eq!(store.count("selected").unwrap(), 0);
}

#[test]
fn test_candidates_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("talentsync.db");

    {
        let store = SqliteCandidateRepository::new(&path).unwrap();
        let inserted = store
            .insert_all(
                "selected",
                &[
                    Candidate::new("Ravi", "ravi@example.com", 2),
                    Candidate::new("Asha", "asha@example.com", 1),
                ],
            )
            .unwrap();
        assert_eq!(inserted, 2);
        store.close().unwrap();
    }

    let store = create_sqlite_repository(&path).unwrap();
    let candidates = store.fetch_ranked("selected").unwrap();
    let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Asha", "Ravi"]);
}

#[test]
fn test_collections_share_one_file() {
    let dir = TempDir::new().unwrap();
    let store = SqliteCandidateRepository::new(dir.path().join("talentsync.db")).unwrap();

    store
        .insert("selected", &Candidate::new("Asha", "asha@example.com", 1))
        .unwrap();
    store
        .insert("waitlist", &Candidate::new("Ravi", "ravi@example.com", 1))
        .unwrap();

    assert_eq!(store.count("selected").unwrap(), 1);
    assert_eq!(store.count("waitlist").unwrap(), 1);
    assert!(store.fetch_ranked("archived").unwrap().is_empty());
}

#[test]
fn test_blank_collection_is_rejected() {
    let store = SqliteCandidateRepository::in_memory().unwrap();

    let err = store.fetch_ranked(" ").unwrap_err();
    assert!(matches!(err, StoreError::InvalidCollection(_)));
}

#[test]
fn test_negative_and_large_ranks_sort_numerically() {
    let store = SqliteCandidateRepository::in_memory().unwrap();
    store
        .insert_all(
            "selected",
            &[
                Candidate::new("Ten", "ten@example.com", 10),
                Candidate::new("Two", "two@example.com", 2),
                Candidate::new("Minus", "minus@example.com", -1),
            ],
        )
        .unwrap();

    let names: Vec<_> = store
        .fetch_ranked("selected")
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Minus", "Two", "Ten"]);
}

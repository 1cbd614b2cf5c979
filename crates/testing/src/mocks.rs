//! Mock implementations of the submission store.
//!
//! Provides in-memory mocks for testing without touching the filesystem.

use parking_lot::RwLock;
use seqbench_domain::scope::{fold_path, validate_dataset, validate_segment};
use seqbench_domain::{LedgerResult, Scope, StoreError, SubmissionId, SubmissionRecord};
use seqbench_infrastructure::{SubmissionLocation, SubmissionStore};
use std::path::PathBuf;
use std::sync::Arc;

/// In-memory submission store
///
/// Mirrors the filesystem store's contract: scopes are validated, loads are
/// ascending by timestamp and a missing scope is an empty result.
#[derive(Clone, Default)]
pub struct InMemorySubmissionStore {
    records: Arc<RwLock<Vec<SubmissionRecord>>>,
    fail_scan: bool,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `records`
    pub fn with_records(records: impl IntoIterator<Item = SubmissionRecord>) -> Self {
        let store = Self::new();
        store.records.write().extend(records);
        store
    }

    /// A store whose `scan_all` behaves like a missing root
    pub fn missing_root() -> Self {
        Self {
            fail_scan: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl SubmissionStore for InMemorySubmissionStore {
    fn insert(&self, record: &SubmissionRecord) -> LedgerResult<SubmissionLocation> {
        let scope = Scope::new(
            record.dataset.as_str(),
            record.fold.as_str(),
            record.user.as_str(),
        )?;
        let id = SubmissionId::generate(&record.timestamp);
        let path = PathBuf::from("memory")
            .join(scope.relative_path())
            .join(id.file_name());
        self.records.write().push(record.clone());
        Ok(SubmissionLocation { id, path })
    }

    fn load(
        &self,
        dataset: &str,
        fold: &str,
        user: Option<&str>,
    ) -> LedgerResult<Vec<SubmissionRecord>> {
        validate_dataset(dataset)?;
        validate_segment("fold", fold)?;
        if let Some(user) = user {
            validate_segment("user", user)?;
        }

        let mut records: Vec<SubmissionRecord> = self
            .records
            .read()
            .iter()
            .filter(|r| r.dataset == dataset && r.fold == fold)
            .filter(|r| user.map_or(true, |u| r.user == u))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(records)
    }

    fn scan_all(&self) -> LedgerResult<Vec<SubmissionRecord>> {
        if self.fail_scan {
            return Err(StoreError::RootNotFound(PathBuf::from("memory")).into());
        }
        let mut records = self.records.read().clone();
        records.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| fold_path(&a.dataset, &a.fold).cmp(&fold_path(&b.dataset, &b.fold)))
        });
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{alice_history, TEST_DATASET, TEST_FOLD};

    #[test]
    fn test_in_memory_store_load_filters() {
        let store = InMemorySubmissionStore::with_records(alice_history());
        assert_eq!(store.count(), 3);
        assert_eq!(store.load(TEST_DATASET, TEST_FOLD, Some("alice")).unwrap().len(), 3);
        assert!(store.load(TEST_DATASET, TEST_FOLD, Some("bob")).unwrap().is_empty());
        assert!(store.load(TEST_DATASET, "7", None).unwrap().is_empty());
    }

    #[test]
    fn test_in_memory_store_rejects_bad_scope() {
        let store = InMemorySubmissionStore::new();
        let mut record = alice_history().remove(0);
        record.fold = "..".to_string();
        assert!(store.insert(&record).is_err());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_missing_root() {
        assert!(InMemorySubmissionStore::missing_root().scan_all().is_err());
    }
}

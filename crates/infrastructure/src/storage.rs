//! Storage module - filesystem submission ledger
//!
//! Submissions are stored one JSON document per file under
//! `<root>/<dataset>/<fold>/<user>/<submission-id>.json`. Entries are created
//! with create-new semantics and never rewritten, so the directory tree is an
//! append-only ledger that other tools can read directly.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use seqbench_common::datetime::{normalize_timestamp, now_timestamp};
use seqbench_domain::identifiers::SUBMISSION_EXTENSION;
use seqbench_domain::scope::{fold_path, validate_dataset, validate_segment};
use seqbench_domain::{
    LedgerResult, NewSubmission, Scope, StoreError, SubmissionId, SubmissionRecord,
};
use tracing::{debug, info, instrument, warn};

/// Number of fresh identifiers tried before a save gives up.
const MAX_SAVE_ATTEMPTS: usize = 8;

/// Where a saved submission ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionLocation {
    /// Identifier of the stored entry
    pub id: SubmissionId,
    /// Full path of the stored entry
    pub path: PathBuf,
}

/// Storage provider trait for the submission ledger.
pub trait SubmissionStore {
    /// Persist an already timestamped record as a new entry.
    fn insert(&self, record: &SubmissionRecord) -> LedgerResult<SubmissionLocation>;

    /// Load the records of a `dataset/fold` scope, optionally restricted to
    /// one user, ascending by timestamp. A scope with no entries yields an
    /// empty list.
    fn load(
        &self,
        dataset: &str,
        fold: &str,
        user: Option<&str>,
    ) -> LedgerResult<Vec<SubmissionRecord>>;

    /// Load every record in the ledger.
    fn scan_all(&self) -> LedgerResult<Vec<SubmissionRecord>>;

    /// Stamp a draft with the current time and persist it.
    fn save(&self, submission: NewSubmission) -> LedgerResult<SubmissionLocation> {
        let record = submission.into_record(now_timestamp());
        self.insert(&record)
    }
}

/// Filesystem implementation of [`SubmissionStore`].
#[derive(Debug, Clone)]
pub struct FileSubmissionStore {
    root: PathBuf,
    strict_load: bool,
}

impl FileSubmissionStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            strict_load: false,
        }
    }

    /// Fail on malformed entries instead of skipping them.
    pub fn with_strict_load(mut self, strict_load: bool) -> Self {
        self.strict_load = strict_load;
        self
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether malformed entries are errors.
    pub fn is_strict(&self) -> bool {
        self.strict_load
    }

    fn scope_dir(&self, scope: &Scope) -> PathBuf {
        self.root.join(scope.relative_path())
    }

    /// Read the entries of one user directory in file-name order.
    fn read_user_dir(&self, dir: &Path, records: &mut Vec<SubmissionRecord>) -> LedgerResult<()> {
        for path in sorted_entries(dir)? {
            if path.is_file() && has_submission_extension(&path) {
                if let Some(record) = self.read_entry(&path)? {
                    records.push(record);
                }
            }
        }
        Ok(())
    }

    /// Parse one entry. Returns `None` when a malformed entry is skipped.
    fn read_entry(&self, path: &Path) -> LedgerResult<Option<SubmissionRecord>> {
        let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        match serde_json::from_reader::<_, SubmissionRecord>(BufReader::new(file)) {
            Ok(mut record) => {
                record.timestamp = normalize_timestamp(&record.timestamp);
                Ok(Some(record))
            }
            Err(e) if self.strict_load => Err(StoreError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping malformed submission");
                Ok(None)
            }
        }
    }

    /// Collect every entry below `dir`, depth first in name order.
    fn walk(&self, dir: &Path, records: &mut Vec<SubmissionRecord>) -> LedgerResult<()> {
        for path in sorted_entries(dir)? {
            if path.is_dir() {
                self.walk(&path, records)?;
            } else if has_submission_extension(&path) {
                if let Some(record) = self.read_entry(&path)? {
                    records.push(record);
                }
            }
        }
        Ok(())
    }
}

impl SubmissionStore for FileSubmissionStore {
    #[instrument(skip(self, record), fields(dataset = %record.dataset, fold = %record.fold, user = %record.user))]
    fn insert(&self, record: &SubmissionRecord) -> LedgerResult<SubmissionLocation> {
        let scope = Scope::new(
            record.dataset.as_str(),
            record.fold.as_str(),
            record.user.as_str(),
        )?;
        let dir = self.scope_dir(&scope);
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        for _ in 0..MAX_SAVE_ATTEMPTS {
            let id = SubmissionId::generate(&record.timestamp);
            let path = dir.join(id.file_name());

            let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Submission id already taken, retrying");
                    continue;
                }
                Err(e) => return Err(StoreError::io(&path, e).into()),
            };

            write_record(file, record).map_err(|e| StoreError::io(&path, e))?;
            info!(id = %id, path = %path.display(), "Saved submission");
            return Ok(SubmissionLocation { id, path });
        }

        Err(StoreError::Collision(dir).into())
    }

    #[instrument(skip(self))]
    fn load(
        &self,
        dataset: &str,
        fold: &str,
        user: Option<&str>,
    ) -> LedgerResult<Vec<SubmissionRecord>> {
        validate_dataset(dataset)?;
        validate_segment("fold", fold)?;

        let fold_dir = self.root.join(fold_path(dataset, fold));
        let mut records = Vec::new();

        match user {
            Some(user) => {
                validate_segment("user", user)?;
                let user_dir = fold_dir.join(user);
                if user_dir.is_dir() {
                    self.read_user_dir(&user_dir, &mut records)?;
                }
            }
            None => {
                if fold_dir.is_dir() {
                    for user_dir in sorted_entries(&fold_dir)? {
                        if user_dir.is_dir() {
                            self.read_user_dir(&user_dir, &mut records)?;
                        }
                    }
                }
            }
        }

        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        debug!(count = records.len(), "Loaded submissions");
        Ok(records)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn scan_all(&self) -> LedgerResult<Vec<SubmissionRecord>> {
        if !self.root.is_dir() {
            return Err(StoreError::RootNotFound(self.root.clone()).into());
        }

        let mut records = Vec::new();
        self.walk(&self.root, &mut records)?;
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        debug!(count = records.len(), "Scanned submissions");
        Ok(records)
    }
}

fn write_record(file: File, record: &SubmissionRecord) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn has_submission_extension(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext == SUBMISSION_EXTENSION)
}

/// Directory entries sorted by file name.
fn sorted_entries(dir: &Path) -> LedgerResult<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| StoreError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| StoreError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}

//! The `dataset/fold/user` scope submissions are grouped under.
//!
//! Every segment ends up as a directory name, so each one is checked before it
//! ever reaches the filesystem. Dataset ids may be namespaced with `/`
//! (`RNA/translation-efficiency-muscle`); folds and users are single segments.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::PathBuf;

use crate::errors::ValidationError;

/// Characters that cannot appear inside a single path segment
static FORBIDDEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\\\x00]").unwrap());

const MAX_SEGMENT_LEN: usize = 128;

/// A validated `(dataset, fold, user)` triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Dataset id, possibly namespaced with `/`
    pub dataset: String,
    /// Fold identifier
    pub fold: String,
    /// Submitting user
    pub user: String,
}

impl Scope {
    /// Build a scope, validating every segment
    pub fn new(
        dataset: impl Into<String>,
        fold: impl Into<String>,
        user: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let scope = Self {
            dataset: dataset.into(),
            fold: fold.into(),
            user: user.into(),
        };
        validate_dataset(&scope.dataset)?;
        validate_segment("fold", &scope.fold)?;
        validate_segment("user", &scope.user)?;
        Ok(scope)
    }

    /// Path of this scope relative to the storage root
    pub fn relative_path(&self) -> PathBuf {
        fold_path(&self.dataset, &self.fold).join(&self.user)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.dataset, self.fold, self.user)
    }
}

/// Path of a `dataset/fold` pair relative to the storage root
///
/// Callers are expected to have validated both parts.
pub fn fold_path(dataset: &str, fold: &str) -> PathBuf {
    let mut path: PathBuf = dataset.split('/').collect();
    path.push(fold);
    path
}

/// Validate a dataset id (one or more `/`-separated segments)
pub fn validate_dataset(dataset: &str) -> Result<(), ValidationError> {
    if dataset.is_empty() {
        return Err(invalid("dataset", dataset, "cannot be empty"));
    }
    for part in dataset.split('/') {
        check_segment("dataset", dataset, part)?;
    }
    Ok(())
}

/// Validate a single path segment (fold or user)
pub fn validate_segment(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid(field, value, "cannot be empty"));
    }
    check_segment(field, value, value)
}

fn check_segment(field: &'static str, whole: &str, part: &str) -> Result<(), ValidationError> {
    if part.is_empty() {
        return Err(invalid(field, whole, "contains an empty path segment"));
    }
    if part.len() > MAX_SEGMENT_LEN {
        return Err(invalid(
            field,
            whole,
            &format!("segments cannot be longer than {} characters", MAX_SEGMENT_LEN),
        ));
    }
    if part == "." || part == ".." {
        return Err(invalid(field, whole, "cannot be '.' or '..'"));
    }
    if FORBIDDEN_REGEX.is_match(part) {
        return Err(invalid(
            field,
            whole,
            "cannot contain '/', '\\' or NUL characters",
        ));
    }
    Ok(())
}

fn invalid(field: &'static str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidSegment {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

//! Submission identifiers.
//!
//! A submission is identified by the name of the entry it is stored under. The
//! identifier starts with the submission timestamp (with `:` replaced so it is
//! a valid file name on every platform), so listing a scope in name order lists
//! it in submission order without parsing any content. A short random suffix
//! keeps two submissions made within the same clock tick apart.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// File extension of persisted submission entries.
pub const SUBMISSION_EXTENSION: &str = "json";

const SUFFIX_LEN: usize = 8;

/// Unique, timestamp-derived identifier of a stored submission
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Derive a fresh identifier from a submission timestamp
    pub fn generate(timestamp: &str) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}_{}",
            timestamp.replace(':', "-"),
            &suffix[..SUFFIX_LEN]
        ))
    }

    /// Get the identifier as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file name the submission is stored under
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, SUBMISSION_EXTENSION)
    }
}

impl Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Submission records.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSet;
use crate::scope::Scope;

/// Name recorded when the submitter gives none
pub const DEFAULT_SUBMISSION_NAME: &str = "No name provided";

/// Description recorded when the submitter gives none
pub const DEFAULT_SUBMISSION_DESCRIPTION: &str = "No description provided";

/// Name shown for records persisted without one
pub const UNNAMED: &str = "Unnamed";

/// Persisted result of one evaluated submission
///
/// Records are written once and never modified. Field order matches the
/// on-disk JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// ISO-8601 UTC timestamp taken when the submission was stored
    pub timestamp: String,
    /// Submitting user
    pub user: String,
    /// Dataset id
    pub dataset: String,
    /// Fold identifier
    pub fold: String,
    /// Evaluation results
    pub metrics: MetricSet,
    /// Submission name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl SubmissionRecord {
    /// Value of the record's own primary metric
    pub fn score(&self) -> f64 {
        self.metrics.primary_value()
    }

    /// Value of an arbitrary metric
    pub fn score_for(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric)
    }

    /// Name of the metric the record ranks by
    pub fn primary_metric(&self) -> &str {
        self.metrics.primary_metric()
    }

    /// Name to show, falling back for records stored without one
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED
        } else {
            &self.name
        }
    }

    /// Timestamp truncated to whole seconds (`YYYY-MM-DDTHH:MM:SS`)
    pub fn timestamp_seconds(&self) -> &str {
        self.timestamp.get(..19).unwrap_or(&self.timestamp)
    }
}

/// A submission that has been evaluated but not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    /// Where the submission will be filed
    pub scope: Scope,
    /// Evaluation results
    pub metrics: MetricSet,
    /// Optional submission name
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
}

impl NewSubmission {
    /// Create a draft with no name or description
    pub fn new(scope: Scope, metrics: MetricSet) -> Self {
        Self {
            scope,
            metrics,
            name: None,
            description: None,
        }
    }

    /// Set the submission name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the submission description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Turn the draft into a record stamped with `timestamp`, applying the
    /// default name and description
    pub fn into_record(self, timestamp: String) -> SubmissionRecord {
        let Scope {
            dataset,
            fold,
            user,
        } = self.scope;
        SubmissionRecord {
            timestamp,
            user,
            dataset,
            fold,
            metrics: self.metrics,
            name: self
                .name
                .unwrap_or_else(|| DEFAULT_SUBMISSION_NAME.to_string()),
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_SUBMISSION_DESCRIPTION.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewSubmission {
        NewSubmission::new(
            Scope::new("RNA/translation-efficiency-pc3", "3", "alice").unwrap(),
            MetricSet::from_pairs("spearman", [("spearman", 0.25), ("mae", 0.5)]).unwrap(),
        )
    }

    #[test]
    fn test_defaults_applied() {
        let record = draft().into_record("2024-05-01T10:00:00.000000Z".to_string());
        assert_eq!(record.name, DEFAULT_SUBMISSION_NAME);
        assert_eq!(record.description, DEFAULT_SUBMISSION_DESCRIPTION);
        assert_eq!(record.dataset, "RNA/translation-efficiency-pc3");
        assert_eq!(record.fold, "3");
        assert_eq!(record.user, "alice");
        assert_eq!(record.score(), 0.25);
    }

    #[test]
    fn test_explicit_name_kept() {
        let record = draft()
            .with_name("cnn-v2")
            .with_description("wider kernels")
            .into_record("2024-05-01T10:00:00.000000Z".to_string());
        assert_eq!(record.display_name(), "cnn-v2");
        assert_eq!(record.description, "wider kernels");
    }

    #[test]
    fn test_json_layout() {
        let record = draft().into_record("2024-05-01T10:00:00.000000Z".to_string());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["metrics"]["primary_metric"], "spearman");
        assert_eq!(json["metrics"]["spearman"], 0.25);
        assert_eq!(json["user"], "alice");

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn test_legacy_record_without_name() {
        let record: SubmissionRecord = serde_json::from_str(
            r#"{
                "timestamp": "2024-01-02T03:04:05.123456",
                "user": "bob",
                "dataset": "RNA/translation-efficiency-muscle",
                "fold": "0",
                "metrics": {"primary_metric": "spearman", "spearman": 0.3}
            }"#,
        )
        .unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.display_name(), UNNAMED);
        assert_eq!(record.timestamp_seconds(), "2024-01-02T03:04:05");
    }
}

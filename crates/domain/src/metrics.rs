//! Structured evaluation results.
//!
//! A `MetricSet` is what a dataset's evaluator hands back: an ordered mapping
//! of metric names to values plus the name of the metric submissions are
//! ranked by. The primary metric is always present and every value is finite,
//! which is what lets the leaderboard compare records without re-checking.
//!
//! On disk the set is stored flat, with the primary metric name alongside the
//! values:
//!
//! ```json
//! {"primary_metric": "spearman", "spearman": 0.41, "pearson": 0.39}
//! ```

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Key under which the primary metric name is persisted
pub const PRIMARY_METRIC_KEY: &str = "primary_metric";

/// Metric values with a designated primary metric (higher is better)
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    primary_metric: String,
    values: IndexMap<String, f64>,
}

impl MetricSet {
    /// Create a metric set, checking that the primary metric has a value and
    /// that all values are finite
    pub fn new(
        primary_metric: impl Into<String>,
        values: IndexMap<String, f64>,
    ) -> Result<Self, ValidationError> {
        let primary_metric = primary_metric.into();
        if primary_metric.is_empty() {
            return Err(ValidationError::EmptyPrimaryMetric);
        }
        if values.contains_key(PRIMARY_METRIC_KEY) {
            return Err(ValidationError::ReservedMetricName(
                PRIMARY_METRIC_KEY.to_string(),
            ));
        }
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonFiniteMetric {
                name: name.clone(),
                value: *value,
            });
        }
        if !values.contains_key(&primary_metric) {
            return Err(ValidationError::MissingPrimaryMetric(primary_metric));
        }
        Ok(Self {
            primary_metric,
            values,
        })
    }

    /// Create a metric set from `(name, value)` pairs, keeping their order
    pub fn from_pairs<I, K>(primary_metric: impl Into<String>, pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let values = pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::new(primary_metric, values)
    }

    /// Name of the metric submissions are ranked by
    pub fn primary_metric(&self) -> &str {
        &self.primary_metric
    }

    /// Value of the primary metric
    pub fn primary_value(&self) -> f64 {
        // Presence is checked in `new`.
        self.values[self.primary_metric.as_str()]
    }

    /// Value of a metric by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// All metric values in evaluation order
    pub fn values(&self) -> &IndexMap<String, f64> {
        &self.values
    }

    /// Metrics other than the primary one, in evaluation order
    pub fn secondary(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values
            .iter()
            .filter(move |(name, _)| name.as_str() != self.primary_metric)
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of metric values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no values (never true for a constructed set)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(PRIMARY_METRIC_KEY, &self.primary_metric)?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Name(String),
    Value(f64),
}

impl<'de> Deserialize<'de> for MetricSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, RawMetric>::deserialize(deserializer)?;

        let mut primary_metric = None;
        let mut values = IndexMap::with_capacity(raw.len());
        for (key, metric) in raw {
            match (key.as_str(), metric) {
                (PRIMARY_METRIC_KEY, RawMetric::Name(name)) => primary_metric = Some(name),
                (PRIMARY_METRIC_KEY, RawMetric::Value(_)) => {
                    return Err(de::Error::custom("primary_metric must be a metric name"));
                }
                (_, RawMetric::Value(value)) => {
                    values.insert(key, value);
                }
                (_, RawMetric::Name(_)) => {
                    return Err(de::Error::custom(format!(
                        "metric '{}' must be a number",
                        key
                    )));
                }
            }
        }

        let primary_metric =
            primary_metric.ok_or_else(|| de::Error::missing_field(PRIMARY_METRIC_KEY))?;
        MetricSet::new(primary_metric, values).map_err(de::Error::custom)
    }
}

//! Scoring module - metric computation for dataset evaluations
//!
//! This module turns predictions and held-out targets into a `MetricSet`.
//! Regression and classification datasets each have an evaluator; the
//! metric functions themselves live in `metrics`.

mod evaluators;
pub mod metrics;

pub use evaluators::*;

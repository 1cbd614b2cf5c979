//! Metric functions over paired prediction/target vectors.
//!
//! Callers check that both slices are non-empty and of equal length. Results
//! may be NaN (e.g. a correlation against a constant vector); the evaluators
//! decide what to do with those.

use std::collections::BTreeSet;

/// Mean squared error
pub fn mse(predictions: &[f64], targets: &[f64]) -> f64 {
    mean(predictions.iter().zip(targets).map(|(p, t)| (p - t).powi(2)))
}

/// Mean absolute error
pub fn mae(predictions: &[f64], targets: &[f64]) -> f64 {
    mean(predictions.iter().zip(targets).map(|(p, t)| (p - t).abs()))
}

/// Root mean squared error
pub fn rmse(predictions: &[f64], targets: &[f64]) -> f64 {
    mse(predictions, targets).sqrt()
}

/// Coefficient of determination, `1 - SS_res / SS_tot`
pub fn r2(predictions: &[f64], targets: &[f64]) -> f64 {
    let target_mean = mean(targets.iter().copied());
    let ss_res: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = targets.iter().map(|t| (t - target_mean).powi(2)).sum();
    1.0 - ss_res / ss_tot
}

/// Pearson correlation coefficient
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let mean_x = mean(x.iter().copied());
    let mean_y = mean(y.iter().copied());

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Spearman rank correlation (ties get their average rank)
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    pearson(&average_ranks(x), &average_ranks(y))
}

/// 1-based ranks with ties replaced by the mean of the ranks they span
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Fraction of exact label matches
pub fn accuracy(predictions: &[String], targets: &[String]) -> f64 {
    let correct = predictions
        .iter()
        .zip(targets)
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / targets.len() as f64
}

/// Per-class counts used by the precision/recall/F1 family
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    pub label: String,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Number of targets carrying this label
    pub support: usize,
}

impl ClassStats {
    pub fn precision(&self) -> f64 {
        safe_ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        safe_ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        safe_ratio(
            2 * self.true_positives,
            2 * self.true_positives + self.false_positives + self.false_negatives,
        )
    }
}

/// Count per-class outcomes over every label seen in predictions or targets,
/// in sorted label order
pub fn class_stats(predictions: &[String], targets: &[String]) -> Vec<ClassStats> {
    let labels: BTreeSet<&String> = predictions.iter().chain(targets).collect();

    labels
        .into_iter()
        .map(|label| {
            let mut stats = ClassStats {
                label: label.clone(),
                true_positives: 0,
                false_positives: 0,
                false_negatives: 0,
                support: 0,
            };
            for (p, t) in predictions.iter().zip(targets) {
                match (p == label, t == label) {
                    (true, true) => stats.true_positives += 1,
                    (true, false) => stats.false_positives += 1,
                    (false, true) => stats.false_negatives += 1,
                    (false, false) => {}
                }
                if t == label {
                    stats.support += 1;
                }
            }
            stats
        })
        .collect()
}

/// Unweighted mean of a per-class score
pub fn macro_average(stats: &[ClassStats], score: impl Fn(&ClassStats) -> f64) -> f64 {
    mean(stats.iter().map(score))
}

/// Support-weighted mean of a per-class score
pub fn weighted_average(stats: &[ClassStats], score: impl Fn(&ClassStats) -> f64) -> f64 {
    let total: usize = stats.iter().map(|s| s.support).sum();
    if total == 0 {
        return 0.0;
    }
    stats
        .iter()
        .map(|s| score(s) * s.support as f64)
        .sum::<f64>()
        / total as f64
}

fn safe_ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

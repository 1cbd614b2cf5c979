//! Rendering of leaderboards, histories and the other command results

use anyhow::Result;

use seqbench_application::{
    DatasetDescription, HistoryReport, HistorySummary, Leaderboard, SubmitOutcome,
};
use seqbench_common::config::AppConfig;
use seqbench_domain::{MetricSet, SubmissionRecord};

use super::{Formattable, JsonFormatter, PlainFormatter, TableFormatter};

const LEADERBOARD_RULE: usize = 100;
const HISTORY_RULE: usize = 120;

/// Primary score with six decimals
pub fn format_score(score: f64) -> String {
    format!("{:.6}", score)
}

/// Signed change with four decimals, `--` for no previous entry or no change
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) if c != 0.0 => format!("{:+.4}", c),
        _ => "--".to_string(),
    }
}

/// Non-primary metrics as `name=value` pairs
pub fn format_other_metrics(record: &SubmissionRecord) -> String {
    record
        .metrics
        .secondary()
        .map(|(name, value)| format!("{}={:.4}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The summary block printed under a history of several submissions
pub fn format_summary(summary: &HistorySummary) -> String {
    format!(
        "Summary:\n  First submission:  {:.6}\n  Best submission:   {:.6}\n  Latest submission: {:.6}\n  Total improvement: {:+.6}",
        summary.first_score, summary.best_score, summary.latest_score, summary.total_improvement
    )
}

fn primary_metric_label(metric: &Option<String>) -> &str {
    metric.as_deref().unwrap_or("-")
}

impl Formattable for Leaderboard {
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_table(&self) -> Result<String> {
        let rows = self
            .entries
            .iter()
            .map(|e| {
                vec![
                    e.rank.to_string(),
                    e.record.user.clone(),
                    e.record.display_name().to_string(),
                    format_score(e.score),
                    e.record.timestamp_seconds().to_string(),
                ]
            })
            .collect();

        Ok(format!(
            "Leaderboard: {} (Fold {})\nPrimary Metric: {}\n{}",
            self.dataset,
            self.fold,
            primary_metric_label(&self.primary_metric),
            TableFormatter::simple(vec!["Rank", "User", "Name", "Score", "Timestamp"], rows)
        ))
    }

    fn format_plain(&self) -> Result<String> {
        let mut lines = vec![
            "=".repeat(LEADERBOARD_RULE),
            format!("Leaderboard: {} (Fold {})", self.dataset, self.fold),
            format!("Primary Metric: {}", primary_metric_label(&self.primary_metric)),
            "=".repeat(LEADERBOARD_RULE),
            format!("{:<6} {:<20} {:<25} {:<12} {:<30}", "Rank", "User", "Name", "Score", "Timestamp"),
            "-".repeat(LEADERBOARD_RULE),
        ];
        for e in &self.entries {
            lines.push(
                format!(
                    "{:<6} {:<20} {:<25} {:<12.6} {:<30}",
                    e.rank,
                    e.record.user,
                    e.record.display_name(),
                    e.score,
                    e.record.timestamp_seconds()
                )
                .trim_end()
                .to_string(),
            );
        }
        lines.push("=".repeat(LEADERBOARD_RULE));
        Ok(lines.join("\n"))
    }
}

impl Formattable for HistoryReport {
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_table(&self) -> Result<String> {
        let metric = primary_metric_label(&self.primary_metric);
        let rows = self
            .entries
            .iter()
            .map(|e| {
                vec![
                    e.index.to_string(),
                    e.record.display_name().to_string(),
                    e.record.timestamp_seconds().to_string(),
                    format_score(e.score),
                    format_change(e.change),
                    format_other_metrics(&e.record),
                ]
            })
            .collect();

        let mut out = format!(
            "Submission History: {} - {} (Fold {})\nPrimary Metric: {}\n{}",
            self.user,
            self.dataset,
            self.fold,
            metric,
            TableFormatter::simple(
                vec!["#", "Name", "Timestamp", metric, "Change", "Other Metrics"],
                rows
            )
        );
        if let Some(summary) = self.summary.as_ref().filter(|s| s.submissions > 1) {
            out.push_str("\n\n");
            out.push_str(&format_summary(summary));
        }
        Ok(out)
    }

    fn format_plain(&self) -> Result<String> {
        let metric = primary_metric_label(&self.primary_metric);
        let mut lines = vec![
            "=".repeat(HISTORY_RULE),
            format!("Submission History: {} - {} (Fold {})", self.user, self.dataset, self.fold),
            format!("Primary Metric: {}", metric),
            "=".repeat(HISTORY_RULE),
            format!(
                "{:<4} {:<25} {:<22} {:<12} {:<10} {}",
                "#", "Name", "Timestamp", metric, "Change", "Other Metrics"
            ),
            "-".repeat(HISTORY_RULE),
        ];
        for e in &self.entries {
            lines.push(
                format!(
                    "{:<4} {:<25} {:<22} {:<12.6} {:<10} {}",
                    e.index,
                    e.record.display_name(),
                    e.record.timestamp_seconds(),
                    e.score,
                    format_change(e.change),
                    format_other_metrics(&e.record)
                )
                .trim_end()
                .to_string(),
            );
        }
        lines.push("=".repeat(HISTORY_RULE));
        if let Some(summary) = self.summary.as_ref().filter(|s| s.submissions > 1) {
            lines.push(String::new());
            lines.push(format_summary(summary));
        }
        Ok(lines.join("\n"))
    }
}

impl Formattable for MetricSet {
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_table(&self) -> Result<String> {
        let rows = self
            .values()
            .iter()
            .map(|(name, value)| vec![name.clone(), format_score(*value)])
            .collect();
        Ok(format!(
            "Primary metric: {}\n{}",
            self.primary_metric(),
            TableFormatter::simple(vec!["Metric", "Value"], rows)
        ))
    }

    fn format_plain(&self) -> Result<String> {
        let mut lines = vec![format!("Primary metric: {}", self.primary_metric())];
        lines.extend(
            self.secondary()
                .map(|(name, value)| format!("  {}: {:.6}", name, value)),
        );
        Ok(lines.join("\n"))
    }
}

impl Formattable for SubmitOutcome {
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_table(&self) -> Result<String> {
        Ok(format!("{}\n{}", submit_headline(self), self.metrics.format_table()?))
    }

    fn format_plain(&self) -> Result<String> {
        Ok(format!("{}\n{}", submit_headline(self), self.metrics.format_plain()?))
    }
}

fn submit_headline(outcome: &SubmitOutcome) -> String {
    match &outcome.location {
        Some(location) => format!("Submission saved to: {}", location.path.display()),
        None => "Logging as dummy submission (submission data matches test data)".to_string(),
    }
}

impl Formattable for DatasetDescription {
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_table(&self) -> Result<String> {
        Ok(TableFormatter::key_value(vec![
            ("Dataset", self.id.clone()),
            ("Description", self.description.clone()),
            ("Task", self.task.clone()),
            ("Folds", self.folds.join(", ")),
            ("Primary metric", self.primary_metric.clone()),
            ("Metrics", self.metrics.join(", ")),
            ("Data file", self.data_path.display().to_string()),
        ]))
    }

    fn format_plain(&self) -> Result<String> {
        PlainFormatter::format(self)
    }
}

impl Formattable for Vec<DatasetDescription> {
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_table(&self) -> Result<String> {
        let rows = self
            .iter()
            .map(|d| {
                vec![
                    d.id.clone(),
                    d.task.clone(),
                    d.folds.len().to_string(),
                    d.primary_metric.clone(),
                    d.description.clone(),
                ]
            })
            .collect();
        Ok(TableFormatter::simple(
            vec!["Dataset", "Task", "Folds", "Primary Metric", "Description"],
            rows,
        ))
    }

    fn format_plain(&self) -> Result<String> {
        Ok(self.iter().map(|d| d.id.as_str()).collect::<Vec<_>>().join("\n"))
    }
}

impl Formattable for AppConfig {
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    fn format_table(&self) -> Result<String> {
        Ok(TableFormatter::key_value(vec![
            ("storage.root", self.storage.root.display().to_string()),
            ("storage.strict_load", self.storage.strict_load.to_string()),
            ("datasets.data_dir", self.datasets.data_dir.display().to_string()),
            ("leaderboard.tie_break", self.leaderboard.tie_break.to_string()),
            ("telemetry.log_level", self.telemetry.log_level.clone()),
            ("telemetry.json_logging", self.telemetry.json_logging.to_string()),
            ("output.format", self.output.format.clone()),
            ("output.colored", self.output.colored.to_string()),
        ]))
    }

    fn format_plain(&self) -> Result<String> {
        self.to_toml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(None), "--");
        assert_eq!(format_change(Some(0.0)), "--");
        assert_eq!(format_change(Some(0.3)), "+0.3000");
        assert_eq!(format_change(Some(-0.15)), "-0.1500");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.55), "0.550000");
        assert_eq!(format_score(-1.0), "-1.000000");
    }

    #[test]
    fn test_format_summary() {
        let summary = HistorySummary {
            submissions: 3,
            first_score: 0.10,
            best_score: 0.40,
            latest_score: 0.25,
            total_improvement: 0.15,
        };
        let rendered = format_summary(&summary);
        assert!(rendered.contains("First submission:  0.100000"));
        assert!(rendered.contains("Best submission:   0.400000"));
        assert!(rendered.contains("Total improvement: +0.150000"));
    }

    #[test]
    fn test_metric_set_plain() {
        let metrics = MetricSet::from_pairs("spearman", [("spearman", 0.5), ("mse", 0.25)]).unwrap();
        assert_eq!(
            metrics.format_plain().unwrap(),
            "Primary metric: spearman\n  mse: 0.250000"
        );
    }
}

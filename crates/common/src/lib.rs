//! Common utilities and shared functionality for seqbench.
//!
//! This crate provides foundational utilities used across all crates:
//! - Configuration management
//! - Telemetry and structured logging
//! - DateTime operations

pub mod config;
pub mod datetime;
pub mod telemetry;

// Re-export commonly used types
pub use config::{
    AppConfig, DatasetsConfig, LeaderboardConfig, OutputConfig, StorageConfig,
    TelemetryConfig, TieBreak,
};
pub use datetime::{normalize_timestamp, now_timestamp, now_utc, parse_datetime, submission_timestamp};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;

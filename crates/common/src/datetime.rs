//! DateTime utilities.
//!
//! Submission timestamps are stored as strings and compared as strings, so the
//! format written by the ledger is fixed width: microsecond precision, always
//! UTC, always suffixed with `Z`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Get the current UTC time.
///
/// # Examples
///
/// ```
/// use seqbench_common::datetime::now_utc;
///
/// let now = now_utc();
/// println!("Current time: {}", now);
/// ```
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a DateTime as a submission timestamp.
///
/// The result always has the shape `YYYY-MM-DDTHH:MM:SS.ffffffZ`, so
/// lexicographic order equals chronological order.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use seqbench_common::datetime::submission_timestamp;
///
/// let dt = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
/// assert_eq!(submission_timestamp(&dt), "2024-05-01T10:00:00.000000Z");
/// ```
pub fn submission_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time as a submission timestamp.
pub fn now_timestamp() -> String {
    submission_timestamp(&now_utc())
}

/// Parse a datetime string into a UTC DateTime.
///
/// Supports multiple common formats:
/// - ISO 8601 (RFC 3339): "2023-12-01T12:30:45.123456Z"
/// - ISO 8601 with offset: "2023-12-01T12:30:45+00:00"
/// - Naive ISO 8601 with or without fractional seconds, assumed UTC:
///   "2023-12-01T12:30:45.123456"
///
/// # Examples
///
/// ```
/// use seqbench_common::datetime::parse_datetime;
///
/// let dt = parse_datetime("2023-12-01T12:30:45Z").expect("Failed to parse");
/// println!("Parsed: {}", dt);
/// ```
pub fn parse_datetime(datetime_str: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(datetime_str)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .or_else(|_| {
            NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
        })
        .map_err(|e| format!("Failed to parse datetime '{}': {}", datetime_str, e))
}

/// Rewrite a stored timestamp in the submission timestamp format.
///
/// Entries written by older tools may carry naive or offset timestamps; those
/// are converted to UTC so they sort with everything else. Unparseable values
/// are returned unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    match parse_datetime(raw) {
        Ok(dt) => submission_timestamp(&dt),
        Err(_) => raw.to_string(),
    }
}

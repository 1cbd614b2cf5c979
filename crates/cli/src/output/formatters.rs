//! Output formatters

use anyhow::Result;
use serde::Serialize;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Plain text formatter
pub struct PlainFormatter;

impl PlainFormatter {
    /// Format a value as an indented `key: value` listing
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        Ok(Self::format_value(&json, 0))
    }

    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        match value {
            serde_json::Value::Null => "null".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) => arr
                .iter()
                .map(|v| format!("{}- {}", indent_str, Self::format_value(v, indent + 1).trim_start()))
                .collect::<Vec<_>>()
                .join("\n"),
            serde_json::Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| match v {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        format!("{}{}:\n{}", indent_str, k, Self::format_value(v, indent + 1))
                    }
                    _ => format!("{}{}: {}", indent_str, k, Self::format_value(v, indent + 1)),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Location {
        id: String,
        path: String,
    }

    #[derive(Serialize)]
    struct Saved {
        location: Location,
        score: f64,
    }

    fn sample() -> Saved {
        Saved {
            location: Location {
                id: "20240501T100000000000Z".to_string(),
                path: "submissions/x.json".to_string(),
            },
            score: 0.5,
        }
    }

    #[test]
    fn test_json_formatter() {
        let rendered = JsonFormatter::format(&sample()).unwrap();
        assert!(rendered.contains("\"score\": 0.5"));
    }

    #[test]
    fn test_plain_formatter_nests() {
        let rendered = PlainFormatter::format(&sample()).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "location:");
        assert_eq!(lines[1], "  id: 20240501T100000000000Z");
        assert_eq!(lines[3], "score: 0.5");
    }
}

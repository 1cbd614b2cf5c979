//! Table formatting utilities

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Create a simple table with headers and rows
    pub fn simple<H: Into<Cell>>(headers: Vec<H>, rows: Vec<Vec<String>>) -> String {
        let mut table = Self::new();
        table.set_header(headers);

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    }

    /// Create a key-value table
    pub fn key_value(items: Vec<(&str, String)>) -> String {
        let mut table = Self::new();

        for (key, value) in items {
            table.add_row(vec![key.to_string(), value]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let headers = vec!["User", "Score"];
        let rows = vec![
            vec!["alice".to_string(), "0.400000".to_string()],
            vec!["bob".to_string(), "0.550000".to_string()],
        ];
        let rendered = TableFormatter::simple(headers, rows);
        assert!(rendered.contains("User"));
        assert!(rendered.contains("0.550000"));
    }

    #[test]
    fn test_key_value_table() {
        let items = vec![("storage.root", "submissions".to_string())];
        let rendered = TableFormatter::key_value(items);
        assert!(rendered.contains("storage.root"));
        assert!(rendered.contains("submissions"));
    }
}

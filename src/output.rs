//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

/// Pad the cells of `rows` into aligned columns separated by two spaces.
pub fn align_columns(rows: &[Vec<String>]) -> Vec<String> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..width)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<w$}", cell, w = widths[i]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Serialize)]
    struct Sample {
        table: String,
        rows: usize,
    }

    impl Outputable for Sample {
        fn to_table(&self) -> String {
            format!("{}: {} rows", self.table, self.rows)
        }
    }

    #[fixture]
    fn sample() -> Sample {
        Sample {
            table: "category".to_string(),
            rows: 2,
        }
    }

    crate::output_table_test! {
        test_name: test_table_format,
        fixture: sample,
        fixture_type: Sample,
        expected: "category: 2 rows",
    }

    crate::output_json_test! {
        test_name: test_json_format,
        fixture: sample,
        fixture_type: Sample,
        assertions: {
            "table": "category",
            "rows": 2,
        },
    }

    crate::output_toon_test! {
        test_name: test_toon_format,
        fixture: sample,
        fixture_type: Sample,
        contains: ["table", "category"],
    }

    #[test]
    fn test_align_columns() {
        let rows = vec![
            vec!["id".to_string(), "uuid".to_string()],
            vec!["price_in_cents".to_string(), "integer".to_string()],
        ];
        assert_eq!(
            align_columns(&rows),
            vec!["id              uuid", "price_in_cents  integer"]
        );
    }
}

//! Output formatting for describe command results.

use super::execute::{DescribeResult, TableDescription};
use crate::output::{Outputable, align_columns};

fn column_flags(table: &TableDescription) -> Vec<Vec<String>> {
    table
        .columns
        .iter()
        .map(|c| {
            let mut flags = Vec::new();
            if c.primary_key {
                flags.push("primary key".to_string());
            }
            if c.unique {
                flags.push("unique".to_string());
            }
            if let Some(default) = &c.default {
                flags.push(format!("default {}", default));
            }
            if let Some(check) = &c.check {
                flags.push(format!("check ({})", check));
            }
            if !c.updatable && !c.primary_key {
                flags.push("immutable".to_string());
            }
            vec![c.name.clone(), c.data_type.clone(), flags.join(", ")]
        })
        .collect()
}

impl Outputable for DescribeResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        for (index, table) in self.tables.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.push(format!("{} ({})", table.name, table.entity));

            for row in align_columns(&column_flags(table)) {
                lines.push(format!("  {}", row));
            }

            if !table.foreign_keys.is_empty() {
                lines.push("  Foreign keys:".to_string());
                for fk in &table.foreign_keys {
                    lines.push(format!(
                        "    {} -> {} (on delete {})",
                        fk.column, fk.references, fk.on_delete
                    ));
                }
            }

            if !table.relationships.is_empty() {
                lines.push("  Relationships:".to_string());
                for r in &table.relationships {
                    lines.push(format!("    {} ({}): {}", r.name, r.cardinality, r.join));
                }
            }
        }

        lines.join("\n")
    }
}

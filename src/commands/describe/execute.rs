use std::error::Error;

use serde::Serialize;

use super::DescribeCmd;
use crate::db::schema::{ALL_RELATIONS, Cardinality, SchemaRelation, relation_by_name, relation_names};

#[derive(Debug, Clone, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub primary_key: bool,
    pub unique: bool,
    pub updatable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForeignKeyDescription {
    pub column: String,
    pub references: String,
    pub on_delete: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipDescription {
    pub name: String,
    pub target: String,
    pub cardinality: String,
    /// Join condition, `<local column> = <target>.<column>`
    pub join: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableDescription {
    pub name: String,
    pub entity: String,
    pub columns: Vec<ColumnDescription>,
    pub foreign_keys: Vec<ForeignKeyDescription>,
    pub relationships: Vec<RelationshipDescription>,
}

/// Result of the describe command
#[derive(Debug, Serialize)]
pub struct DescribeResult {
    pub tables: Vec<TableDescription>,
}

impl From<&SchemaRelation> for TableDescription {
    fn from(relation: &SchemaRelation) -> Self {
        let columns = relation
            .fields
            .iter()
            .map(|f| ColumnDescription {
                name: f.name.to_string(),
                data_type: f.data_type.name().to_string(),
                default: f.default.map(|d| d.postgres_expr().to_string()),
                primary_key: f.name == relation.primary_key,
                unique: f.unique,
                updatable: f.updatable,
                check: f.min_value.map(|min| format!("{} >= {}", f.name, min)),
            })
            .collect();

        let foreign_keys = relation
            .foreign_keys
            .iter()
            .map(|fk| ForeignKeyDescription {
                column: fk.column.to_string(),
                references: format!("{}.{}", fk.target, fk.target_column),
                on_delete: fk.on_delete.postgres_action().to_lowercase(),
            })
            .collect();

        let relationships = relation
            .relationships
            .iter()
            .map(|r| RelationshipDescription {
                name: r.name.to_string(),
                target: r.target.to_string(),
                cardinality: match r.cardinality {
                    Cardinality::One => "one",
                    Cardinality::Many => "many",
                }
                .to_string(),
                join: format!("{} = {}.{}", r.field, r.target, r.references),
            })
            .collect();

        Self {
            name: relation.name.to_string(),
            entity: relation.entity.to_string(),
            columns,
            foreign_keys,
            relationships,
        }
    }
}

impl DescribeCmd {
    /// Describe the requested table, or every table in creation order.
    pub fn execute(self) -> Result<DescribeResult, Box<dyn Error>> {
        let tables = match self.table {
            Some(name) => {
                let relation = relation_by_name(&name).ok_or_else(|| {
                    format!(
                        "Unknown table: '{}' (expected one of: {})",
                        name,
                        relation_names().join(", ")
                    )
                })?;
                vec![TableDescription::from(relation)]
            }
            None => ALL_RELATIONS
                .iter()
                .map(|r| TableDescription::from(*r))
                .collect(),
        };

        Ok(DescribeResult { tables })
    }
}

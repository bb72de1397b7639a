//! Type conversion utilities for the PostgreSQL backend.
//!
//! Handles conversion between:
//! - `Value` -> PostgreSQL parameters (via `ToSql`)
//! - `postgres::Row` -> `Record` (via `FromSql`)
//!
//! `TIMESTAMP` columns carry no zone; values are written and read as UTC.

use chrono::NaiveDateTime;
use postgres::Row;
use postgres::types::ToSql;
use uuid::Uuid;

use crate::db::schema::{DataType, SchemaRelation};
use crate::db::{DbError, Record, Value};

/// An owned query parameter.
pub type SqlParam = Box<dyn ToSql + Sync>;

/// Convert one value to a parameter for a column of type `data_type`.
pub fn to_sql_param(
    relation: &SchemaRelation,
    column: &str,
    data_type: DataType,
    value: &Value,
) -> Result<SqlParam, DbError> {
    let param: SqlParam = match (data_type, value) {
        (DataType::Uuid, Value::Uuid(id)) => Box::new(*id),
        (DataType::Text, Value::Text(s)) => Box::new(s.clone()),
        (DataType::Int, Value::Int(n)) => {
            let n = i32::try_from(*n).map_err(|_| {
                DbError::validation(relation.entity, column, format!("{} is out of range", n))
            })?;
            Box::new(n)
        }
        (DataType::Timestamp, Value::Timestamp(ts)) => Box::new(ts.naive_utc()),
        (expected, found) => {
            return Err(DbError::validation(
                relation.entity,
                column,
                format!(
                    "expected {}, got {}",
                    expected.name(),
                    found.data_type().name()
                ),
            ));
        }
    };
    Ok(param)
}

/// Convert the named columns of `record` into parameters, in the order given.
pub fn record_to_params(
    relation: &SchemaRelation,
    record: &Record,
    columns: &[&str],
) -> Result<Vec<SqlParam>, DbError> {
    columns
        .iter()
        .map(|column| {
            let field = relation.field(column).ok_or_else(|| {
                DbError::validation(relation.entity, column, "unknown column")
            })?;
            let value = record.get(column).ok_or_else(|| DbError::MissingColumn {
                name: column.to_string(),
            })?;
            to_sql_param(relation, column, field.data_type, value)
        })
        .collect()
}

/// Borrow owned parameters in the shape `postgres` expects.
pub fn param_refs(params: &[SqlParam]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p.as_ref()).collect()
}

fn read_error(column: &str, e: postgres::Error) -> DbError {
    DbError::QueryFailed {
        message: format!("Failed to read column '{}': {}", column, e),
    }
}

/// Convert a returned row into a `Record` using the relation's column types.
pub fn row_to_record(relation: &SchemaRelation, row: &Row) -> Result<Record, DbError> {
    let mut record = Record::new();
    for field in relation.fields {
        if row.columns().iter().all(|c| c.name() != field.name) {
            return Err(DbError::MissingColumn {
                name: field.name.to_string(),
            });
        }
        let value = match field.data_type {
            DataType::Uuid => Value::Uuid(
                row.try_get::<_, Uuid>(field.name)
                    .map_err(|e| read_error(field.name, e))?,
            ),
            DataType::Text => Value::Text(
                row.try_get::<_, String>(field.name)
                    .map_err(|e| read_error(field.name, e))?,
            ),
            DataType::Int => Value::Int(i64::from(
                row.try_get::<_, i32>(field.name)
                    .map_err(|e| read_error(field.name, e))?,
            )),
            DataType::Timestamp => Value::Timestamp(
                row.try_get::<_, NaiveDateTime>(field.name)
                    .map_err(|e| read_error(field.name, e))?
                    .and_utc(),
            ),
        };
        record.set(field.name, value);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{CATEGORIES, PRODUCT_VARIANTS};

    #[test]
    fn test_record_to_params_follows_column_order() {
        let record = Record::new().with("slug", "shoes").with("name", "Shoes");
        let params = record_to_params(&CATEGORIES, &record, &["name", "slug"]).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(param_refs(&params).len(), 2);
    }

    #[test]
    fn test_record_to_params_missing_column() {
        let record = Record::new().with("name", "Shoes");
        let err = record_to_params(&CATEGORIES, &record, &["name", "slug"])
            .err()
            .unwrap();
        assert!(matches!(err, DbError::MissingColumn { ref name } if name == "slug"));
    }

    #[test]
    fn test_price_out_of_i32_range() {
        let err = to_sql_param(
            &PRODUCT_VARIANTS,
            "price_in_cents",
            DataType::Int,
            &Value::Int(i64::from(i32::MAX) + 1),
        )
        .err()
        .unwrap();
        assert!(err.is_validation());
    }

    #[test]
    fn test_type_mismatch_is_validation() {
        let err = to_sql_param(&CATEGORIES, "slug", DataType::Text, &Value::Int(1))
            .err()
            .unwrap();
        assert!(err.to_string().contains("expected text, got integer"));
    }
}

//! Backend-agnostic column values and rows.
//!
//! Engines exchange rows as `Record`s: a column-name to `Value` map. Typed
//! entity structs in `crate::types` convert to and from records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::DbError;
use super::schema::DataType;

/// A single column value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Uuid(Uuid),
    Text(String),
    Int(i64),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// The schema type this value belongs to.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Uuid(_) => DataType::Uuid,
            Value::Text(_) => DataType::Text,
            Value::Int(_) => DataType::Int,
            Value::Timestamp(_) => DataType::Timestamp,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Uuid(id) => write!(f, "{}", id),
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Value::Uuid(id)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

/// A row: column name to value.
///
/// Columns are kept sorted by name; engines order columns by the schema
/// declaration when order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Builder-style insert that skips `None`.
    pub fn with_opt<V: Into<Value>>(mut self, column: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set(column, value);
        }
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.values.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrite this record's columns with the columns of `other`.
    pub fn merge(&mut self, other: &Record) {
        for (column, value) in other.iter() {
            self.set(column, value.clone());
        }
    }

    fn require(&self, column: &str) -> Result<&Value, DbError> {
        self.get(column).ok_or_else(|| DbError::MissingColumn {
            name: column.to_string(),
        })
    }

    fn type_mismatch(column: &str, expected: DataType, found: &Value) -> DbError {
        DbError::QueryFailed {
            message: format!(
                "column '{}' holds {} where {} was expected",
                column,
                found.data_type().name(),
                expected.name()
            ),
        }
    }

    pub fn uuid(&self, column: &str) -> Result<Uuid, DbError> {
        let value = self.require(column)?;
        value
            .as_uuid()
            .ok_or_else(|| Self::type_mismatch(column, DataType::Uuid, value))
    }

    pub fn text(&self, column: &str) -> Result<String, DbError> {
        let value = self.require(column)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Self::type_mismatch(column, DataType::Text, value))
    }

    pub fn int(&self, column: &str) -> Result<i64, DbError> {
        let value = self.require(column)?;
        value
            .as_i64()
            .ok_or_else(|| Self::type_mismatch(column, DataType::Int, value))
    }

    pub fn timestamp(&self, column: &str) -> Result<DateTime<Utc>, DbError> {
        let value = self.require(column)?;
        value
            .as_timestamp()
            .ok_or_else(|| Self::type_mismatch(column, DataType::Timestamp, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_extraction() {
        let id = Uuid::new_v4();
        assert_eq!(Value::from(id).as_uuid(), Some(id));
        assert_eq!(Value::from("shoes").as_str(), Some("shoes"));
        assert_eq!(Value::from(9999_i32).as_i64(), Some(9999));
        assert_eq!(Value::from("shoes").as_i64(), None);
        assert_eq!(Value::Int(1).as_uuid(), None);
    }

    #[test]
    fn test_value_data_type() {
        assert_eq!(Value::from("x").data_type(), DataType::Text);
        assert_eq!(Value::Int(0).data_type(), DataType::Int);
        assert_eq!(Value::from(Utc::now()).data_type(), DataType::Timestamp);
    }

    #[test]
    fn test_record_builders() {
        let record = Record::new()
            .with("name", "Shoes")
            .with_opt("slug", Some("shoes"))
            .with_opt::<String>("description", None);

        assert_eq!(record.len(), 2);
        assert!(record.contains("slug"));
        assert!(!record.contains("description"));
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["name", "slug"]);
    }

    #[test]
    fn test_record_typed_getters() {
        let id = Uuid::new_v4();
        let record = Record::new().with("id", id).with("price_in_cents", 10);

        assert_eq!(record.uuid("id").unwrap(), id);
        assert_eq!(record.int("price_in_cents").unwrap(), 10);
        assert!(matches!(
            record.text("name"),
            Err(DbError::MissingColumn { name }) if name == "name"
        ));
        assert!(matches!(record.text("id"), Err(DbError::QueryFailed { .. })));
    }

    #[test]
    fn test_record_merge_overwrites() {
        let mut record = Record::new().with("name", "Old").with("slug", "old");
        record.merge(&Record::new().with("name", "New"));
        assert_eq!(record.text("name").unwrap(), "New");
        assert_eq!(record.text("slug").unwrap(), "old");
    }
}

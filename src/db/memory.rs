//! In-process storage engine.
//!
//! Holds every table in memory behind one `RwLock` and enforces the declared
//! constraints itself. Each write runs under a single write guard, so the
//! check-then-write of a unique or foreign key constraint is atomic and two
//! racing inserts of the same slug cannot both succeed.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::backend::{DatabaseBackend, validate_changes, validate_insert};
use super::schema::{ColumnDefault, OnDelete, SchemaRelation, dependents_of};
use super::{ConstraintKind, DbError, Record, Value};

struct Table {
    relation: SchemaRelation,
    rows: Vec<Record>,
}

impl Table {
    fn position(&self, column: &str, value: &Value) -> Option<usize> {
        self.rows.iter().position(|row| row.get(column) == Some(value))
    }

    fn any_match(&self, column: &str, value: &Value, skip: Option<usize>) -> bool {
        self.rows
            .iter()
            .enumerate()
            .any(|(i, row)| Some(i) != skip && row.get(column) == Some(value))
    }
}

type Tables = BTreeMap<String, Table>;

/// In-memory engine implementing `DatabaseBackend`.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DbError> {
        self.tables.read().map_err(|e| DbError::QueryFailed {
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DbError> {
        self.tables.write().map_err(|e| DbError::QueryFailed {
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

fn missing_relation(name: &str) -> DbError {
    DbError::QueryFailed {
        message: format!("relation \"{}\" does not exist", name),
    }
}

fn table<'a>(tables: &'a Tables, name: &str) -> Result<&'a Table, DbError> {
    tables.get(name).ok_or_else(|| missing_relation(name))
}

fn violation(constraint: String, kind: ConstraintKind, message: String) -> DbError {
    warn!(%constraint, %kind, "{}", message);
    DbError::ConstraintViolation {
        constraint,
        kind,
        message,
    }
}

fn fill_defaults(relation: &SchemaRelation, record: &mut Record) {
    for field in relation.defaulted_fields() {
        if record.contains(field.name) {
            continue;
        }
        match field.default {
            Some(ColumnDefault::RandomUuid) => record.set(field.name, Uuid::new_v4()),
            Some(ColumnDefault::Now) => record.set(field.name, Utc::now()),
            None => {}
        }
    }
}

/// Check every constraint of `relation` against `row`.
///
/// `skip` is the index of the row being replaced, for updates.
fn check_row(
    tables: &Tables,
    relation: &SchemaRelation,
    row: &Record,
    skip: Option<usize>,
) -> Result<(), DbError> {
    let own = table(tables, relation.name)?;

    for field in relation.fields {
        let Some(value) = row.get(field.name) else {
            return Err(violation(
                format!("{}_{}_not_null", relation.name, field.name),
                ConstraintKind::NotNull,
                format!(
                    "null value in column \"{}\" of relation \"{}\"",
                    field.name, relation.name
                ),
            ));
        };

        if let (Some(min), Some(n)) = (field.min_value, value.as_i64()) {
            if n < min {
                return Err(violation(
                    field
                        .check_constraint_name(relation.name)
                        .unwrap_or_default(),
                    ConstraintKind::Check,
                    format!("{} = {} is below {}", field.name, n, min),
                ));
            }
        }

        if field.name == relation.primary_key && own.any_match(field.name, value, skip) {
            return Err(violation(
                format!("{}_pkey", relation.name),
                ConstraintKind::Unique,
                format!("duplicate key {} = {}", field.name, value),
            ));
        }

        if field.unique && own.any_match(field.name, value, skip) {
            return Err(violation(
                field
                    .unique_constraint_name(relation.name)
                    .unwrap_or_default(),
                ConstraintKind::Unique,
                format!("duplicate key {} = {}", field.name, value),
            ));
        }
    }

    for fk in relation.foreign_keys {
        let Some(value) = row.get(fk.column) else {
            continue;
        };
        let target = table(tables, fk.target)?;
        if target.position(fk.target_column, value).is_none() {
            return Err(violation(
                fk.constraint_name(relation.name),
                ConstraintKind::ForeignKey,
                format!(
                    "{} = {} is not present in table \"{}\"",
                    fk.column, value, fk.target
                ),
            ));
        }
    }

    Ok(())
}

/// Collect the rows a delete removes, depth first, children before parents.
///
/// Fails on the first restricting foreign key that still references a row.
fn plan_delete(
    tables: &Tables,
    relation: &SchemaRelation,
    row: &Record,
    plan: &mut Vec<(String, Value)>,
) -> Result<(), DbError> {
    let relations: Vec<&SchemaRelation> = tables.values().map(|t| &t.relation).collect();

    for (dependent, fk) in dependents_of(&relations, relation.name) {
        let Some(referenced) = row.get(fk.target_column) else {
            continue;
        };
        let children: Vec<&Record> = table(tables, dependent.name)?
            .rows
            .iter()
            .filter(|child| child.get(fk.column) == Some(referenced))
            .collect();
        if children.is_empty() {
            continue;
        }

        match fk.on_delete {
            OnDelete::Restrict => {
                return Err(violation(
                    fk.constraint_name(dependent.name),
                    ConstraintKind::ForeignKey,
                    format!(
                        "{} row(s) in \"{}\" still reference \"{}\" {} = {}",
                        children.len(),
                        dependent.name,
                        relation.name,
                        fk.target_column,
                        referenced
                    ),
                ));
            }
            OnDelete::Cascade => {
                for child in children {
                    plan_delete(tables, dependent, child, plan)?;
                }
            }
        }
    }

    if let Some(key) = row.get(relation.primary_key) {
        plan.push((relation.name.to_string(), key.clone()));
    }
    Ok(())
}

impl DatabaseBackend for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "Memory"
    }

    fn relation_exists(&self, name: &str) -> Result<bool, DbError> {
        Ok(self.read()?.contains_key(name))
    }

    fn try_create_relation(&self, relation: &SchemaRelation) -> Result<bool, DbError> {
        let mut tables = self.write()?;
        if tables.contains_key(relation.name) {
            return Ok(false);
        }
        for fk in relation.foreign_keys {
            if fk.target != relation.name && !tables.contains_key(fk.target) {
                return Err(missing_relation(fk.target));
            }
        }
        tables.insert(
            relation.name.to_string(),
            Table {
                relation: relation.clone(),
                rows: Vec::new(),
            },
        );
        debug!(relation = relation.name, "created relation");
        Ok(true)
    }

    fn insert_row(&self, relation: &SchemaRelation, mut record: Record) -> Result<Record, DbError> {
        validate_insert(relation, &record)?;
        fill_defaults(relation, &mut record);

        let mut tables = self.write()?;
        check_row(&tables, relation, &record, None)?;
        tables
            .get_mut(relation.name)
            .ok_or_else(|| missing_relation(relation.name))?
            .rows
            .push(record.clone());

        debug!(relation = relation.name, "inserted row");
        Ok(record)
    }

    fn find_by(
        &self,
        relation: &SchemaRelation,
        column: &str,
        value: &Value,
    ) -> Result<Vec<Record>, DbError> {
        let tables = self.read()?;
        Ok(table(&tables, relation.name)?
            .rows
            .iter()
            .filter(|row| row.get(column) == Some(value))
            .cloned()
            .collect())
    }

    fn list_rows(&self, relation: &SchemaRelation) -> Result<Vec<Record>, DbError> {
        let tables = self.read()?;
        Ok(table(&tables, relation.name)?.rows.clone())
    }

    fn update_row(
        &self,
        relation: &SchemaRelation,
        key: &Value,
        changes: Record,
    ) -> Result<Record, DbError> {
        validate_changes(relation, &changes)?;

        let mut tables = self.write()?;
        let own = table(&tables, relation.name)?;
        let index = own
            .position(relation.primary_key, key)
            .ok_or_else(|| DbError::not_found(relation.entity, key))?;

        let mut updated = own.rows[index].clone();
        if changes.is_empty() {
            return Ok(updated);
        }
        updated.merge(&changes);
        check_row(&tables, relation, &updated, Some(index))?;

        if let Some(own) = tables.get_mut(relation.name) {
            own.rows[index] = updated.clone();
        }
        debug!(relation = relation.name, %key, "updated row");
        Ok(updated)
    }

    fn delete_row(&self, relation: &SchemaRelation, key: &Value) -> Result<(), DbError> {
        let mut tables = self.write()?;
        let own = table(&tables, relation.name)?;
        let row = own
            .position(relation.primary_key, key)
            .map(|index| own.rows[index].clone())
            .ok_or_else(|| DbError::not_found(relation.entity, key))?;

        let mut plan = Vec::new();
        plan_delete(&tables, relation, &row, &mut plan)?;

        for (table_name, key) in &plan {
            if let Some(target) = tables.get_mut(table_name) {
                let primary_key = target.relation.primary_key;
                target.rows.retain(|r| r.get(primary_key) != Some(key));
            }
        }
        debug!(relation = relation.name, %key, removed = plan.len(), "deleted row");
        Ok(())
    }
}

use std::error::Error;

use serde::Serialize;
use tracing::info;

use super::SetupCmd;
use crate::commands::Execute;
use crate::db::DatabaseBackend;
use crate::db::schema::ALL_RELATIONS;
use crate::queries::create_schema;

/// Status of a database relation (table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationState {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "exists")]
    AlreadyExists,
    #[serde(rename = "would_create")]
    WouldCreate,
}

/// Status information for a single database relation
#[derive(Debug, Clone, Serialize)]
pub struct RelationStatus {
    pub name: String,
    pub status: RelationState,
}

/// Result of the setup command execution
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub backend: String,
    pub relations: Vec<RelationStatus>,
    pub created_new: bool,
    pub dry_run: bool,
}

impl Execute for SetupCmd {
    type Output = SetupResult;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>> {
        let mut relations = Vec::new();

        if self.dry_run {
            for relation in ALL_RELATIONS {
                let status = if db.relation_exists(relation.name)? {
                    RelationState::AlreadyExists
                } else {
                    RelationState::WouldCreate
                };
                relations.push(RelationStatus {
                    name: relation.name.to_string(),
                    status,
                });
            }

            return Ok(SetupResult {
                backend: db.backend_name().to_string(),
                relations,
                created_new: false,
                dry_run: true,
            });
        }

        for schema_result in create_schema(db)? {
            let status = if schema_result.created {
                RelationState::Created
            } else {
                RelationState::AlreadyExists
            };
            relations.push(RelationStatus {
                name: schema_result.relation,
                status,
            });
        }

        let created_new = relations
            .iter()
            .any(|r| r.status == RelationState::Created);
        info!(backend = db.backend_name(), created_new, "setup finished");

        Ok(SetupResult {
            backend: db.backend_name().to_string(),
            relations,
            created_new,
            dry_run: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryBackend;
    use crate::db::schema::{CATEGORIES, USERS};
    use rstest::{fixture, rstest};

    #[fixture]
    fn backend() -> MemoryBackend {
        MemoryBackend::new()
    }

    #[rstest]
    fn test_setup_creates_all_relations(backend: MemoryBackend) {
        let result = SetupCmd { dry_run: false }
            .execute(&backend)
            .expect("Setup should succeed");

        assert_eq!(result.relations.len(), 4);
        assert!(result
            .relations
            .iter()
            .all(|r| r.status == RelationState::Created));
        assert!(result.created_new);
        assert_eq!(result.backend, "Memory");
    }

    #[rstest]
    fn test_setup_idempotent(backend: MemoryBackend) {
        let first = SetupCmd { dry_run: false }.execute(&backend).unwrap();
        assert!(first.created_new);

        let second = SetupCmd { dry_run: false }.execute(&backend).unwrap();
        assert_eq!(second.relations.len(), 4);
        assert!(second
            .relations
            .iter()
            .all(|r| r.status == RelationState::AlreadyExists));
        assert!(!second.created_new);
    }

    #[rstest]
    fn test_setup_dry_run_creates_nothing(backend: MemoryBackend) {
        let result = SetupCmd { dry_run: true }.execute(&backend).unwrap();

        assert!(result.dry_run);
        assert!(result
            .relations
            .iter()
            .all(|r| r.status == RelationState::WouldCreate));
        assert!(!backend.relation_exists("category").unwrap());
    }

    #[rstest]
    fn test_setup_dry_run_reports_existing(backend: MemoryBackend) {
        backend.try_create_relation(&USERS).unwrap();
        backend.try_create_relation(&CATEGORIES).unwrap();

        let result = SetupCmd { dry_run: true }.execute(&backend).unwrap();
        let states: Vec<_> = result.relations.iter().map(|r| r.status).collect();
        assert_eq!(
            states,
            vec![
                RelationState::AlreadyExists,
                RelationState::AlreadyExists,
                RelationState::WouldCreate,
                RelationState::WouldCreate,
            ]
        );
    }

    #[rstest]
    fn test_setup_relation_order(backend: MemoryBackend) {
        let result = SetupCmd { dry_run: false }.execute(&backend).unwrap();
        let names: Vec<_> = result.relations.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["user", "category", "product", "product_variant"]);
    }
}

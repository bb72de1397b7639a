//! Users mirror identities issued elsewhere; the id always comes from the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Changeset, Entity, Insertable, check_text};
use crate::db::schema::{SchemaRelation, USERS};
use crate::db::{DbError, Record};
use crate::utils::require_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

impl Entity for User {
    const RELATION: &'static SchemaRelation = &USERS;

    fn from_record(record: &Record) -> Result<Self, DbError> {
        Ok(Self {
            id: record.uuid("id")?,
            name: record.text("name")?,
        })
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
}

impl NewUser {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Insertable for NewUser {
    type Output = User;

    fn validate(&self) -> Result<(), DbError> {
        if self.id.is_nil() {
            return Err(DbError::validation(
                USERS.entity,
                "id",
                "must be supplied by the caller",
            ));
        }
        require_text(USERS.entity, "name", &self.name)
    }

    fn into_record(self) -> Record {
        Record::new().with("id", self.id).with("name", self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Changeset for UserChanges {
    type Output = User;

    fn validate(&self) -> Result<(), DbError> {
        check_text(USERS.entity, "name", self.name.as_deref())
    }

    fn into_record(self) -> Record {
        Record::new().with_opt("name", self.name)
    }
}

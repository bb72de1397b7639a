use uuid::Uuid;

use crate::db::{DatabaseBackend, DbError};
use crate::types::{NewUser, User, UserChanges};

/// Create a user. The id must come from the caller.
pub fn create_user(db: &dyn DatabaseBackend, user: NewUser) -> Result<User, DbError> {
    super::insert(db, user)
}

pub fn get_user(db: &dyn DatabaseBackend, id: Uuid) -> Result<User, DbError> {
    super::get(db, id)
}

pub fn list_users(db: &dyn DatabaseBackend) -> Result<Vec<User>, DbError> {
    super::list(db)
}

pub fn update_user(
    db: &dyn DatabaseBackend,
    id: Uuid,
    changes: UserChanges,
) -> Result<User, DbError> {
    super::update(db, id, changes)
}

pub fn delete_user(db: &dyn DatabaseBackend, id: Uuid) -> Result<(), DbError> {
    super::delete::<User>(db, id)
}

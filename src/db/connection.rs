//! Database connection management.

use tracing::debug;

use super::backend::DatabaseBackend;
use super::config::DatabaseConfig;
use super::memory::MemoryBackend;
use super::schema::ALL_RELATIONS;
use super::DbError;

/// Open the engine a URL points at (`:memory:` or `postgres://...`).
///
/// Tables are not created; see `queries::create_schema`.
pub fn open_db(url: &str) -> Result<Box<dyn DatabaseBackend>, DbError> {
    DatabaseConfig::from_url(url)?.connect()
}

/// Create an in-memory engine with every catalog table already created.
pub fn open_mem_db() -> Result<Box<dyn DatabaseBackend>, DbError> {
    let backend = MemoryBackend::new();
    for relation in ALL_RELATIONS {
        backend.try_create_relation(relation)?;
    }
    debug!("opened in-memory catalog");
    Ok(Box::new(backend))
}

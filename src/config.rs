//! Configuration file handling for database connections.
//!
//! This module provides loading and parsing of `.catalog_db.json`
//! configuration files. The file selects the storage engine using a
//! type-tagged JSON object.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::{DatabaseConfig, PostgresConfig};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".catalog_db.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,
}

/// Database configuration variants for the available engines.
///
/// JSON format uses a "type" field with lowercase variant names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// In-memory engine
    Memory,
    /// PostgreSQL engine
    Postgres(PostgresConfig),
}

impl ConfigFile {
    /// Load configuration from `.catalog_db.json` in the current directory.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_if_present() -> Result<Option<Self>, Box<dyn Error>> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(None);
        }
        Self::load_from(&config_path).map(Some)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path).map_err(|e| {
            format!("Failed to read {}: {}", path.display(), e)
        })?;

        let config: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            format!("Invalid JSON in {}: {}", path.display(), e)
        })?;

        Ok(config)
    }
}

impl DatabaseConfigFile {
    /// Convert this configuration to a DatabaseConfig.
    pub fn to_database_config(&self) -> DatabaseConfig {
        match self {
            Self::Memory => DatabaseConfig::Memory,
            Self::Postgres(pg_config) => DatabaseConfig::Postgres(pg_config.clone()),
        }
    }
}

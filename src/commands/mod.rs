//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `execute` module producing a serializable result
//! - An `output` module implementing `Outputable` for that result
//!
//! `describe` and `ddl` work from the static schema alone; only `setup`
//! opens a database connection.

mod ddl;
mod describe;
mod setup;

pub use ddl::DdlCmd;
pub use describe::DescribeCmd;
pub use setup::SetupCmd;

use clap::Subcommand;
use std::error::Error;

use crate::db::{DatabaseBackend, DatabaseConfig};
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>>;
}

/// Trait for commands that run against a database and produce formatted output.
pub trait CommandRunner {
    fn run(self, db: &dyn DatabaseBackend, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

impl<T: Execute> CommandRunner for T {
    fn run(self, db: &dyn DatabaseBackend, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(db)?;
        Ok(result.format(format))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show catalog tables, columns, keys and relationships
    Describe(DescribeCmd),

    /// Print the PostgreSQL DDL for every catalog table
    Ddl(DdlCmd),

    /// Create the catalog tables on the configured database
    Setup(SetupCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &DatabaseConfig, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Describe(cmd) => Ok(cmd.execute()?.format(format)),
            Command::Ddl(cmd) => Ok(cmd.execute().format(format)),
            Command::Setup(cmd) => {
                let db = config.connect()?;
                cmd.run(db.as_ref(), format)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_setup_on_memory() {
        let output = Command::Setup(SetupCmd { dry_run: false })
            .run(&DatabaseConfig::Memory, OutputFormat::Table)
            .unwrap();
        assert!(output.contains("product_variant (created)"));
    }

    #[test]
    fn test_run_ddl_needs_no_connection() {
        let unreachable = DatabaseConfig::from_url("postgres://nobody@127.0.0.1:1/none").unwrap();
        let output = Command::Ddl(DdlCmd { drop: false })
            .run(&unreachable, OutputFormat::Table)
            .unwrap();
        assert!(output.contains("CREATE TABLE IF NOT EXISTS \"category\""));
    }
}

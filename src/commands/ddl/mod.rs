mod execute;
mod output;

pub use execute::DdlResult;

use clap::Args;

/// Print the PostgreSQL DDL for every catalog table, in creation order
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  catalog_db ddl                          # CREATE TABLE statements
  catalog_db ddl --drop                   # DROP statements first (children before parents)
  catalog_db ddl | psql catalog           # Apply by hand")]
pub struct DdlCmd {
    /// Prefix the output with DROP TABLE statements
    #[arg(long, default_value_t = false)]
    pub drop: bool,
}

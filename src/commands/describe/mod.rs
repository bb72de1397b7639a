mod execute;
mod output;

pub use execute::{
    ColumnDescription, DescribeResult, ForeignKeyDescription, RelationshipDescription,
    TableDescription,
};

use clap::Args;

/// Display the catalog tables with their columns, keys and relationships
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  catalog_db describe                    # All tables
  catalog_db describe --table product    # One table
  catalog_db describe -o json            # Machine-readable")]
pub struct DescribeCmd {
    /// Table to describe (if omitted, describes all)
    #[arg(short, long)]
    pub table: Option<String>,
}

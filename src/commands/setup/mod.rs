mod execute;
mod output;

pub use execute::{RelationState, RelationStatus, SetupResult};

use clap::Args;

/// Create the catalog tables without loading any data
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  catalog_db setup --db postgres://shop@localhost/catalog            # Create tables
  catalog_db setup --db postgres://shop@localhost/catalog --dry-run  # Show what would be created")]
pub struct SetupCmd {
    /// Show what would be created without doing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[cfg(test)]
mod cli_tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_defaults_test! {
        command: "setup",
        variant: Setup,
        required_args: [],
        defaults: {
            dry_run: false,
        },
    }

    crate::cli_option_test! {
        command: "setup",
        variant: Setup,
        test_name: test_setup_dry_run_flag,
        args: ["--dry-run"],
        field: dry_run,
        expected: true,
    }

    crate::cli_error_test! {
        command: "setup",
        test_name: test_setup_rejects_force,
        args: ["--force"],
    }
}

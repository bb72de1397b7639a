use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_db::cli::Args;
use catalog_db::db::DatabaseConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so command output on stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = DatabaseConfig::resolve(args.db.as_deref())?;
    let output = args.command.run(&config, args.format)?;
    println!("{}", output);
    Ok(())
}

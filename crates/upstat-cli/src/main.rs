//! upstat CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use upstat_cli::cmd;
use upstat_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so `show --json` stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = cli.store()?;

    match cli.command {
        Commands::Show { json } => cmd::show::show(&store, json),
        Commands::Record {
            success: _,
            error,
            version_at_end,
            timestamp,
        } => cmd::record::record(&store, error, version_at_end, timestamp),
        Commands::Clear => cmd::clear::clear(&store),
        Commands::Path => {
            println!("{}", store.latest_path().display());
            Ok(())
        }
    }
}

//! Resetter - telemetry identifier reset tool
//!
//! Regenerates the telemetry identifiers that VS Code based editors (Windsurf,
//! Cursor) keep in their `storage.json`, so the editor sees a fresh install.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod identifier;
mod profile;
mod transaction;
mod ui;

use cli::{Cli, Commands};

/// Log to stderr; `--verbose` enables debug events unless `RUST_LOG` is set
fn init_logging(verbose: bool) {
    let default_level = if verbose { "resetter=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Reset(args) => commands::reset::run(args, cli.verbose),
        Commands::List => commands::list::run(),
        Commands::Show(args) => commands::show::run(&args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

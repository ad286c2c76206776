//! A font document inspector built on the fontglass object model.

use anyhow::Result;
use clap::Parser;
use fontglass::core;
use tracing_subscriber::EnvFilter;

/// Run the inspector with the given CLI arguments.
fn run(cli_args: core::CliArgs) -> Result<()> {
    core::cli::run(cli_args)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli_args = core::CliArgs::parse();
    if let Err(error) = run(cli_args) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

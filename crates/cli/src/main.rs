//! `propkey` binary.
//!
//! Loads property resources the way a [`propkey_config::Config`] store does
//! and prints what it resolved:
//! - `dump` prints every property (or the dotted tree) as JSON
//! - `get` prints one property, optionally split into a list

mod cli;
mod commands;

use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let stdout = std::io::stdout();
	commands::run(cli.command, &mut stdout.lock())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	// PROPKEY_LOG takes precedence over RUST_LOG.
	let filter = EnvFilter::try_from_env("PROPKEY_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("propkey=debug,propkey_config=debug,propkey_registry=debug")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}

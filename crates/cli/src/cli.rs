use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use propkey_config::LoadMode;

#[derive(Parser, Debug)]
#[command(name = "propkey")]
#[command(about = "Inspect property resources")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Load resources in order and print every property as JSON
	Dump {
		/// Resources to load; the first replaces, the rest merge with `--mode`
		#[arg(required = true, value_name = "FILE")]
		files: Vec<PathBuf>,

		#[command(flatten)]
		source: SourceArgs,

		/// Merge mode for every resource after the first
		#[arg(long, short, default_value = "replace-exists")]
		mode: LoadMode,

		/// Print properties as a tree on dotted names
		#[arg(long)]
		tree: bool,
	},
	/// Print a single property
	Get {
		/// Resource to load
		#[arg(value_name = "FILE")]
		file: PathBuf,

		/// Property name
		name: String,

		#[command(flatten)]
		source: SourceArgs,

		/// Split the value on commas and print a JSON array
		#[arg(long)]
		list: bool,
	},
}

/// Options shared by commands that load resources.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
	/// Environment overlay to layer over each resource (e.g. dev, prod)
	#[arg(long, short, env = "PROPKEY_ENV")]
	pub env: Option<String>,

	/// Substitute `${NAME}` placeholders from the process environment
	#[arg(long)]
	pub placeholders: bool,
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_is_well_formed() {
		Cli::command().debug_assert();
	}

	#[test]
	fn dump_defaults_to_replace_exists() {
		let cli = Cli::try_parse_from(["propkey", "dump", "a.properties", "b.xml"]).unwrap();
		match cli.command {
			Command::Dump { files, mode, tree, .. } => {
				assert_eq!(files.len(), 2);
				assert_eq!(mode, LoadMode::ReplaceExists);
				assert!(!tree);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn dump_requires_a_file() {
		assert!(Cli::try_parse_from(["propkey", "dump"]).is_err());
	}

	#[test]
	fn mode_accepts_snake_case() {
		let cli = Cli::try_parse_from(["propkey", "dump", "a", "--mode", "skip_exists"]).unwrap();
		assert!(matches!(cli.command, Command::Dump { mode: LoadMode::SkipExists, .. }));
	}

	#[test]
	fn invalid_mode_is_rejected() {
		assert!(Cli::try_parse_from(["propkey", "dump", "a", "--mode", "merge"]).is_err());
	}

	#[test]
	fn get_with_env_and_list() {
		let cli = Cli::try_parse_from([
			"propkey", "get", "app.properties", "db.hosts", "--env", "dev", "--list", "-v",
		])
		.unwrap();
		assert!(cli.verbose);
		match cli.command {
			Command::Get { name, source, list, .. } => {
				assert_eq!(name, "db.hosts");
				assert_eq!(source.env.as_deref(), Some("dev"));
				assert!(list);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}
}

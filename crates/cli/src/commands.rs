//! Command implementations. Output is written to a caller-supplied sink.

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use propkey_config::{Config, LoadMode, PlaceholderRenderer, TreeConflict, tree};
use propkey_registry::parse::{StringParser, StringsParser};

use crate::cli::{Command, SourceArgs};

type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Runs `command`, printing its result to `out`.
pub fn run(command: Command, out: &mut impl Write) -> Result<()> {
	match command {
		Command::Dump {
			files,
			source,
			mode,
			tree,
		} => dump(&files, &source, mode, tree, out),
		Command::Get {
			file,
			name,
			source,
			list,
		} => get(&file, &name, &source, list, out),
	}
}

fn open(source: &SourceArgs) -> Config {
	let config = Config::create(false);
	if source.placeholders {
		config.set_renderer(PlaceholderRenderer::from_env());
	}
	config
}

fn dump(
	files: &[PathBuf],
	source: &SourceArgs,
	mode: LoadMode,
	as_tree: bool,
	out: &mut impl Write,
) -> Result<()> {
	let config = open(source);
	for (i, file) in files.iter().enumerate() {
		let mode = if i == 0 { LoadMode::ReplaceAll } else { mode };
		config.load_env(file, source.env.as_deref(), mode)?;
	}
	tracing::info!(files = files.len(), properties = config.len(), "loaded");

	let entries = config.entries()?;
	if as_tree {
		let tree = tree::build(entries, TreeConflict::Preserve)?;
		serde_json::to_writer_pretty(&mut *out, &tree)?;
	} else {
		serde_json::to_writer_pretty(&mut *out, &entries)?;
	}
	writeln!(out)?;
	Ok(())
}

fn get(file: &Path, name: &str, source: &SourceArgs, list: bool, out: &mut impl Write) -> Result<()> {
	let config = open(source);
	config.load_env(file, source.env.as_deref(), LoadMode::ReplaceAll)?;

	if config.raw(name).is_none() {
		let names = config.entries()?.into_keys();
		match closest(name, names) {
			Some(close) => tracing::warn!(key = name, suggestion = %close, "property not found"),
			None => tracing::warn!(key = name, "property not found"),
		}
	}

	if list {
		let values = config.get_with(name, &StringsParser::default())?;
		serde_json::to_writer(&mut *out, &values)?;
		writeln!(out)?;
	} else {
		let value = config.get_with(name, &StringParser)?;
		writeln!(out, "{value}")?;
	}
	Ok(())
}

/// Picks the nearest property name within a small edit distance.
fn closest(name: &str, candidates: impl IntoIterator<Item = String>) -> Option<String> {
	candidates
		.into_iter()
		.map(|c| (strsim::levenshtein(name, &c), c))
		.filter(|(d, _)| *d <= 3)
		.min_by_key(|(d, _)| *d)
		.map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use pretty_assertions::assert_eq;
	use tempfile::TempDir;

	use super::*;

	fn output(command: Command) -> String {
		let mut buf = Vec::new();
		run(command, &mut buf).unwrap();
		String::from_utf8(buf).unwrap()
	}

	fn source(env: Option<&str>) -> SourceArgs {
		SourceArgs {
			env: env.map(str::to_string),
			placeholders: false,
		}
	}

	#[test]
	fn dump_merges_files_in_order() {
		let dir = TempDir::new().unwrap();
		let a = dir.path().join("a.properties");
		let b = dir.path().join("b.properties");
		fs::write(&a, "x=1\ny=1\n").unwrap();
		fs::write(&b, "y=2\n").unwrap();

		let out = output(Command::Dump {
			files: vec![a, b],
			source: source(None),
			mode: LoadMode::ReplaceExists,
			tree: false,
		});
		assert_eq!(out, "{\n  \"x\": \"1\",\n  \"y\": \"2\"\n}\n");
	}

	#[test]
	fn dump_tree_nests_dotted_names() {
		let dir = TempDir::new().unwrap();
		let a = dir.path().join("a.properties");
		fs::write(&a, "db.host=h\ndb.port=1\n").unwrap();

		let out = output(Command::Dump {
			files: vec![a],
			source: source(None),
			mode: LoadMode::ReplaceExists,
			tree: true,
		});
		let value: serde_json::Value = serde_json::from_str(&out).unwrap();
		assert_eq!(value["db"]["host"], "h");
		assert_eq!(value["db"]["port"], "1");
	}

	#[test]
	fn get_reads_overlay() {
		let dir = TempDir::new().unwrap();
		let file = dir.path().join("app.properties");
		fs::write(&file, "hosts=a,b\n").unwrap();
		fs::write(dir.path().join("app_dev.properties"), "hosts=c,#d,e\n").unwrap();

		let out = output(Command::Get {
			file: file.clone(),
			name: "hosts".into(),
			source: source(Some("dev")),
			list: true,
		});
		assert_eq!(out, "[\"c\",\"e\"]\n");

		let out = output(Command::Get {
			file,
			name: "hosts".into(),
			source: source(None),
			list: false,
		});
		assert_eq!(out, "a,b\n");
	}

	#[test]
	fn get_missing_prints_empty_line() {
		let dir = TempDir::new().unwrap();
		let out = output(Command::Get {
			file: dir.path().join("none.properties"),
			name: "x".into(),
			source: source(None),
			list: false,
		});
		assert_eq!(out, "\n");
	}

	#[test]
	fn closest_name_within_distance() {
		let names = ["db.host".to_string(), "db.port".to_string()];
		assert_eq!(closest("db.hots", names.clone()).as_deref(), Some("db.host"));
		assert_eq!(closest("something.else", names), None);
	}
}

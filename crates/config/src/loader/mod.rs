//! Resource loading: format dispatch and environment overlays.
//!
//! A missing resource is not an error; it loads as an empty map. A resource
//! that exists but cannot be read or parsed fails with
//! [`ConfigError::Io`].

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap as HashMap;

use crate::error::{ConfigError, ResourceError, Result};

pub mod properties;
pub mod xml;

/// Flat property name to raw value map.
pub type Properties = HashMap<String, String>;

/// Resource syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
	/// `key=value` lines.
	#[default]
	Properties,
	/// `<properties><property name=".."><value>..</value></property></properties>`.
	Xml,
}

impl Format {
	/// Chooses the format from the file extension: `.xml` is XML, anything
	/// else is properties text.
	pub fn from_path(path: &Path) -> Self {
		match path.extension() {
			Some(ext) if ext.eq_ignore_ascii_case("xml") => Format::Xml,
			_ => Format::Properties,
		}
	}

	/// Parses `content` in this format.
	pub fn parse(self, content: &str) -> std::result::Result<Properties, ResourceError> {
		match self {
			Format::Properties => properties::parse(content),
			Format::Xml => xml::parse(content),
		}
	}
}

/// Returns the environment overlay path for `path`.
///
/// `conf/app.properties` with `dev` becomes `conf/app_dev.properties`;
/// `conf/app` becomes `conf/app_dev`. Only the file name is considered, so
/// dots in directory names are left alone.
pub fn overlay_path(path: &Path, env: &str) -> PathBuf {
	let mut name = path.file_stem().unwrap_or_default().to_os_string();
	name.push("_");
	name.push(env);
	if let Some(ext) = path.extension() {
		name.push(".");
		name.push(ext);
	}
	path.with_file_name(name)
}

/// Reads one resource. Missing files load as an empty map.
pub fn read_resource(path: &Path) -> Result<Properties> {
	if !path.is_file() {
		tracing::debug!(domain = "config", path = %path.display(), "resource not found; skipping");
		return Ok(Properties::default());
	}

	let io_err = |source: ResourceError| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	};
	let content = std::fs::read_to_string(path).map_err(|e| io_err(e.into()))?;
	let props = Format::from_path(path).parse(&content).map_err(io_err)?;

	tracing::debug!(
		domain = "config",
		path = %path.display(),
		count = props.len(),
		"resource loaded",
	);
	Ok(props)
}

/// Reads the base resource and, when `env` is non-empty, its overlay.
///
/// Overlay entries replace base entries with the same name.
pub fn read_layers(path: &Path, env: Option<&str>) -> Result<Properties> {
	let mut props = read_resource(path)?;
	if let Some(env) = env.filter(|e| !e.is_empty()) {
		props.extend(read_resource(&overlay_path(path, env))?);
	}
	Ok(props)
}

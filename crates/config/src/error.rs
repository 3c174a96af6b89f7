//! Error types for loading and reading property stores.

use std::path::PathBuf;

use thiserror::Error;

use crate::render::RenderError;

/// Errors raised by [`crate::Config`] operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A resource exists but could not be read or parsed.
	#[error("failed to load {path}: {source}")]
	Io {
		/// Resource being loaded. `<inline>` for in-memory content.
		path: PathBuf,
		/// The underlying failure.
		#[source]
		source: ResourceError,
	},

	/// A required argument was empty.
	#[error("missing required argument: {0}")]
	MissingArgument(&'static str),

	/// A renderer rejected a value.
	#[error("failed to render '{key}': {source}")]
	Render {
		/// Property name being rendered.
		key: String,
		#[source]
		source: RenderError,
	},

	/// A dotted key needs a prefix to be both a leaf and a branch.
	#[error("property '{key}' conflicts with a nested property of the same prefix")]
	TreeConflict {
		/// The key whose placement conflicted.
		key: String,
	},
}

/// Failures reading a single resource.
#[derive(Debug, Error)]
pub enum ResourceError {
	/// The file could not be read.
	#[error("I/O error: {0}")]
	Read(#[from] std::io::Error),

	/// The XML document is not well formed.
	#[error("XML parse error: {0}")]
	Xml(#[from] quick_xml::Error),

	/// Properties text contains an invalid escape.
	#[error("line {line}: {message}")]
	Syntax {
		/// 1-based line where the entry starts.
		line: usize,
		message: String,
	},

	/// The XML document does not follow the properties schema.
	#[error("invalid properties document: {0}")]
	Schema(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

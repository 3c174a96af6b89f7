//! Value rendering: string transformation applied after lookup, before
//! parsing.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use thiserror::Error;

/// Failure reported by a [`ValueRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	/// A `${name}` placeholder had no value in strict mode.
	#[error("unresolved placeholder: ${{{0}}}")]
	Unresolved(String),

	/// Any other renderer-specific failure.
	#[error("{0}")]
	Custom(String),
}

/// Transforms a raw property value before it is parsed.
///
/// `key` is the property name being rendered; `value` is the raw string, or
/// the empty string for absent properties.
pub trait ValueRenderer: Send + Sync {
	fn render(&self, key: &str, value: &str) -> Result<String, RenderError>;
}

impl<F> ValueRenderer for F
where
	F: Fn(&str, &str) -> Result<String, RenderError> + Send + Sync,
{
	fn render(&self, key: &str, value: &str) -> Result<String, RenderError> {
		self(key, value)
	}
}

static PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Replaces `${name}` placeholders with values from a lookup source.
///
/// Unresolved placeholders are left untouched unless [`strict`] is set.
/// Substituted text is not rendered again.
///
/// [`strict`]: PlaceholderRenderer::strict
#[derive(Clone)]
pub struct PlaceholderRenderer {
	lookup: Lookup,
	strict: bool,
}

impl core::fmt::Debug for PlaceholderRenderer {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("PlaceholderRenderer")
			.field("strict", &self.strict)
			.finish_non_exhaustive()
	}
}

impl PlaceholderRenderer {
	/// Resolves placeholders with an arbitrary lookup function.
	pub fn new(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
		Self {
			lookup: Arc::new(lookup),
			strict: false,
		}
	}

	/// Resolves placeholders from process environment variables.
	pub fn from_env() -> Self {
		Self::new(|name| std::env::var(name).ok())
	}

	/// Resolves placeholders from a fixed map.
	pub fn from_map(values: HashMap<String, String>) -> Self {
		Self::new(move |name| values.get(name).cloned())
	}

	/// Fails rendering when a placeholder cannot be resolved.
	pub fn strict(mut self) -> Self {
		self.strict = true;
		self
	}
}

impl ValueRenderer for PlaceholderRenderer {
	fn render(&self, _key: &str, value: &str) -> Result<String, RenderError> {
		if !value.contains("${") {
			return Ok(value.to_string());
		}

		let mut unresolved = None;
		let rendered = PLACEHOLDER.replace_all(value, |caps: &Captures<'_>| {
			let name = &caps[1];
			match (self.lookup)(name) {
				Some(v) => v,
				None => {
					unresolved.get_or_insert_with(|| name.to_string());
					caps[0].to_string()
				}
			}
		});

		match unresolved {
			Some(name) if self.strict => Err(RenderError::Unresolved(name)),
			_ => Ok(rendered.into_owned()),
		}
	}
}

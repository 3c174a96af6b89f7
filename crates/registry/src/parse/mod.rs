//! String to typed value conversion.
//!
//! Parsers are lenient: empty or unparsable input yields the output type's
//! zero value instead of an error. Unparsable non-empty input is reported
//! through a `warn` event so the fallback does not go unnoticed.

mod list;
mod scalar;

pub use list::{
	BoolsParser, DoublesParser, FloatsParser, IntsParser, ListParser, LongsParser,
	RawStringsParser, ShortsParser, StringsParser, split_tokens,
};
pub use scalar::{
	BoolParser, DoubleParser, FloatParser, IntParser, LongParser, ShortParser, StringParser,
};

/// Converts a rendered property string into a typed value.
///
/// Stores construct one instance per parser type with [`Default`] and reuse
/// it for every lookup, so implementations must not hold per-call state.
pub trait ValueParser: Default + Send + Sync + 'static {
	type Output;

	fn parse(&self, value: &str) -> Self::Output;
}

/// Parses a boolean from common string representations.
///
/// `true`, `yes`, `on` and `1` (any case, surrounding whitespace ignored) are
/// true. Everything else is false.
pub fn parse_bool(value: &str) -> bool {
	matches!(
		value.trim().to_ascii_lowercase().as_str(),
		"true" | "yes" | "on" | "1"
	)
}

/// Parses a number, falling back to its default on failure.
pub fn parse_number<T>(value: &str) -> T
where
	T: std::str::FromStr + Default,
{
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return T::default();
	}
	match trimmed.parse::<T>() {
		Ok(v) => v,
		Err(_) => {
			tracing::warn!(
				domain = "parse",
				value = trimmed,
				expected = std::any::type_name::<T>(),
				"unparsable number; falling back to zero",
			);
			T::default()
		}
	}
}

#[cfg(test)]
mod tests;

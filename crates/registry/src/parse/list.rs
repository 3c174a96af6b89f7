use super::ValueParser;
use super::scalar::{
	BoolParser, DoubleParser, FloatParser, IntParser, LongParser, ShortParser, StringParser,
};

/// Splits a comma-separated value into tokens.
///
/// Trailing empty tokens are dropped, so `"a,b,"` is two tokens and `""` is
/// none. Interior empty tokens are kept. With `skip_comments`, tokens whose
/// first character is `#` are removed.
pub fn split_tokens(value: &str, skip_comments: bool) -> Vec<&str> {
	let mut tokens: Vec<&str> = value.split(',').collect();
	while tokens.last().is_some_and(|t| t.is_empty()) {
		tokens.pop();
	}
	if skip_comments {
		tokens.retain(|t| !t.starts_with('#'));
	}
	tokens
}

/// Parses a comma-separated list, delegating each token to `S`.
///
/// `SKIP_COMMENTS` controls whether `#`-prefixed tokens are dropped.
pub struct ListParser<S, const SKIP_COMMENTS: bool = true> {
	element: S,
}

impl<S: ValueParser, const SKIP_COMMENTS: bool> Default for ListParser<S, SKIP_COMMENTS> {
	fn default() -> Self {
		Self {
			element: S::default(),
		}
	}
}

impl<S, const SKIP_COMMENTS: bool> core::fmt::Debug for ListParser<S, SKIP_COMMENTS> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ListParser")
			.field("element", &std::any::type_name::<S>())
			.field("skip_comments", &SKIP_COMMENTS)
			.finish()
	}
}

impl<S: ValueParser, const SKIP_COMMENTS: bool> ValueParser for ListParser<S, SKIP_COMMENTS> {
	type Output = Vec<S::Output>;

	fn parse(&self, value: &str) -> Vec<S::Output> {
		split_tokens(value, SKIP_COMMENTS)
			.into_iter()
			.map(|token| self.element.parse(token))
			.collect()
	}
}

pub type StringsParser = ListParser<StringParser>;
/// String list that keeps `#`-prefixed tokens.
pub type RawStringsParser = ListParser<StringParser, false>;
pub type BoolsParser = ListParser<BoolParser>;
pub type ShortsParser = ListParser<ShortParser>;
pub type IntsParser = ListParser<IntParser>;
pub type LongsParser = ListParser<LongParser>;
pub type FloatsParser = ListParser<FloatParser>;
pub type DoublesParser = ListParser<DoubleParser>;


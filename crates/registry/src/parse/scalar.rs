use super::{ValueParser, parse_bool, parse_number};

/// Passes the rendered string through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringParser;

impl ValueParser for StringParser {
	type Output = String;

	fn parse(&self, value: &str) -> String {
		value.to_string()
	}
}

/// See [`parse_bool`] for accepted spellings.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolParser;

impl ValueParser for BoolParser {
	type Output = bool;

	fn parse(&self, value: &str) -> bool {
		parse_bool(value)
	}
}

macro_rules! number_parser {
	($(#[$meta:meta])* $name:ident => $ty:ty) => {
		$(#[$meta])*
		#[derive(Debug, Default, Clone, Copy)]
		pub struct $name;

		impl ValueParser for $name {
			type Output = $ty;

			fn parse(&self, value: &str) -> $ty {
				parse_number::<$ty>(value)
			}
		}
	};
}

number_parser!(
	/// 16-bit signed integer.
	ShortParser => i16
);
number_parser!(
	/// 32-bit signed integer.
	IntParser => i32
);
number_parser!(
	/// 64-bit signed integer.
	LongParser => i64
);
number_parser!(FloatParser => f32);
number_parser!(DoubleParser => f64);

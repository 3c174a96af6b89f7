//! Line-oriented `key=value` properties text.
//!
//! Follows the conventional properties grammar: `#` and `!` comment lines,
//! `=`, `:` or whitespace separators, backslash line continuation and the
//! `\t \n \r \f \uXXXX` escapes. Lines end at `\n`, `\r\n` or a bare `\r`.
//! Later duplicates replace earlier ones.

use super::Properties;
use crate::error::ResourceError;

const BLANK: &[char] = &[' ', '\t', '\x0c'];

/// Parses properties text into a flat map.
pub fn parse(content: &str) -> Result<Properties, ResourceError> {
	let mut props = Properties::default();
	let mut lines = lines(content).enumerate();

	while let Some((index, line)) = lines.next() {
		let first = line.trim_start_matches(BLANK);
		if first.is_empty() || first.starts_with(['#', '!']) {
			continue;
		}

		let mut logical = first.to_string();
		while continues(&logical) {
			logical.pop();
			match lines.next() {
				Some((_, next)) => logical.push_str(next.trim_start_matches(BLANK)),
				None => break,
			}
		}

		let (key, value) = split_key_value(&logical);
		let line_no = index + 1;
		props.insert(unescape(key, line_no)?, unescape(value, line_no)?);
	}

	Ok(props)
}

/// Splits on `\n`, `\r\n` and bare `\r`.
fn lines(content: &str) -> impl Iterator<Item = &str> {
	let mut rest = content;
	std::iter::from_fn(move || {
		if rest.is_empty() {
			return None;
		}
		match rest.find(['\r', '\n']) {
			Some(i) => {
				let line = &rest[..i];
				let terminator = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
				rest = &rest[i + terminator..];
				Some(line)
			}
			None => Some(std::mem::take(&mut rest)),
		}
	})
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
	line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
	let mut escaped = false;
	for (i, c) in line.char_indices() {
		if escaped {
			escaped = false;
			continue;
		}
		match c {
			'\\' => escaped = true,
			'=' | ':' => return (&line[..i], line[i + 1..].trim_start_matches(BLANK)),
			' ' | '\t' | '\x0c' => {
				let rest = line[i..].trim_start_matches(BLANK);
				let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
				return (&line[..i], rest.trim_start_matches(BLANK));
			}
			_ => {}
		}
	}
	(line, "")
}

fn unescape(raw: &str, line: usize) -> Result<String, ResourceError> {
	if !raw.contains('\\') {
		return Ok(raw.to_string());
	}

	let mut out = String::with_capacity(raw.len());
	// UTF-16 units from consecutive `\u` escapes, so surrogate pairs combine.
	let mut units: Vec<u16> = Vec::new();
	let mut chars = raw.chars();

	while let Some(c) = chars.next() {
		if c == '\\' && chars.as_str().starts_with('u') {
			chars.next();
			let hex: String = chars.by_ref().take(4).collect();
			let unit = (hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
				.then(|| u16::from_str_radix(&hex, 16).ok())
				.flatten()
				.ok_or_else(|| ResourceError::Syntax {
					line,
					message: format!("malformed \\uxxxx encoding: \\u{hex}"),
				})?;
			units.push(unit);
			continue;
		}

		flush_units(&mut units, &mut out);
		if c != '\\' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('t') => out.push('\t'),
			Some('n') => out.push('\n'),
			Some('r') => out.push('\r'),
			Some('f') => out.push('\x0c'),
			Some(other) => out.push(other),
			None => {}
		}
	}
	flush_units(&mut units, &mut out);

	Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) {
	if units.is_empty() {
		return;
	}
	out.extend(
		char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
	);
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn get<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
		props.get(key).map(String::as_str)
	}

	#[test]
	fn separators() {
		let props = parse("a=1\nb:2\nc 3\nd = 4\ne\t:\t5\nf\n").unwrap();
		assert_eq!(get(&props, "a"), Some("1"));
		assert_eq!(get(&props, "b"), Some("2"));
		assert_eq!(get(&props, "c"), Some("3"));
		assert_eq!(get(&props, "d"), Some("4"));
		assert_eq!(get(&props, "e"), Some("5"));
		assert_eq!(get(&props, "f"), Some(""));
	}

	#[test]
	fn comments_and_blank_lines() {
		let props = parse("# comment\n! also comment\n\n   \nkey=value # not a comment\n").unwrap();
		assert_eq!(props.len(), 1);
		assert_eq!(get(&props, "key"), Some("value # not a comment"));
	}

	#[test]
	fn value_keeps_trailing_whitespace() {
		let props = parse("k=  v  \n").unwrap();
		assert_eq!(get(&props, "k"), Some("v  "));
	}

	#[test]
	fn continuation_lines() {
		let props = parse("list=a,\\\n    b,\\\n    c\nnext=1\n").unwrap();
		assert_eq!(get(&props, "list"), Some("a,b,c"));
		assert_eq!(get(&props, "next"), Some("1"));
	}

	#[test]
	fn even_backslashes_do_not_continue() {
		let props = parse("path=c:\\\\\nother=x\n").unwrap();
		assert_eq!(get(&props, "path"), Some("c:\\"));
		assert_eq!(get(&props, "other"), Some("x"));
	}

	#[test]
	fn escapes() {
		let props = parse("tab=a\\tb\nkey\\=with\\:sep=v\nuni=\\u00e9t\\u00e9\nemoji=\\uD83D\\uDE00\n").unwrap();
		assert_eq!(get(&props, "tab"), Some("a\tb"));
		assert_eq!(get(&props, "key=with:sep"), Some("v"));
		assert_eq!(get(&props, "uni"), Some("été"));
		assert_eq!(get(&props, "emoji"), Some("😀"));
	}

	#[test]
	fn malformed_unicode_escape_is_an_error() {
		let err = parse("ok=1\nbad=\\u12\n").unwrap_err();
		assert!(matches!(err, ResourceError::Syntax { line: 2, .. }));
	}

	#[test]
	fn signed_unicode_escape_is_an_error() {
		let err = parse("k=\\u+041\n").unwrap_err();
		assert!(matches!(err, ResourceError::Syntax { line: 1, .. }));
	}

	#[test]
	fn last_duplicate_wins() {
		let props = parse("k=1\nk=2\n").unwrap();
		assert_eq!(get(&props, "k"), Some("2"));
	}

	#[test]
	fn crlf_line_endings() {
		let props = parse("a=1\r\nb=2\r\n").unwrap();
		assert_eq!(get(&props, "a"), Some("1"));
		assert_eq!(get(&props, "b"), Some("2"));
	}

	#[test]
	fn bare_cr_line_endings() {
		let props = parse("a=1\rb=2\r# c\rlist=x,\\\r  y\r").unwrap();
		assert_eq!(props.len(), 3);
		assert_eq!(get(&props, "a"), Some("1"));
		assert_eq!(get(&props, "b"), Some("2"));
		assert_eq!(get(&props, "list"), Some("x,y"));
	}

	#[test]
	fn line_numbers_count_bare_cr() {
		let err = parse("a=1\rb=2\rbad=\\u12\n").unwrap_err();
		assert!(matches!(err, ResourceError::Syntax { line: 3, .. }));
	}
}

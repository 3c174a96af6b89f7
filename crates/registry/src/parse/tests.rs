use rstest::rstest;

use super::*;

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case(" yes ", true)]
#[case("on", true)]
#[case("1", true)]
#[case("false", false)]
#[case("0", false)]
#[case("", false)]
#[case("maybe", false)]
fn bool_spellings(#[case] input: &str, #[case] expected: bool) {
	assert_eq!(BoolParser.parse(input), expected);
}

#[rstest]
#[case("42", 42)]
#[case(" -7 ", -7)]
#[case("", 0)]
#[case("forty-two", 0)]
#[case("3.5", 0)]
#[case("99999999999", 0)]
fn int_is_lenient(#[case] input: &str, #[case] expected: i32) {
	assert_eq!(IntParser.parse(input), expected);
}

#[test]
fn short_overflow_is_zero() {
	assert_eq!(ShortParser.parse("40000"), 0);
	assert_eq!(ShortParser.parse("-12"), -12);
}

#[test]
fn long_and_floats() {
	assert_eq!(LongParser.parse("9000000000"), 9_000_000_000);
	assert_eq!(FloatParser.parse("1.5"), 1.5);
	assert_eq!(DoubleParser.parse("2.25"), 2.25);
	assert_eq!(DoubleParser.parse("x"), 0.0);
}

#[test]
fn string_is_identity() {
	assert_eq!(StringParser.parse(" keep  spaces "), " keep  spaces ");
	assert_eq!(StringParser.parse(""), "");
}

#[test]
fn strings_skip_comment_tokens() {
	assert_eq!(StringsParser::default().parse("1,#2,3"), ["1", "3"]);
}

#[test]
fn raw_strings_keep_comment_tokens() {
	assert_eq!(RawStringsParser::default().parse("1,#2,3"), ["1", "#2", "3"]);
}

#[test]
fn empty_list_is_empty() {
	assert!(StringsParser::default().parse("").is_empty());
	assert!(IntsParser::default().parse("").is_empty());
}

#[rstest]
#[case("a,b,", &["a", "b"])]
#[case("a,,b", &["a", "", "b"])]
#[case(",,", &[])]
#[case("#only", &[])]
fn token_splitting(#[case] input: &str, #[case] expected: &[&str]) {
	assert_eq!(split_tokens(input, true), expected);
}

#[test]
fn typed_lists_delegate_per_token() {
	assert_eq!(IntsParser::default().parse("1, 2,x,#4"), [1, 2, 0]);
	assert_eq!(LongsParser::default().parse("10,20"), [10, 20]);
	assert_eq!(ShortsParser::default().parse("1"), [1]);
	assert_eq!(BoolsParser::default().parse("true,off,yes"), [true, false, true]);
	assert_eq!(FloatsParser::default().parse("0.5"), [0.5]);
	assert_eq!(DoublesParser::default().parse("1.0,#x,2.0"), [1.0, 2.0]);
}

use encoding_rs::{UTF_8, WINDOWS_1252};
use nom::combinator::all_consuming;
use nom::{character, number, IResult, Parser};
use std::borrow::Cow;

/// Characters stripped from the end of every line
const TRAILING_WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// Materialize properly encoded text from raw beatmap bytes.
///
/// UTF-8 (with or without BOM) is expected, legacy maps fall back to Windows-1252.
pub fn decode_text(i: &[u8]) -> Cow<'_, str> {
    let (text, encoding_used, had_errors) = UTF_8.decode(i);
    if had_errors {
        log::debug!("Error decoding beatmap with {encoding_used:?}, falling back to Windows-1252");
        let (text, _, _) = WINDOWS_1252.decode(i);
        text
    } else {
        text
    }
}

/// Strip trailing spaces, tabs and line terminators
pub fn strip_line(line: &str) -> &str {
    line.trim_end_matches(TRAILING_WHITESPACE)
}

/// Empty lines, `/` comments and `_` host markers carry no data
pub fn is_ignored_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('/') || line.starts_with('_')
}

/// Section name of a `[Section]` line
pub fn parse_section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Parse a whole field as signed 32
pub fn parse_int(i: &str) -> IResult<&str, i32> {
    all_consuming(character::complete::i32).parse(i)
}

/// Parse a whole field as double
pub fn parse_float(i: &str) -> IResult<&str, f64> {
    all_consuming(number::complete::double).parse(i)
}

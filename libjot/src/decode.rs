//! JSON decoder.
//!
//! A recursive-descent decoder over the strict JSON grammar, written once
//! against the pull-based [`Source`] abstraction. The buffered entry points
//! run it over a slice; the streamed entry points run it over a reader with
//! a single byte of pushback. Both report byte offsets in errors.
//!
//! Any grammar violation aborts the whole decode call; no partial value is
//! ever returned.

use std::io::Read;

use crate::error::{Error, Location, Result};
use crate::source::{ReaderSource, SliceSource, Source};
use crate::value::{Object, Value};

/// Nesting depth permitted before a decode is rejected.
///
/// Nesting consumes call stack, so it is bounded explicitly rather than by
/// whatever the stack happens to survive. The `_with_limit` entry points
/// override it.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decode a complete JSON document.
///
/// Exactly one value, optionally surrounded by whitespace; anything else
/// after the value is a syntax error.
///
/// # Example
///
/// ```
/// use libjot::decode;
///
/// let value = decode("[1,2.5,-3e2]").unwrap();
/// assert_eq!(value.at(2).unwrap().as_number().unwrap(), -300.0);
/// ```
pub fn decode(input: &str) -> Result<Value> {
    decode_with_limit(input, DEFAULT_MAX_DEPTH)
}

/// [`decode`] with an explicit nesting-depth limit.
pub fn decode_with_limit(input: &str, max_depth: usize) -> Result<Value> {
    let mut decoder = Decoder::new(SliceSource::new(input.as_bytes(), 0), max_depth);
    let value = decoder.value()?;
    decoder.expect_end()?;
    Ok(value)
}

/// Decode one JSON value starting at byte offset `start`.
///
/// Returns the value and the offset just past it; the remainder of the
/// input is not inspected. Error offsets are absolute into `input`.
pub fn decode_at(input: &str, start: usize) -> Result<(Value, usize)> {
    decode_at_with_limit(input, start, DEFAULT_MAX_DEPTH)
}

/// [`decode_at`] with an explicit nesting-depth limit.
pub fn decode_at_with_limit(input: &str, start: usize, max_depth: usize) -> Result<(Value, usize)> {
    let mut decoder = Decoder::new(SliceSource::new(input.as_bytes(), start), max_depth);
    let value = decoder.value()?;
    let end = decoder.src.offset();
    Ok((value, end))
}

/// Decode one JSON value from a reader.
///
/// Consumes exactly one value's worth of bytes. Tokens whose end is only
/// detectable by lookahead (numbers, whitespace runs) cost one extra byte
/// which this one-shot form discards; use [`StreamDecoder`] to pull several
/// consecutive values from the same stream without losing it.
pub fn decode_reader<R: Read>(reader: R) -> Result<Value> {
    decode_reader_with_limit(reader, DEFAULT_MAX_DEPTH)
}

/// [`decode_reader`] with an explicit nesting-depth limit.
pub fn decode_reader_with_limit<R: Read>(reader: R, max_depth: usize) -> Result<Value> {
    StreamDecoder::with_limit(reader, max_depth).decode()
}

/// Pulls consecutive JSON values off one reader.
///
/// The decoder owns the reader and retains at most one byte of lookahead
/// between calls, so each [`decode`](StreamDecoder::decode) call leaves the
/// stream positioned immediately after the value it consumed. The caller
/// calls it once per expected value.
pub struct StreamDecoder<R: Read> {
    inner: Decoder<ReaderSource<R>>,
}

impl<R: Read> StreamDecoder<R> {
    /// Attach to a reader with the default depth limit.
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, DEFAULT_MAX_DEPTH)
    }

    /// Attach to a reader with an explicit nesting-depth limit.
    pub fn with_limit(reader: R, max_depth: usize) -> Self {
        Self {
            inner: Decoder::new(ReaderSource::new(reader), max_depth),
        }
    }

    /// Decode the next value from the stream.
    ///
    /// Error offsets count from where the decoder was attached.
    pub fn decode(&mut self) -> Result<Value> {
        self.inner.depth = 0;
        self.inner.value()
    }
}

struct Decoder<S: Source> {
    src: S,
    max_depth: usize,
    depth: usize,
}

impl<S: Source> Decoder<S> {
    fn new(src: S, max_depth: usize) -> Self {
        Self {
            src,
            max_depth,
            depth: 0,
        }
    }

    /// Offset of the byte most recently returned by the source.
    fn here(&self) -> Location {
        Location(Some(self.src.offset().saturating_sub(1)))
    }

    /// Offset just past everything consumed, for end-of-input reports.
    fn at_end(&self) -> Location {
        Location(Some(self.src.offset()))
    }

    /// Location of an offending read: the byte itself, or end of input.
    fn spot(&self, got: Option<u8>) -> Location {
        match got {
            Some(_) => self.here(),
            None => self.at_end(),
        }
    }

    fn next_non_ws(&mut self) -> Result<Option<u8>> {
        loop {
            match self.src.next()? {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => continue,
                other => return Ok(other),
            }
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.next_non_ws()? {
            None => Err(Error::UnexpectedEnd(self.at_end())),
            Some(b'n') => self.literal(b"ull", "null", Value::Null),
            Some(b't') => self.literal(b"rue", "true", Value::Bool(true)),
            Some(b'f') => self.literal(b"alse", "false", Value::Bool(false)),
            Some(first @ (b'-' | b'0'..=b'9')) => self.number(first),
            Some(b'"') => Ok(Value::String(self.string()?)),
            Some(b'[') => self.array(),
            Some(b'{') => self.object(),
            Some(_) => Err(Error::InvalidToken(self.here())),
        }
    }

    /// Only whitespace may remain; consumes it.
    fn expect_end(&mut self) -> Result<()> {
        match self.next_non_ws()? {
            None => Ok(()),
            Some(_) => Err(Error::TrailingContent(self.here())),
        }
    }

    /// Match the remainder of a literal token whose first byte is consumed.
    fn literal(&mut self, rest: &'static [u8], name: &'static str, value: Value) -> Result<Value> {
        let start = self.here();
        for &expected in rest {
            match self.src.next()? {
                Some(byte) if byte == expected => {}
                _ => return Err(Error::ExpectedLiteral(name, start)),
            }
        }
        Ok(value)
    }

    /// Append any immediately following ASCII digits to `buf`.
    fn digits(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        loop {
            match self.src.next()? {
                Some(digit @ b'0'..=b'9') => buf.push(digit),
                Some(other) => {
                    self.src.unget(other);
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }

    /// Number, with the sign or first digit already consumed. The matched
    /// span goes to the float conversion whole at acceptance.
    fn number(&mut self, first: u8) -> Result<Value> {
        let start = self.here();
        let mut buf = vec![first];

        let lead = if first == b'-' {
            let got = self.src.next()?;
            match got {
                Some(digit @ b'0'..=b'9') => {
                    buf.push(digit);
                    digit
                }
                _ => return Err(Error::ExpectedDigit("after minus sign", self.spot(got))),
            }
        } else {
            first
        };

        // a leading zero stands alone in the integer part
        if lead == b'0' {
            match self.src.next()? {
                Some(b'0'..=b'9') => return Err(Error::LeadingZero(self.here())),
                Some(other) => self.src.unget(other),
                None => {}
            }
        } else {
            self.digits(&mut buf)?;
        }

        match self.src.next()? {
            Some(b'.') => {
                buf.push(b'.');
                let got = self.src.next()?;
                match got {
                    Some(digit @ b'0'..=b'9') => {
                        buf.push(digit);
                        self.digits(&mut buf)?;
                    }
                    _ => return Err(Error::ExpectedDigit("after decimal point", self.spot(got))),
                }
            }
            Some(other) => self.src.unget(other),
            None => {}
        }

        match self.src.next()? {
            Some(e @ (b'e' | b'E')) => {
                buf.push(e);
                let mut got = self.src.next()?;
                if let Some(sign @ (b'+' | b'-')) = got {
                    buf.push(sign);
                    got = self.src.next()?;
                }
                match got {
                    Some(digit @ b'0'..=b'9') => {
                        buf.push(digit);
                        self.digits(&mut buf)?;
                    }
                    _ => return Err(Error::ExpectedDigit("in exponent", self.spot(got))),
                }
            }
            Some(other) => self.src.unget(other),
            None => {}
        }

        let text = std::str::from_utf8(&buf).map_err(|_| Error::InvalidNumber(start))?;
        match text.parse::<f64>() {
            Ok(number) => Ok(Value::Number(number)),
            // unreachable for spans the grammar admitted
            Err(_) => Err(Error::InvalidNumber(start)),
        }
    }

    /// String body, with the opening quote already consumed.
    fn string(&mut self) -> Result<String> {
        let start = self.here();
        let mut buf = Vec::new();
        loop {
            match self.src.next()? {
                None => return Err(Error::UnterminatedString(start)),
                Some(b'"') => break,
                Some(b'\\') => self.escape(&mut buf)?,
                Some(byte) => buf.push(byte),
            }
        }
        String::from_utf8(buf).map_err(|_| Error::InvalidUtf8(start))
    }

    fn escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        match self.src.next()? {
            Some(literal @ (b'"' | b'\\' | b'/')) => buf.push(literal),
            Some(b'b') => buf.push(0x08),
            Some(b'f') => buf.push(0x0c),
            Some(b'n') => buf.push(b'\n'),
            Some(b'r') => buf.push(b'\r'),
            Some(b't') => buf.push(b'\t'),
            Some(b'u') => {
                let unit = self.hex4()?;
                let ch = if (0xD800..=0xDBFF).contains(&unit) {
                    self.low_surrogate(unit)?
                } else if (0xDC00..=0xDFFF).contains(&unit) {
                    return Err(Error::UnpairedSurrogate(self.here()));
                } else {
                    char::from_u32(u32::from(unit)).ok_or(Error::InvalidUnicodeEscape(self.here()))?
                };
                let mut encoded = [0u8; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut encoded).as_bytes());
            }
            Some(_) => return Err(Error::InvalidEscape(self.here())),
            None => return Err(Error::UnexpectedEnd(self.at_end())),
        }
        Ok(())
    }

    /// Exactly four hex digits naming a UTF-16 code unit.
    fn hex4(&mut self) -> Result<u16> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let got = self.src.next()?;
            let digit = match got {
                Some(byte @ b'0'..=b'9') => byte - b'0',
                Some(byte @ b'a'..=b'f') => byte - b'a' + 10,
                Some(byte @ b'A'..=b'F') => byte - b'A' + 10,
                _ => return Err(Error::InvalidUnicodeEscape(self.spot(got))),
            };
            unit = unit * 16 + u16::from(digit);
        }
        Ok(unit)
    }

    /// A high surrogate must be completed by an adjacent `\u`-escaped low
    /// surrogate; the pair names one code point above U+FFFF.
    fn low_surrogate(&mut self, high: u16) -> Result<char> {
        let spot = self.here();
        match self.src.next()? {
            Some(b'\\') => {}
            _ => return Err(Error::UnpairedSurrogate(spot)),
        }
        match self.src.next()? {
            Some(b'u') => {}
            _ => return Err(Error::UnpairedSurrogate(spot)),
        }
        let low = self.hex4()?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(Error::UnpairedSurrogate(spot));
        }
        let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
        char::from_u32(code).ok_or(Error::UnpairedSurrogate(spot))
    }

    fn descend(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::TooDeep(self.max_depth, self.here()));
        }
        self.depth += 1;
        Ok(())
    }

    /// Array body, with `[` already consumed.
    fn array(&mut self) -> Result<Value> {
        self.descend()?;
        let mut items = Vec::new();
        match self.next_non_ws()? {
            None => return Err(Error::UnexpectedEnd(self.at_end())),
            Some(b']') => {
                self.depth -= 1;
                return Ok(Value::Array(items));
            }
            Some(other) => {
                self.src.unget(other);
                items.push(self.value()?);
            }
        }
        loop {
            match self.next_non_ws()? {
                None => return Err(Error::UnexpectedEnd(self.at_end())),
                Some(b']') => break,
                Some(b',') => items.push(self.value()?),
                Some(_) => return Err(Error::BadArrayContinuation(self.here())),
            }
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Object body, with `{` already consumed.
    fn object(&mut self) -> Result<Value> {
        self.descend()?;
        let mut members = Object::new();
        match self.next_non_ws()? {
            None => return Err(Error::UnexpectedEnd(self.at_end())),
            Some(b'}') => {
                self.depth -= 1;
                return Ok(Value::Object(members));
            }
            Some(b'"') => self.member(&mut members)?,
            Some(_) => return Err(Error::BadObjectStart(self.here())),
        }
        loop {
            match self.next_non_ws()? {
                None => return Err(Error::UnexpectedEnd(self.at_end())),
                Some(b'}') => break,
                Some(b',') => match self.next_non_ws()? {
                    Some(b'"') => self.member(&mut members)?,
                    Some(_) => return Err(Error::ExpectedKey(self.here())),
                    None => return Err(Error::UnexpectedEnd(self.at_end())),
                },
                Some(_) => return Err(Error::BadObjectContinuation(self.here())),
            }
        }
        self.depth -= 1;
        Ok(Value::Object(members))
    }

    /// One `"key": value` member, with the key's opening quote consumed.
    /// A duplicate key overwrites: last write wins.
    fn member(&mut self, members: &mut Object) -> Result<()> {
        let key = self.string()?;
        match self.next_non_ws()? {
            Some(b':') => {}
            Some(_) => return Err(Error::ExpectedColon(self.here())),
            None => return Err(Error::UnexpectedEnd(self.at_end())),
        }
        let value = self.value()?;
        members.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    #[test]
    fn test_decode_null() {
        assert_eq!(decode("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_booleans() {
        assert_eq!(decode("true").unwrap(), Value::Bool(true));
        assert_eq!(decode("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_decode_numbers() {
        assert_eq!(decode("0").unwrap(), Value::Number(0.0));
        assert_eq!(decode("-0").unwrap(), Value::Number(-0.0));
        assert_eq!(decode("42").unwrap(), Value::Number(42.0));
        assert_eq!(decode("-10").unwrap(), Value::Number(-10.0));
        assert_eq!(decode("3.25").unwrap(), Value::Number(3.25));
        assert_eq!(decode("0.5").unwrap(), Value::Number(0.5));
        assert_eq!(decode("-1.5e10").unwrap(), Value::Number(-1.5e10));
        assert_eq!(decode("1E+10").unwrap(), Value::Number(1e10));
        assert_eq!(decode("1e-10").unwrap(), Value::Number(1e-10));
        assert_eq!(decode("0e0").unwrap(), Value::Number(0.0));
    }

    #[test]
    fn test_decode_array_of_numbers() {
        let value = decode("[1,2.5,-3e2]").unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Value::Number(1.0));
        assert_eq!(items[1], Value::Number(2.5));
        assert_eq!(items[2], Value::Number(-300.0));
    }

    #[test]
    fn test_decode_strings() {
        assert_eq!(decode("\"hello\"").unwrap(), Value::from("hello"));
        assert_eq!(decode("\"\"").unwrap(), Value::from(""));
        assert_eq!(
            decode("\"a\\\"b\\\\c\\/d\"").unwrap(),
            Value::from("a\"b\\c/d")
        );
        assert_eq!(
            decode("\"\\b\\f\\n\\r\\t\"").unwrap(),
            Value::from("\x08\x0c\n\r\t")
        );
    }

    #[test]
    fn test_decode_unicode_escape() {
        assert_eq!(decode("\"\\u0041\"").unwrap(), Value::from("A"));
        assert_eq!(decode("\"\\u00e9\"").unwrap(), Value::from("\u{e9}"));
        assert_eq!(decode("\"\\u00E9\"").unwrap(), Value::from("\u{e9}"));
        assert_eq!(decode("\"\\u263a\"").unwrap(), Value::from("\u{263a}"));
    }

    #[test]
    fn test_decode_surrogate_pair() {
        assert_eq!(
            decode("\"\\ud83d\\ude00\"").unwrap(),
            Value::from("\u{1f600}")
        );
    }

    #[test]
    fn test_decode_lone_surrogate_fails() {
        assert!(matches!(
            decode("\"\\ud800\""),
            Err(Error::UnpairedSurrogate(_))
        ));
        assert!(matches!(
            decode("\"\\ude00\""),
            Err(Error::UnpairedSurrogate(_))
        ));
        assert!(matches!(
            decode("\"\\ud83d\\u0041\""),
            Err(Error::UnpairedSurrogate(_))
        ));
    }

    #[test]
    fn test_decode_empty_containers() {
        assert_eq!(decode("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(decode("[ ]").unwrap(), Value::Array(vec![]));
        assert_eq!(decode("{}").unwrap(), Value::Object(Object::new()));
        assert_eq!(decode("{ }").unwrap(), Value::Object(Object::new()));
    }

    #[test]
    fn test_decode_object() {
        let value = decode("{\"b\":1,\"a\":2}").unwrap();
        let members = value.as_object().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members["a"], Value::Number(2.0));
        assert_eq!(members["b"], Value::Number(1.0));
        // key-sorted iteration, not insertion order
        let keys: Vec<&str> = members.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_decode_duplicate_key_last_wins() {
        let value = decode("{\"k\":1,\"k\":2}").unwrap();
        assert_eq!(value.get("k").unwrap(), &Value::Number(2.0));
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_decode_nested_with_whitespace() {
        let value = decode(" {\r\n\t\"a\" : [ 1 , { \"b\" : null } ] } ").unwrap();
        assert_eq!(value.get("a").unwrap().at(0).unwrap(), &Value::Number(1.0));
        assert!(value.get("a").unwrap().at(1).unwrap().get("b").unwrap().is_null());
    }

    #[test]
    fn test_decode_rejects_trailing_content() {
        let err = decode("null x").unwrap_err();
        assert!(matches!(err, Error::TrailingContent(_)));
        assert_eq!(err.offset(), Some(5));
        assert!(decode("1 2").is_err());
    }

    #[test]
    fn test_decode_accepts_trailing_whitespace() {
        assert_eq!(decode(" null \r\n").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_rejects_bad_literals() {
        assert!(matches!(decode("nul"), Err(Error::ExpectedLiteral("null", _))));
        assert!(matches!(decode("tru"), Err(Error::ExpectedLiteral("true", _))));
        assert!(matches!(
            decode("falze"),
            Err(Error::ExpectedLiteral("false", _))
        ));
        assert!(matches!(decode("nulll"), Err(Error::TrailingContent(_))));
    }

    #[test]
    fn test_decode_rejects_bad_numbers() {
        assert!(matches!(decode("-"), Err(Error::ExpectedDigit("after minus sign", _))));
        assert!(matches!(decode("-x"), Err(Error::ExpectedDigit("after minus sign", _))));
        assert!(matches!(decode("01"), Err(Error::LeadingZero(_))));
        assert!(matches!(decode("-01"), Err(Error::LeadingZero(_))));
        assert!(matches!(decode("1."), Err(Error::ExpectedDigit("after decimal point", _))));
        assert!(matches!(decode("1.e3"), Err(Error::ExpectedDigit("after decimal point", _))));
        assert!(matches!(decode("1e"), Err(Error::ExpectedDigit("in exponent", _))));
        assert!(matches!(decode("1e+"), Err(Error::ExpectedDigit("in exponent", _))));
    }

    #[test]
    fn test_decode_rejects_bad_strings() {
        assert!(matches!(
            decode("\"unterminated"),
            Err(Error::UnterminatedString(_))
        ));
        assert!(matches!(decode("\"\\x\""), Err(Error::InvalidEscape(_))));
        assert!(matches!(
            decode("\"\\u12\""),
            Err(Error::InvalidUnicodeEscape(_))
        ));
        assert!(matches!(
            decode("\"\\u12"),
            Err(Error::InvalidUnicodeEscape(_))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_arrays() {
        assert!(matches!(decode("[1,]"), Err(Error::InvalidToken(_))));
        assert!(matches!(decode("[1 2]"), Err(Error::BadArrayContinuation(_))));
        assert!(matches!(decode("[1"), Err(Error::UnexpectedEnd(_))));
        assert!(matches!(decode("["), Err(Error::UnexpectedEnd(_))));
    }

    #[test]
    fn test_decode_rejects_bad_objects() {
        assert!(matches!(decode("{a:1}"), Err(Error::BadObjectStart(_))));
        assert!(matches!(decode("{\"a\" 1}"), Err(Error::ExpectedColon(_))));
        assert!(matches!(decode("{\"a\":1,}"), Err(Error::ExpectedKey(_))));
        assert!(matches!(
            decode("{\"a\":1 \"b\":2}"),
            Err(Error::BadObjectContinuation(_))
        ));
        assert!(matches!(decode("{\"a\":1"), Err(Error::UnexpectedEnd(_))));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(matches!(decode(""), Err(Error::UnexpectedEnd(_))));
        assert!(matches!(decode("   "), Err(Error::UnexpectedEnd(_))));
    }

    #[test]
    fn test_error_offsets_are_absolute() {
        let err = decode("  @").unwrap_err();
        assert_eq!(err.offset(), Some(2));
        assert_eq!(err.kind(), ErrorKind::Syntax);
        let err = decode("[1,2,@]").unwrap_err();
        assert_eq!(err.offset(), Some(5));
    }

    #[test]
    fn test_decode_at_reports_end_position() {
        let (value, end) = decode_at("  true  ", 0).unwrap();
        assert_eq!(value, Value::Bool(true));
        assert_eq!(end, 6);
        // the remainder is not inspected
        let (value, end) = decode_at("null garbage", 0).unwrap();
        assert_eq!(value, Value::Null);
        assert_eq!(end, 4);
    }

    #[test]
    fn test_decode_at_mid_buffer() {
        let input = "[1] {\"a\":2}";
        let (value, end) = decode_at(input, 3).unwrap();
        assert_eq!(value.get("a").unwrap(), &Value::Number(2.0));
        assert_eq!(end, input.len());
    }

    #[test]
    fn test_decode_at_number_stops_after_token() {
        let (value, end) = decode_at("12,34", 0).unwrap();
        assert_eq!(value, Value::Number(12.0));
        assert_eq!(end, 2);
        let (value, end) = decode_at("12,34", 3).unwrap();
        assert_eq!(value, Value::Number(34.0));
        assert_eq!(end, 5);
    }

    #[test]
    fn test_decode_reader_single_value() {
        let value = decode_reader(Cursor::new(b"{\"a\": [1, 2]}".to_vec())).unwrap();
        assert_eq!(value.get("a").unwrap().at(1).unwrap(), &Value::Number(2.0));
    }

    #[test]
    fn test_decode_reader_leaves_stream_after_value() {
        let mut cursor = Cursor::new(b"\"x\"rest".to_vec());
        let value = decode_reader(&mut cursor).unwrap();
        assert_eq!(value, Value::from("x"));
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_decode_reader_rejects_invalid_utf8_strings() {
        let err = decode_reader(Cursor::new(b"\"\xff\"".to_vec())).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8(_)));
    }

    #[test]
    fn test_decode_reader_io_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }
        let err = decode_reader(Broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_stream_decoder_consecutive_values() {
        let mut stream = StreamDecoder::new(Cursor::new(b"12 34 \"x\"".to_vec()));
        assert_eq!(stream.decode().unwrap(), Value::Number(12.0));
        assert_eq!(stream.decode().unwrap(), Value::Number(34.0));
        assert_eq!(stream.decode().unwrap(), Value::from("x"));
        assert!(matches!(stream.decode(), Err(Error::UnexpectedEnd(_))));
    }

    #[test]
    fn test_stream_decoder_adjacent_values() {
        let mut stream = StreamDecoder::new(Cursor::new(b"nulltrue[1]".to_vec()));
        assert_eq!(stream.decode().unwrap(), Value::Null);
        assert_eq!(stream.decode().unwrap(), Value::Bool(true));
        assert_eq!(
            stream.decode().unwrap(),
            Value::Array(vec![Value::Number(1.0)])
        );
    }

    #[test]
    fn test_stream_errors_carry_offsets() {
        let mut stream = StreamDecoder::new(Cursor::new(b"null @".to_vec()));
        assert_eq!(stream.decode().unwrap(), Value::Null);
        let err = stream.decode().unwrap_err();
        assert_eq!(err.offset(), Some(5));
    }

    #[test]
    fn test_depth_limit_rejects_cleanly() {
        let input = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let err = decode(&input).unwrap_err();
        assert!(matches!(err, Error::TooDeep(DEFAULT_MAX_DEPTH, _)));
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_depth_limit_configurable() {
        assert!(decode_with_limit("[[]]", 2).is_ok());
        assert!(matches!(
            decode_with_limit("[[[]]]", 2),
            Err(Error::TooDeep(2, _))
        ));
        assert!(matches!(
            decode_reader_with_limit(Cursor::new(b"[[[]]]".to_vec()), 2),
            Err(Error::TooDeep(2, _))
        ));
    }

    #[test]
    fn test_nesting_within_limit() {
        let input = format!("{}1{}", "[".repeat(100), "]".repeat(100));
        let mut value = decode(&input).unwrap();
        for _ in 0..100 {
            value = value.at(0).unwrap().clone();
        }
        assert_eq!(value, Value::Number(1.0));
    }
}

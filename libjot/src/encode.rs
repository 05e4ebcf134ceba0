//! Canonical JSON encoder.
//!
//! Produces one canonical text per tree: no inserted whitespace, object
//! members in key order, numbers in their shortest exact-round-trip form.
//! Encoding a well-formed tree never fails; only a sink can, through
//! [`encode_to`].

use std::fmt;
use std::io;

use crate::value::Value;

/// Encode a value as canonical JSON text.
///
/// # Example
///
/// ```
/// use libjot::{decode, encode};
///
/// let value = decode("{ \"b\" : 1 ,\n \"a\" : 2 }").unwrap();
/// assert_eq!(encode(&value), "{\"a\":2,\"b\":1}");
/// ```
pub fn encode(value: &Value) -> String {
    value.to_string()
}

/// Encode a value as canonical JSON into an output sink.
pub fn encode_to<W: io::Write>(value: &Value, out: &mut W) -> io::Result<()> {
    write!(out, "{}", value)
}

/// `Display` is the canonical encoding, so a tree drops into `format!` and
/// `write!` directly.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}

fn write_value<W: fmt::Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(true) => out.write_str("true"),
        Value::Bool(false) => out.write_str("false"),
        Value::Number(number) => write_number(out, *number),
        Value::String(text) => write_string(out, text),
        Value::Array(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, item)?;
            }
            out.write_char(']')
        }
        Value::Object(members) => {
            out.write_char('{')?;
            for (i, (key, member)) in members.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_string(out, key)?;
                out.write_char(':')?;
                write_value(out, member)?;
            }
            out.write_char('}')
        }
    }
}

/// Shortest decimal text that converts back to exactly `number`.
/// JSON has no lexeme for NaN or the infinities; they encode as `null`.
fn write_number<W: fmt::Write>(out: &mut W, number: f64) -> fmt::Result {
    if number.is_finite() {
        write!(out, "{}", number)
    } else {
        out.write_str("null")
    }
}

/// Number text shared by the encoder and the to-text coercion.
pub(crate) fn number_text(number: f64) -> String {
    format!("{}", number)
}

fn write_string<W: fmt::Write>(out: &mut W, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in text.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\u{8}' => out.write_str("\\b")?,
            '\u{c}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            control if (control as u32) < 0x20 => write!(out, "\\u{:04x}", control as u32)?,
            ch => out.write_char(ch)?,
        }
    }
    out.write_char('"')
}

//! Error types for JSON decoding, encoding, and value access.

use std::fmt;

use thiserror::Error;

use crate::value::Kind;

/// Result type for JOT operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Byte offset attached to a decode error.
///
/// A slice source reports absolute offsets into the input; a reader source
/// reports offsets counted from the point the decoder was attached to the
/// stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Location(pub Option<usize>);

impl Location {
    /// The byte offset, when the input source tracks one.
    pub fn offset(&self) -> Option<usize> {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(offset) => write!(f, " at offset {}", offset),
            None => Ok(()),
        }
    }
}

/// The failure family an [`Error`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed JSON text during decode.
    Syntax,
    /// Wrong-kind access, incompatible coercion, or cross-kind ordering.
    Type,
    /// Out-of-bounds index or absent key on a checked lookup.
    Range,
    /// Underlying stream failure.
    Io,
}

/// Error type for JSON decoding and value access.
#[derive(Error, Debug)]
pub enum Error {
    /// A literal token (`null`, `true`, `false`) did not match.
    #[error("JSON syntax error: expected \"{0}\"{1}")]
    ExpectedLiteral(&'static str, Location),

    /// No JSON value can start with this character.
    #[error("JSON syntax error: invalid token{0}")]
    InvalidToken(Location),

    /// A digit was required at this point of a number.
    #[error("JSON syntax error: expected digit {0}{1}")]
    ExpectedDigit(&'static str, Location),

    /// A digit followed a leading zero.
    #[error("JSON syntax error: leading zero in number{0}")]
    LeadingZero(Location),

    /// The grammar admitted a number span the float conversion rejected.
    #[error("JSON syntax error: number does not parse{0}")]
    InvalidNumber(Location),

    /// Unrecognized character after a backslash.
    #[error("JSON syntax error: invalid backslash escape{0}")]
    InvalidEscape(Location),

    /// `\u` was not followed by exactly four hex digits.
    #[error("JSON syntax error: expected 4 hex digits after '\\u'{0}")]
    InvalidUnicodeEscape(Location),

    /// A UTF-16 surrogate escape without its partner.
    #[error("JSON syntax error: unpaired UTF-16 surrogate{0}")]
    UnpairedSurrogate(Location),

    /// Input ended before the closing quote.
    #[error("JSON syntax error: unterminated string{0}")]
    UnterminatedString(Location),

    /// Decoded string bytes are not valid UTF-8.
    #[error("JSON syntax error: string is not valid UTF-8{0}")]
    InvalidUtf8(Location),

    /// Something other than `,` or `]` followed an array element.
    #[error("JSON syntax error: expected ',' or ']' after array element{0}")]
    BadArrayContinuation(Location),

    /// Something other than `}` or a quoted key followed `{`.
    #[error("JSON syntax error: expected '}}' or '\"' after object start{0}")]
    BadObjectStart(Location),

    /// Something other than `:` followed an object key.
    #[error("JSON syntax error: expected ':' after object key{0}")]
    ExpectedColon(Location),

    /// Something other than `,` or `}` followed an object member.
    #[error("JSON syntax error: expected ',' or '}}' after object member{0}")]
    BadObjectContinuation(Location),

    /// Something other than a quoted key followed a comma inside an object.
    #[error("JSON syntax error: expected '\"' after comma in object{0}")]
    ExpectedKey(Location),

    /// Input ended in the middle of a value.
    #[error("JSON syntax error: unexpected end of input{0}")]
    UnexpectedEnd(Location),

    /// Non-whitespace bytes after a complete top-level value.
    #[error("JSON syntax error: unexpected trailing content{0}")]
    TrailingContent(Location),

    /// Nesting exceeded the decoder's depth limit.
    #[error("JSON syntax error: nesting deeper than {0} levels{1}")]
    TooDeep(usize, Location),

    /// A typed accessor was invoked on a value of a different kind.
    #[error("not a JSON {expected}: {found} found")]
    WrongKind { expected: Kind, found: Kind },

    /// The coercion matrix has no entry for this kind/target pair.
    #[error("JSON {0} cannot be converted to {1}")]
    CannotConvert(Kind, &'static str),

    /// A string coerced to a number did not hold a decimal literal.
    #[error("string does not parse as a number: {0:?}")]
    NotNumeric(String),

    /// Ordering is undefined between these two values.
    #[error("cannot order JSON {0} against JSON {1}")]
    Unordered(Kind, Kind),

    /// Checked array index past the end.
    #[error("array index {index} out of bounds of {len}")]
    OutOfBounds { index: usize, len: usize },

    /// Checked object lookup for an absent key.
    #[error("object has no member {key:?}")]
    NoMember { key: String },

    /// The underlying reader or sink failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify this error into one of the four failure families.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ExpectedLiteral(..)
            | Error::InvalidToken(..)
            | Error::ExpectedDigit(..)
            | Error::LeadingZero(..)
            | Error::InvalidNumber(..)
            | Error::InvalidEscape(..)
            | Error::InvalidUnicodeEscape(..)
            | Error::UnpairedSurrogate(..)
            | Error::UnterminatedString(..)
            | Error::InvalidUtf8(..)
            | Error::BadArrayContinuation(..)
            | Error::BadObjectStart(..)
            | Error::ExpectedColon(..)
            | Error::BadObjectContinuation(..)
            | Error::ExpectedKey(..)
            | Error::UnexpectedEnd(..)
            | Error::TrailingContent(..)
            | Error::TooDeep(..) => ErrorKind::Syntax,
            Error::WrongKind { .. }
            | Error::CannotConvert(..)
            | Error::NotNumeric(..)
            | Error::Unordered(..) => ErrorKind::Type,
            Error::OutOfBounds { .. } | Error::NoMember { .. } => ErrorKind::Range,
            Error::Io(..) => ErrorKind::Io,
        }
    }

    /// The byte offset a decode error refers to, when the source tracks one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::ExpectedLiteral(_, loc)
            | Error::InvalidToken(loc)
            | Error::ExpectedDigit(_, loc)
            | Error::LeadingZero(loc)
            | Error::InvalidNumber(loc)
            | Error::InvalidEscape(loc)
            | Error::InvalidUnicodeEscape(loc)
            | Error::UnpairedSurrogate(loc)
            | Error::UnterminatedString(loc)
            | Error::InvalidUtf8(loc)
            | Error::BadArrayContinuation(loc)
            | Error::BadObjectStart(loc)
            | Error::ExpectedColon(loc)
            | Error::BadObjectContinuation(loc)
            | Error::ExpectedKey(loc)
            | Error::UnexpectedEnd(loc)
            | Error::TrailingContent(loc)
            | Error::TooDeep(_, loc) => loc.offset(),
            _ => None,
        }
    }
}

//! JOT (JSON Object Tree) decoder/encoder implementation.
//!
//! JOT turns strict JSON text into a tree of [`Value`] nodes with deep-copy
//! value semantics, and turns a tree back into one canonical text. It is
//! intended for UTF-8 data arriving from outside sources: wrong-kind access
//! and malformed input are ordinary errors, not panics.
//!
//! # Pipeline
//!
//! 1. **Decode**: a recursive-descent decoder runs the JSON grammar over a
//!    pull-based byte source. The same decoder serves an in-memory buffer
//!    (random access, absolute error offsets) and a sequential reader (one
//!    byte of pushback, offsets counted from attachment).
//!
//! 2. **Value tree**: a tagged sum type over the six JSON kinds. Objects
//!    are key-sorted maps; encoding order is key order, never insertion
//!    order. Cloning deep-copies; subtrees are never shared.
//!
//! 3. **Encode**: canonical text production with no inserted whitespace,
//!    to a `String` or to any `io::Write` sink.

mod decode;
mod encode;
mod error;
mod source;
mod value;

pub use decode::{
    decode, decode_at, decode_at_with_limit, decode_reader, decode_reader_with_limit,
    decode_with_limit, StreamDecoder, DEFAULT_MAX_DEPTH,
};
pub use encode::{encode, encode_to};
pub use error::{Error, ErrorKind, Location, Result};
pub use value::{Array, Kind, Object, Value};

//! The encode and decode algorithms.
//!
//! # Buffer Layout
//!
//! An encoded buffer is the concatenation, for each row in input order, of each column's
//! encoding in schema order. There is no header, row count, column tag or byte-order marker.
//!
//! | Column type | Bytes | Layout |
//! |---|---|---|
//! | `bigint` | 8 | native-endian two's-complement `i64` |
//! | `int` | 4 | native-endian two's-complement `i32` |
//! | `varchar255` | 1 + len + 1 | length byte, `len` text bytes, `0` |
//!
//! Integers are written in the producing machine's byte order, so buffers are not portable
//! between machines of different endianness.
//!
//! # Key Components
//!
//! - [`encode`] / [`encode_with_options`] - Two-pass rows to bytes
//! - [`encoded_len`] - The validating size pass on its own
//! - [`decode`] / [`decode_with_options`] - Bounds-checked bytes to rows
//! - [`CodecOptions`] - Range and terminator checking switches
//!
//! # Thread Safety
//!
//! All operations are pure functions of their arguments. A [`crate::Schema`] may be shared
//! across threads and used by concurrent calls.

mod decoder;
mod encoder;
mod options;

pub use decoder::{decode, decode_with_options};
pub(crate) use encoder::field_size;
pub use encoder::{encode, encode_with_options, encoded_len};
pub use options::CodecOptions;

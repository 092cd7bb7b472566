// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # rowpack
//!
//! A schema-driven binary row codec. `rowpack` packs a sequence of homogeneous rows into one
//! flat byte buffer whose layout is implied entirely by a column schema, and unpacks such a
//! buffer back into rows given the same schema.
//!
//! ## Features
//!
//! - **📦 Compact** - No header, no row count, no column tags; only the field bytes
//! - **⚡ Single allocation** - Encoding sizes the output exactly before writing it once
//! - **🛡️ Untrusted input** - Every decode read is bounds-checked
//! - **🔍 Actionable errors** - Failures name the offending column and what was wrong with it
//! - **🧩 Adapter friendly** - Rows are looked up through the [`RowAccess`] trait and a
//!   `serde_json` bridge is included
//!
//! ## Quick Start
//!
//! ```rust
//! use rowpack::prelude::*;
//!
//! let definitions = [("id", "bigint"), ("age", "int"), ("name", "varchar255")];
//! let rows = vec![
//!     Row::from([
//!         ("id".to_string(), Value::from(1_i64)),
//!         ("age".to_string(), Value::from(30_i64)),
//!         ("name".to_string(), Value::from("Ann")),
//!     ]),
//!     Row::from([
//!         ("id".to_string(), Value::from(2_i64)),
//!         ("age".to_string(), Value::from(41_i64)),
//!         ("name".to_string(), Value::from("Bo")),
//!     ]),
//! ];
//!
//! let data = rowpack::serialize(&rows, definitions)?;
//! assert_eq!(data.len(), 2 * (8 + 4 + 1 + 3 + 1));
//!
//! let decoded = rowpack::unserialize(&data, definitions)?;
//! assert_eq!(decoded, rows);
//! # Ok::<(), rowpack::Error>(())
//! ```
//!
//! ## Column Types
//!
//! | Name | Rust value | Encoded bytes |
//! |---|---|---|
//! | `bigint` | [`Value::Integer`] | 8, native-endian |
//! | `int` | [`Value::Integer`] within `i32` | 4, native-endian |
//! | `varchar255` | [`Value::Text`] of at most 255 bytes | length byte, bytes, `0` |
//!
//! Type names are matched exactly. Integers use the producing machine's byte order, so a
//! buffer is only meaningful on a machine of the same endianness and with the same schema.
//!
//! ## Architecture
//!
//! - [`schema`] - Column definitions and their validation
//! - [`codec`] - The two-pass encoder and the bounds-checked decoder
//! - [`io`] - Native-endian byte access and the decode cursor
//! - [`json`] - Host bridge over `serde_json` values
//!
//! Everything is synchronous and free of shared state. A [`Schema`] is immutable and may be
//! used by concurrent calls on different threads.
//!
//! ## Logging
//!
//! The crate emits `tracing` events at `debug` level for parsed schemas and for completed
//! encode and decode calls, and at `trace` level per decoded row. No subscriber is installed;
//! that is up to the host.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. A failed call never returns partial output.
//! See [`Error`] for the error categories.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use rowpack::prelude::*;
///
/// let schema = Schema::parse([("id", "bigint")])?;
/// let rows = decode(&[], &schema)?;
/// assert!(rows.is_empty());
/// # Ok::<(), rowpack::Error>(())
/// ```
pub mod prelude;

/// Encoding and decoding of rows.
///
/// See [`codec::encode_with_options`] and [`codec::decode_with_options`] for the full
/// semantics, and [`CodecOptions`] for the checks that can be switched off.
pub mod codec;

/// Low-level native-endian byte access.
///
/// The codec is built on these primitives; they are public for callers that need to inspect
/// an encoded buffer field by field.
///
/// # Example
///
/// ```rust
/// use rowpack::io::Parser;
///
/// let data = [0x02, b'B', b'o', 0x00];
/// let mut parser = Parser::new(&data);
/// let len = parser.read_ne::<u8>()?;
/// assert_eq!(parser.read_bytes(usize::from(len))?, b"Bo");
/// assert_eq!(parser.remaining(), 1);
/// # Ok::<(), rowpack::Error>(())
/// ```
pub mod io;

/// `serde_json` host bridge.
pub mod json;

/// Column schemas.
pub mod schema;

/// Dynamic field values and row lookup.
pub mod value;

/// `rowpack` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use rowpack::{Result, Schema};
///
/// fn people() -> Result<Schema> {
///     Schema::parse([("id", "bigint"), ("name", "varchar255")])
/// }
/// # people().unwrap();
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `rowpack` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use rowpack::{Error, Schema, Value};
///
/// let schema = Schema::parse([("id", "bigint")])?;
/// let row = vec![("id".to_string(), Value::from("1"))];
///
/// match rowpack::encode(&[row], &schema) {
///     Ok(_) => unreachable!(),
///     Err(Error::TypeMismatch { column, .. }) => assert_eq!(column, "id"),
///     Err(e) => panic!("unexpected error: {e}"),
/// }
/// # Ok::<(), rowpack::Error>(())
/// ```
pub use error::Error;

pub use codec::{decode, decode_with_options, encode, encode_with_options, encoded_len};
pub use codec::CodecOptions;
pub use schema::{ColumnDefinition, ColumnType, DefinitionValue, Schema};
pub use value::{Row, RowAccess, Value, ValueKind};

/// Encode `rows` according to `column_definitions`.
///
/// `column_definitions` are `(name, type)` pairs in column order, with type one of `bigint`,
/// `int` or `varchar255`. The schema is parsed first; no row is inspected if that fails.
///
/// # Errors
///
/// Any error of [`Schema::parse`] or [`encode`].
pub fn serialize<R, I, N, T>(rows: &[R], column_definitions: I) -> Result<Vec<u8>>
where
    R: RowAccess,
    I: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    T: AsRef<str>,
{
    let schema = Schema::parse(column_definitions)?;
    encode(rows, &schema)
}

/// Decode `data` according to `column_definitions`.
///
/// The definitions must be the ones `data` was serialized with: same names, same types, same
/// order. The buffer carries nothing to check this against.
///
/// # Errors
///
/// Any error of [`Schema::parse`] or [`decode`].
pub fn unserialize<I, N, T>(data: &[u8], column_definitions: I) -> Result<Vec<Row>>
where
    I: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    T: AsRef<str>,
{
    let schema = Schema::parse(column_definitions)?;
    decode(data, &schema)
}

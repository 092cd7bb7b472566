//! Rows to bytes.
//!
//! Encoding runs in two passes over `rows x columns`:
//!
//! 1. **Size pass** - every field is looked up and validated against its column, and the
//!    exact encoded length is accumulated. The first failing field aborts the call.
//! 2. **Write pass** - a buffer of exactly that length is allocated once and every field is
//!    written at the advancing cursor, in the same order.
//!
//! The write pass relies on the size pass having validated every field and is therefore not
//! exposed on its own. [`encoded_len`] exposes the size pass for callers that only want to
//! validate or pre-compute sizes.

use crate::{
    codec::CodecOptions,
    io::{write_bytes_at, write_ne_at},
    schema::{ColumnDefinition, ColumnType, Schema, MAX_TEXT_LEN, TEXT_TERMINATOR},
    value::{RowAccess, Value},
    Error, Result,
};

/// Encode `rows` with the default [`CodecOptions`].
///
/// # Errors
///
/// See [`encode_with_options`].
///
/// # Examples
///
/// ```rust
/// use rowpack::{encode, Row, Schema, Value};
///
/// let schema = Schema::parse([("id", "bigint"), ("name", "varchar255")])?;
/// let row = Row::from([
///     ("id".to_string(), Value::from(1_i64)),
///     ("name".to_string(), Value::from("Ann")),
/// ]);
///
/// let data = encode(&[row], &schema)?;
/// assert_eq!(data.len(), 8 + 1 + 3 + 1);
/// # Ok::<(), rowpack::Error>(())
/// ```
pub fn encode<R: RowAccess>(rows: &[R], schema: &Schema) -> Result<Vec<u8>> {
    encode_with_options(rows, schema, CodecOptions::default())
}

/// Encode `rows` into a freshly allocated buffer sized exactly to the output.
///
/// Extra keys in a row are ignored. An empty `rows` slice yields an empty buffer without
/// allocating.
///
/// # Errors
///
/// - [`Error::MissingColumn`] if a row has no value for a column
/// - [`Error::TypeMismatch`] if a value's kind does not match its column
/// - [`Error::StringTooLong`] if a `varchar255` value exceeds 255 bytes
/// - [`Error::IntOutOfRange`] if an `int` value does not fit 32 bits and
///   [`CodecOptions::check_int_range`] is set
///
/// No partial buffer is ever returned.
pub fn encode_with_options<R: RowAccess>(
    rows: &[R],
    schema: &Schema,
    options: CodecOptions,
) -> Result<Vec<u8>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let total = encoded_len(rows, schema, options)?;

    let mut data = vec![0_u8; total];
    let mut offset = 0_usize;
    for row in rows {
        write_row(row, schema, &mut data, &mut offset)?;
    }
    debug_assert_eq!(offset, total, "write pass disagrees with size pass");

    tracing::debug!(rows = rows.len(), bytes = total, "rows encoded");
    Ok(data)
}

/// Validate `rows` against `schema` and return the exact encoded length.
///
/// This is the size pass of [`encode_with_options`] on its own; nothing is written.
///
/// # Errors
///
/// Same as [`encode_with_options`].
pub fn encoded_len<R: RowAccess>(
    rows: &[R],
    schema: &Schema,
    options: CodecOptions,
) -> Result<usize> {
    let mut total = 0_usize;
    for row in rows {
        for column in schema {
            total += field_size(column, row.get_value(&column.name), options)?;
        }
    }

    Ok(total)
}

/// Validate one field and return its encoded size.
pub(crate) fn field_size(
    column: &ColumnDefinition,
    value: Option<&Value>,
    options: CodecOptions,
) -> Result<usize> {
    let value = value.ok_or_else(|| Error::MissingColumn(column.name.clone()))?;

    match (column.column_type, value) {
        (ColumnType::BigInt, Value::Integer(_)) => Ok(std::mem::size_of::<i64>()),
        (ColumnType::Int, Value::Integer(v)) => {
            if options.check_int_range && i32::try_from(*v).is_err() {
                return Err(Error::IntOutOfRange {
                    column: column.name.clone(),
                    value: *v,
                });
            }
            Ok(std::mem::size_of::<i32>())
        }
        (ColumnType::VarChar255, Value::Text(bytes)) => {
            if bytes.len() > MAX_TEXT_LEN {
                return Err(Error::StringTooLong {
                    column: column.name.clone(),
                    len: bytes.len(),
                });
            }
            Ok(ColumnType::text_size(bytes.len()))
        }
        (expected, found) => Err(type_mismatch(column, expected, found)),
    }
}

/// Write one row at `offset`. Assumes the row passed [`field_size`] for every column.
#[allow(clippy::cast_possible_truncation)]
fn write_row<R: RowAccess>(
    row: &R,
    schema: &Schema,
    data: &mut [u8],
    offset: &mut usize,
) -> Result<()> {
    for column in schema {
        let value = row
            .get_value(&column.name)
            .ok_or_else(|| Error::MissingColumn(column.name.clone()))?;

        match (column.column_type, value) {
            (ColumnType::BigInt, Value::Integer(v)) => write_ne_at(data, offset, *v)?,
            // Keeps the low 32 bits when range checking is off
            (ColumnType::Int, Value::Integer(v)) => write_ne_at(data, offset, *v as i32)?,
            (ColumnType::VarChar255, Value::Text(bytes)) => {
                // Length fits: at most MAX_TEXT_LEN after the size pass
                write_ne_at(data, offset, bytes.len() as u8)?;
                write_bytes_at(data, offset, bytes)?;
                write_ne_at(data, offset, TEXT_TERMINATOR)?;
            }
            (expected, found) => return Err(type_mismatch(column, expected, found)),
        }
    }

    Ok(())
}

fn type_mismatch(column: &ColumnDefinition, expected: ColumnType, found: &Value) -> Error {
    Error::TypeMismatch {
        column: column.name.clone(),
        expected,
        found: found.kind().into(),
    }
}

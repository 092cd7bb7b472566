//! Bytes to rows.
//!
//! The decoder walks the buffer once, front to back, reading each column of each row in
//! schema order until the cursor lands exactly on the end of the buffer. The buffer is
//! untrusted: every read is bounds-checked through [`crate::io::Parser`], and a buffer that
//! ends inside a row fails with [`crate::Error::TruncatedBuffer`] rather than yielding a
//! partial row.
//!
//! For schemas without text columns the row width is constant, so a length that is not a
//! multiple of it is rejected before any row is built.

use crate::{
    codec::CodecOptions,
    io::Parser,
    schema::{ColumnDefinition, ColumnType, Schema, TEXT_TERMINATOR},
    value::{Row, Value},
    Error, Result,
};

/// Decode `data` with the default [`CodecOptions`].
///
/// # Errors
///
/// See [`decode_with_options`].
///
/// # Examples
///
/// ```rust
/// use rowpack::{decode, Schema, Value};
///
/// let schema = Schema::parse([("id", "bigint"), ("name", "varchar255")])?;
/// let mut data = 7_i64.to_ne_bytes().to_vec();
/// data.extend_from_slice(&[2, b'B', b'o', 0]);
///
/// let rows = decode(&data, &schema)?;
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0]["id"], Value::Integer(7));
/// assert_eq!(rows[0]["name"], Value::from("Bo"));
/// # Ok::<(), rowpack::Error>(())
/// ```
pub fn decode(data: &[u8], schema: &Schema) -> Result<Vec<Row>> {
    decode_with_options(data, schema, CodecOptions::default())
}

/// Decode every row in `data`.
///
/// `schema` must be the schema `data` was encoded with. The buffer carries no metadata, so a
/// different schema of compatible size decodes to wrong values rather than an error.
///
/// # Errors
///
/// - [`Error::TruncatedBuffer`] if the buffer ends before a field can be read completely
/// - [`Error::InvalidTerminator`] if a text payload is not followed by `0` and
///   [`CodecOptions::verify_terminator`] is set
pub fn decode_with_options(
    data: &[u8],
    schema: &Schema,
    options: CodecOptions,
) -> Result<Vec<Row>> {
    let mut rows = match schema.fixed_row_size() {
        Some(row_size) => {
            let tail = data.len() % row_size;
            if tail != 0 {
                return Err(Error::TruncatedBuffer {
                    offset: data.len() - tail,
                    needed: row_size,
                    remaining: tail,
                });
            }
            Vec::with_capacity(data.len() / row_size)
        }
        None => Vec::new(),
    };

    let mut parser = Parser::new(data);
    while parser.has_more_data() {
        let offset = parser.pos();
        rows.push(read_row(&mut parser, schema, options)?);
        tracing::trace!(offset, "row decoded");
    }

    tracing::debug!(rows = rows.len(), bytes = data.len(), "rows decoded");
    Ok(rows)
}

fn read_row(parser: &mut Parser<'_>, schema: &Schema, options: CodecOptions) -> Result<Row> {
    let mut row = Row::with_capacity(schema.len());
    for column in schema {
        let value = match column.column_type {
            ColumnType::BigInt => Value::Integer(parser.read_ne::<i64>()?),
            ColumnType::Int => Value::Integer(i64::from(parser.read_ne::<i32>()?)),
            ColumnType::VarChar255 => read_text(parser, column, options)?,
        };
        row.insert(column.name.clone(), value);
    }

    Ok(row)
}

/// Length byte, payload, terminator.
fn read_text(
    parser: &mut Parser<'_>,
    column: &ColumnDefinition,
    options: CodecOptions,
) -> Result<Value> {
    let len = parser.read_ne::<u8>()?;
    let bytes = parser.read_bytes(usize::from(len))?;

    let offset = parser.pos();
    let terminator = parser.read_ne::<u8>()?;
    if options.verify_terminator && terminator != TEXT_TERMINATOR {
        return Err(Error::InvalidTerminator {
            column: column.name.clone(),
            offset,
            found: terminator,
        });
    }

    Ok(Value::Text(bytes.to_vec()))
}

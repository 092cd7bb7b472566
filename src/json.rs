//! `serde_json` bridge for hosts that exchange rows as JSON.
//!
//! This is the adapter layer in its simplest form: it marshals JSON rows and column
//! definitions into the crate's value model, calls the codec, and marshals the result back.
//!
//! - Rows are a JSON array of objects. Integers must fit `i64`; strings become text.
//! - Column definitions are either an object mapping name to type string, or an array of
//!   `[name, type]` pairs. Order is preserved in both forms.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//!
//! let definitions = json!({ "id": "bigint", "age": "int", "name": "varchar255" });
//! let rows = json!([
//!     { "id": 1, "age": 30, "name": "Ann" },
//!     { "id": 2, "age": 41, "name": "Bo" },
//! ]);
//!
//! let data = rowpack::json::serialize(&rows, &definitions)?;
//! assert_eq!(data.len(), 34);
//! assert_eq!(rowpack::json::unserialize(&data, &definitions)?, rows);
//! # Ok::<(), rowpack::Error>(())
//! ```

use serde_json::{Map, Value as JsonValue};

use crate::{
    codec::{decode_with_options, encode_with_options, field_size, CodecOptions},
    schema::{DefinitionValue, Schema},
    value::Value,
    Error, Result,
};

impl DefinitionValue for JsonValue {
    fn as_text(&self) -> Option<&str> {
        self.as_str()
    }
}

/// Encode JSON `rows` with the default [`CodecOptions`].
///
/// # Errors
///
/// See [`serialize_with_options`].
pub fn serialize(rows: &JsonValue, definitions: &JsonValue) -> Result<Vec<u8>> {
    serialize_with_options(rows, definitions, CodecOptions::default())
}

/// Encode JSON `rows` according to JSON column `definitions`.
///
/// Rows are checked in order, and each row column by column in schema order, so the error
/// reported is the one for the first failing field.
///
/// # Errors
///
/// - Any schema error from [`schema_from_json`]
/// - [`Error::Malformed`] if `rows` is not an array
/// - [`Error::RowNotMapping`] if a row is not an object
/// - [`Error::TypeMismatch`] if a field holds a JSON kind the column cannot take, such as a
///   boolean, a float or an integer beyond `i64`
/// - Any encode error from [`crate::encode_with_options`]
pub fn serialize_with_options(
    rows: &JsonValue,
    definitions: &JsonValue,
    options: CodecOptions,
) -> Result<Vec<u8>> {
    let schema = schema_from_json(definitions)?;

    let JsonValue::Array(rows) = rows else {
        return Err(malformed_error!(
            "rows must be an array, found {}",
            json_kind(rows)
        ));
    };

    let rows = rows
        .iter()
        .enumerate()
        .map(|(index, row)| row_from_json(index, row, &schema, options))
        .collect::<Result<Vec<_>>>()?;

    encode_with_options(&rows, &schema, options)
}

/// Decode `data` into a JSON array of objects with the default [`CodecOptions`].
///
/// # Errors
///
/// See [`unserialize_with_options`].
pub fn unserialize(data: &[u8], definitions: &JsonValue) -> Result<JsonValue> {
    unserialize_with_options(data, definitions, CodecOptions::default())
}

/// Decode `data` into a JSON array of objects whose keys follow schema order.
///
/// # Errors
///
/// - Any schema error from [`schema_from_json`]
/// - Any decode error from [`crate::decode_with_options`]
/// - [`Error::Malformed`] if a decoded text field is not valid UTF-8, since JSON strings
///   cannot carry arbitrary bytes
pub fn unserialize_with_options(
    data: &[u8],
    definitions: &JsonValue,
    options: CodecOptions,
) -> Result<JsonValue> {
    let schema = schema_from_json(definitions)?;
    let rows = decode_with_options(data, &schema, options)?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut object = Map::with_capacity(schema.len());
        for column in &schema {
            let value = match &row[column.name.as_str()] {
                Value::Integer(v) => JsonValue::from(*v),
                Value::Text(bytes) => {
                    let text = std::str::from_utf8(bytes).map_err(|_| {
                        malformed_error!("column \"{}\" holds text that is not UTF-8", column.name)
                    })?;
                    JsonValue::from(text)
                }
            };
            object.insert(column.name.clone(), value);
        }
        out.push(JsonValue::Object(object));
    }

    Ok(JsonValue::Array(out))
}

/// Parse JSON column definitions.
///
/// Accepts an object `{ name: type }` or an array of `[name, type]` pairs.
///
/// # Errors
///
/// - [`Error::Malformed`] if `definitions` has neither shape
/// - [`Error::NonStringColumnKey`] if a pair's name is not a string
/// - [`Error::InvalidColumnType`], [`Error::DuplicateColumn`], [`Error::EmptySchema`] as for
///   [`Schema::from_values`]
pub fn schema_from_json(definitions: &JsonValue) -> Result<Schema> {
    match definitions {
        JsonValue::Object(map) => Schema::from_values(map.iter()),
        JsonValue::Array(entries) => {
            let pairs = entries
                .iter()
                .map(|entry| match entry.as_array().map(Vec::as_slice) {
                    Some([name, given]) => Ok((name, given)),
                    _ => Err(malformed_error!(
                        "column definition must be a [name, type] pair, found {}",
                        entry
                    )),
                })
                .collect::<Result<Vec<_>>>()?;

            Schema::from_values(pairs)
        }
        other => Err(malformed_error!(
            "column definitions must be an object or an array of pairs, found {}",
            json_kind(other)
        )),
    }
}

/// Convert and validate the schema's columns of one JSON row; other keys are left out.
fn row_from_json(
    index: usize,
    row: &JsonValue,
    schema: &Schema,
    options: CodecOptions,
) -> Result<Vec<(String, Value)>> {
    let JsonValue::Object(object) = row else {
        return Err(Error::RowNotMapping(index));
    };

    let mut fields = Vec::with_capacity(schema.len());
    for column in schema {
        let field = object
            .get(&column.name)
            .ok_or_else(|| Error::MissingColumn(column.name.clone()))?;

        let value = match field {
            JsonValue::String(text) => Value::from(text.as_str()),
            JsonValue::Number(number) => match number.as_i64() {
                Some(v) => Value::Integer(v),
                None => {
                    return Err(Error::TypeMismatch {
                        column: column.name.clone(),
                        expected: column.column_type,
                        found: "number",
                    })
                }
            },
            other => {
                return Err(Error::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.column_type,
                    found: json_kind(other),
                })
            }
        };
        field_size(column, Some(&value), options)?;
        fields.push((column.name.clone(), value));
    }

    Ok(fields)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

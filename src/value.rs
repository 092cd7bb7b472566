//! Dynamic field values and row containers.
//!
//! A row field holds either a 64-bit integer or a run of text bytes. Adapters convert host
//! values into [`Value`] before encoding and back out of it after decoding; the codec itself
//! never sees host types.
//!
//! Rows handed to the encoder only need to answer "what is the value of column X", which is
//! what the [`RowAccess`] trait expresses. Any extra keys a row carries are never looked at.
//! Decoded rows are returned as [`Row`].

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    hash::BuildHasher,
};

/// A decoded row: column name to value.
pub type Row = HashMap<String, Value>;

/// A single field payload.
///
/// Text is kept as raw bytes. The format is byte-oriented and does not require UTF-8; use
/// [`Value::as_str`] when a string view is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A signed 64-bit integer, stored in `bigint` and `int` columns.
    Integer(i64),
    /// A byte string, stored in `varchar255` columns.
    Text(Vec<u8>),
}

/// The runtime kind of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    /// [`Value::Integer`]
    Integer,
    /// [`Value::Text`]
    Text,
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            Value::Text(_) => None,
        }
    }

    /// Returns the text payload as bytes, if this is text.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(bytes) => Some(bytes),
            Value::Integer(_) => None,
        }
    }

    /// Returns the text payload as `&str`, if this is text and valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Text(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Text(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Text(value)
    }
}

/// Field lookup by column name, the only thing the encoder asks of a row.
///
/// Implemented for the common map types and for ordered pair lists. Implement it for your own
/// row type to encode without copying into a map first.
///
/// # Examples
///
/// ```rust
/// use rowpack::{RowAccess, Value};
///
/// let row = vec![("id".to_string(), Value::from(7_i64))];
/// assert_eq!(row.get_value("id"), Some(&Value::Integer(7)));
/// assert_eq!(row.get_value("name"), None);
/// ```
pub trait RowAccess {
    /// Returns the value stored under `column`, if any.
    fn get_value(&self, column: &str) -> Option<&Value>;
}

impl<S: BuildHasher> RowAccess for HashMap<String, Value, S> {
    fn get_value(&self, column: &str) -> Option<&Value> {
        self.get(column)
    }
}

impl RowAccess for BTreeMap<String, Value> {
    fn get_value(&self, column: &str) -> Option<&Value> {
        self.get(column)
    }
}

/// First matching pair wins.
impl RowAccess for Vec<(String, Value)> {
    fn get_value(&self, column: &str) -> Option<&Value> {
        self.iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

impl<R: RowAccess + ?Sized> RowAccess for &R {
    fn get_value(&self, column: &str) -> Option<&Value> {
        (**self).get_value(column)
    }
}

//! Column schemas governing one encode or decode call.
//!
//! A [`Schema`] is an ordered, non-empty list of uniquely named [`ColumnDefinition`]s. It is
//! the only description of an encoded buffer: the buffer itself carries no row count, column
//! tags or byte-order marker, so the schema used to decode must match the one used to encode.
//!
//! Two constructors exist:
//!
//! - [`Schema::parse`] takes `(name, type)` string pairs and is what Rust callers use
//! - [`Schema::from_values`] takes dynamic [`DefinitionValue`] pairs and is what host
//!   adapters use, since their keys and type entries are not guaranteed to be text
//!
//! Parsing is all-or-nothing: on any error no schema is produced.
//!
//! # Examples
//!
//! ```rust
//! use rowpack::{ColumnType, Schema};
//!
//! let schema = Schema::parse([("id", "bigint"), ("age", "int"), ("name", "varchar255")])?;
//! assert_eq!(schema.len(), 3);
//! assert_eq!(schema.columns()[2].column_type, ColumnType::VarChar255);
//! assert_eq!(schema.fixed_row_size(), None);
//! # Ok::<(), rowpack::Error>(())
//! ```

mod column;

use std::{collections::HashSet, fmt};

pub use column::{ColumnDefinition, ColumnType, MAX_TEXT_LEN, TEXT_TERMINATOR};

use crate::{value::Value, Error, Result};

/// An ordered set of column definitions.
///
/// Immutable once built. Safe to share between concurrent encode and decode calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnDefinition>,
}

impl Schema {
    /// Parse `(name, type)` pairs, preserving their order.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidColumnType`] if a type is not exactly `bigint`, `int` or `varchar255`
    /// - [`Error::DuplicateColumn`] if a name appears twice
    /// - [`Error::EmptySchema`] if no pairs are given
    pub fn parse<I, N, T>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let columns = definitions
            .into_iter()
            .map(|(name, given)| {
                let name = name.into();
                let given = given.as_ref();
                match given.parse::<ColumnType>() {
                    Ok(column_type) => Ok(ColumnDefinition { name, column_type }),
                    Err(_) => Err(Error::InvalidColumnType {
                        column: name,
                        given: given.to_string(),
                    }),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_columns(columns)
    }

    /// Parse dynamic `(key, type)` pairs as supplied by a host adapter.
    ///
    /// Entries are checked in order, so the error reported is the one for the first bad entry.
    ///
    /// # Errors
    ///
    /// - [`Error::NonStringColumnKey`] if a key is not text
    /// - [`Error::InvalidColumnType`] if a type entry is not text or not a known type name;
    ///   `given` holds the entry rendered as text
    /// - [`Error::DuplicateColumn`] and [`Error::EmptySchema`] as for [`Schema::parse`]
    pub fn from_values<I, K, T>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: DefinitionValue,
        T: DefinitionValue,
    {
        let columns = definitions
            .into_iter()
            .map(|(key, given)| {
                let name = key.as_text().ok_or(Error::NonStringColumnKey)?;
                let column_type = given
                    .as_text()
                    .and_then(|text| text.parse::<ColumnType>().ok())
                    .ok_or_else(|| Error::InvalidColumnType {
                        column: name.to_string(),
                        given: given
                            .as_text()
                            .map_or_else(|| given.to_string(), str::to_string),
                    })?;

                Ok(ColumnDefinition::new(name, column_type))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_columns(columns)
    }

    /// Build a schema from already typed definitions.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateColumn`] or [`Error::EmptySchema`].
    pub fn from_columns(columns: Vec<ColumnDefinition>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
        }

        let schema = Schema { columns };
        tracing::debug!(
            columns = schema.len(),
            fixed_row_size = ?schema.fixed_row_size(),
            "schema parsed"
        );

        Ok(schema)
    }

    /// The column definitions, in order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Iterate over the column definitions, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDefinition> {
        self.columns.iter()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false` for a successfully parsed schema.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Encoded size of every row, if the schema has no `varchar255` column.
    ///
    /// With a text column the row size depends on each row's text lengths and `None` is
    /// returned.
    #[must_use]
    pub fn fixed_row_size(&self) -> Option<usize> {
        self.columns
            .iter()
            .map(|column| column.column_type.fixed_size())
            .sum()
    }
}

/// A dynamically typed column definition key or type entry.
///
/// Host adapters implement this for their own value type so that [`Schema::from_values`]
/// can tell text entries from everything else. The `Display` rendering is used to report
/// non-text type entries.
pub trait DefinitionValue: fmt::Display {
    /// The entry as text, or `None` if it is not text.
    fn as_text(&self) -> Option<&str>;
}

impl DefinitionValue for Value {
    fn as_text(&self) -> Option<&str> {
        self.as_str()
    }
}

impl DefinitionValue for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl DefinitionValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: DefinitionValue + ?Sized> DefinitionValue for &T {
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a ColumnDefinition;
    type IntoIter = std::slice::Iter<'a, ColumnDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

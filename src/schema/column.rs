use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Longest text, in bytes, a `varchar255` column accepts.
pub const MAX_TEXT_LEN: usize = 255;

/// Byte written after every text payload.
pub const TEXT_TERMINATOR: u8 = 0;

/// The storage type of a column.
///
/// Type names are matched exactly and case-sensitively when parsing.
///
/// | Type | Encoded bytes | Layout |
/// |---|---|---|
/// | `bigint` | 8 | native-endian `i64` |
/// | `int` | 4 | native-endian `i32` |
/// | `varchar255` | 1 + len + 1 | length byte, text bytes, `0` terminator |
///
/// # Examples
///
/// ```rust
/// use rowpack::ColumnType;
///
/// let ty: ColumnType = "varchar255".parse().unwrap();
/// assert_eq!(ty, ColumnType::VarChar255);
/// assert_eq!(ty.to_string(), "varchar255");
/// assert!("VARCHAR255".parse::<ColumnType>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    strum::Display,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
pub enum ColumnType {
    /// 8-byte signed integer.
    #[strum(serialize = "bigint")]
    BigInt,
    /// 4-byte signed integer.
    #[strum(serialize = "int")]
    Int,
    /// Length-prefixed, zero-terminated text of at most 255 bytes.
    #[strum(serialize = "varchar255")]
    VarChar255,
}

impl ColumnType {
    /// Encoded width for fixed-width types, `None` for `varchar255`.
    #[must_use]
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            ColumnType::BigInt => Some(std::mem::size_of::<i64>()),
            ColumnType::Int => Some(std::mem::size_of::<i32>()),
            ColumnType::VarChar255 => None,
        }
    }

    /// Encoded size of a text payload of `len` bytes: length byte, payload, terminator.
    #[must_use]
    pub fn text_size(len: usize) -> usize {
        1 + len + 1
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDefinition {
    /// Key under which the column's value is found in a row
    pub name: String,
    /// Storage type of the column
    pub column_type: ColumnType,
}

impl ColumnDefinition {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        ColumnDefinition {
            name: name.into(),
            column_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("bigint".parse::<ColumnType>(), Ok(ColumnType::BigInt));
        assert_eq!("int".parse::<ColumnType>(), Ok(ColumnType::Int));
        assert_eq!("varchar255".parse::<ColumnType>(), Ok(ColumnType::VarChar255));

        for rejected in ["varchar", "BIGINT", " int", "int ", "", "integer"] {
            assert!(rejected.parse::<ColumnType>().is_err(), "{rejected:?}");
        }
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(ColumnType::COUNT, 3);
        for ty in ColumnType::iter() {
            let name: &'static str = ty.into();
            assert_eq!(name.parse::<ColumnType>(), Ok(ty));
            assert_eq!(ty.to_string(), name);
        }
    }

    #[test]
    fn sizes() {
        assert_eq!(ColumnType::BigInt.fixed_size(), Some(8));
        assert_eq!(ColumnType::Int.fixed_size(), Some(4));
        assert_eq!(ColumnType::VarChar255.fixed_size(), None);

        assert_eq!(ColumnType::text_size(0), 2);
        assert_eq!(ColumnType::text_size(3), 5);
        assert_eq!(ColumnType::text_size(MAX_TEXT_LEN), 257);
    }
}

use thiserror::Error;

use crate::schema::ColumnType;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every recoverable failure of schema parsing, encoding and decoding is reported through this
/// enum. Errors carry the offending column name wherever one exists, so callers can surface an
/// actionable message without re-inspecting their input. A failed call never returns partial
/// output.
///
/// # Error Categories
///
/// ## Schema Errors
/// - [`Error::InvalidColumnType`] - Type string is not `bigint`, `int` or `varchar255`
/// - [`Error::NonStringColumnKey`] - A column name is not representable as text
/// - [`Error::DuplicateColumn`] - The same column name appears twice
/// - [`Error::EmptySchema`] - No column definitions were given
///
/// ## Encode Errors
/// - [`Error::MissingColumn`] - A row has no value for a declared column
/// - [`Error::TypeMismatch`] - A value's kind does not match its column type
/// - [`Error::StringTooLong`] - A `varchar255` value exceeds 255 bytes
/// - [`Error::IntOutOfRange`] - An `int` value does not fit 32 bits (range checking enabled)
/// - [`Error::RowNotMapping`] - A host row is not a name to value mapping
///
/// ## Decode Errors
/// - [`Error::TruncatedBuffer`] - The buffer ends before a field could be read
/// - [`Error::InvalidTerminator`] - The byte after a text payload is not 0 (checking enabled)
///
/// ## Internal and Adapter Errors
/// - [`Error::OutOfBounds`] - A write past the end of a pre-sized buffer
/// - [`Error::Malformed`] - Adapter input has the wrong shape
///
/// # Examples
///
/// ```rust
/// use rowpack::{Error, Schema};
///
/// match Schema::parse([("id", "bigint"), ("name", "varchar")]) {
///     Ok(_) => unreachable!(),
///     Err(Error::InvalidColumnType { column, given }) => {
///         assert_eq!(column, "name");
///         assert_eq!(given, "varchar");
///     }
///     Err(e) => panic!("unexpected error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Schema errors
    /// A column definition names a type this codec does not know.
    ///
    /// Type strings are matched exactly and case-sensitively against `bigint`, `int` and
    /// `varchar255`; no trimming is performed.
    ///
    /// # Fields
    ///
    /// * `column` - Name of the offending column
    /// * `given` - The type string as supplied
    #[error("Invalid column type \"{given}\" for column \"{column}\"")]
    InvalidColumnType {
        /// Name of the column carrying the unknown type
        column: String,
        /// The type string as supplied by the caller
        given: String,
    },

    /// A column definition key is not text.
    #[error("Each column definition key should be a string")]
    NonStringColumnKey,

    /// The same column name was declared more than once.
    ///
    /// Row fields are looked up by name, so a repeated name would make every later
    /// occurrence unreachable.
    #[error("Column \"{0}\" is declared more than once")]
    DuplicateColumn(String),

    /// The column definitions were empty.
    #[error("At least one column definition is required")]
    EmptySchema,

    // Encode errors
    /// A row is missing a value for a declared column.
    #[error("Row with missing column \"{0}\"")]
    MissingColumn(String),

    /// A row value has the wrong kind for its column.
    ///
    /// `varchar255` columns take text; `bigint` and `int` columns take integers.
    #[error("Column \"{column}\" expects a {expected} value, found {found}")]
    TypeMismatch {
        /// Name of the offending column
        column: String,
        /// Declared type of the column
        expected: ColumnType,
        /// Kind of the value that was supplied, e.g. `text` or `integer`
        found: &'static str,
    },

    /// A `varchar255` value is longer than 255 bytes.
    #[error("Column \"{column}\" encountered a string of {len} bytes, longer than 255 bytes")]
    StringTooLong {
        /// Name of the offending column
        column: String,
        /// Byte length of the rejected value
        len: usize,
    },

    /// An `int` value does not fit into 32 bits.
    ///
    /// Only raised when [`crate::CodecOptions::check_int_range`] is set; otherwise the value
    /// is truncated to its low 32 bits.
    #[error("Column \"{column}\" encountered {value}, which does not fit a 32-bit int")]
    IntOutOfRange {
        /// Name of the offending column
        column: String,
        /// The rejected value
        value: i64,
    },

    /// A host row is not a mapping from column names to values.
    ///
    /// The associated value is the zero-based position of the row in the input.
    #[error("Each row must be a mapping, row {0} is not")]
    RowNotMapping(usize),

    // Decode errors
    /// The buffer ended before a schema-implied field could be read.
    ///
    /// # Fields
    ///
    /// * `offset` - Cursor position at which the read was attempted
    /// * `needed` - Number of bytes the field requires
    /// * `remaining` - Number of bytes left in the buffer
    #[error("Truncated buffer - {needed} bytes needed at offset {offset}, {remaining} remaining")]
    TruncatedBuffer {
        /// Cursor position at which the read was attempted
        offset: usize,
        /// Number of bytes the field requires
        needed: usize,
        /// Number of bytes left in the buffer
        remaining: usize,
    },

    /// The byte following a text payload was not the 0 terminator.
    ///
    /// Only raised when [`crate::CodecOptions::verify_terminator`] is set. A non-zero byte at
    /// this position means the buffer was not produced with the supplied schema.
    #[error("Column \"{column}\" has terminator byte {found:#04x} at offset {offset}, expected 0x00")]
    InvalidTerminator {
        /// Name of the text column being decoded
        column: String,
        /// Offset of the terminator byte
        offset: usize,
        /// The byte found instead of 0
        found: u8,
    },

    // Internal and adapter errors
    /// An out of bound write was attempted.
    ///
    /// The encoder sizes its output buffer exactly before writing, so this indicates a
    /// disagreement between the size pass and the write pass.
    #[error("Out of Bound write would have occurred!")]
    OutOfBounds,

    /// Adapter input could not be interpreted.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}

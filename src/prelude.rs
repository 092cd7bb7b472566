//! # rowpack Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! from the rowpack library. Import this module to get quick access to everything needed to
//! encode and decode rows.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all rowpack operations
pub use crate::Error;

/// The result type used throughout rowpack
pub use crate::Result;

/// Switches for the optional encode and decode checks
pub use crate::CodecOptions;

// ================================================================================================
// Schema
// ================================================================================================

/// Ordered column definitions governing a call
pub use crate::schema::Schema;

/// A single named and typed column
pub use crate::schema::{ColumnDefinition, ColumnType};

// ================================================================================================
// Values and Rows
// ================================================================================================

/// Dynamic field values
pub use crate::value::{Value, ValueKind};

/// Decoded row type and the row lookup trait used by the encoder
pub use crate::value::{Row, RowAccess};

// ================================================================================================
// Operations
// ================================================================================================

/// Encode and decode with an explicit schema
pub use crate::codec::{decode, decode_with_options, encode, encode_with_options, encoded_len};

/// Encode and decode from `(name, type)` definitions
pub use crate::{serialize, unserialize};

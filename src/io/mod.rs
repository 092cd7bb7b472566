//! Low-level byte access for encoded buffers.
//!
//! The codec never touches a buffer directly: writes go through [`write_ne_at`] and
//! [`write_bytes_at`], reads through [`Parser`]. Both are bounds-checked, so the encoder and
//! decoder above them only deal with schema semantics.
//!
//! # Key Components
//!
//! - [`NativeIO`] - Native-endian conversion for the fixed-width primitives the format uses
//! - [`read_ne_at`] / [`write_ne_at`] - Offset-advancing primitive access
//! - [`Parser`] - Cursor over an untrusted buffer used by the decoder

mod native;
mod parser;

pub use native::{read_ne_at, write_bytes_at, write_ne_at, NativeIO};
pub use parser::Parser;

//! Native-endian, bounds-checked reading and writing of fixed-width primitives.
//!
//! Encoded buffers store integers in the byte order of the machine that produced them, so
//! every primitive access in the codec goes through the [`crate::io::NativeIO`] trait and
//! the two offset-advancing helpers in this module. Both helpers validate the remaining
//! length before touching the buffer:
//!
//! - [`crate::io::read_ne_at`] fails with [`crate::Error::TruncatedBuffer`], since reads
//!   operate on untrusted input
//! - [`crate::io::write_ne_at`] fails with [`crate::Error::OutOfBounds`], since writes only
//!   target buffers the encoder sized itself
//!
//! # Examples
//!
//! ```rust
//! use rowpack::io::{read_ne_at, write_ne_at};
//!
//! let mut data = [0u8; 12];
//! let mut offset = 0;
//! write_ne_at(&mut data, &mut offset, -7_i64)?;
//! write_ne_at(&mut data, &mut offset, 30_i32)?;
//! assert_eq!(offset, 12);
//!
//! offset = 0;
//! assert_eq!(read_ne_at::<i64>(&data, &mut offset)?, -7);
//! assert_eq!(read_ne_at::<i32>(&data, &mut offset)?, 30);
//! # Ok::<(), rowpack::Error>(())
//! ```

use crate::{Error, Result};

/// Fixed-width primitive that can be converted to and from native-endian bytes.
///
/// The associated `Bytes` array has the exact width of the type, which is also the number of
/// bytes the value occupies in an encoded buffer.
pub trait NativeIO: Sized + Copy {
    /// Byte array holding one encoded value.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Encoded width in bytes.
    const WIDTH: usize = std::mem::size_of::<Self>();

    /// Decode from native-endian bytes
    fn from_ne_bytes(bytes: Self::Bytes) -> Self;

    /// Encode to native-endian bytes
    fn to_ne_bytes(self) -> Self::Bytes;
}

macro_rules! impl_native_io {
    ($($ty:ty),*) => {
        $(
            impl NativeIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_ne_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_ne_bytes(bytes)
                }

                fn to_ne_bytes(self) -> Self::Bytes {
                    <$ty>::to_ne_bytes(self)
                }
            }
        )*
    };
}

impl_native_io!(u8, i32, i64);

/// Reads a `T` at `offset` and advances `offset` past it.
///
/// # Errors
///
/// Returns [`Error::TruncatedBuffer`] if fewer than `T::WIDTH` bytes remain after `offset`.
/// The offset is left unchanged on failure.
pub fn read_ne_at<T: NativeIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let end = checked_end(data.len(), *offset, T::WIDTH).ok_or(Error::TruncatedBuffer {
        offset: *offset,
        needed: T::WIDTH,
        remaining: data.len().saturating_sub(*offset),
    })?;

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(Error::TruncatedBuffer {
            offset: *offset,
            needed: T::WIDTH,
            remaining: data.len() - *offset,
        });
    };

    *offset = end;
    Ok(T::from_ne_bytes(read))
}

/// Writes `value` at `offset` and advances `offset` past it.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if fewer than `T::WIDTH` bytes remain after `offset`.
pub fn write_ne_at<T: NativeIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let end = checked_end(data.len(), *offset, T::WIDTH).ok_or(Error::OutOfBounds)?;

    data[*offset..end].copy_from_slice(value.to_ne_bytes().as_ref());
    *offset = end;
    Ok(())
}

/// Copies `bytes` verbatim to `offset` and advances `offset` past them.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`] if the slice does not fit.
pub fn write_bytes_at(data: &mut [u8], offset: &mut usize, bytes: &[u8]) -> Result<()> {
    let end = checked_end(data.len(), *offset, bytes.len()).ok_or(Error::OutOfBounds)?;

    data[*offset..end].copy_from_slice(bytes);
    *offset = end;
    Ok(())
}

/// End position of a `width`-byte access at `offset`, if it stays within `len`.
pub(crate) fn checked_end(len: usize, offset: usize, width: usize) -> Option<usize> {
    offset.checked_add(width).filter(|end| *end <= len)
}

//! Cursor-based reader over an untrusted encoded buffer.
//!
//! [`crate::io::Parser`] keeps a position within a byte slice and exposes the few reads the
//! decoder needs: fixed-width native-endian primitives and raw byte runs. Every read is
//! checked against the remaining length and reports [`crate::Error::TruncatedBuffer`]
//! instead of reading past the end.
//!
//! # Examples
//!
//! ```rust
//! use rowpack::io::Parser;
//!
//! let mut data = 5_i32.to_ne_bytes().to_vec();
//! data.extend_from_slice(&[2, b'h', b'i', 0]);
//!
//! let mut parser = Parser::new(&data);
//! assert_eq!(parser.read_ne::<i32>()?, 5);
//! let len = parser.read_ne::<u8>()?;
//! assert_eq!(parser.read_bytes(usize::from(len))?, b"hi");
//! assert_eq!(parser.read_ne::<u8>()?, 0);
//! assert!(!parser.has_more_data());
//! # Ok::<(), rowpack::Error>(())
//! ```

use crate::{
    io::native::{checked_end, read_ne_at, NativeIO},
    Error, Result,
};

/// A forward-only, bounds-checked reader over a byte slice.
///
/// Borrowed byte runs returned by [`Parser::read_bytes`] live as long as the underlying
/// buffer, not the parser.
pub struct Parser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` while unread bytes remain.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Current cursor position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Read a native-endian `T` and advance past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::TruncatedBuffer`] if fewer than `T::WIDTH` bytes remain.
    pub fn read_ne<T: NativeIO>(&mut self) -> Result<T> {
        read_ne_at(self.data, &mut self.position)
    }

    /// Read `length` raw bytes and advance past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::TruncatedBuffer`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = checked_end(self.data.len(), self.position, length).ok_or(
            Error::TruncatedBuffer {
                offset: self.position,
                needed: length,
                remaining: self.remaining(),
            },
        )?;

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let parser = Parser::new(&[]);
        assert!(parser.is_empty());
        assert!(!parser.has_more_data());
        assert_eq!(parser.len(), 0);
        assert_eq!(parser.remaining(), 0);
    }

    #[test]
    fn read_tracks_position() {
        let mut data = 42_i64.to_ne_bytes().to_vec();
        data.extend_from_slice(b"xyz");

        let mut parser = Parser::new(&data);
        assert_eq!(parser.read_ne::<i64>().unwrap(), 42);
        assert_eq!(parser.pos(), 8);
        assert_eq!(parser.remaining(), 3);
        assert_eq!(parser.read_bytes(3).unwrap(), b"xyz");
        assert_eq!(parser.pos(), 11);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn read_bytes_zero_length() {
        let data = [0x00];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.read_bytes(0).unwrap(), b"");
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn read_bytes_truncated() {
        let data = [0x61, 0x62];
        let mut parser = Parser::new(&data);
        parser.read_ne::<u8>().unwrap();

        assert_eq!(
            parser.read_bytes(4),
            Err(Error::TruncatedBuffer {
                offset: 1,
                needed: 4,
                remaining: 1
            })
        );
        assert_eq!(parser.pos(), 1);
    }

    #[test]
    fn read_ne_truncated() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut parser = Parser::new(&data);

        assert!(matches!(
            parser.read_ne::<i64>(),
            Err(Error::TruncatedBuffer {
                offset: 0,
                needed: 8,
                remaining: 5
            })
        ));
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::{fmt, mem};

/// A fixed-capacity destination that bytes are written into from the front.
///
/// Every write fills the front of the remaining space and then shrinks the destination past the
/// written bytes, so the destination always references exactly the space not yet written to.
/// Writes never fail - if there is not enough space, they write as much as fits and report how
/// many bytes were written.
///
/// Keep a separate reference to the underlying memory if you need to access the written bytes
/// afterwards. [`ScanBuf`][crate::ScanBuf] uses this type to fill its available capacity.
///
/// # Example
///
/// ```
/// use scanbuf::ByteViewMut;
///
/// let mut storage = [0_u8; 8];
/// let mut dest = ByteViewMut::new(&mut storage);
///
/// assert_eq!(dest.write(b"hello"), 5);
/// assert_eq!(dest.write(b" world"), 3);
/// assert!(dest.is_empty());
///
/// assert_eq!(&storage, b"hello wo");
/// ```
pub struct ByteViewMut<'a> {
    remaining: &'a mut [u8],
}

impl<'a> ByteViewMut<'a> {
    /// Creates a destination spanning all of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a mut [u8]) -> Self {
        Self { remaining: bytes }
    }

    /// The number of bytes that can still be written.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether the destination has no space left.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Copies as much of `src` as fits into the destination.
    ///
    /// Returns the number of bytes written, which is `min(self.len(), src.len())`.
    pub fn write(&mut self, src: impl AsRef<[u8]>) -> usize {
        let src = src.as_ref();
        let len = src.len().min(self.len());

        let dest = self.advance(len);
        dest.copy_from_slice(&src[..len]);

        len
    }

    /// Writes `count` repetitions of `value`, or as many as fit.
    ///
    /// Returns the number of bytes written.
    pub fn put_byte_repeated(&mut self, value: u8, count: usize) -> usize {
        let len = count.min(self.len());

        self.advance(len).fill(value);

        len
    }

    /// Writes a single byte.
    ///
    /// Returns `false` if the destination has no space left, in which case nothing is written.
    pub fn put_byte(&mut self, value: u8) -> bool {
        self.put_byte_repeated(value, 1) == 1
    }

    /// Releases the destination, returning the space that has not been written to.
    #[must_use]
    pub fn into_remaining(self) -> &'a mut [u8] {
        self.remaining
    }

    /// Removes `len` bytes from the front of the destination and returns them for writing.
    fn advance(&mut self, len: usize) -> &'a mut [u8] {
        let (written, remaining) = mem::take(&mut self.remaining).split_at_mut(len);
        self.remaining = remaining;

        written
    }
}

impl fmt::Debug for ByteViewMut<'_> {
    #[cfg_attr(coverage_nightly, coverage(off))] // There is no specific API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteViewMut").field("len", &self.len()).finish()
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::fmt;

use crate::ByteViewReader;

/// A view over a contiguous run of immutable bytes owned by someone else.
///
/// The bytes do not need to be text and are not required to be terminated in any way. A view
/// never allocates and never owns the memory it references - it is a `&[u8]` with scanning
/// operations attached, and is just as cheap to copy.
///
/// Note that only the contents are immutable - the view itself shrinks from the front as
/// bytes are consumed from it.
///
/// # Aliasing views
///
/// Some operations ([`offset_of()`], [`prefix()`]) relate two views that reference the same
/// memory, typically a view and a view derived from it by consuming bytes. Passing a view over
/// unrelated memory to these is a programming error and panics.
///
/// [`offset_of()`]: Self::offset_of
/// [`prefix()`]: Self::prefix
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteView<'a> {
    /// Creates a view over the provided bytes.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Returns a view over zero bytes.
    #[cfg_attr(test, mutants::skip)] // Generates no-op mutations, not useful.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bytes: &[] }
    }

    /// The number of bytes in the view.
    ///
    /// Consuming bytes from the view reduces its length.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the view is over zero bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The bytes in the view.
    ///
    /// The returned slice has the lifetime of the referenced memory, not of the view.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the offset at which `sub` starts within this view.
    ///
    /// `sub` must start within the memory referenced by this view, or exactly at its end.
    ///
    /// # Example
    ///
    /// ```
    /// use scanbuf::ByteView;
    ///
    /// let view = ByteView::from("key=value");
    /// let mut rest = view;
    /// rest.consume(4);
    ///
    /// assert_eq!(view.offset_of(rest), 4);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `sub` starts before this view or beyond its end.
    #[must_use]
    pub fn offset_of(&self, sub: ByteView<'_>) -> usize {
        let offset = sub.bytes.as_ptr().addr().wrapping_sub(self.bytes.as_ptr().addr());

        assert!(
            offset <= self.len(),
            "sub-view does not start within the memory referenced by this view"
        );

        offset
    }

    /// Returns the bytes from the start of this view up to, but not including, the first byte
    /// of `sub`.
    ///
    /// This recovers the part of a view that has been consumed so far, given the remainder.
    ///
    /// # Panics
    ///
    /// Panics if `sub` starts before this view or beyond its end.
    #[must_use]
    pub fn prefix(&self, sub: ByteView<'_>) -> Self {
        let len = self.offset_of(sub);

        Self::new(&self.bytes[..len])
    }

    /// Returns the bytes in the range `start..end`, clamped to the bounds of the view.
    ///
    /// The second value of the returned tuple indicates whether exactly the requested range was
    /// returned. It is `false` if `end < start` or if either index is greater than the length of
    /// the view. In that case the returned view is what remains of the request after clamping:
    /// an inverted range becomes empty at `start` and out-of-bounds indices are moved to the
    /// end of the view. A request entirely outside the view yields an empty view.
    ///
    /// # Example
    ///
    /// ```
    /// use scanbuf::ByteView;
    ///
    /// let view = ByteView::from("hello");
    ///
    /// assert_eq!(view.substr(1, 3), (ByteView::from("el"), true));
    /// assert_eq!(view.substr(3, 10), (ByteView::from("lo"), false));
    /// assert_eq!(view.substr(3, 1), (ByteView::empty(), false));
    /// ```
    #[must_use]
    pub fn substr(&self, start: usize, end: usize) -> (Self, bool) {
        let len = self.len();
        let mut exact = true;

        let mut start = start;
        let mut end = end;

        if end < start {
            end = start;
            exact = false;
        }

        if start > len {
            start = len;
            exact = false;
        }

        if end > len {
            end = len;
            exact = false;
        }

        (Self::new(&self.bytes[start..end]), exact)
    }

    /// Compares two views lexicographically, byte by byte.
    ///
    /// If one view is a prefix of the other, the shorter view orders first. This matches
    /// `strcmp()` semantics without requiring either side to be terminated.
    #[must_use]
    pub fn compare(&self, other: ByteView<'_>) -> Ordering {
        let common = self.len().min(other.len());

        self.bytes[..common]
            .cmp(&other.bytes[..common])
            .then_with(|| self.len().cmp(&other.len()))
    }

    /// Returns the first byte of the view without consuming it.
    #[must_use]
    pub fn first(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Consumes the first byte of the view.
    ///
    /// Returns `None` and leaves the view unchanged if the view is empty.
    pub fn consume_byte(&mut self) -> Option<u8> {
        let (&first, rest) = self.bytes.split_first()?;
        self.bytes = rest;

        Some(first)
    }

    /// Consumes up to `len` bytes from the start of the view.
    ///
    /// Returns the number of bytes consumed, which is less than `len` if the view is shorter.
    /// The view becomes empty in that case.
    pub fn consume(&mut self, len: usize) -> usize {
        let consumed = len.min(self.len());
        self.bytes = &self.bytes[consumed..];

        consumed
    }

    /// Consumes the first byte of the view if it satisfies `predicate`.
    ///
    /// Returns the consumed byte, or `None` if the view is empty or the first byte does not match,
    /// in which case the view is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use scanbuf::ByteView;
    ///
    /// let mut view = ByteView::from("7up");
    ///
    /// assert_eq!(view.consume_if(|b| b.is_ascii_digit()), Some(b'7'));
    /// assert_eq!(view.consume_if(|b| b.is_ascii_digit()), None);
    /// assert_eq!(view, "up");
    /// ```
    pub fn consume_if<P>(&mut self, predicate: P) -> Option<u8>
    where
        P: FnOnce(u8) -> bool,
    {
        let first = self.first()?;

        if !predicate(first) {
            return None;
        }

        self.consume_byte()
    }

    /// Consumes bytes from the start of the view for as long as they satisfy `predicate`.
    ///
    /// Returns the number of bytes consumed.
    ///
    /// # Example
    ///
    /// ```
    /// use scanbuf::ByteView;
    ///
    /// let mut view = ByteView::from("  trim me  ");
    ///
    /// assert_eq!(view.consume_while(|b| b == b' '), 2);
    /// assert_eq!(view, "trim me  ");
    /// ```
    pub fn consume_while<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(u8) -> bool,
    {
        let mut consumed: usize = 0;

        while self.consume_if(&mut predicate).is_some() {
            consumed = consumed
                .checked_add(1)
                .expect("overflowing usize is impossible because we are counting bytes in a usize-bounded view");
        }

        consumed
    }

    /// Consumes `pattern` from the start of the view if the view starts with it.
    ///
    /// Returns whether the pattern was found and consumed. On a mismatch the view is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use scanbuf::ByteView;
    ///
    /// let mut view = ByteView::from("<header>body");
    ///
    /// assert!(!view.consume_prefix(b"<footer>"));
    /// assert!(view.consume_prefix(b"<header>"));
    /// assert_eq!(view, "body");
    /// ```
    pub fn consume_prefix(&mut self, pattern: impl AsRef<[u8]>) -> bool {
        let pattern = pattern.as_ref();

        let (head, exact) = self.substr(0, pattern.len());

        if !exact || head.bytes != pattern {
            return false;
        }

        let consumed = self.consume(pattern.len());
        debug_assert_eq!(consumed, pattern.len());

        true
    }

    /// Returns a [`Read`][std::io::Read] and [`BufRead`][std::io::BufRead] adapter that
    /// consumes bytes from this view.
    #[must_use]
    pub const fn reader<'v>(&'v mut self) -> ByteViewReader<'v, 'a> {
        ByteViewReader::new(self)
    }
}

impl fmt::Debug for ByteView<'_> {
    #[cfg_attr(coverage_nightly, coverage(off))] // There is no specific API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("len", &self.len())
            .field("bytes", &format_args!("b\"{}\"", self.bytes.escape_ascii()))
            .finish()
    }
}

impl PartialOrd for ByteView<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteView<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(*other)
    }
}

impl AsRef<[u8]> for ByteView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::new(value)
    }
}

impl<'a, const LEN: usize> From<&'a [u8; LEN]> for ByteView<'a> {
    fn from(value: &'a [u8; LEN]) -> Self {
        Self::new(value.as_slice())
    }
}

impl<'a> From<&'a str> for ByteView<'a> {
    fn from(value: &'a str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl PartialEq<&[u8]> for ByteView<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

impl PartialEq<ByteView<'_>> for &[u8] {
    fn eq(&self, other: &ByteView<'_>) -> bool {
        other.eq(self)
    }
}

impl<const LEN: usize> PartialEq<&[u8; LEN]> for ByteView<'_> {
    fn eq(&self, other: &&[u8; LEN]) -> bool {
        self.bytes == other.as_slice()
    }
}

impl<const LEN: usize> PartialEq<ByteView<'_>> for &[u8; LEN] {
    fn eq(&self, other: &ByteView<'_>) -> bool {
        other.eq(self)
    }
}

impl PartialEq<&str> for ByteView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<ByteView<'_>> for &str {
    fn eq(&self, other: &ByteView<'_>) -> bool {
        other.eq(self)
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! We separate out the mutation functions for ease of maintenance.

use crate::{ByteView, InvalidCodepoint, Memory, ScanBuf};

// Exclusive upper bounds of the codepoints encoded with 1, 2 and 3 bytes.
const ONE_BYTE_END: u32 = 0x80;
const TWO_BYTE_END: u32 = 0x800;
const THREE_BYTE_END: u32 = 0x1_0000;

/// One past the largest Unicode codepoint.
const CODEPOINT_END: u32 = 0x11_0000;

const CONTINUATION_TAG: u8 = 0b1000_0000;
const CONTINUATION_MASK: u32 = 0b0011_1111;

impl<M: Memory> ScanBuf<'_, M> {
    /// Appends a slice of bytes to the buffer, growing it as needed.
    ///
    /// Returns the number of bytes written, which is always `src.len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use scanbuf::ScanBuf;
    ///
    /// let mut buf = ScanBuf::new();
    ///
    /// assert_eq!(buf.write(b"Hello, "), 7);
    /// assert_eq!(buf.write("world!"), 6);
    ///
    /// assert_eq!(buf.contents(), "Hello, world!");
    /// ```
    pub fn write(&mut self, src: impl AsRef<[u8]>) -> usize {
        let src = src.as_ref();

        self.require(src.len());

        let written = self.available().write(src);
        debug_assert_eq!(written, src.len());

        self.advance(written);
        written
    }

    /// Appends a single byte to the buffer, growing it as needed.
    pub fn put_byte(&mut self, value: u8) {
        self.put_byte_repeated(value, 1);
    }

    /// Appends `count` repetitions of `value` to the buffer, growing it as needed.
    ///
    /// Returns the number of bytes written, which is always `count`.
    pub fn put_byte_repeated(&mut self, value: u8, count: usize) -> usize {
        self.require(count);

        let written = self.available().put_byte_repeated(value, count);
        debug_assert_eq!(written, count);

        self.advance(written);
        written
    }

    /// Appends the bytes referenced by a view to the buffer.
    ///
    /// Returns the number of bytes written, which is always `view.len()`.
    pub fn put_view(&mut self, view: ByteView<'_>) -> usize {
        self.write(view.as_bytes())
    }

    /// Appends the UTF-8 representation of a string slice to the buffer.
    pub fn put_str(&mut self, value: &str) -> usize {
        self.write(value.as_bytes())
    }

    /// Appends the UTF-8 encoding of `value` to the buffer.
    ///
    /// Returns the number of bytes written, between 1 and 4.
    pub fn put_char(&mut self, value: char) -> usize {
        let mut encoded = [0_u8; 4];

        self.write(value.encode_utf8(&mut encoded).as_bytes())
    }

    /// Appends the UTF-8 encoding of a raw codepoint to the buffer.
    ///
    /// Every value below `0x110000` is accepted, including the surrogate range `0xD800..=0xDFFF`,
    /// which is encoded with the regular three-byte pattern. Space for the whole encoding is
    /// reserved before any byte is written, so the encoding is appended in full or not at all.
    ///
    /// Returns the number of bytes written, between 1 and 4.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCodepoint`] if `codepoint` is `0x110000` or greater. Nothing is written
    /// and the buffer does not grow in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use scanbuf::ScanBuf;
    ///
    /// let mut buf = ScanBuf::new();
    ///
    /// assert_eq!(buf.put_utf8(0x41), Ok(1));
    /// assert_eq!(buf.put_utf8(0x20AC), Ok(3));
    /// assert!(buf.put_utf8(0x11_0000).is_err());
    ///
    /// assert_eq!(buf.contents(), "A\u{20AC}");
    /// ```
    pub fn put_utf8(&mut self, codepoint: u32) -> Result<usize, InvalidCodepoint> {
        let mut encoded = [0_u8; 4];
        let len = encode_utf8(codepoint, &mut encoded)?;

        Ok(self.write(&encoded[..len]))
    }
}

/// Encodes `codepoint` into the front of `dest`, returning the encoded length.
fn encode_utf8(codepoint: u32, dest: &mut [u8; 4]) -> Result<usize, InvalidCodepoint> {
    match codepoint {
        ..ONE_BYTE_END => {
            dest[0] = low_byte(codepoint);
            Ok(1)
        }
        ..TWO_BYTE_END => {
            dest[0] = 0b1100_0000 | low_byte((codepoint >> 6) & 0b0001_1111);
            dest[1] = continuation(codepoint);
            Ok(2)
        }
        ..THREE_BYTE_END => {
            dest[0] = 0b1110_0000 | low_byte((codepoint >> 12) & 0b0000_1111);
            dest[1] = continuation(codepoint >> 6);
            dest[2] = continuation(codepoint);
            Ok(3)
        }
        ..CODEPOINT_END => {
            dest[0] = 0b1111_0000 | low_byte((codepoint >> 18) & 0b0000_0111);
            dest[1] = continuation(codepoint >> 12);
            dest[2] = continuation(codepoint >> 6);
            dest[3] = continuation(codepoint);
            Ok(4)
        }
        _ => Err(InvalidCodepoint::new(codepoint)),
    }
}

const fn continuation(bits: u32) -> u8 {
    CONTINUATION_TAG | low_byte(bits & CONTINUATION_MASK)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "callers mask the value to fit in a byte"
)]
const fn low_byte(bits: u32) -> u8 {
    bits as u8
}

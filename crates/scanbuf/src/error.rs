// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// A codepoint passed to [`ScanBuf::put_utf8()`][crate::ScanBuf::put_utf8] is
/// outside the Unicode range `0..0x110000`.
///
/// Nothing is written to the buffer when this error is returned.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[error("codepoint {value:#x} is outside the Unicode range")]
pub struct InvalidCodepoint {
    value: u32,
}

impl InvalidCodepoint {
    pub(crate) const fn new(value: u32) -> Self {
        Self { value }
    }

    /// The rejected codepoint.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }
}

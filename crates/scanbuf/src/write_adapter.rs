// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::{fmt, io};

use crate::{Memory, ScanBuf};

/// Standard writer support.
///
/// The buffer grows to accept every byte, so writes never return short counts and never fail.
impl<M: Memory> io::Write for ScanBuf<'_, M> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Self::write(self, buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Self::write(self, buf);
        Ok(())
    }

    #[cfg_attr(test, mutants::skip)] // There is nothing to flush.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Formatted text output, e.g. via [`write!`].
impl<M: Memory> fmt::Write for ScanBuf<'_, M> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.put_char(c);
        Ok(())
    }
}

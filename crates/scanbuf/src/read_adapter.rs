// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{self, BufRead, Read};

use crate::ByteView;

/// Adapter that implements [`Read`] and [`BufRead`] for [`ByteView`].
///
/// Create an instance via [`ByteView::reader()`][1]. Bytes read through the adapter are
/// consumed from the view.
///
/// Because [`ByteView`] is already a contiguous in-memory buffer, this adapter implements
/// [`BufRead`] directly without needing an intermediate buffer. Prefer this over wrapping
/// in [`std::io::BufReader`].
///
/// [1]: crate::ByteView::reader
#[derive(Debug)]
pub struct ByteViewReader<'v, 'a> {
    inner: &'v mut ByteView<'a>,
}

impl<'v, 'a> ByteViewReader<'v, 'a> {
    #[must_use]
    pub(crate) const fn new(inner: &'v mut ByteView<'a>) -> Self {
        Self { inner }
    }
}

impl Read for ByteViewReader<'_, '_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (available, _) = self.inner.substr(0, buf.len());
        let to_read = available.len();

        buf[..to_read].copy_from_slice(available.as_bytes());
        self.inner.consume(to_read);

        Ok(to_read)
    }
}

impl BufRead for ByteViewReader<'_, '_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.inner.as_bytes())
    }

    fn consume(&mut self, amount: usize) {
        self.inner.consume(amount);
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Zero-copy byte views and growable output buffers for parsers and serializers.
//!
//! This crate provides two low-level primitives:
//!
//! * [`ByteView`] references a contiguous run of bytes owned by someone else. Parsers carve views
//!   out of their input and scan them by consuming bytes from the front.
//! * [`ScanBuf`] owns (or borrows as scratch space) a growable block of memory that output is
//!   appended to. Capacity grows in power-of-two steps, so appending is amortized O(1) per byte.
//!
//! # Consuming input
//!
//! A view never allocates. All scanning operations shrink the view from the front, leaving only the
//! bytes that have not yet been examined:
//!
//! * [`consume_byte()`] removes the first byte.
//! * [`consume_if()`] removes the first byte only if it satisfies a predicate.
//! * [`consume_while()`] skips a run of bytes that satisfy a predicate.
//! * [`consume_prefix()`] removes an expected token, leaving the view untouched on mismatch.
//! * [`consume()`] removes up to `n` bytes.
//!
//! ```
//! use scanbuf::ByteView;
//!
//! let mut input = ByteView::from("  <header> 42");
//!
//! input.consume_while(|b| b == b' ');
//! assert!(input.consume_prefix(ByteView::from("<header>")));
//! input.consume_while(|b| b == b' ');
//!
//! let mut value: u32 = 0;
//! while let Some(digit) = input.consume_if(|b| b.is_ascii_digit()) {
//!     value = value * 10 + u32::from(digit - b'0');
//! }
//!
//! assert_eq!(value, 42);
//! assert!(input.is_empty());
//! ```
//!
//! A parser that needs the text of a token it has just scanned can recover it from the view it
//! started from, via [`ByteView::prefix()`]:
//!
//! ```
//! use scanbuf::ByteView;
//!
//! let start = ByteView::from("identifier = 5");
//! let mut rest = start;
//! rest.consume_while(|b| b.is_ascii_alphabetic());
//!
//! assert_eq!(start.prefix(rest), "identifier");
//! ```
//!
//! # Producing output
//!
//! A [`ScanBuf`] may start out with caller-supplied scratch storage. As long as the output fits,
//! no heap memory is used. The first write that does not fit moves the content to a heap
//! allocation owned by the buffer; the caller's storage is never freed or written to again.
//!
//! ```
//! use scanbuf::{Ownership, ScanBuf};
//!
//! let mut scratch = [0_u8; 8];
//! let mut buf = ScanBuf::with_storage(&mut scratch);
//!
//! buf.write(b"hello");
//! assert_eq!(buf.ownership(), Ownership::CallerOwned);
//!
//! buf.write(b" world");
//! assert_eq!(buf.ownership(), Ownership::HeapOwned);
//! assert_eq!(buf.contents(), "hello world");
//! ```
//!
//! The lifecycle operations are:
//!
//! * [`reset()`] discards the content but keeps the capacity.
//! * [`trim()`] shrinks a heap allocation to exactly fit the content.
//! * [`free()`] releases any heap allocation and reverts to the caller-supplied storage.
//!
//! # Allocation
//!
//! Heap memory is obtained through a [`Memory`] provider. The default is [`GlobalMemory`],
//! which uses the Rust global allocator. Allocation failure is not a recoverable condition - the
//! process aborts, the same as for any other collection type in the standard library.
//!
//! # Views into a buffer
//!
//! [`ScanBuf::contents()`] borrows the buffer, so a view of the content cannot be held across
//! a call that may move the content to a new allocation. Reacquire the view after writing.
//!
//! [`consume_byte()`]: ByteView::consume_byte
//! [`consume_if()`]: ByteView::consume_if
//! [`consume_while()`]: ByteView::consume_while
//! [`consume_prefix()`]: ByteView::consume_prefix
//! [`consume()`]: ByteView::consume
//! [`reset()`]: ScanBuf::reset
//! [`trim()`]: ScanBuf::trim
//! [`free()`]: ScanBuf::free

mod buf;
mod buf_put;
mod error;
pub mod mem;
mod read_adapter;
mod size;
#[cfg(test)]
mod testing;
mod view;
mod view_mut;
mod write_adapter;

pub use buf::{Ownership, ScanBuf};
pub use error::InvalidCodepoint;
pub use mem::{GlobalMemory, Memory};
pub use read_adapter::ByteViewReader;
pub use size::capacity_for;
pub use view::ByteView;
pub use view_mut::ByteViewMut;

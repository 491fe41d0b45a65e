// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::mem;

use nm::{Event, Magnitude};
use tracing::{Level, event};

use crate::mem::{GlobalMemory, Memory};
use crate::{ByteView, ByteViewMut, capacity_for};

/// Identifies who owns the storage that a [`ScanBuf`] currently writes into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Ownership {
    /// The buffer uses the storage supplied by the caller at construction time.
    ///
    /// The buffer never frees this storage. Every buffer starts in this state, even when the
    /// supplied storage is zero-sized.
    CallerOwned,

    /// The buffer uses a heap allocation obtained from its memory provider and owned
    /// exclusively by the buffer.
    ///
    /// A buffer enters this state the first time its content outgrows the caller-supplied
    /// storage and only leaves it via [`ScanBuf::free()`].
    HeapOwned,
}

/// Where the bytes of a buffer live at the moment.
enum Backing {
    // The `init` storage of the buffer.
    Caller,

    // Every byte of the vector is initialized; its length is the capacity of the buffer.
    Heap(Vec<u8>),
}

/// An append-only output buffer that grows on demand.
///
/// The buffer tracks two regions of its storage: the filled region at the front, holding the
/// bytes written so far, and the available region after it, which receives the next write.
/// Writing more than fits in the available region grows the storage to the next power of two
/// that accommodates the content, so appending costs amortized O(1) per byte.
///
/// # Storage
///
/// A buffer may be constructed over caller-supplied scratch storage via [`with_storage()`]. As
/// long as the content fits, no heap memory is used. When the content outgrows the storage, it is
/// copied into a heap allocation obtained from the buffer's [memory provider] and the buffer
/// switches to [`Ownership::HeapOwned`]. The caller's storage is left as it was at that point -
/// the buffer never writes to it again until [`free()`] reverts the buffer to it.
///
/// # Views into the buffer
///
/// [`contents()`] borrows the buffer. Any write may move the content to a new allocation, so a view
/// obtained before a write cannot be used after it - the borrow checker enforces this:
///
/// ```compile_fail
/// use scanbuf::ScanBuf;
///
/// let mut buf = ScanBuf::new();
/// buf.write(b"hello");
///
/// let view = buf.contents();
/// buf.write(b" world"); // May reallocate, invalidating `view`.
///
/// assert_eq!(view, "hello");
/// ```
///
/// Reacquire the view after each mutating call instead. To detect that the backing allocation has
/// changed between two points in time, compare [`generation()`].
///
/// # Example
///
/// ```
/// use scanbuf::ScanBuf;
///
/// let mut buf = ScanBuf::new();
///
/// buf.write(b"hello");
/// buf.write(b" world");
///
/// assert_eq!(buf.contents(), "hello world");
/// assert!(buf.capacity().is_power_of_two());
/// ```
///
/// [`with_storage()`]: Self::with_storage
/// [memory provider]: crate::Memory
/// [`free()`]: Self::free
/// [`contents()`]: Self::contents
/// [`generation()`]: Self::generation
pub struct ScanBuf<'s, M: Memory = GlobalMemory> {
    /// The storage supplied at construction time. Never reallocated or freed by us.
    init: &'s mut [u8],

    backing: Backing,

    /// Length of the filled region. The available region is everything after it.
    len: usize,

    /// Incremented whenever the backing allocation changes.
    generation: u64,

    memory: M,
}

impl<'s> ScanBuf<'s> {
    /// Creates an empty buffer without any storage.
    ///
    /// The first write allocates heap memory from the global allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(GlobalMemory::new())
    }

    /// Creates an empty buffer that writes into `storage` until the content outgrows it.
    ///
    /// Zero-sized storage is valid and is equivalent to [`new()`][Self::new].
    #[must_use]
    pub fn with_storage(storage: &'s mut [u8]) -> Self {
        Self::with_storage_in(storage, GlobalMemory::new())
    }
}

impl<'s, M: Memory> ScanBuf<'s, M> {
    /// Creates an empty buffer without any storage that obtains heap memory from `memory`.
    #[must_use]
    pub fn new_in(memory: M) -> Self {
        Self::with_storage_in(<&mut [u8]>::default(), memory)
    }

    /// Creates an empty buffer that writes into `storage` until the content outgrows it,
    /// obtaining heap memory from `memory` after that.
    #[must_use]
    pub fn with_storage_in(storage: &'s mut [u8], memory: M) -> Self {
        Self {
            init: storage,
            backing: Backing::Caller,
            len: 0,
            generation: 0,
            memory,
        }
    }

    /// The number of bytes written to the buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no bytes have been written to the buffer.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The total size of the storage the buffer currently uses, filled or not.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage().len()
    }

    /// The number of bytes that can be written before the buffer needs to grow.
    #[must_use]
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity()
            .checked_sub(self.len)
            .expect("filled region is larger than the storage - only possible if the math is wrong")
    }

    /// Who owns the storage the buffer currently uses.
    #[must_use]
    pub const fn ownership(&self) -> Ownership {
        match self.backing {
            Backing::Caller => Ownership::CallerOwned,
            Backing::Heap(_) => Ownership::HeapOwned,
        }
    }

    /// Identifies the current backing allocation of the buffer.
    ///
    /// The value changes whenever the buffer grows, shrinks or releases its storage, i.e. whenever
    /// the content may have moved in memory. Writes that fit in the remaining capacity and
    /// [`reset()`][Self::reset] do not change it.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The memory provider that the buffer obtains heap memory from.
    #[must_use]
    pub const fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a view over the bytes written to the buffer.
    ///
    /// The view borrows the buffer - it must be reacquired after any mutating call.
    #[must_use]
    pub fn contents(&self) -> ByteView<'_> {
        let storage = ByteView::new(self.storage());
        let (available, _) = storage.substr(self.len, storage.len());

        storage.prefix(available)
    }

    /// The bytes written to the buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.contents().as_bytes()
    }

    /// Ensures that at least `additional` bytes can be written without growing the buffer.
    ///
    /// If the remaining capacity is insufficient, the storage grows to the larger of the next
    /// power of two of the current capacity and the next power of two of the total required
    /// length. The written bytes are preserved.
    ///
    /// When the buffer is using caller-supplied storage, growing copies the content into a new
    /// heap allocation. When it is already using heap memory, the allocation is resized.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity is not representable in `usize`. Running out of memory
    /// aborts the process.
    pub fn require(&mut self, additional: usize) {
        if self.remaining_capacity() >= additional {
            return;
        }

        let required = self
            .len
            .checked_add(additional)
            .expect("required capacity overflows usize");

        let new_capacity = capacity_for(self.capacity()).max(capacity_for(required));

        if let Backing::Heap(block) = &mut self.backing {
            event!(
                Level::TRACE,
                message = "growing heap storage",
                used = self.len,
                capacity = block.len(),
                new_capacity
            );

            self.memory.reallocate(block, new_capacity);
        } else {
            let mut block = self.memory.allocate(new_capacity);
            block[..self.len].copy_from_slice(&self.init[..self.len]);

            event!(
                Level::DEBUG,
                message = "moved content from caller storage to heap",
                used = self.len,
                capacity = self.init.len(),
                new_capacity
            );

            SPILLED_BYTES.with(|e| e.observe(self.len));

            self.backing = Backing::Heap(block);
        }

        debug_assert_eq!(self.capacity(), new_capacity);

        self.generation = self.generation.wrapping_add(1);

        GROWN_CAPACITY.with(|e| e.observe(new_capacity));
    }

    /// Shrinks heap storage to exactly fit the written bytes.
    ///
    /// This is a no-op while the buffer uses caller-supplied storage. Afterwards, the remaining
    /// capacity of a heap-owned buffer is zero and the next write will grow it again.
    pub fn trim(&mut self) {
        let Backing::Heap(block) = &mut self.backing else {
            return;
        };

        if block.len() == self.len {
            return;
        }

        event!(
            Level::TRACE,
            message = "trimming heap storage",
            used = self.len,
            capacity = block.len()
        );

        self.memory.reallocate(block, self.len);

        self.generation = self.generation.wrapping_add(1);

        TRIMMED_BYTES.with(|e| e.observe(self.len));
    }

    /// Discards the written bytes, making the entire capacity available again.
    ///
    /// The storage and ownership of the buffer are unchanged. The discarded bytes are not zeroed.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Releases any heap storage and reverts the buffer to the storage supplied at construction.
    ///
    /// Afterwards the buffer is indistinguishable from a freshly constructed buffer over the
    /// same storage, except that the caller-supplied storage may hold bytes written before the
    /// buffer grew. While the buffer uses caller-supplied storage, this is equivalent to
    /// [`reset()`][Self::reset].
    pub fn free(&mut self) {
        if let Backing::Heap(block) = mem::replace(&mut self.backing, Backing::Caller) {
            event!(
                Level::DEBUG,
                message = "released heap storage",
                used = self.len,
                capacity = block.len()
            );

            self.memory.release(block);

            self.generation = self.generation.wrapping_add(1);
        }

        self.len = 0;
    }

    /// The available region of the storage, as a write destination.
    pub(crate) fn available(&mut self) -> ByteViewMut<'_> {
        let len = self.len;

        ByteViewMut::new(&mut self.storage_mut()[len..])
    }

    /// Marks `count` bytes at the start of the available region as written.
    pub(crate) fn advance(&mut self, count: usize) {
        self.len = self
            .len
            .checked_add(count)
            .expect("overflowing usize is impossible because the filled region is bounded by the storage");

        debug_assert!(self.len <= self.capacity());
    }

    fn storage(&self) -> &[u8] {
        match &self.backing {
            Backing::Caller => &*self.init,
            Backing::Heap(block) => block.as_slice(),
        }
    }

    fn storage_mut(&mut self) -> &mut [u8] {
        match &mut self.backing {
            Backing::Caller => &mut *self.init,
            Backing::Heap(block) => block.as_mut_slice(),
        }
    }
}

impl Default for ScanBuf<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Memory> Drop for ScanBuf<'_, M> {
    fn drop(&mut self) {
        self.free();
    }
}

impl<M: Memory> fmt::Debug for ScanBuf<'_, M> {
    #[cfg_attr(coverage_nightly, coverage(off))] // There is no specific API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanBuf")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("ownership", &self.ownership())
            .field("generation", &self.generation)
            .field("memory", &self.memory)
            .finish()
    }
}

// Histogram buckets for the capacity a buffer grows to.
const CAPACITY_BUCKETS: &[Magnitude] = &[0, 64, 256, 1024, 4096, 16_384, 65_536, 262_144, 1_048_576];

thread_local! {
    static GROWN_CAPACITY: Event = Event::builder()
        .name("scanbuf_buf_grown_capacity")
        .histogram(CAPACITY_BUCKETS)
        .build();

    static SPILLED_BYTES: Event = Event::builder()
        .name("scanbuf_buf_spilled_bytes")
        .build();

    static TRIMMED_BYTES: Event = Event::builder()
        .name("scanbuf_buf_trimmed_bytes")
        .build();
}

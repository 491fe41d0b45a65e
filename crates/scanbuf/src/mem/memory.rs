// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Debug;

/// Provides heap memory to a [`ScanBuf`][crate::ScanBuf] when its content outgrows the
/// storage it currently uses.
///
/// A buffer calls the provider only on its growth path (and to shrink or release what it has
/// obtained). Memory blocks are represented as `Vec<u8>` whose length is the capacity of the
/// block - every byte of a block is initialized.
///
/// # Resource management
///
/// A block obtained via [`allocate()`][Self::allocate] is owned by the buffer until it is returned
/// via [`release()`][Self::release]. Dropping a buffer releases its block.
///
/// # Failure
///
/// Providers do not report allocation failure. If memory cannot be obtained, the process must
/// abort - a buffer never continues with a partially grown allocation.
pub trait Memory: Debug {
    /// Allocates a new zero-filled block of exactly `capacity` bytes.
    ///
    /// The returned vector has `len() == capacity`.
    #[must_use]
    fn allocate(&self, capacity: usize) -> Vec<u8>;

    /// Resizes an existing block to exactly `capacity` bytes.
    ///
    /// The first `min(block.len(), capacity)` bytes are preserved. Afterwards,
    /// `block.len() == capacity`. The block may move to a different address.
    fn reallocate(&self, block: &mut Vec<u8>, capacity: usize);

    /// Returns a block to the provider.
    fn release(&self, block: Vec<u8>);
}

impl<M: Memory + ?Sized> Memory for &M {
    #[inline]
    fn allocate(&self, capacity: usize) -> Vec<u8> {
        (*self).allocate(capacity)
    }

    #[inline]
    fn reallocate(&self, block: &mut Vec<u8>, capacity: usize) {
        (*self).reallocate(block, capacity);
    }

    #[inline]
    fn release(&self, block: Vec<u8>) {
        (*self).release(block);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::Memory;
    use crate::mem::testing::CountingMemory;

    fn allocate_from_generic<M: Memory>(memory: M, capacity: usize) -> Vec<u8> {
        memory.allocate(capacity)
    }

    #[test]
    fn memory_impl_for_reference_forwards_to_underlying() {
        let memory = CountingMemory::new();

        let mut block = allocate_from_generic(&memory, 64);
        assert_eq!(block.len(), 64);

        (&memory).reallocate(&mut block, 128);
        assert_eq!(block.len(), 128);

        (&memory).release(block);

        assert_eq!(memory.allocations(), 1);
        assert_eq!(memory.reallocations(), 1);
        assert_eq!(memory.releases(), 1);
    }
}

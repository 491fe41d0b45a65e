// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::mem::Memory;

/// A memory provider that obtains memory from the Rust global allocator.
///
/// This is the default memory provider of [`ScanBuf`][crate::ScanBuf]. Blocks are sized exactly
/// as requested - the provider does not round up on its own, leaving the growth policy entirely
/// to the buffer.
///
/// Allocation failure aborts the process via the global allocator's out-of-memory handler.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMemory {
    // Keeps construction going through `new()` so that fields can be added later.
    _placeholder: (),
}

impl GlobalMemory {
    /// Creates a new instance of the memory provider.
    #[must_use]
    pub const fn new() -> Self {
        Self { _placeholder: () }
    }
}

impl Memory for GlobalMemory {
    fn allocate(&self, capacity: usize) -> Vec<u8> {
        vec![0; capacity]
    }

    fn reallocate(&self, block: &mut Vec<u8>, capacity: usize) {
        if let Some(additional) = capacity.checked_sub(block.len()) {
            // Without an exact reservation, `Vec` would apply its own growth policy on top of ours.
            block.reserve_exact(additional);
            block.resize(capacity, 0);
        } else {
            block.truncate(capacity);
            block.shrink_to_fit();
        }
    }

    #[cfg_attr(test, mutants::skip)] // Dropping and not dropping are indistinguishable to tests.
    fn release(&self, block: Vec<u8>) {
        drop(block);
    }
}

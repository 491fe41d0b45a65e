// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::mem::{GlobalMemory, Memory};

const ERR_POISONED_LOCK: &str = "poisoned lock - cannot continue execution because security and privacy guarantees can no longer be upheld";

/// A memory provider that delegates to [`GlobalMemory`] and records every call made to it.
///
/// This is meant for test scenarios that need to verify when and how a buffer touches the heap,
/// for example that caller-supplied storage is used without allocating or that a buffer releases
/// exactly the memory it allocated.
///
/// Clones share the same counters, so a clone can be handed to a buffer while the original is
/// kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct CountingMemory {
    inner: Arc<CountingMemoryInner>,
}

#[derive(Debug, Default)]
struct CountingMemoryInner {
    allocations: AtomicUsize,
    reallocations: AtomicUsize,
    releases: AtomicUsize,

    // Every capacity passed to `allocate()` or `reallocate()`, in call order.
    capacities: Mutex<Vec<usize>>,
}

impl CountingMemory {
    /// Creates a new instance of the memory provider with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`Memory::allocate()`] has been called.
    #[must_use]
    pub fn allocations(&self) -> usize {
        self.inner.allocations.load(Ordering::Relaxed)
    }

    /// Number of times [`Memory::reallocate()`] has been called.
    #[must_use]
    pub fn reallocations(&self) -> usize {
        self.inner.reallocations.load(Ordering::Relaxed)
    }

    /// Number of times [`Memory::release()`] has been called.
    #[must_use]
    pub fn releases(&self) -> usize {
        self.inner.releases.load(Ordering::Relaxed)
    }

    /// The capacities requested via [`Memory::allocate()`] and [`Memory::reallocate()`],
    /// in the order the calls were made.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requested_capacities(&self) -> Vec<usize> {
        self.inner.capacities.lock().expect(ERR_POISONED_LOCK).clone()
    }

    /// Whether every block handed out has been returned.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.allocations() == self.releases()
    }

    fn record(&self, capacity: usize) {
        self.inner.capacities.lock().expect(ERR_POISONED_LOCK).push(capacity);
    }
}

impl Memory for CountingMemory {
    fn allocate(&self, capacity: usize) -> Vec<u8> {
        self.inner.allocations.fetch_add(1, Ordering::Relaxed);
        self.record(capacity);

        GlobalMemory::new().allocate(capacity)
    }

    fn reallocate(&self, block: &mut Vec<u8>, capacity: usize) {
        self.inner.reallocations.fetch_add(1, Ordering::Relaxed);
        self.record(capacity);

        GlobalMemory::new().reallocate(block, capacity);
    }

    fn release(&self, block: Vec<u8>) {
        self.inner.releases.fetch_add(1, Ordering::Relaxed);

        GlobalMemory::new().release(block);
    }
}

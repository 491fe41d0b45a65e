// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Types for using and implementing memory providers.

mod global;
mod memory;

pub use global::GlobalMemory;
pub use memory::Memory;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

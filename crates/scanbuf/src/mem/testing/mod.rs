// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Utilities for testing memory management logic.

mod counting;

pub use counting::CountingMemory;

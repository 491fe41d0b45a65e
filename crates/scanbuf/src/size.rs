// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Returns the smallest power of two that is greater than or equal to `value`.
///
/// This is the capacity step used when a [`ScanBuf`][crate::ScanBuf] grows. Zero rounds up to one.
///
/// # Example
///
/// ```
/// use scanbuf::capacity_for;
///
/// assert_eq!(capacity_for(0), 1);
/// assert_eq!(capacity_for(11), 16);
/// assert_eq!(capacity_for(16), 16);
/// ```
///
/// # Panics
///
/// Panics if the next power of two is not representable in `usize`. No allocation of that size
/// could ever succeed, so this is treated the same as running out of memory.
#[must_use]
pub fn capacity_for(value: usize) -> usize {
    value
        .checked_next_power_of_two()
        .expect("requested capacity exceeds the largest power of two representable in usize")
}

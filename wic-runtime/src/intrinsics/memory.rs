// WIC - wic-runtime
// Module: Memory growth intrinsics
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! `memory.grow` and `memory.size`.
//!
//! Neither operation traps. Failure is reported with [`GROW_FAILED`] and
//! leaves the memory untouched.

use crate::memory::{LinearMemory, GROW_FAILED, MAX_PAGES};

/// `memory.grow` against the engine ceiling of [`MAX_PAGES`].
///
/// `delta_pages` is read as an unsigned page count, so a negative value asks
/// for more than four billion pages and fails.
pub fn grow_memory<M: LinearMemory + ?Sized>(memory: &mut M, delta_pages: i32) -> i32 {
    grow_memory_within(memory, delta_pages, MAX_PAGES)
}

/// `memory.grow` against a ceiling lowered to `ceiling` pages.
///
/// Returns the previous page count, or [`GROW_FAILED`] if the new count
/// would exceed the ceiling or the memory could not be extended.
pub fn grow_memory_within<M: LinearMemory + ?Sized>(
    memory: &mut M,
    delta_pages: i32,
    ceiling: u32,
) -> i32 {
    let previous = memory.page_count();
    let delta = delta_pages as u32;
    let requested = u64::from(previous) + u64::from(delta);
    let ceiling = ceiling.min(MAX_PAGES);
    if requested > u64::from(ceiling) {
        tracing::debug!(previous, delta, ceiling, "memory.grow refused: page ceiling");
        return GROW_FAILED;
    }

    // requested <= ceiling <= MAX_PAGES, so both conversions are lossless.
    match memory.extend_to(requested as u32) {
        Ok(()) => {
            tracing::trace!(previous, new_pages = requested, "memory.grow");
            previous as i32
        }
        Err(error) => {
            tracing::debug!(previous, delta, %error, "memory.grow failed");
            GROW_FAILED
        }
    }
}

/// `memory.size`, or [`GROW_FAILED`] if the recorded page count is above
/// [`MAX_PAGES`].
pub fn current_memory<M: LinearMemory + ?Sized>(memory: &M) -> i32 {
    let pages = memory.page_count();
    if pages > MAX_PAGES {
        tracing::debug!(pages, "memory.size: page count above the engine maximum");
        return GROW_FAILED;
    }
    pages as i32
}

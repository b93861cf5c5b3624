// WIC - wic-runtime
// Module: Linear memory
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly linear memory as seen by the growth intrinsics.
//!
//! # Memory Model
//!
//! A memory is a byte range divided into [`PAGE_SIZE`] pages. Its page count
//! only increases and never exceeds [`MAX_PAGES`], which makes the whole
//! 32-bit address space (4 GiB) addressable and nothing more.
//!
//! The intrinsics talk to memories through the [`LinearMemory`] trait so
//! embedders can keep their own memory objects. [`Memory`] is the instance
//! type provided here; its bytes live in a pluggable [`MemoryBacking`]:
//!
//! - [`HeapBacking`] is one contiguous, zero-filled allocation.
//! - [`SparseBacking`] commits a page only when it is first written, so a
//!   full 65536-page memory costs nothing until it is touched.
//!
//! Concurrent growth of the same memory must be serialised; with `std`,
//! [`SharedMemory`] does that with a single lock per instance.

use alloc::{boxed::Box, collections::BTreeMap, vec::Vec};

use wic_error::{Error, Result};

/// WebAssembly page size (64KB)
pub const PAGE_SIZE: usize = 65536;

/// Maximum number of memory pages allowed by WebAssembly spec
pub const MAX_PAGES: u32 = 65536;

/// Value returned by `memory.grow` and `memory.size` on failure.
pub const GROW_FAILED: i32 = -1;

/// Byte length of `pages` pages.
///
/// Fails on targets whose address space cannot hold that many bytes.
pub fn pages_to_bytes(pages: u32) -> Result<usize> {
    usize::try_from(u64::from(pages) * PAGE_SIZE as u64).map_err(|_| Error::ALLOCATION_FAILED)
}

/// The page-count seam between the intrinsics and a memory object.
pub trait LinearMemory {
    /// Current number of pages as recorded by the memory.
    fn page_count(&self) -> u32;

    /// Extends the memory to exactly `new_pages` pages.
    ///
    /// Either the memory ends up at `new_pages` or it is left unchanged and
    /// an error is returned.
    fn extend_to(&mut self, new_pages: u32) -> Result<()>;
}

/// Storage for the bytes of a [`Memory`].
///
/// Callers bounds-check every access against [`MemoryBacking::len`] before
/// calling `read` or `write`.
pub trait MemoryBacking {
    /// Accessible length in bytes.
    fn len(&self) -> usize;

    /// Whether the backing holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grows the accessible length to `new_len`; new bytes read as zero.
    fn grow_to(&mut self, new_len: usize) -> Result<()>;

    /// Copies `buffer.len()` bytes starting at `offset` into `buffer`.
    fn read(&self, offset: usize, buffer: &mut [u8]);

    /// Copies `buffer` into memory starting at `offset`.
    fn write(&mut self, offset: usize, buffer: &[u8]);
}

/// Contiguous heap allocation.
///
/// Growth only reserves capacity. Bytes are zero-filled up to the highest
/// written offset, so a large memory that is mostly untouched costs address
/// space rather than resident pages.
#[derive(Debug, Clone, Default)]
pub struct HeapBacking {
    bytes: Vec<u8>,
    len:   usize,
}

impl HeapBacking {
    /// Number of bytes written or zero-filled so far.
    #[must_use]
    pub fn committed_len(&self) -> usize {
        self.bytes.len()
    }
}

impl PartialEq for HeapBacking {
    fn eq(&self, other: &Self) -> bool {
        let (short, long) = if self.bytes.len() <= other.bytes.len() {
            (&self.bytes, &other.bytes)
        } else {
            (&other.bytes, &self.bytes)
        };
        self.len == other.len
            && long[..short.len()] == short[..]
            && long[short.len()..].iter().all(|&b| b == 0)
    }
}

impl Eq for HeapBacking {}

impl MemoryBacking for HeapBacking {
    fn len(&self) -> usize {
        self.len
    }

    fn grow_to(&mut self, new_len: usize) -> Result<()> {
        if new_len <= self.len {
            return Ok(());
        }
        self.bytes
            .try_reserve_exact(new_len - self.bytes.len())
            .map_err(|_| Error::ALLOCATION_FAILED)?;
        self.len = new_len;
        Ok(())
    }

    fn read(&self, offset: usize, buffer: &mut [u8]) {
        let filled = self.bytes.len().saturating_sub(offset).min(buffer.len());
        let (present, absent) = buffer.split_at_mut(filled);
        if filled > 0 {
            present.copy_from_slice(&self.bytes[offset..offset + filled]);
        }
        absent.fill(0);
    }

    // Fills the gap up to `end` within the capacity `grow_to` reserved.
    fn write(&mut self, offset: usize, buffer: &[u8]) {
        let end = offset + buffer.len();
        if end > self.bytes.len() {
            self.bytes.resize(end, 0);
        }
        self.bytes[offset..end].copy_from_slice(buffer);
    }
}

/// Page-granular backing that allocates a page on its first write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseBacking {
    len:   usize,
    pages: BTreeMap<usize, Box<[u8]>>,
}

impl SparseBacking {
    /// Number of pages that have been written to.
    #[must_use]
    pub fn committed_pages(&self) -> usize {
        self.pages.len()
    }

    /// Splits `[offset, offset + len)` into per-page pieces of
    /// `(page index, offset in page, byte count)`.
    fn chunks(offset: usize, len: usize) -> impl Iterator<Item = (usize, usize, usize)> {
        let mut pos = offset;
        let end = offset + len;
        core::iter::from_fn(move || {
            if pos >= end {
                return None;
            }
            let page = pos / PAGE_SIZE;
            let within = pos % PAGE_SIZE;
            let count = (PAGE_SIZE - within).min(end - pos);
            pos += count;
            Some((page, within, count))
        })
    }
}

impl MemoryBacking for SparseBacking {
    fn len(&self) -> usize {
        self.len
    }

    fn grow_to(&mut self, new_len: usize) -> Result<()> {
        self.len = self.len.max(new_len);
        Ok(())
    }

    fn read(&self, offset: usize, buffer: &mut [u8]) {
        let mut filled = 0;
        for (page, within, count) in Self::chunks(offset, buffer.len()) {
            let dest = &mut buffer[filled..filled + count];
            match self.pages.get(&page) {
                Some(bytes) => dest.copy_from_slice(&bytes[within..within + count]),
                None => dest.fill(0),
            }
            filled += count;
        }
    }

    fn write(&mut self, offset: usize, buffer: &[u8]) {
        let mut consumed = 0;
        for (page, within, count) in Self::chunks(offset, buffer.len()) {
            let bytes = self
                .pages
                .entry(page)
                .or_insert_with(|| alloc::vec![0u8; PAGE_SIZE].into_boxed_slice());
            bytes[within..within + count].copy_from_slice(&buffer[consumed..consumed + count]);
            consumed += count;
        }
    }
}

/// A linear memory instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory<B: MemoryBacking = HeapBacking> {
    backing: B,
    pages:   u32,
    maximum: Option<u32>,
}

impl Memory<HeapBacking> {
    /// A heap-backed memory of `initial` pages.
    ///
    /// Growth reserves the full contiguous range up front, which can fail
    /// for large memories on hosts without overcommit. Use
    /// [`Memory::sparse`] when a memory may approach [`MAX_PAGES`].
    pub fn new(initial: u32) -> Result<Self> {
        Self::with_backing(HeapBacking::default(), initial, None)
    }
}

impl Memory<SparseBacking> {
    /// A sparsely backed memory of `initial` pages.
    pub fn sparse(initial: u32) -> Result<Self> {
        Self::with_backing(SparseBacking::default(), initial, None)
    }
}

impl<B: MemoryBacking> Memory<B> {
    /// Creates a memory of `initial` pages over `backing`, optionally capped
    /// at `maximum` pages by its declared limits.
    pub fn with_backing(backing: B, initial: u32, maximum: Option<u32>) -> Result<Self> {
        let cap = maximum.map_or(MAX_PAGES, |max| max.min(MAX_PAGES));
        if initial > cap {
            return Err(Error::memory_grow_error("Initial page count exceeds the memory limit"));
        }
        let mut memory = Self { backing, pages: 0, maximum };
        memory.extend_to(initial)?;
        Ok(memory)
    }

    /// Declared maximum page count, if any.
    #[must_use]
    pub const fn maximum(&self) -> Option<u32> {
        self.maximum
    }

    /// Current size in bytes.
    #[must_use]
    pub fn size_in_bytes(&self) -> u64 {
        u64::from(self.pages) * PAGE_SIZE as u64
    }

    /// The backing storage.
    #[must_use]
    pub const fn backing(&self) -> &B {
        &self.backing
    }

    fn check_range(&self, offset: u32, len: usize) -> Result<usize> {
        let end = u64::from(offset)
            .checked_add(len as u64)
            .ok_or(Error::memory_out_of_bounds("Memory access would overflow"))?;
        if end > self.size_in_bytes() {
            return Err(Error::memory_out_of_bounds("Memory access out of bounds"));
        }
        usize::try_from(offset).map_err(|_| Error::memory_out_of_bounds("Offset exceeds usize"))
    }

    /// Reads `buffer.len()` bytes at `offset`.
    pub fn read(&self, offset: u32, buffer: &mut [u8]) -> Result<()> {
        // Empty read is always successful
        if buffer.is_empty() {
            return Ok(());
        }
        let start = self.check_range(offset, buffer.len())?;
        self.backing.read(start, buffer);
        Ok(())
    }

    /// Writes `buffer` at `offset`.
    pub fn write(&mut self, offset: u32, buffer: &[u8]) -> Result<()> {
        // Empty write is always successful
        if buffer.is_empty() {
            return Ok(());
        }
        let start = self.check_range(offset, buffer.len())?;
        self.backing.write(start, buffer);
        Ok(())
    }
}

impl<B: MemoryBacking> LinearMemory for Memory<B> {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn extend_to(&mut self, new_pages: u32) -> Result<()> {
        if new_pages < self.pages {
            return Err(Error::memory_grow_error("Memory cannot shrink"));
        }
        if new_pages > MAX_PAGES {
            return Err(Error::memory_grow_error("Page count exceeds the engine maximum"));
        }
        if self.maximum.is_some_and(|max| new_pages > max) {
            return Err(Error::memory_grow_error("Page count exceeds the declared maximum"));
        }
        let new_len = pages_to_bytes(new_pages)?;
        self.backing.grow_to(new_len)?;
        self.pages = new_pages;
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use shared::SharedMemory;

#[cfg(feature = "std")]
mod shared {
    use parking_lot::{Mutex, MutexGuard};

    use super::{HeapBacking, LinearMemory, Memory, MemoryBacking};
    use crate::intrinsics::memory::{current_memory, grow_memory_within};

    /// A memory that may be grown from several threads.
    ///
    /// Growth reads the page count, checks the ceiling and installs the new
    /// count; the lock keeps that sequence atomic per instance.
    #[derive(Debug)]
    pub struct SharedMemory<B: MemoryBacking = HeapBacking> {
        inner: Mutex<Memory<B>>,
    }

    impl<B: MemoryBacking> SharedMemory<B> {
        /// Wraps `memory`.
        pub fn new(memory: Memory<B>) -> Self {
            Self { inner: Mutex::new(memory) }
        }

        /// `memory.grow` under the instance lock, capped at `ceiling` pages.
        pub fn grow(&self, delta_pages: i32, ceiling: u32) -> i32 {
            grow_memory_within(&mut *self.inner.lock(), delta_pages, ceiling)
        }

        /// `memory.size` under the instance lock.
        pub fn size(&self) -> i32 {
            current_memory(&*self.inner.lock())
        }

        /// Locks the memory for byte access.
        pub fn lock(&self) -> MutexGuard<'_, Memory<B>> {
            self.inner.lock()
        }

        /// Unwraps the memory.
        pub fn into_inner(self) -> Memory<B> {
            self.inner.into_inner()
        }
    }

    impl<B: MemoryBacking> LinearMemory for SharedMemory<B> {
        fn page_count(&self) -> u32 {
            self.inner.lock().page_count()
        }

        fn extend_to(&mut self, new_pages: u32) -> wic_error::Result<()> {
            self.inner.get_mut().extend_to(new_pages)
        }
    }
}

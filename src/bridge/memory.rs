// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Memory epoch and cached region views.
//!
//! Guest linear memory is one address space shared by every handle. Anything
//! that may allocate can move the host-side backing store, so views into it
//! are never held as slices. A view is `(ptr, len, epoch)` and is reacquired
//! from the guest whenever its epoch is behind the bridge's.

use crate::errors::{BridgeError, BridgeResult};

/// Monotonic counter advanced on every event that may relocate guest memory.
#[derive(Debug, Default)]
pub struct MemoryEpoch {
    current: u64,
    generation: u64,
}

impl MemoryEpoch {
    pub fn new(generation: u64) -> Self {
        Self {
            current: 0,
            generation,
        }
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn advance(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Compares the guest's memory generation with the last observed one and
    /// advances the epoch when it moved. Returns `true` if it advanced.
    pub fn observe(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            return false;
        }
        self.generation = generation;
        self.advance();
        true
    }
}

/// A region of guest memory, valid for the epoch it was taken under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedView {
    pub ptr: u32,
    pub len: u32,
    epoch: u64,
}

impl CachedView {
    pub fn new(ptr: u32, len: u32, epoch: u64) -> Self {
        Self { ptr, len, epoch }
    }

    #[inline]
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn slice<'m>(&self, memory: &'m [u8]) -> BridgeResult<&'m [u8]> {
        let (start, end) = self.bounds(memory.len())?;
        Ok(&memory[start..end])
    }

    pub fn slice_mut<'m>(&self, memory: &'m mut [u8]) -> BridgeResult<&'m mut [u8]> {
        let (start, end) = self.bounds(memory.len())?;
        Ok(&mut memory[start..end])
    }

    fn bounds(&self, memory_len: usize) -> BridgeResult<(usize, usize)> {
        let start = self.ptr as usize;
        let end = start + self.len as usize;
        if self.ptr == 0 || end > memory_len {
            return Err(BridgeError::OutOfBounds(format!(
                "view {}..{} outside guest memory of {} bytes",
                start, end, memory_len
            )));
        }
        Ok((start, end))
    }
}

/// Host-owned input buffer inside guest memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBuffer {
    pub ptr: u32,
    pub capacity: u32,
}

impl InputBuffer {
    /// Capacity to request so that `needed` bytes fit, doubling from the current one.
    pub fn grown_capacity(&self, needed: usize) -> u32 {
        let mut capacity = self.capacity.max(1) as usize;
        while capacity < needed {
            capacity *= 2;
        }
        capacity as u32
    }
}

/// Reads `len` bytes at `ptr`, used for strings the guest hands out as raw pairs.
pub fn read_bytes(memory: &[u8], ptr: u32, len: u32) -> BridgeResult<&[u8]> {
    let start = ptr as usize;
    let end = start + len as usize;
    memory.get(start..end).ok_or_else(|| {
        BridgeError::OutOfBounds(format!(
            "read {}..{} outside guest memory of {} bytes",
            start,
            end,
            memory.len()
        ))
    })
}

/// Splits a `(ptr << 32) | len` value.
#[inline]
pub fn split_raw_pair(raw: u64) -> (u32, u32) {
    ((raw >> 32) as u32, (raw & 0xffff_ffff) as u32)
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Simulated linear memory for the in-process guest.
//!
//! Growth copies the whole store into a fresh allocation, so host pointers
//! into the old one go stale exactly as they would with a real module.

use std::collections::HashMap;

use crate::errors::{BridgeError, BridgeResult};

pub const PAGE_SIZE: usize = 64 * 1024;

const ALIGN: u32 = 8;

#[derive(Debug)]
pub struct LinearMemory {
    bytes: Vec<u8>,
    next: u32,
    live: HashMap<u32, u32>,
    free: Vec<(u32, u32)>,
    generation: u64,
}

impl Default for LinearMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearMemory {
    pub fn new() -> Self {
        Self::with_pages(1)
    }

    pub fn with_pages(pages: usize) -> Self {
        Self {
            bytes: vec![0; pages.max(1) * PAGE_SIZE],
            // Address 0 stays reserved so that 0 can mean "allocation failed".
            next: ALIGN,
            live: HashMap::new(),
            free: Vec::new(),
            generation: 0,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Bumped every time the backing store moves.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a zeroed block of at least `len` bytes, or 0.
    pub fn alloc(&mut self, len: u32) -> u32 {
        let Some(size) = align(len.max(1)) else {
            return 0;
        };

        let ptr = match self.free.iter().position(|(_, block)| *block >= size) {
            Some(index) => {
                let (ptr, block) = self.free.swap_remove(index);
                self.live.insert(ptr, block);
                ptr
            }
            None => {
                let ptr = self.next;
                let Some(end) = ptr.checked_add(size) else {
                    return 0;
                };
                if end as usize > self.bytes.len() && !self.grow(end as usize) {
                    return 0;
                }
                self.next = end;
                self.live.insert(ptr, size);
                ptr
            }
        };

        let start = ptr as usize;
        let block = self.live.get(&ptr).copied().unwrap_or(size) as usize;
        self.bytes[start..start + block].fill(0);
        ptr
    }

    /// Releases a block; the length is ignored in favour of the recorded size.
    pub fn dealloc(&mut self, ptr: u32, _len: u32) {
        if let Some(size) = self.live.remove(&ptr) {
            self.free.push((ptr, size));
        }
    }

    pub fn read(&self, ptr: u32, len: u32) -> BridgeResult<&[u8]> {
        let start = ptr as usize;
        let end = start + len as usize;
        self.bytes.get(start..end).ok_or_else(|| {
            BridgeError::OutOfBounds(format!(
                "guest read {}..{} outside {} bytes",
                start,
                end,
                self.bytes.len()
            ))
        })
    }

    pub fn slice_mut(&mut self, ptr: u32, len: u32) -> BridgeResult<&mut [u8]> {
        let start = ptr as usize;
        let end = start + len as usize;
        let total = self.bytes.len();
        self.bytes.get_mut(start..end).ok_or_else(|| {
            BridgeError::OutOfBounds(format!("guest write {}..{} outside {} bytes", start, end, total))
        })
    }

    pub fn write(&mut self, ptr: u32, data: &[u8]) -> BridgeResult<()> {
        self.slice_mut(ptr, data.len() as u32)?.copy_from_slice(data);
        Ok(())
    }

    fn grow(&mut self, needed: usize) -> bool {
        let mut len = self.bytes.len().max(PAGE_SIZE);
        while len < needed {
            len *= 2;
        }
        if len > u32::MAX as usize {
            return false;
        }

        let mut grown = vec![0; len];
        grown[..self.bytes.len()].copy_from_slice(&self.bytes);
        self.bytes = grown;
        self.generation += 1;
        true
    }
}

fn align(len: u32) -> Option<u32> {
    len.checked_add(ALIGN - 1).map(|n| n & !(ALIGN - 1))
}

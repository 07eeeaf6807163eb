// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host-side table of per-handle state.
//!
//! The guest owns handle numbers and may hand out a freed number again, so
//! `acquire` always replaces whatever was stored under it. `release` leaves a
//! `Released` marker behind so that late use of a destroyed handle is reported
//! as such instead of as an unknown handle.

use std::collections::HashMap;

use super::events::EVENT_COUNT;
use super::host::Callback;
use super::memory::{CachedView, InputBuffer};
use crate::errors::{BridgeError, BridgeResult};

#[derive(Default)]
pub struct Entry {
    callbacks: Option<Vec<Option<Callback>>>,
    fault: Option<anyhow::Error>,
    pub(crate) carry: Vec<u8>,
    pub(crate) input: Option<InputBuffer>,
    pub(crate) values: Option<CachedView>,
    pub(crate) offsets: Option<CachedView>,
}

impl Entry {
    /// Stores `callback` at `slot`, creating the slot array on first use.
    pub fn set_callback(&mut self, slot: usize, callback: Callback) {
        let slots = self
            .callbacks
            .get_or_insert_with(|| (0..EVENT_COUNT).map(|_| None).collect());
        slots[slot] = Some(callback);
    }

    pub fn clear_callback(&mut self, slot: usize) {
        if let Some(slots) = self.callbacks.as_mut() {
            slots[slot] = None;
        }
    }

    pub fn callback_mut(&mut self, slot: usize) -> Option<&mut Callback> {
        self.callbacks.as_mut()?.get_mut(slot)?.as_mut()
    }

    pub fn has_callbacks(&self) -> bool {
        self.callbacks.is_some()
    }

    /// Records a fault, replacing one that was never retrieved.
    pub fn record_fault(&mut self, fault: anyhow::Error) {
        self.fault = Some(fault);
    }

    pub fn take_fault(&mut self) -> Option<anyhow::Error> {
        self.fault.take()
    }

    pub fn has_fault(&self) -> bool {
        self.fault.is_some()
    }
}

/// `None` is the released marker.
type Slot = Option<Entry>;

#[derive(Default)]
pub struct HandleRegistry {
    slots: HashMap<u32, Slot>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh entry for `handle`, dropping any previous one.
    pub fn acquire(&mut self, handle: u32) -> &mut Entry {
        let slot = self.slots.entry(handle).or_default();
        *slot = Some(Entry::default());
        slot.get_or_insert_with(Entry::default)
    }

    /// Marks `handle` released and hands back its last entry.
    pub fn release(&mut self, handle: u32) -> BridgeResult<Entry> {
        match self.slots.insert(handle, None) {
            Some(Some(entry)) => Ok(entry),
            Some(None) => Err(BridgeError::HandleDestroyed(handle)),
            None => {
                self.slots.remove(&handle);
                Err(BridgeError::UnknownHandle(handle))
            }
        }
    }

    pub fn get(&self, handle: u32) -> BridgeResult<&Entry> {
        match self.slots.get(&handle) {
            Some(Some(entry)) => Ok(entry),
            Some(None) => Err(BridgeError::HandleDestroyed(handle)),
            None => Err(BridgeError::UnknownHandle(handle)),
        }
    }

    pub fn get_mut(&mut self, handle: u32) -> BridgeResult<&mut Entry> {
        match self.slots.get_mut(&handle) {
            Some(Some(entry)) => Ok(entry),
            Some(None) => Err(BridgeError::HandleDestroyed(handle)),
            None => Err(BridgeError::UnknownHandle(handle)),
        }
    }

    pub fn is_active(&self, handle: u32) -> bool {
        matches!(self.slots.get(&handle), Some(Some(_)))
    }

    /// Active handles in ascending order.
    pub fn active_handles(&self) -> Vec<u32> {
        let mut handles: Vec<u32> = self
            .slots
            .iter()
            .filter_map(|(handle, slot)| slot.as_ref().map(|_| *handle))
            .collect();
        handles.sort_unstable();
        handles
    }
}

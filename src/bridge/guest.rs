// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The numeric ABI every guest exposes.
//!
//! [`Bridge`](super::Bridge) only speaks to a guest through this trait, which
//! mirrors the artifact's exports one to one. Implemented by
//! [`WasmGuest`](super::WasmGuest) for compiled artifacts and by
//! [`NativeGuest`](crate::native::NativeGuest) for the in-process reference parser.

use super::host::HostState;
use crate::errors::BridgeResult;

/// A getter result or setter argument before width conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue {
    I32(u32),
    I64(u64),
}

impl RawValue {
    /// Truncating view as a 32-bit unsigned value.
    pub fn as_u32(self) -> u32 {
        match self {
            RawValue::I32(value) => value,
            RawValue::I64(value) => value as u32,
        }
    }

    /// Widening view as a 64-bit unsigned value.
    pub fn as_u64(self) -> u64 {
        match self {
            RawValue::I32(value) => value as u64,
            RawValue::I64(value) => value,
        }
    }

    pub fn as_bool(self) -> bool {
        self.as_u64() != 0
    }
}

/// Optional `(handle) -> ()` style exports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Takes a second argument: non-zero keeps the position counters.
    Reset,
    Finish,
    Pause,
    Resume,
    Clear,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Reset,
        Action::Finish,
        Action::Pause,
        Action::Resume,
        Action::Clear,
    ];

    pub fn export_name(self) -> &'static str {
        match self {
            Action::Reset => "reset",
            Action::Finish => "finish",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::Clear => "clear",
        }
    }

    pub fn from_export(name: &str) -> Option<Action> {
        Self::ALL.into_iter().find(|action| action.export_name() == name)
    }

    /// Number of i32 parameters the export takes.
    pub fn arity(self) -> usize {
        match self {
            Action::Reset => 2,
            _ => 1,
        }
    }
}

pub trait Guest {
    fn create(&mut self) -> BridgeResult<u32>;
    fn destroy(&mut self, handle: u32) -> BridgeResult<()>;

    /// Parses `len` bytes at `ptr`; returns how many were consumed.
    fn parse(&mut self, handle: u32, ptr: u32, len: u32) -> BridgeResult<u32>;

    fn alloc(&mut self, len: u32) -> BridgeResult<u32>;
    fn dealloc(&mut self, ptr: u32, len: u32) -> BridgeResult<()>;

    /// Moves the handle to the error state with `code` and the description at `ptr`.
    fn fail(&mut self, handle: u32, code: u32, ptr: u32, len: u32) -> BridgeResult<()>;

    fn values_ptr(&mut self, handle: u32) -> BridgeResult<u32>;
    fn offsets_ptr(&mut self, handle: u32) -> BridgeResult<u32>;
    fn error_description_raw(&mut self, handle: u32) -> BridgeResult<u64>;

    /// Grows the offsets region to `capacity` records and returns its new
    /// address, or `None` when the guest has no such export.
    fn grow_offsets(&mut self, handle: u32, capacity: u32) -> BridgeResult<Option<u32>>;

    fn has_action(&self, action: Action) -> bool;
    fn call_action(&mut self, action: Action, handle: u32, argument: u32) -> BridgeResult<()>;

    fn get(&mut self, export: &str, handle: u32) -> BridgeResult<RawValue>;
    fn set(&mut self, export: &str, handle: u32, value: RawValue) -> BridgeResult<()>;

    fn memory(&self) -> &[u8];
    fn memory_mut(&mut self) -> &mut [u8];

    /// Changes whenever the backing store may have moved.
    fn memory_generation(&self) -> u64;

    fn host(&self) -> &HostState;
    fn host_mut(&mut self) -> &mut HostState;

    /// Memory and host state borrowed together, for dispatching outside guest calls.
    fn split(&mut self) -> (&[u8], &mut HostState);
}

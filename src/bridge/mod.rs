// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runtime Bridge
//!
//! The protocol a generated binding module drives at run time:
//!
//! - handle lifecycle with a host-side [`HandleRegistry`] arena
//! - the fixed [`Values`] region read in one pass
//! - the Offsets region drained once per guest call in batched mode
//! - a growable per-handle input buffer
//! - callback dispatch with fault containment (see [`host`])
//!
//! ## Memory epoch
//! Every call that can allocate inside the guest is followed by
//! [`Bridge::refresh_epoch`]. Cached views carry the epoch they were taken
//! under and are reacquired from the guest when they fall behind, for every
//! handle, not only the one that triggered the growth.
//!
//! ## Carried input
//! A guest that meets an incomplete token stops before it and reports fewer
//! bytes consumed. The bridge keeps the unconsumed tail and prepends it to the
//! next `parse` call, so spans never straddle two calls.

pub mod events;
pub mod guest;
pub mod host;
pub mod imports;
pub mod layout;
pub mod memory;
pub mod registry;
mod wasm_guest;


use base64::Engine as _;

pub use events::{Event, EVENT_COUNT};
pub use guest::{Action, Guest, RawValue};
pub use host::{
    Callback, CallbackContext, CallbackFault, CallbackResult, HostState, LogSink, Trampoline,
    CALLBACK_CONTINUE, CALLBACK_FAULT,
};
pub use imports::{classify_import, ImportBinding, ImportRole};
pub use layout::{OffsetRecord, Values};
pub use memory::{CachedView, InputBuffer, MemoryEpoch};
pub use registry::HandleRegistry;
pub use wasm_guest::{create_engine, read_artifact, WasmGuest};

use crate::config::consts::{DEFAULT_CALLBACK_ERROR_CODE, DEFAULT_INPUT_CAPACITY};
use crate::errors::{BridgeError, BridgeResult};
use crate::observability::messages::bridge::{
    BatchDispatchFaulted, EpochAdvanced, HandleCreated, HandleReleased, InputBufferGrown,
    OffsetsRegionGrown, ParseRejected, ParseStarted,
};
use crate::observability::messages::StructuredLog;
use layout::{
    decode_records, offsets_region_size, read_offsets_header, write_u32, FLAG_OFFSETS_FULL,
    OFFSETS_COUNT, OFFSETS_HEADER_SIZE, VALUES_SIZE,
};
use memory::{read_bytes, split_raw_pair};

/// How parse events reach host callbacks. A profile uses exactly one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DispatchMode {
    /// The guest calls the trampoline once per event.
    PerEvent,
    /// The guest records spans; the host drains them after each call.
    Batched,
}

impl DispatchMode {
    pub fn from_batch_flag(batch_offsets: bool) -> Self {
        if batch_offsets {
            DispatchMode::Batched
        } else {
            DispatchMode::PerEvent
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    pub dispatch: DispatchMode,
    /// Guest error code meaning "a host callback failed".
    pub callback_error_code: u32,
    /// Initial input buffer size per handle.
    pub input_capacity: u32,
}

impl BridgeOptions {
    pub fn new(dispatch: DispatchMode, callback_error_code: u32) -> Self {
        Self {
            dispatch,
            callback_error_code,
            input_capacity: DEFAULT_INPUT_CAPACITY,
        }
    }

    pub fn with_input_capacity(mut self, input_capacity: u32) -> Self {
        self.input_capacity = input_capacity.max(1);
        self
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::new(DispatchMode::PerEvent, DEFAULT_CALLBACK_ERROR_CODE)
    }
}

/// Decodes a base64 guest payload inlined by the embedding variant.
pub fn decode_payload(encoded: &str) -> BridgeResult<Vec<u8>> {
    Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?)
}

pub struct Bridge<G: Guest> {
    guest: G,
    options: BridgeOptions,
}

impl<G: Guest> Bridge<G> {
    pub fn new(mut guest: G, options: BridgeOptions) -> Self {
        let generation = guest.memory_generation();
        guest.host_mut().epoch = MemoryEpoch::new(generation);
        Self { guest, options }
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    pub fn guest(&self) -> &G {
        &self.guest
    }

    pub fn guest_mut(&mut self) -> &mut G {
        &mut self.guest
    }

    pub fn epoch(&self) -> u64 {
        self.guest.host().epoch.current()
    }

    /// Routes guest log lines to `tracing::debug!`.
    pub fn enable_tracing_sink(&mut self) {
        self.set_log_sink(LogSink::Tracing);
    }

    pub fn set_log_sink(&mut self, sink: LogSink) {
        self.guest.host_mut().set_log_sink(sink);
    }

    pub fn active_handles(&self) -> Vec<u32> {
        self.guest.host().registry.active_handles()
    }

    /// Advances the epoch if the guest memory moved since the last check.
    pub fn refresh_epoch(&mut self) -> u64 {
        let generation = self.guest.memory_generation();
        let epoch = &mut self.guest.host_mut().epoch;
        if epoch.observe(generation) {
            tracing::debug!(
                "{}",
                EpochAdvanced {
                    epoch: epoch.current(),
                    reason: "guest memory grew",
                }
            );
        }
        epoch.current()
    }

    fn invalidate_views(&mut self, reason: &str) {
        let epoch = self.guest.host_mut().epoch.advance();
        tracing::debug!("{}", EpochAdvanced { epoch, reason });
        self.refresh_epoch();
    }

    pub fn create(&mut self) -> BridgeResult<u32> {
        let handle = self.guest.create()?;
        self.refresh_epoch();
        self.guest.host_mut().registry.acquire(handle);

        let capacity = self.options.input_capacity.max(1);
        let ptr = self.allocate(capacity)?;
        self.guest.host_mut().registry.get_mut(handle)?.input = Some(InputBuffer { ptr, capacity });
        self.views(handle)?;

        HandleCreated {
            handle,
            input_capacity: capacity,
        }
        .log();

        Ok(handle)
    }

    /// Drops the host entry first, then releases guest state.
    pub fn destroy(&mut self, handle: u32) -> BridgeResult<()> {
        let entry = self.guest.host_mut().registry.release(handle)?;
        if let Some(input) = entry.input {
            self.guest.dealloc(input.ptr, input.capacity)?;
        }
        self.guest.destroy(handle)?;
        self.refresh_epoch();

        tracing::debug!("{}", HandleReleased { handle });
        Ok(())
    }

    /// Feeds `data` to the parser.
    ///
    /// Returns the number of bytes of `data` accepted. Bytes of an incomplete
    /// trailing token are accepted and kept for the next call. When the guest
    /// errored, paused or entered the tunnel state, only the bytes it
    /// processed count and the rest stay with the caller.
    pub fn parse(&mut self, handle: u32, data: &[u8]) -> BridgeResult<u32> {
        let values = self.values(handle)?;
        if values.error_code != 0 {
            tracing::debug!(
                "{}",
                ParseRejected {
                    handle,
                    code: values.error_code,
                }
            );
            return Err(BridgeError::HandleErrored {
                handle,
                code: values.error_code,
            });
        }

        let mut input = std::mem::take(&mut self.guest.host_mut().registry.get_mut(handle)?.carry);
        let carried = input.len();
        input.extend_from_slice(data);

        let start_msg = ParseStarted {
            handle,
            input_size: input.len(),
            carried,
        };
        let span = start_msg.span("bridge_parse");
        let _guard = span.enter();
        start_msg.log();
        let total = u32::try_from(input.len()).map_err(|_| {
            BridgeError::Layout(format!("input of {} bytes exceeds 32-bit offsets", input.len()))
        })?;

        let buffer = self.ensure_input_capacity(handle, input.len())?;
        self.write_memory(buffer.ptr, &input)?;
        self.guest.host_mut().begin_input(input);

        let outcome = self.run_parse(handle, buffer.ptr, total);
        let input = self.guest.host_mut().end_input();
        let consumed = outcome? as usize;

        let values = self.values(handle)?;
        let entry = self.guest.host_mut().registry.get_mut(handle)?;

        if values.error_code != 0 {
            entry.carry.clear();
            return Ok(consumed.saturating_sub(carried) as u32);
        }

        if values.is_halted() {
            // Only bytes accepted by an earlier call stay carried.
            entry.carry = input.get(consumed..carried).unwrap_or_default().to_vec();
            return Ok(consumed.saturating_sub(carried) as u32);
        }

        entry.carry = input.get(consumed..).unwrap_or_default().to_vec();
        Ok(data.len() as u32)
    }

    /// Calls the guest until the input is done, re-entering when the offsets
    /// region filled up. Returns bytes consumed from the start of the buffer.
    fn run_parse(&mut self, handle: u32, ptr: u32, total: u32) -> BridgeResult<u32> {
        let mut offset = 0u32;

        loop {
            self.guest.host_mut().advance_input_base(offset as usize);
            self.views(handle)?;

            let consumed = self.guest.parse(handle, ptr + offset, total - offset)?;
            self.refresh_epoch();
            let base = offset;
            offset = (offset + consumed).min(total);

            if self.options.dispatch == DispatchMode::Batched {
                if let Some(record) = self.drain_and_dispatch(handle)? {
                    self.fail_after_fault(handle, record)?;
                    return Ok((base + record.start).min(total));
                }
            }

            let values = self.values(handle)?;
            if values.error_code != 0 || !values.has_flag(FLAG_OFFSETS_FULL) || offset >= total {
                return Ok(offset);
            }

            self.grow_offsets(handle)?;
        }
    }

    /// Current views for `handle`, reacquired if the epoch moved.
    fn views(&mut self, handle: u32) -> BridgeResult<(CachedView, CachedView)> {
        let epoch = self.refresh_epoch();
        let entry = self.guest.host().registry.get(handle)?;
        if let (Some(values), Some(offsets)) = (entry.values, entry.offsets) {
            if values.is_current(epoch) && offsets.is_current(epoch) {
                return Ok((values, offsets));
            }
        }

        let values_ptr = self.guest.values_ptr(handle)?;
        let offsets_ptr = self.guest.offsets_ptr(handle)?;
        let header = read_bytes(self.guest.memory(), offsets_ptr, OFFSETS_HEADER_SIZE as u32)?;
        let (_, capacity) = read_offsets_header(header)?;

        let values = CachedView::new(values_ptr, VALUES_SIZE as u32, epoch);
        let offsets = CachedView::new(offsets_ptr, offsets_region_size(capacity) as u32, epoch);

        let entry = self.guest.host_mut().registry.get_mut(handle)?;
        entry.values = Some(values);
        entry.offsets = Some(offsets);
        Ok((values, offsets))
    }

    /// Decodes the whole Values region of `handle`.
    pub fn values(&mut self, handle: u32) -> BridgeResult<Values> {
        let (view, _) = self.views(handle)?;
        Values::decode(view.slice(self.guest.memory())?)
    }

    fn read_records(&mut self, handle: u32) -> BridgeResult<Vec<OffsetRecord>> {
        let (_, view) = self.views(handle)?;
        let region = view.slice(self.guest.memory())?;
        let (count, _) = read_offsets_header(region)?;
        decode_records(region, count)
    }

    fn reset_record_count(&mut self, handle: u32) -> BridgeResult<()> {
        let (_, view) = self.views(handle)?;
        write_u32(view.slice_mut(self.guest.memory_mut())?, OFFSETS_COUNT, 0)
    }

    /// Takes every pending offset record of `handle` and resets the counter.
    pub fn drain(&mut self, handle: u32) -> BridgeResult<Vec<OffsetRecord>> {
        let records = self.read_records(handle)?;
        self.reset_record_count(handle)?;
        Ok(records)
    }

    /// Read, iterate, dispatch, reset. Returns the record whose callback faulted.
    fn drain_and_dispatch(&mut self, handle: u32) -> BridgeResult<Option<OffsetRecord>> {
        let records = self.read_records(handle)?;
        let mut faulted = None;

        for record in records {
            let (memory, host) = self.guest.split();
            let answer = host.run_callback(memory, handle, record.kind, record.start, record.length);
            if answer != CALLBACK_CONTINUE {
                faulted = Some(record);
                break;
            }
        }

        self.reset_record_count(handle)?;
        Ok(faulted)
    }

    fn fail_after_fault(&mut self, handle: u32, record: OffsetRecord) -> BridgeResult<()> {
        let name = Event::from_id(record.kind)
            .map(Event::name)
            .unwrap_or("unknown callback");

        tracing::warn!(
            "{}",
            BatchDispatchFaulted {
                handle,
                callback: name,
                at: record.start,
            }
        );

        let description = format!("Callback for {} has thrown an error.", name);
        self.fail(handle, self.options.callback_error_code, &description)
    }

    fn grow_offsets(&mut self, handle: u32) -> BridgeResult<()> {
        let (_, view) = self.views(handle)?;
        let (_, capacity) = read_offsets_header(view.slice(self.guest.memory())?)?;
        let grown = capacity.max(1) * 2;

        match self.guest.grow_offsets(handle, grown)? {
            None => Err(BridgeError::MissingExport("grow_offsets".to_string())),
            Some(0) => Err(BridgeError::AllocationFailed(offsets_region_size(grown) as u32)),
            Some(_) => {
                tracing::debug!(
                    "{}",
                    OffsetsRegionGrown {
                        handle,
                        from: capacity,
                        to: grown,
                    }
                );
                self.invalidate_views("offsets region grown");
                Ok(())
            }
        }
    }

    fn ensure_input_capacity(&mut self, handle: u32, needed: usize) -> BridgeResult<InputBuffer> {
        let current = self
            .guest
            .host()
            .registry
            .get(handle)?
            .input
            .ok_or_else(|| BridgeError::Layout(format!("handle {} has no input buffer", handle)))?;

        if needed <= current.capacity as usize {
            return Ok(current);
        }

        let capacity = current.grown_capacity(needed);
        let ptr = self.allocate(capacity)?;
        self.guest.dealloc(current.ptr, current.capacity)?;

        let grown = InputBuffer { ptr, capacity };
        self.guest.host_mut().registry.get_mut(handle)?.input = Some(grown);

        tracing::debug!(
            "{}",
            InputBufferGrown {
                handle,
                from: current.capacity,
                to: capacity,
            }
        );
        self.invalidate_views("input buffer reallocated");

        Ok(grown)
    }

    fn allocate(&mut self, len: u32) -> BridgeResult<u32> {
        let ptr = self.guest.alloc(len)?;
        self.refresh_epoch();
        if ptr == 0 {
            return Err(BridgeError::AllocationFailed(len));
        }
        Ok(ptr)
    }

    fn write_memory(&mut self, ptr: u32, bytes: &[u8]) -> BridgeResult<()> {
        let memory = self.guest.memory_mut();
        let memory_len = memory.len();
        let start = ptr as usize;
        let end = start + bytes.len();
        memory
            .get_mut(start..end)
            .ok_or_else(|| {
                BridgeError::OutOfBounds(format!(
                    "write {}..{} outside guest memory of {} bytes",
                    start, end, memory_len
                ))
            })?
            .copy_from_slice(bytes);
        Ok(())
    }

    /// Allocates `len` bytes in guest memory.
    pub fn alloc(&mut self, len: u32) -> BridgeResult<u32> {
        self.allocate(len)
    }

    pub fn dealloc(&mut self, ptr: u32, len: u32) -> BridgeResult<()> {
        self.guest.dealloc(ptr, len)?;
        self.refresh_epoch();
        Ok(())
    }

    /// Puts `handle` in the error state with `code` and `description`.
    pub fn fail(&mut self, handle: u32, code: u32, description: &str) -> BridgeResult<()> {
        self.guest.host().registry.get(handle)?;

        let bytes = description.as_bytes();
        let len = bytes.len() as u32;
        let size = len.max(1);
        let ptr = self.allocate(size)?;
        self.write_memory(ptr, bytes)?;

        let outcome = self.guest.fail(handle, code, ptr, len);
        self.guest.dealloc(ptr, size)?;
        self.refresh_epoch();
        outcome
    }

    pub fn get_error_description(&mut self, handle: u32) -> BridgeResult<String> {
        self.guest.host().registry.get(handle)?;
        let (ptr, len) = split_raw_pair(self.guest.error_description_raw(handle)?);
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = read_bytes(self.guest.memory(), ptr, len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Retrieves the pending callback fault of `handle`, once.
    pub fn take_callback_error(&mut self, handle: u32) -> BridgeResult<Option<CallbackFault>> {
        Ok(self.guest.host_mut().registry.get_mut(handle)?.take_fault())
    }

    pub fn set_callback(&mut self, handle: u32, slot: u32, callback: Callback) -> BridgeResult<()> {
        let slot = Self::check_slot(slot)?;
        self.guest
            .host_mut()
            .registry
            .get_mut(handle)?
            .set_callback(slot, callback);
        Ok(())
    }

    /// Registers `callback` for `event` on `handle`.
    pub fn on<F>(&mut self, handle: u32, event: Event, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.set_callback(handle, event.id(), Box::new(callback))
    }

    pub fn clear_callback(&mut self, handle: u32, slot: u32) -> BridgeResult<()> {
        let slot = Self::check_slot(slot)?;
        self.guest
            .host_mut()
            .registry
            .get_mut(handle)?
            .clear_callback(slot);
        Ok(())
    }

    fn check_slot(slot: u32) -> BridgeResult<usize> {
        if (slot as usize) < EVENT_COUNT {
            Ok(slot as usize)
        } else {
            Err(BridgeError::Layout(format!(
                "callback slot {} is outside the event catalog of {} events",
                slot, EVENT_COUNT
            )))
        }
    }

    /// Clears the error state, drops carried input and any pending fault.
    pub fn reset(&mut self, handle: u32, keep_position: bool) -> BridgeResult<()> {
        let entry = self.guest.host_mut().registry.get_mut(handle)?;
        entry.carry.clear();
        entry.take_fault();
        self.run_action(handle, Action::Reset, keep_position as u32)
    }

    /// Signals end of input.
    pub fn finish(&mut self, handle: u32) -> BridgeResult<()> {
        self.run_action(handle, Action::Finish, 0)
    }

    pub fn pause(&mut self, handle: u32) -> BridgeResult<()> {
        self.run_action(handle, Action::Pause, 0)
    }

    pub fn resume(&mut self, handle: u32) -> BridgeResult<()> {
        self.run_action(handle, Action::Resume, 0)
    }

    /// Clears message values, keeping position and state.
    pub fn clear(&mut self, handle: u32) -> BridgeResult<()> {
        self.run_action(handle, Action::Clear, 0)
    }

    fn run_action(&mut self, handle: u32, action: Action, argument: u32) -> BridgeResult<()> {
        if !self.guest.has_action(action) {
            return Err(BridgeError::MissingExport(action.export_name().to_string()));
        }
        self.views(handle)?;

        self.guest.host_mut().begin_input(Vec::new());
        let outcome = self.guest.call_action(action, handle, argument);
        self.guest.host_mut().end_input();
        self.refresh_epoch();
        outcome?;

        if self.options.dispatch == DispatchMode::Batched {
            if let Some(record) = self.drain_and_dispatch(handle)? {
                self.fail_after_fault(handle, record)?;
            }
        }
        Ok(())
    }

    pub fn get(&mut self, handle: u32, export: &str) -> BridgeResult<RawValue> {
        self.guest.host().registry.get(handle)?;
        self.guest.get(export, handle)
    }

    pub fn get_u32(&mut self, handle: u32, export: &str) -> BridgeResult<u32> {
        Ok(self.get(handle, export)?.as_u32())
    }

    pub fn get_u64(&mut self, handle: u32, export: &str) -> BridgeResult<u64> {
        Ok(self.get(handle, export)?.as_u64())
    }

    pub fn get_bool(&mut self, handle: u32, export: &str) -> BridgeResult<bool> {
        Ok(self.get(handle, export)?.as_bool())
    }

    pub fn set(&mut self, handle: u32, export: &str, value: RawValue) -> BridgeResult<()> {
        self.guest.host().registry.get(handle)?;
        self.guest.set(export, handle, value)
    }
}

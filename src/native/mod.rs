// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reference HTTP/1.x guest, run in-process.
//!
//! [`NativeGuest`] implements the same numeric ABI a compiled parser
//! exports, over a simulated linear memory. The bridge cannot tell the two
//! apart, which makes this the guest the runtime tests drive, and the
//! source of the bundled `manifests/http.json`.

pub mod constants;
pub mod machine;
pub mod memory;

use std::collections::HashMap;

pub use constants::build_manifest;
pub use machine::{EventSink, Machine, State, MAX_EVENTS_PER_STEP, STATES};
pub use memory::LinearMemory;

use crate::bridge::guest::{Action, Guest, RawValue};
use crate::bridge::host::{HostState, Trampoline, CALLBACK_CONTINUE};
use crate::bridge::layout::{
    decode_records, offsets_region_size, push_record, read_offsets_header, write_u32, OffsetRecord,
    Values, FLAG_HAS_CHUNKED_TRANSFER_ENCODING, FLAG_HAS_CONTENT_LENGTH, FLAG_HAS_TRAILERS,
    FLAG_HAS_UPGRADE, FLAG_IS_CONNECT, FLAG_PAUSED, FLAG_SKIP_BODY, OFFSETS_CAPACITY,
    OFFSETS_HEADER_SIZE, VALUES_SIZE,
};
use crate::bridge::{DispatchMode, Event};
use crate::config::consts::DEFAULT_OFFSETS_CAPACITY;
use crate::errors::{BridgeError, BridgeResult};

/// Getter exports, in the order a compiled guest lists them.
pub const GETTERS: [&str; 22] = [
    "get_position",
    "get_state",
    "get_error_code",
    "get_message_type",
    "get_method",
    "get_status",
    "get_version_major",
    "get_version_minor",
    "get_connection",
    "get_mode",
    "get_content_length",
    "get_chunk_size",
    "get_remaining_content_length",
    "get_remaining_chunk_size",
    "get_parsed",
    "is_paused",
    "is_connect",
    "get_skip_body",
    "has_content_length",
    "has_chunked_transfer_encoding",
    "has_upgrade",
    "has_trailers",
];

pub const SETTERS: [&str; 3] = ["set_mode", "set_is_connect", "set_skip_body"];

struct Slot {
    machine: Machine,
    values_ptr: u32,
    offsets_ptr: u32,
    offsets_capacity: u32,
    description: String,
    description_ptr: u32,
}

pub struct NativeGuest {
    memory: LinearMemory,
    parsers: HashMap<u32, Slot>,
    free_handles: Vec<u32>,
    next_handle: u32,
    host: HostState,
    dispatch: DispatchMode,
    offsets_capacity: u32,
    debug: bool,
}

impl NativeGuest {
    pub fn new(dispatch: DispatchMode) -> Self {
        Self {
            memory: LinearMemory::new(),
            parsers: HashMap::new(),
            free_handles: Vec::new(),
            next_handle: 0,
            host: HostState::new(),
            dispatch,
            offsets_capacity: DEFAULT_OFFSETS_CAPACITY,
            debug: false,
        }
    }

    /// Initial Offsets Region capacity for handles created from now on.
    pub fn with_offsets_capacity(mut self, capacity: u32) -> Self {
        self.offsets_capacity = capacity.max(1);
        self
    }

    /// Sends lifecycle lines through the logger import.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn dispatch(&self) -> DispatchMode {
        self.dispatch
    }

    fn slot(&self, handle: u32) -> BridgeResult<&Slot> {
        self.parsers.get(&handle).ok_or(BridgeError::UnknownHandle(handle))
    }

    fn slot_mut(&mut self, handle: u32) -> BridgeResult<&mut Slot> {
        self.parsers.get_mut(&handle).ok_or(BridgeError::UnknownHandle(handle))
    }

    fn allocate(&mut self, len: u32) -> BridgeResult<u32> {
        match self.memory.alloc(len) {
            0 => Err(BridgeError::AllocationFailed(len)),
            ptr => Ok(ptr),
        }
    }

    fn log(&mut self, message: &str) {
        if !self.debug {
            return;
        }
        let len = message.len() as u32;
        let ptr = self.memory.alloc(len);
        if ptr == 0 || self.memory.write(ptr, message.as_bytes()).is_err() {
            return;
        }
        self.host.log(self.memory.bytes(), ((ptr as u64) << 32) | len as u64);
        self.memory.dealloc(ptr, len);
    }

    /// Publishes the machine's Values and error description into memory.
    fn sync(&mut self, handle: u32) -> BridgeResult<()> {
        let slot = self.slot(handle)?;
        let values = slot.machine.values();
        let values_ptr = slot.values_ptr;
        let stale = slot.description != slot.machine.description();

        values.encode(self.memory.slice_mut(values_ptr, VALUES_SIZE as u32)?)?;
        if !stale {
            return Ok(());
        }

        let slot = self.slot(handle)?;
        let description = slot.machine.description().to_string();
        let (old_ptr, old_len) = (slot.description_ptr, slot.description.len() as u32);
        if old_ptr != 0 {
            self.memory.dealloc(old_ptr, old_len);
        }

        let ptr = if description.is_empty() {
            0
        } else {
            let ptr = self.allocate(description.len() as u32)?;
            self.memory.write(ptr, description.as_bytes())?;
            ptr
        };

        let slot = self.slot_mut(handle)?;
        slot.description = description;
        slot.description_ptr = ptr;
        Ok(())
    }

    /// Runs `operation` on the machine of `handle` with a sink for the
    /// current dispatch mode, then publishes the result.
    fn drive<F, R>(&mut self, handle: u32, operation: F) -> BridgeResult<R>
    where
        F: FnOnce(&mut Machine, &mut dyn EventSink) -> R,
    {
        let Self {
            memory,
            parsers,
            host,
            dispatch,
            ..
        } = self;
        let slot = parsers.get_mut(&handle).ok_or(BridgeError::UnknownHandle(handle))?;

        let mut sink = Dispatcher {
            memory,
            host,
            handle,
            values_ptr: slot.values_ptr,
            offsets_ptr: slot.offsets_ptr,
            dispatch: *dispatch,
        };
        let result = operation(&mut slot.machine, &mut sink);

        self.sync(handle)?;
        Ok(result)
    }
}

/// Delivers machine events either straight to the trampoline or into the
/// Offsets Region.
struct Dispatcher<'a> {
    memory: &'a mut LinearMemory,
    host: &'a mut HostState,
    handle: u32,
    values_ptr: u32,
    offsets_ptr: u32,
    dispatch: DispatchMode,
}

impl Dispatcher<'_> {
    fn offsets_header(&self) -> Option<(u32, u32)> {
        let header = self.memory.read(self.offsets_ptr, OFFSETS_HEADER_SIZE as u32).ok()?;
        read_offsets_header(header).ok()
    }
}

impl EventSink for Dispatcher<'_> {
    fn emit(&mut self, values: &Values, event: Event, at: u32, len: u32) -> bool {
        match self.dispatch {
            DispatchMode::PerEvent => {
                // Callbacks read Values from memory, so publish them first.
                let published = self
                    .memory
                    .slice_mut(self.values_ptr, VALUES_SIZE as u32)
                    .and_then(|region| values.encode(region));
                if published.is_err() {
                    return false;
                }
                self.host
                    .run_callback(self.memory.bytes(), self.handle, event.id(), at, len)
                    == CALLBACK_CONTINUE
            }
            DispatchMode::Batched => {
                let Some((_, capacity)) = self.offsets_header() else {
                    return false;
                };
                let record = OffsetRecord {
                    kind: event.id(),
                    start: at,
                    length: len,
                };
                self.memory
                    .slice_mut(self.offsets_ptr, offsets_region_size(capacity) as u32)
                    .and_then(|region| push_record(region, record))
                    .is_ok()
            }
        }
    }

    fn has_room(&self, events: u32) -> bool {
        match self.dispatch {
            DispatchMode::PerEvent => true,
            DispatchMode::Batched => self
                .offsets_header()
                .map_or(false, |(count, capacity)| capacity - count >= events),
        }
    }
}

impl Guest for NativeGuest {
    fn create(&mut self) -> BridgeResult<u32> {
        let handle = match self.free_handles.pop() {
            Some(handle) => handle,
            None => {
                let handle = self.next_handle;
                self.next_handle += 1;
                handle
            }
        };

        let capacity = self.offsets_capacity;
        let values_ptr = self.allocate(VALUES_SIZE as u32)?;
        let offsets_ptr = self.allocate(offsets_region_size(capacity) as u32)?;
        write_u32(
            self.memory.slice_mut(offsets_ptr, OFFSETS_HEADER_SIZE as u32)?,
            OFFSETS_CAPACITY,
            capacity,
        )?;

        self.parsers.insert(
            handle,
            Slot {
                machine: Machine::new(),
                values_ptr,
                offsets_ptr,
                offsets_capacity: capacity,
                description: String::new(),
                description_ptr: 0,
            },
        );
        self.sync(handle)?;
        self.log(&format!("created parser {}", handle));
        Ok(handle)
    }

    fn destroy(&mut self, handle: u32) -> BridgeResult<()> {
        let slot = self.parsers.remove(&handle).ok_or(BridgeError::UnknownHandle(handle))?;
        self.memory.dealloc(slot.values_ptr, VALUES_SIZE as u32);
        self.memory
            .dealloc(slot.offsets_ptr, offsets_region_size(slot.offsets_capacity) as u32);
        if slot.description_ptr != 0 {
            self.memory.dealloc(slot.description_ptr, slot.description.len() as u32);
        }

        self.free_handles.push(handle);
        self.log(&format!("destroyed parser {}", handle));
        Ok(())
    }

    fn parse(&mut self, handle: u32, ptr: u32, len: u32) -> BridgeResult<u32> {
        let input = self.memory.read(ptr, len)?.to_vec();
        let consumed = self.drive(handle, |machine, sink| machine.parse(&input, sink))?;
        Ok(consumed as u32)
    }

    fn alloc(&mut self, len: u32) -> BridgeResult<u32> {
        Ok(self.memory.alloc(len))
    }

    fn dealloc(&mut self, ptr: u32, len: u32) -> BridgeResult<()> {
        self.memory.dealloc(ptr, len);
        Ok(())
    }

    fn fail(&mut self, handle: u32, code: u32, ptr: u32, len: u32) -> BridgeResult<()> {
        let description = String::from_utf8_lossy(self.memory.read(ptr, len)?).into_owned();
        self.slot_mut(handle)?.machine.fail_with(code, description);
        self.sync(handle)
    }

    fn values_ptr(&mut self, handle: u32) -> BridgeResult<u32> {
        Ok(self.slot(handle)?.values_ptr)
    }

    fn offsets_ptr(&mut self, handle: u32) -> BridgeResult<u32> {
        Ok(self.slot(handle)?.offsets_ptr)
    }

    fn error_description_raw(&mut self, handle: u32) -> BridgeResult<u64> {
        let slot = self.slot(handle)?;
        Ok(((slot.description_ptr as u64) << 32) | slot.description.len() as u64)
    }

    fn grow_offsets(&mut self, handle: u32, capacity: u32) -> BridgeResult<Option<u32>> {
        let slot = self.slot(handle)?;
        let (old_ptr, old_capacity) = (slot.offsets_ptr, slot.offsets_capacity);
        if capacity <= old_capacity {
            return Ok(Some(old_ptr));
        }

        let old_size = offsets_region_size(old_capacity) as u32;
        let region = self.memory.read(old_ptr, old_size)?.to_vec();
        let (count, _) = read_offsets_header(&region)?;
        let records = decode_records(&region, count)?;

        let ptr = self.memory.alloc(offsets_region_size(capacity) as u32);
        if ptr == 0 {
            return Ok(Some(0));
        }

        let grown = self.memory.slice_mut(ptr, offsets_region_size(capacity) as u32)?;
        write_u32(grown, OFFSETS_CAPACITY, capacity)?;
        for record in records {
            push_record(grown, record)?;
        }
        self.memory.dealloc(old_ptr, old_size);

        let slot = self.slot_mut(handle)?;
        slot.offsets_ptr = ptr;
        slot.offsets_capacity = capacity;
        Ok(Some(ptr))
    }

    fn has_action(&self, _action: Action) -> bool {
        true
    }

    fn call_action(&mut self, action: Action, handle: u32, argument: u32) -> BridgeResult<()> {
        self.drive(handle, |machine, sink| match action {
            Action::Reset => machine.reset(argument != 0, sink),
            Action::Finish => machine.finish(sink),
            Action::Pause => machine.pause(),
            Action::Resume => machine.resume(),
            Action::Clear => machine.clear(),
        })
    }

    fn get(&mut self, export: &str, handle: u32) -> BridgeResult<RawValue> {
        let values = self.slot(handle)?.machine.values();
        let flag = |flag: u32| RawValue::I32(values.has_flag(flag) as u32);

        let value = match export {
            "get_position" => RawValue::I32(values.position),
            "get_state" => RawValue::I32(values.state),
            "get_error_code" => RawValue::I32(values.error_code),
            "get_message_type" => RawValue::I32(values.message_type),
            "get_method" => RawValue::I32(values.method),
            "get_status" => RawValue::I32(values.status),
            "get_version_major" => RawValue::I32(values.version_major),
            "get_version_minor" => RawValue::I32(values.version_minor),
            "get_connection" => RawValue::I32(values.connection),
            "get_mode" => RawValue::I32(values.mode),
            "get_content_length" => RawValue::I64(values.content_length),
            "get_chunk_size" => RawValue::I64(values.chunk_size),
            "get_remaining_content_length" => RawValue::I64(values.remaining_content_length),
            "get_remaining_chunk_size" => RawValue::I64(values.remaining_chunk_size),
            "get_parsed" => RawValue::I64(values.parsed),
            "is_paused" => flag(FLAG_PAUSED),
            "is_connect" => flag(FLAG_IS_CONNECT),
            "get_skip_body" => flag(FLAG_SKIP_BODY),
            "has_content_length" => flag(FLAG_HAS_CONTENT_LENGTH),
            "has_chunked_transfer_encoding" => flag(FLAG_HAS_CHUNKED_TRANSFER_ENCODING),
            "has_upgrade" => flag(FLAG_HAS_UPGRADE),
            "has_trailers" => flag(FLAG_HAS_TRAILERS),
            _ => return Err(BridgeError::MissingExport(export.to_string())),
        };
        Ok(value)
    }

    fn set(&mut self, export: &str, handle: u32, value: RawValue) -> BridgeResult<()> {
        let machine = &mut self.slot_mut(handle)?.machine;
        match export {
            "set_mode" => machine.set_mode(value.as_u32()),
            "set_is_connect" => machine.set_flag(FLAG_IS_CONNECT, value.as_bool()),
            "set_skip_body" => machine.set_flag(FLAG_SKIP_BODY, value.as_bool()),
            _ => return Err(BridgeError::MissingExport(export.to_string())),
        }
        self.sync(handle)
    }

    fn memory(&self) -> &[u8] {
        self.memory.bytes()
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        self.memory.bytes_mut()
    }

    fn memory_generation(&self) -> u64 {
        self.memory.generation()
    }

    fn host(&self) -> &HostState {
        &self.host
    }

    fn host_mut(&mut self) -> &mut HostState {
        &mut self.host
    }

    fn split(&mut self) -> (&[u8], &mut HostState) {
        (self.memory.bytes(), &mut self.host)
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host state reachable from inside guest calls.
//!
//! Everything the trampoline needs while the guest is on the stack lives in
//! [`HostState`], which is the `Store` data for wasmtime guests and a plain
//! field for the in-process guest. No host error or panic ever crosses back
//! into guest frames: the trampoline catches it, parks it in the handle's
//! entry and answers with [`CALLBACK_FAULT`].

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use super::events::Event;
use super::layout::Values;
use super::memory::{read_bytes, split_raw_pair, MemoryEpoch};
use super::registry::HandleRegistry;
use crate::errors::{BridgeError, BridgeResult};
use crate::observability::messages::bridge::{CallbackFaulted, GuestLog};
use crate::observability::messages::StructuredLog;

/// Trampoline answer telling the guest to keep going.
pub const CALLBACK_CONTINUE: i32 = 0;
/// Trampoline answer telling the guest to abort with its callback error code.
pub const CALLBACK_FAULT: i32 = 1;

pub type CallbackResult = anyhow::Result<()>;

/// Fault captured from a host callback.
pub type CallbackFault = anyhow::Error;

pub type Callback = Box<dyn FnMut(&CallbackContext<'_>) -> CallbackResult>;

/// What a host callback sees for one event.
#[derive(Debug)]
pub struct CallbackContext<'a> {
    pub handle: u32,
    pub event: Event,
    /// Offset of the span from the first byte handed to the guest in this call.
    pub at: u32,
    pub len: u32,
    /// The span bytes; empty for events without a span.
    pub data: &'a [u8],
    /// Parser state at the time of the event.
    pub values: Values,
}

impl CallbackContext<'_> {
    pub fn span(&self) -> &[u8] {
        self.data
    }

    pub fn span_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.data)
    }
}

/// Where guest log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogSink {
    #[default]
    Discard,
    Tracing,
    /// Keep lines in memory for [`HostState::buffered_logs`].
    Buffer,
}

/// Entry points the guest calls back into.
pub trait Trampoline {
    /// Runs the callback registered for `slot` on `handle`. Never unwinds.
    fn run_callback(&mut self, memory: &[u8], handle: u32, slot: u32, at: u32, len: u32) -> i32;

    /// Receives a `(ptr << 32) | len` log line.
    fn log(&mut self, memory: &[u8], raw: u64);
}

#[derive(Default)]
pub struct HostState {
    pub(crate) registry: HandleRegistry,
    pub(crate) epoch: MemoryEpoch,
    input: Vec<u8>,
    input_base: usize,
    log_sink: LogSink,
    logs: Vec<String>,
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HandleRegistry {
        &mut self.registry
    }

    pub fn epoch(&self) -> &MemoryEpoch {
        &self.epoch
    }

    pub fn set_log_sink(&mut self, sink: LogSink) {
        self.log_sink = sink;
    }

    pub fn log_sink(&self) -> LogSink {
        self.log_sink
    }

    /// Lines received while the sink was [`LogSink::Buffer`], oldest first.
    pub fn buffered_logs(&self) -> &[String] {
        &self.logs
    }

    /// Installs the host copy of the bytes written to the input buffer.
    pub(crate) fn begin_input(&mut self, input: Vec<u8>) {
        self.input = input;
        self.input_base = 0;
    }

    /// Moves the span origin when the guest is resumed part way into the input.
    pub(crate) fn advance_input_base(&mut self, base: usize) {
        self.input_base = base;
    }

    pub(crate) fn end_input(&mut self) -> Vec<u8> {
        self.input_base = 0;
        std::mem::take(&mut self.input)
    }

    fn span(input: &[u8], base: usize, at: u32, len: u32) -> BridgeResult<&[u8]> {
        let start = base + at as usize;
        let end = start + len as usize;
        input.get(start..end).ok_or_else(|| {
            BridgeError::OutOfBounds(format!(
                "span {}..{} outside the {} bytes of input",
                start,
                end,
                input.len()
            ))
        })
    }
}

impl Trampoline for HostState {
    fn run_callback(&mut self, memory: &[u8], handle: u32, slot: u32, at: u32, len: u32) -> i32 {
        let HostState {
            registry,
            input,
            input_base,
            ..
        } = self;

        let Ok(entry) = registry.get_mut(handle) else {
            return CALLBACK_CONTINUE;
        };

        let Some(event) = Event::from_id(slot) else {
            entry.record_fault(anyhow::anyhow!("guest invoked unknown callback slot {}", slot));
            return CALLBACK_FAULT;
        };

        // Region offsets survive memory growth; the bridge refreshes the view
        // before entering the guest.
        let values = match entry.values {
            Some(view) => view.slice(memory).and_then(Values::decode),
            None => Err(BridgeError::Layout(format!(
                "no Values view cached for handle {}",
                handle
            ))),
        };

        let prepared = values.and_then(|values| {
            let data = if len == 0 {
                &[][..]
            } else {
                Self::span(input, *input_base, at, len)?
            };
            Ok((values, data))
        });

        let (values, data) = match prepared {
            Ok(prepared) => prepared,
            Err(error) => {
                entry.record_fault(anyhow::Error::new(error));
                return CALLBACK_FAULT;
            }
        };

        let Some(callback) = entry.callback_mut(slot as usize) else {
            return CALLBACK_CONTINUE;
        };

        let context = CallbackContext {
            handle,
            event,
            at,
            len,
            data,
            values,
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(&context)));

        let fault = match outcome {
            Ok(Ok(())) => return CALLBACK_CONTINUE,
            Ok(Err(error)) => error,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "callback panicked".to_string());
                anyhow::anyhow!("callback panicked: {}", message)
            }
        };

        CallbackFaulted {
            handle,
            callback: event.name(),
            error: &*fault,
        }
        .log();

        entry.record_fault(fault);
        CALLBACK_FAULT
    }

    fn log(&mut self, memory: &[u8], raw: u64) {
        let (ptr, len) = split_raw_pair(raw);
        let message = match read_bytes(memory, ptr, len) {
            Ok(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Err(error) => format!("<unreadable guest log line: {}>", error),
        };

        match self.log_sink {
            LogSink::Tracing => tracing::debug!("{}", GuestLog { message: &message }),
            LogSink::Buffer => self.logs.push(message),
            LogSink::Discard => {}
        }
    }
}

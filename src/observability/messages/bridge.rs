// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for runtime bridge events.
//!
//! This module contains message types for logging events related to:
//! * Handle lifecycle
//! * Input buffer and offsets region growth
//! * Memory epoch changes
//! * Callback faults and guest log output

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Parser handle created.
///
/// # Log Level
/// `debug!` - Per-handle lifecycle detail
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::HandleCreated;
///
/// let msg = HandleCreated {
///     handle: 3,
///     input_capacity: 4096,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct HandleCreated {
    pub handle: u32,
    pub input_capacity: u32,
}

impl Display for HandleCreated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created parser handle {} with a {} byte input buffer",
            self.handle, self.input_capacity
        )
    }
}

impl StructuredLog for HandleCreated {
    fn log(&self) {
        tracing::debug!(
            handle = self.handle,
            input_capacity = self.input_capacity,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("handle", span_name = name, handle = self.handle)
    }
}

/// Parser handle destroyed and its host entry released.
///
/// # Log Level
/// `debug!` - Per-handle lifecycle detail
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::HandleReleased;
///
/// let msg = HandleReleased { handle: 3 };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct HandleReleased {
    pub handle: u32,
}

impl Display for HandleReleased {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Destroyed parser handle {}", self.handle)
    }
}

/// Input buffer reallocated to fit a larger chunk.
///
/// # Log Level
/// `debug!` - Memory management detail
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::InputBufferGrown;
///
/// let msg = InputBufferGrown {
///     handle: 1,
///     from: 1024,
///     to: 4096,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct InputBufferGrown {
    pub handle: u32,
    pub from: u32,
    pub to: u32,
}

impl Display for InputBufferGrown {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Grew input buffer of handle {}: {} -> {} bytes",
            self.handle, self.from, self.to
        )
    }
}

/// Offsets region reported full and was grown by the guest.
///
/// # Log Level
/// `debug!` - Memory management detail
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::OffsetsRegionGrown;
///
/// let msg = OffsetsRegionGrown {
///     handle: 1,
///     from: 32,
///     to: 64,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct OffsetsRegionGrown {
    pub handle: u32,
    pub from: u32,
    pub to: u32,
}

impl Display for OffsetsRegionGrown {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Grew offsets region of handle {}: {} -> {} records",
            self.handle, self.from, self.to
        )
    }
}

/// Memory epoch advanced; every cached view is now stale.
///
/// # Log Level
/// `debug!` - Memory management detail
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::EpochAdvanced;
///
/// let msg = EpochAdvanced {
///     epoch: 4,
///     reason: "guest memory grew",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct EpochAdvanced<'a> {
    pub epoch: u64,
    pub reason: &'a str,
}

impl Display for EpochAdvanced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Memory epoch advanced to {} ({})", self.epoch, self.reason)
    }
}

/// A host callback returned an error or panicked.
///
/// # Log Level
/// `warn!` - The handle is now errored
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::CallbackFaulted;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "rejected");
/// let msg = CallbackFaulted {
///     handle: 2,
///     callback: "on_header_value",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct CallbackFaulted<'a> {
    pub handle: u32,
    pub callback: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for CallbackFaulted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Callback {} faulted on handle {}: {}",
            self.callback, self.handle, self.error
        )
    }
}

impl StructuredLog for CallbackFaulted<'_> {
    fn log(&self) {
        tracing::warn!(
            handle = self.handle,
            callback = self.callback,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "callback_fault",
            span_name = name,
            handle = self.handle,
            callback = self.callback,
        )
    }
}

/// Batched dispatch stopped at a faulting record.
///
/// # Log Level
/// `warn!` - The handle is now errored
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::BatchDispatchFaulted;
///
/// let msg = BatchDispatchFaulted {
///     handle: 2,
///     callback: "on_url",
///     at: 4,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct BatchDispatchFaulted<'a> {
    pub handle: u32,
    pub callback: &'a str,
    pub at: u32,
}

impl Display for BatchDispatchFaulted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stopped dispatch for handle {} at {} (offset {}); failing the parser",
            self.handle, self.callback, self.at
        )
    }
}

/// Parse refused because the handle is in the error state.
///
/// # Log Level
/// `debug!` - Caller error surfaced as a return value
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::ParseRejected;
///
/// let msg = ParseRejected { handle: 1, code: 3 };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ParseRejected {
    pub handle: u32,
    pub code: u32,
}

impl Display for ParseRejected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rejected parse on handle {}: error code {} is set",
            self.handle, self.code
        )
    }
}

/// Input handed to the guest for one parse call.
///
/// # Log Level
/// `trace!` - Per-call detail
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::ParseStarted;
/// use wasm_parser_bridge::observability::messages::StructuredLog;
///
/// let msg = ParseStarted {
///     handle: 1,
///     input_size: 512,
///     carried: 3,
/// };
///
/// let span = msg.span("parse");
/// let _guard = span.enter();
/// msg.log();
/// ```
pub struct ParseStarted {
    pub handle: u32,
    pub input_size: usize,
    /// Bytes of an incomplete token kept from the previous call.
    pub carried: usize,
}

impl Display for ParseStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parsing {} bytes on handle {} ({} carried)",
            self.input_size, self.handle, self.carried
        )
    }
}

impl StructuredLog for ParseStarted {
    fn log(&self) {
        tracing::trace!(
            handle = self.handle,
            input_size = self.input_size,
            carried = self.carried,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("parse", span_name = name, handle = self.handle)
    }
}

/// A line written by the guest's log sink.
///
/// # Log Level
/// `debug!` - Guest diagnostics
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::GuestLog;
///
/// let msg = GuestLog { message: "state START -> HEADER_NAME" };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct GuestLog<'a> {
    pub message: &'a str,
}

impl Display for GuestLog<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[guest] {}", self.message)
    }
}

/// Guest module instantiated with its imports bound.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::bridge::GuestInstantiated;
///
/// let msg = GuestInstantiated {
///     imports: 2,
///     exports: 38,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct GuestInstantiated {
    pub imports: usize,
    pub exports: usize,
}

impl Display for GuestInstantiated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Instantiated guest module: {} imports bound, {} exports",
            self.imports, self.exports
        )
    }
}

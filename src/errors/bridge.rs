// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run-time errors raised by the host side of the bridge.
//!
//! Protocol errors detected by the guest are *not* represented here: they are
//! parser state, surfaced through the `error_code` getter and
//! `get_error_description`. Host callback faults are not represented here
//! either; they are captured per handle and retrieved with
//! `take_callback_error`.

use thiserror::Error;

/// Error type for bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The handle was never returned by `create` on this bridge.
    #[error("Unknown parser handle {0}")]
    UnknownHandle(u32),

    /// The handle was destroyed and must not be used anymore.
    #[error("Parser handle {0} has been destroyed")]
    HandleDestroyed(u32),

    /// The handle is in the error state; only `reset` or `destroy` are accepted.
    #[error("Parser handle {handle} is in the error state (code {code}); reset it first")]
    HandleErrored { handle: u32, code: u32 },

    /// The guest does not export a required function.
    #[error("Guest does not export '{0}'")]
    MissingExport(String),

    /// A guest export has an unexpected signature.
    #[error("Guest export '{name}' has an unexpected signature: {reason}")]
    ExportSignature { name: String, reason: String },

    /// Memory access outside the guest's linear memory.
    #[error("Memory access out of bounds: {0}")]
    OutOfBounds(String),

    /// The guest allocator returned a null pointer.
    #[error("Guest failed to allocate {0} bytes")]
    AllocationFailed(u32),

    /// An import required by the guest has no host implementation.
    #[error("Unresolved guest import '{module}.{name}'")]
    UnresolvedImport { module: String, name: String },

    /// The guest trapped.
    #[error("WASM execution error: {0}")]
    Trap(#[from] wasmtime::Error),

    /// The guest produced data that violates the region layout contract.
    #[error("Layout violation: {0}")]
    Layout(String),

    /// File I/O error while loading the guest artifact.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The inlined guest payload is not valid base64.
    #[error("Invalid embedded payload: {0}")]
    Payload(#[from] base64::DecodeError),
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

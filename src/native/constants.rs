// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Numeric constants of the reference guest, and the build manifest that
//! publishes them.

use indexmap::IndexMap;

use crate::bridge::layout::VALUE_FIELDS;
use crate::bridge::Event;
use crate::config::consts::{FLAG_BATCH_OFFSETS, FLAG_DEBUG};
use crate::manifest::{Manifest, Version};

pub const ERROR_NONE: u32 = 0;
pub const ERROR_UNEXPECTED_DATA: u32 = 1;
pub const ERROR_UNEXPECTED_EOF: u32 = 2;
pub const ERROR_CALLBACK_ERROR: u32 = 3;
pub const ERROR_UNEXPECTED_CHARACTER: u32 = 4;
pub const ERROR_UNEXPECTED_CONTENT_LENGTH: u32 = 5;
pub const ERROR_UNEXPECTED_TRANSFER_ENCODING: u32 = 6;
pub const ERROR_UNEXPECTED_CONTENT: u32 = 7;
pub const ERROR_UNTRAILERS: u32 = 8;
pub const ERROR_INVALID_VERSION: u32 = 9;
pub const ERROR_INVALID_STATUS: u32 = 10;
pub const ERROR_INVALID_CONTENT_LENGTH: u32 = 11;
pub const ERROR_INVALID_TRANSFER_ENCODING: u32 = 12;
pub const ERROR_INVALID_CHUNK_SIZE: u32 = 13;
pub const ERROR_MISSING_CONNECTION_UPGRADE: u32 = 14;
pub const ERROR_UNSUPPORTED_HTTP_VERSION: u32 = 15;

/// Error names indexed by code.
pub const ERRORS: [&str; 16] = [
    "NONE",
    "UNEXPECTED_DATA",
    "UNEXPECTED_EOF",
    "CALLBACK_ERROR",
    "UNEXPECTED_CHARACTER",
    "UNEXPECTED_CONTENT_LENGTH",
    "UNEXPECTED_TRANSFER_ENCODING",
    "UNEXPECTED_CONTENT",
    "UNTRAILERS",
    "INVALID_VERSION",
    "INVALID_STATUS",
    "INVALID_CONTENT_LENGTH",
    "INVALID_TRANSFER_ENCODING",
    "INVALID_CHUNK_SIZE",
    "MISSING_CONNECTION_UPGRADE",
    "UNSUPPORTED_HTTP_VERSION",
];

pub const MESSAGE_TYPE_AUTODETECT: u32 = 0;
pub const MESSAGE_TYPE_REQUEST: u32 = 1;
pub const MESSAGE_TYPE_RESPONSE: u32 = 2;

pub const MESSAGE_TYPES: [&str; 3] = ["AUTODETECT", "REQUEST", "RESPONSE"];

pub const CONNECTION_KEEPALIVE: u32 = 0;
pub const CONNECTION_CLOSE: u32 = 1;
pub const CONNECTION_UPGRADE: u32 = 2;

pub const CONNECTIONS: [&str; 3] = ["KEEPALIVE", "CLOSE", "UPGRADE"];

/// Request methods indexed by their numeric value.
pub const METHODS: [&str; 36] = [
    "ACL",
    "BIND",
    "CHECKOUT",
    "CONNECT",
    "COPY",
    "DELETE",
    "GET",
    "HEAD",
    "LINK",
    "LOCK",
    "M-SEARCH",
    "MERGE",
    "MKACTIVITY",
    "MKCALENDAR",
    "MKCOL",
    "MOVE",
    "NOTIFY",
    "OPTIONS",
    "PATCH",
    "POST",
    "PRI",
    "PROPFIND",
    "PROPPATCH",
    "PURGE",
    "PUT",
    "QUERY",
    "REBIND",
    "REPORT",
    "SEARCH",
    "SOURCE",
    "SUBSCRIBE",
    "TRACE",
    "UNBIND",
    "UNLINK",
    "UNLOCK",
    "UNSUBSCRIBE",
];

pub const METHOD_CONNECT: u32 = 3;
pub const METHOD_GET: u32 = 6;
pub const METHOD_HEAD: u32 = 7;

pub fn find_method(token: &[u8]) -> Option<u32> {
    METHODS
        .iter()
        .position(|method| method.as_bytes() == token)
        .map(|index| index as u32)
}

/// Manifest for the reference guest, in the order a guest build would emit it.
pub fn build_manifest(batch_offsets: bool) -> Manifest {
    let mut constants = IndexMap::new();

    for (code, name) in ERRORS.iter().enumerate() {
        constants.insert(format!("ERROR_{}", name), code as u32);
    }
    for (value, name) in METHODS.iter().enumerate() {
        constants.insert(format!("METHOD_{}", name.replace('-', "_")), value as u32);
    }
    for (value, name) in CONNECTIONS.iter().enumerate() {
        constants.insert(format!("CONNECTION_{}", name), value as u32);
    }
    for (value, name) in MESSAGE_TYPES.iter().enumerate() {
        constants.insert(format!("MESSAGE_TYPE_{}", name), value as u32);
    }
    for event in Event::ALL {
        constants.insert(format!("CALLBACK_{}", event.constant_name()), event.id());
    }
    for (value, name) in super::machine::STATES.iter().enumerate() {
        constants.insert(format!("STATE_{}", name), value as u32);
    }
    for (name, offset) in VALUE_FIELDS {
        constants.insert(format!("OFFSET_{}", name), offset as u32);
    }

    let mut flags = IndexMap::new();
    flags.insert(FLAG_DEBUG.to_string(), false);
    flags.insert(FLAG_BATCH_OFFSETS.to_string(), batch_offsets);

    Manifest {
        version: Version::new(1, 0, 0),
        flags,
        constants,
    }
}

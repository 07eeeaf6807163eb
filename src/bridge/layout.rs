// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fixed byte layouts shared by the host and the guest.
//!
//! Both regions are versioned wire contracts: a guest built against a
//! different layout version must not be driven by this bridge. All integers
//! are little-endian, matching WebAssembly linear memory.
//!
//! ## Values Region (`VALUES_SIZE` bytes)
//! ```text
//!  0 u32 position            24 u32 version_major     48 u64 content_length
//!  4 u32 state               28 u32 version_minor     56 u64 chunk_size
//!  8 u32 error_code          32 u32 connection        64 u64 remaining_content_length
//! 12 u32 message_type        36 u32 mode              72 u64 remaining_chunk_size
//! 16 u32 method              40 u32 flags             80 u64 parsed
//! 20 u32 status              44 u32 reserved
//! ```
//!
//! ## Offsets Region
//! ```text
//! 0 u32 count | 4 u32 capacity | capacity x (u32 kind, u32 start, u32 length)
//! ```

use crate::errors::{BridgeError, BridgeResult};

pub const VALUES_LAYOUT_VERSION: u32 = 1;
pub const OFFSETS_LAYOUT_VERSION: u32 = 1;

pub const VALUES_SIZE: usize = 88;

pub const VALUE_POSITION: usize = 0;
pub const VALUE_STATE: usize = 4;
pub const VALUE_ERROR_CODE: usize = 8;
pub const VALUE_MESSAGE_TYPE: usize = 12;
pub const VALUE_METHOD: usize = 16;
pub const VALUE_STATUS: usize = 20;
pub const VALUE_VERSION_MAJOR: usize = 24;
pub const VALUE_VERSION_MINOR: usize = 28;
pub const VALUE_CONNECTION: usize = 32;
pub const VALUE_MODE: usize = 36;
pub const VALUE_FLAGS: usize = 40;
pub const VALUE_CONTENT_LENGTH: usize = 48;
pub const VALUE_CHUNK_SIZE: usize = 56;
pub const VALUE_REMAINING_CONTENT_LENGTH: usize = 64;
pub const VALUE_REMAINING_CHUNK_SIZE: usize = 72;
pub const VALUE_PARSED: usize = 80;

/// Field name (as in the manifest `OFFSET_` family) to byte offset.
pub const VALUE_FIELDS: [(&str, usize); 16] = [
    ("POSITION", VALUE_POSITION),
    ("STATE", VALUE_STATE),
    ("ERROR_CODE", VALUE_ERROR_CODE),
    ("MESSAGE_TYPE", VALUE_MESSAGE_TYPE),
    ("METHOD", VALUE_METHOD),
    ("STATUS", VALUE_STATUS),
    ("VERSION_MAJOR", VALUE_VERSION_MAJOR),
    ("VERSION_MINOR", VALUE_VERSION_MINOR),
    ("CONNECTION", VALUE_CONNECTION),
    ("MODE", VALUE_MODE),
    ("FLAGS", VALUE_FLAGS),
    ("CONTENT_LENGTH", VALUE_CONTENT_LENGTH),
    ("CHUNK_SIZE", VALUE_CHUNK_SIZE),
    ("REMAINING_CONTENT_LENGTH", VALUE_REMAINING_CONTENT_LENGTH),
    ("REMAINING_CHUNK_SIZE", VALUE_REMAINING_CHUNK_SIZE),
    ("PARSED", VALUE_PARSED),
];

pub fn value_field_offset(name: &str) -> Option<usize> {
    VALUE_FIELDS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, offset)| *offset)
}

pub const FLAG_HAS_CONTENT_LENGTH: u32 = 1 << 0;
pub const FLAG_HAS_CHUNKED_TRANSFER_ENCODING: u32 = 1 << 1;
pub const FLAG_HAS_UPGRADE: u32 = 1 << 2;
pub const FLAG_HAS_TRAILERS: u32 = 1 << 3;
pub const FLAG_PAUSED: u32 = 1 << 4;
pub const FLAG_IS_CONNECT: u32 = 1 << 5;
pub const FLAG_SKIP_BODY: u32 = 1 << 6;
/// Set by the guest when it stopped early because the Offsets Region is full.
pub const FLAG_OFFSETS_FULL: u32 = 1 << 7;
/// Set by the guest once the connection left HTTP (upgrade or CONNECT). Bytes
/// past that point belong to the host and are never consumed.
pub const FLAG_TUNNEL: u32 = 1 << 8;

pub const OFFSETS_HEADER_SIZE: usize = 8;
pub const OFFSET_RECORD_SIZE: usize = 12;
pub const OFFSETS_COUNT: usize = 0;
pub const OFFSETS_CAPACITY: usize = 4;

/// Bytes needed by an Offsets Region able to hold `capacity` records.
pub fn offsets_region_size(capacity: u32) -> usize {
    OFFSETS_HEADER_SIZE + capacity as usize * OFFSET_RECORD_SIZE
}

pub(crate) fn read_u32(bytes: &[u8], at: usize) -> BridgeResult<u32> {
    let raw = bytes
        .get(at..at + 4)
        .ok_or_else(|| BridgeError::OutOfBounds(format!("u32 read at {}", at)))?;
    Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

pub(crate) fn read_u64(bytes: &[u8], at: usize) -> BridgeResult<u64> {
    let raw = bytes
        .get(at..at + 8)
        .ok_or_else(|| BridgeError::OutOfBounds(format!("u64 read at {}", at)))?;
    let mut word = [0u8; 8];
    word.copy_from_slice(raw);
    Ok(u64::from_le_bytes(word))
}

pub(crate) fn write_u32(bytes: &mut [u8], at: usize, value: u32) -> BridgeResult<()> {
    let raw = bytes
        .get_mut(at..at + 4)
        .ok_or_else(|| BridgeError::OutOfBounds(format!("u32 write at {}", at)))?;
    raw.copy_from_slice(&value.to_le_bytes());
    Ok(())
}

pub(crate) fn write_u64(bytes: &mut [u8], at: usize, value: u64) -> BridgeResult<()> {
    let raw = bytes
        .get_mut(at..at + 8)
        .ok_or_else(|| BridgeError::OutOfBounds(format!("u64 write at {}", at)))?;
    raw.copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// Decoded copy of a Values Region.
///
/// Reading the whole region in one go is what lets the host inspect parser
/// state without one guest call per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Values {
    pub position: u32,
    pub state: u32,
    pub error_code: u32,
    pub message_type: u32,
    pub method: u32,
    pub status: u32,
    pub version_major: u32,
    pub version_minor: u32,
    pub connection: u32,
    pub mode: u32,
    pub flags: u32,
    pub content_length: u64,
    pub chunk_size: u64,
    pub remaining_content_length: u64,
    pub remaining_chunk_size: u64,
    pub parsed: u64,
}

impl Values {
    /// Decodes a region; `bytes` must start at the region's first byte.
    pub fn decode(bytes: &[u8]) -> BridgeResult<Self> {
        if bytes.len() < VALUES_SIZE {
            return Err(BridgeError::Layout(format!(
                "Values region truncated: {} bytes (expected {})",
                bytes.len(),
                VALUES_SIZE
            )));
        }

        Ok(Self {
            position: read_u32(bytes, VALUE_POSITION)?,
            state: read_u32(bytes, VALUE_STATE)?,
            error_code: read_u32(bytes, VALUE_ERROR_CODE)?,
            message_type: read_u32(bytes, VALUE_MESSAGE_TYPE)?,
            method: read_u32(bytes, VALUE_METHOD)?,
            status: read_u32(bytes, VALUE_STATUS)?,
            version_major: read_u32(bytes, VALUE_VERSION_MAJOR)?,
            version_minor: read_u32(bytes, VALUE_VERSION_MINOR)?,
            connection: read_u32(bytes, VALUE_CONNECTION)?,
            mode: read_u32(bytes, VALUE_MODE)?,
            flags: read_u32(bytes, VALUE_FLAGS)?,
            content_length: read_u64(bytes, VALUE_CONTENT_LENGTH)?,
            chunk_size: read_u64(bytes, VALUE_CHUNK_SIZE)?,
            remaining_content_length: read_u64(bytes, VALUE_REMAINING_CONTENT_LENGTH)?,
            remaining_chunk_size: read_u64(bytes, VALUE_REMAINING_CHUNK_SIZE)?,
            parsed: read_u64(bytes, VALUE_PARSED)?,
        })
    }

    pub fn encode(&self, bytes: &mut [u8]) -> BridgeResult<()> {
        write_u32(bytes, VALUE_POSITION, self.position)?;
        write_u32(bytes, VALUE_STATE, self.state)?;
        write_u32(bytes, VALUE_ERROR_CODE, self.error_code)?;
        write_u32(bytes, VALUE_MESSAGE_TYPE, self.message_type)?;
        write_u32(bytes, VALUE_METHOD, self.method)?;
        write_u32(bytes, VALUE_STATUS, self.status)?;
        write_u32(bytes, VALUE_VERSION_MAJOR, self.version_major)?;
        write_u32(bytes, VALUE_VERSION_MINOR, self.version_minor)?;
        write_u32(bytes, VALUE_CONNECTION, self.connection)?;
        write_u32(bytes, VALUE_MODE, self.mode)?;
        write_u32(bytes, VALUE_FLAGS, self.flags)?;
        write_u64(bytes, VALUE_CONTENT_LENGTH, self.content_length)?;
        write_u64(bytes, VALUE_CHUNK_SIZE, self.chunk_size)?;
        write_u64(bytes, VALUE_REMAINING_CONTENT_LENGTH, self.remaining_content_length)?;
        write_u64(bytes, VALUE_REMAINING_CHUNK_SIZE, self.remaining_chunk_size)?;
        write_u64(bytes, VALUE_PARSED, self.parsed)
    }

    #[inline]
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    pub fn has_content_length(&self) -> bool {
        self.has_flag(FLAG_HAS_CONTENT_LENGTH)
    }

    pub fn has_chunked_transfer_encoding(&self) -> bool {
        self.has_flag(FLAG_HAS_CHUNKED_TRANSFER_ENCODING)
    }

    pub fn has_upgrade(&self) -> bool {
        self.has_flag(FLAG_HAS_UPGRADE)
    }

    pub fn has_trailers(&self) -> bool {
        self.has_flag(FLAG_HAS_TRAILERS)
    }

    pub fn is_paused(&self) -> bool {
        self.has_flag(FLAG_PAUSED)
    }

    pub fn is_tunnel(&self) -> bool {
        self.has_flag(FLAG_TUNNEL)
    }

    /// The guest stopped on purpose and will not take more input as it stands.
    pub fn is_halted(&self) -> bool {
        self.is_paused() || self.is_tunnel()
    }
}

/// One `(kind, start, length)` span record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRecord {
    pub kind: u32,
    pub start: u32,
    pub length: u32,
}

/// Reads `count` and `capacity` from the start of an Offsets Region.
pub fn read_offsets_header(region: &[u8]) -> BridgeResult<(u32, u32)> {
    let count = read_u32(region, OFFSETS_COUNT)?;
    let capacity = read_u32(region, OFFSETS_CAPACITY)?;

    if count > capacity {
        return Err(BridgeError::Layout(format!(
            "Offsets count {} exceeds capacity {}",
            count, capacity
        )));
    }

    Ok((count, capacity))
}

/// Decodes the first `count` records of an Offsets Region, in insertion order.
pub fn decode_records(region: &[u8], count: u32) -> BridgeResult<Vec<OffsetRecord>> {
    (0..count as usize)
        .map(|i| {
            let base = OFFSETS_HEADER_SIZE + i * OFFSET_RECORD_SIZE;
            Ok(OffsetRecord {
                kind: read_u32(region, base)?,
                start: read_u32(region, base + 4)?,
                length: read_u32(region, base + 8)?,
            })
        })
        .collect()
}

/// Appends a record, refusing to write past the declared capacity.
pub fn push_record(region: &mut [u8], record: OffsetRecord) -> BridgeResult<()> {
    let (count, capacity) = read_offsets_header(region)?;

    if count == capacity {
        return Err(BridgeError::Layout(format!(
            "Offsets region is full ({} records)",
            capacity
        )));
    }

    let base = OFFSETS_HEADER_SIZE + count as usize * OFFSET_RECORD_SIZE;
    write_u32(region, base, record.kind)?;
    write_u32(region, base + 4, record.start)?;
    write_u32(region, base + 8, record.length)?;
    write_u32(region, OFFSETS_COUNT, count + 1)
}

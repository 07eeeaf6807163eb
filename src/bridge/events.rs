// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The fixed event catalog.
//!
//! An event id is simultaneously the callback slot index and the `kind` of an
//! offset record. The catalog is part of the wire contract: a guest whose
//! `CALLBACK_*` constants disagree with it is rejected at generation time.

use std::fmt::{Display, Formatter};

/// Number of callback slots per handle.
pub const EVENT_COUNT: usize = 26;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Event {
    Error = 0,
    Finish = 1,
    MessageStart = 2,
    MessageComplete = 3,
    Request = 4,
    Response = 5,
    Reset = 6,
    Method = 7,
    Url = 8,
    Protocol = 9,
    Version = 10,
    Status = 11,
    Reason = 12,
    HeaderName = 13,
    HeaderValue = 14,
    Headers = 15,
    Connect = 16,
    Upgrade = 17,
    ChunkLength = 18,
    ChunkExtensionName = 19,
    ChunkExtensionValue = 20,
    Data = 21,
    Body = 22,
    TrailerName = 23,
    TrailerValue = 24,
    Trailers = 25,
}

impl Event {
    /// All events in id order.
    pub const ALL: [Event; EVENT_COUNT] = [
        Event::Error,
        Event::Finish,
        Event::MessageStart,
        Event::MessageComplete,
        Event::Request,
        Event::Response,
        Event::Reset,
        Event::Method,
        Event::Url,
        Event::Protocol,
        Event::Version,
        Event::Status,
        Event::Reason,
        Event::HeaderName,
        Event::HeaderValue,
        Event::Headers,
        Event::Connect,
        Event::Upgrade,
        Event::ChunkLength,
        Event::ChunkExtensionName,
        Event::ChunkExtensionValue,
        Event::Data,
        Event::Body,
        Event::TrailerName,
        Event::TrailerValue,
        Event::Trailers,
    ];

    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Event> {
        Self::ALL.get(id as usize).copied()
    }

    /// Host-facing callback name, e.g. `on_header_name`.
    pub fn name(self) -> &'static str {
        match self {
            Event::Error => "on_error",
            Event::Finish => "on_finish",
            Event::MessageStart => "on_message_start",
            Event::MessageComplete => "on_message_complete",
            Event::Request => "on_request",
            Event::Response => "on_response",
            Event::Reset => "on_reset",
            Event::Method => "on_method",
            Event::Url => "on_url",
            Event::Protocol => "on_protocol",
            Event::Version => "on_version",
            Event::Status => "on_status",
            Event::Reason => "on_reason",
            Event::HeaderName => "on_header_name",
            Event::HeaderValue => "on_header_value",
            Event::Headers => "on_headers",
            Event::Connect => "on_connect",
            Event::Upgrade => "on_upgrade",
            Event::ChunkLength => "on_chunk_length",
            Event::ChunkExtensionName => "on_chunk_extension_name",
            Event::ChunkExtensionValue => "on_chunk_extension_value",
            Event::Data => "on_data",
            Event::Body => "on_body",
            Event::TrailerName => "on_trailer_name",
            Event::TrailerValue => "on_trailer_value",
            Event::Trailers => "on_trailers",
        }
    }

    /// Manifest constant name without the `CALLBACK_` prefix, e.g. `ON_HEADER_NAME`.
    pub fn constant_name(self) -> String {
        self.name().to_uppercase()
    }

    /// Whether the event refers to a byte range of the input.
    pub fn carries_span(self) -> bool {
        matches!(
            self,
            Event::Method
                | Event::Url
                | Event::Protocol
                | Event::Version
                | Event::Status
                | Event::Reason
                | Event::HeaderName
                | Event::HeaderValue
                | Event::ChunkLength
                | Event::ChunkExtensionName
                | Event::ChunkExtensionValue
                | Event::Data
                | Event::TrailerName
                | Event::TrailerValue
        )
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

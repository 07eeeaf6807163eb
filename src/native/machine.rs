// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Minimal HTTP/1.x state machine behind the reference guest.
//!
//! Each state looks at the unconsumed input and either advances by a whole
//! token, suspends before an incomplete one, or fails. A suspended parse
//! reports fewer bytes consumed than it was given; the caller supplies the
//! rest again together with the next chunk.

use crate::bridge::layout::{
    Values, FLAG_HAS_CHUNKED_TRANSFER_ENCODING, FLAG_HAS_CONTENT_LENGTH, FLAG_HAS_TRAILERS,
    FLAG_HAS_UPGRADE, FLAG_IS_CONNECT, FLAG_OFFSETS_FULL, FLAG_PAUSED, FLAG_SKIP_BODY, FLAG_TUNNEL,
};
use crate::bridge::Event;

use super::constants::*;

/// State names indexed by [`State`] value.
pub const STATES: [&str; 30] = [
    "START",
    "FINISH",
    "ERROR",
    "MESSAGE",
    "REQUEST",
    "REQUEST_METHOD",
    "REQUEST_URL",
    "REQUEST_PROTOCOL",
    "REQUEST_VERSION",
    "RESPONSE",
    "RESPONSE_VERSION",
    "RESPONSE_STATUS",
    "RESPONSE_REASON",
    "HEADER_NAME",
    "HEADER_TRANSFER_ENCODING",
    "HEADER_CONTENT_LENGTH",
    "HEADER_CONNECTION",
    "HEADER_VALUE",
    "HEADERS",
    "TUNNEL",
    "BODY_VIA_CONTENT_LENGTH",
    "BODY_WITH_NO_LENGTH",
    "CHUNK_LENGTH",
    "CHUNK_EXTENSION_NAME",
    "CHUNK_EXTENSION_VALUE",
    "CHUNK_DATA",
    "CHUNK_END",
    "CRLF_AFTER_LAST_CHUNK",
    "TRAILER_NAME",
    "TRAILER_VALUE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum State {
    Start = 0,
    Finish,
    Error,
    Message,
    Request,
    RequestMethod,
    RequestUrl,
    RequestProtocol,
    RequestVersion,
    Response,
    ResponseVersion,
    ResponseStatus,
    ResponseReason,
    HeaderName,
    HeaderTransferEncoding,
    HeaderContentLength,
    HeaderConnection,
    HeaderValue,
    Headers,
    Tunnel,
    BodyViaContentLength,
    BodyWithNoLength,
    ChunkLength,
    ChunkExtensionName,
    ChunkExtensionValue,
    ChunkData,
    ChunkEnd,
    CrlfAfterLastChunk,
    TrailerName,
    TrailerValue,
}

impl State {
    pub fn name(self) -> &'static str {
        STATES[self as usize]
    }
}

/// Most events a single step can emit. A batched sink must have room for
/// this many records before a step runs.
pub const MAX_EVENTS_PER_STEP: u32 = 6;

/// Receiver of parse events.
pub trait EventSink {
    /// Delivers one event. Returns `false` when the host callback faulted.
    fn emit(&mut self, values: &Values, event: Event, at: u32, len: u32) -> bool;

    /// Whether `events` more events can be delivered before the host drains.
    fn has_room(&self, _events: u32) -> bool {
        true
    }
}

/// The machine entered the error state; stop stepping.
struct Halt;

enum Step {
    Advance(usize),
    Suspend,
}

type StepResult = Result<Step, Halt>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Match,
    Partial,
    Mismatch,
}

fn prefix(rest: &[u8], expected: &[u8]) -> Prefix {
    let n = rest.len().min(expected.len());
    if rest[..n] != expected[..n] {
        Prefix::Mismatch
    } else if n < expected.len() {
        Prefix::Partial
    } else {
        Prefix::Match
    }
}

fn crlf_at(rest: &[u8], at: usize) -> Prefix {
    prefix(rest.get(at..).unwrap_or_default(), b"\r\n")
}

fn protocol(rest: &[u8]) -> Prefix {
    match (prefix(rest, b"HTTP/"), prefix(rest, b"RTSP/")) {
        (Prefix::Match, _) | (_, Prefix::Match) => Prefix::Match,
        (Prefix::Partial, _) | (_, Prefix::Partial) => Prefix::Partial,
        _ => Prefix::Mismatch,
    }
}

fn is_token(c: u8) -> bool {
    c.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&c)
}

fn is_url(c: u8) -> bool {
    c.is_ascii_graphic() || c >= 0x80
}

fn is_value(c: u8) -> bool {
    c == b'\t' || (c >= b' ' && c != 0x7f)
}

fn is_ws(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn span_of(rest: &[u8], matches: fn(u8) -> bool) -> usize {
    rest.iter().take_while(|c| matches(**c)).count()
}

fn trim_ws(bytes: &[u8]) -> &[u8] {
    let start = span_of(bytes, is_ws);
    let end = bytes.iter().rposition(|c| !is_ws(*c)).map_or(start, |i| i + 1);
    &bytes[start..end.max(start)]
}

enum Line {
    /// `OWS value OWS CRLF`: value start, trimmed value length, bytes through CRLF.
    Complete { start: usize, len: usize, advance: usize },
    Incomplete,
    Invalid,
}

fn header_line(rest: &[u8]) -> Line {
    let start = span_of(rest, is_ws);
    let end = start + span_of(&rest[start..], is_value);

    match crlf_at(rest, end) {
        Prefix::Match => {
            let len = trim_ws(&rest[start..end]).len();
            Line::Complete {
                start,
                len,
                advance: end + 2,
            }
        }
        Prefix::Partial => Line::Incomplete,
        Prefix::Mismatch => Line::Invalid,
    }
}

fn parse_decimal(digits: &[u8]) -> Option<u64> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}

fn parse_hex(digits: &[u8]) -> Option<u64> {
    u64::from_str_radix(std::str::from_utf8(digits).ok()?, 16).ok()
}

#[derive(Debug, Clone)]
pub struct Machine {
    values: Values,
    state: State,
    description: String,
    continue_without_data: bool,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            values: Values::default(),
            state: State::Start,
            description: String::new(),
            continue_without_data: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Current Values, with the state folded in.
    pub fn values(&self) -> Values {
        Values {
            state: self.state as u32,
            ..self.values
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_mode(&mut self, mode: u32) {
        self.values.mode = mode;
    }

    pub fn set_flag(&mut self, flag: u32, enabled: bool) {
        if enabled {
            self.values.flags |= flag;
        } else {
            self.values.flags &= !flag;
        }
    }

    pub fn pause(&mut self) {
        self.set_flag(FLAG_PAUSED, true);
    }

    pub fn resume(&mut self) {
        self.set_flag(FLAG_PAUSED, false);
    }

    /// Enters the error state without notifying anyone.
    pub fn fail_with(&mut self, code: u32, description: String) {
        self.values.error_code = code;
        self.description = description;
        self.state = State::Error;
    }

    /// Drops everything learned about the current message.
    pub fn clear(&mut self) {
        let values = &mut self.values;
        values.message_type = MESSAGE_TYPE_AUTODETECT;
        values.method = 0;
        values.status = 0;
        values.version_major = 0;
        values.version_minor = 0;
        values.connection = CONNECTION_KEEPALIVE;
        values.content_length = 0;
        values.chunk_size = 0;
        values.remaining_content_length = 0;
        values.remaining_chunk_size = 0;
        values.flags &= FLAG_PAUSED | FLAG_SKIP_BODY | FLAG_TUNNEL;
    }

    pub fn reset(&mut self, keep_position: bool, sink: &mut dyn EventSink) {
        let previous = self.values;
        self.values = Values {
            mode: previous.mode,
            ..Values::default()
        };
        if keep_position {
            self.values.position = previous.position;
            self.values.parsed = previous.parsed;
        }
        self.state = State::Start;
        self.description.clear();
        self.continue_without_data = false;

        let _ = self.emit(sink, Event::Reset, 0, 0);
    }

    /// End of input: fine between messages or while reading a body that
    /// runs until the connection closes.
    pub fn finish(&mut self, sink: &mut dyn EventSink) {
        let _ = match self.state {
            State::Start | State::Message | State::Request | State::Response => {
                self.enter_finish(sink, 0)
            }
            State::BodyWithNoLength => self
                .emit(sink, Event::Body, 0, 0)
                .and_then(|_| self.emit(sink, Event::MessageComplete, 0, 0))
                .and_then(|_| self.enter_finish(sink, 0)),
            State::Finish | State::Error => Ok(()),
            _ => self
                .fail::<()>(sink, 0, ERROR_UNEXPECTED_EOF, "Unexpected end of data"),
        };
    }

    /// Consumes as much of `data` as forms complete tokens. Returns the
    /// number of bytes consumed.
    pub fn parse(&mut self, data: &[u8], sink: &mut dyn EventSink) -> usize {
        self.values.flags &= !FLAG_OFFSETS_FULL;
        if self.values.has_flag(FLAG_PAUSED) || self.state == State::Error {
            return 0;
        }

        let mut offset = 0;
        while offset < data.len() || self.continue_without_data {
            if !sink.has_room(MAX_EVENTS_PER_STEP) {
                self.values.flags |= FLAG_OFFSETS_FULL;
                break;
            }
            self.continue_without_data = false;

            let step = if self.state == State::Finish {
                self.fail(sink, offset, ERROR_UNEXPECTED_DATA, "Unexpected data after the last message")
            } else {
                self.step(data, offset, sink)
            };

            match step {
                Ok(Step::Advance(advance)) => {
                    offset += advance;
                    self.values.position = self.values.position.wrapping_add(advance as u32);
                    self.values.parsed += advance as u64;
                }
                Ok(Step::Suspend) | Err(Halt) => break,
            }

            if self.values.has_flag(FLAG_PAUSED) {
                break;
            }
        }
        offset
    }

    fn step(&mut self, data: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let rest = &data[at..];
        match self.state {
            State::Start => self.start(at, sink),
            State::Message => self.message(rest, at, sink),
            State::Request => self.request(rest, at, sink),
            State::RequestMethod => self.request_method(rest, at, sink),
            State::RequestUrl => self.request_url(rest, at, sink),
            State::RequestProtocol => self.request_protocol(rest, at, sink),
            State::RequestVersion => self.request_version(rest, at, sink),
            State::Response => self.response(rest, at, sink),
            State::ResponseVersion => self.response_version(rest, at, sink),
            State::ResponseStatus => self.response_status(rest, at, sink),
            State::ResponseReason => self.response_reason(rest, at, sink),
            State::HeaderName => self.header_name(rest, at, sink),
            State::HeaderTransferEncoding
            | State::HeaderContentLength
            | State::HeaderConnection
            | State::HeaderValue => self.header_value(rest, at, sink),
            State::Headers => self.headers(at, sink),
            State::Tunnel => Ok(Step::Suspend),
            State::BodyViaContentLength => self.body_via_content_length(rest, at, sink),
            State::BodyWithNoLength => self.body_with_no_length(rest, at, sink),
            State::ChunkLength => self.chunk_length(rest, at, sink),
            State::ChunkExtensionName => self.chunk_extension_name(rest, at, sink),
            State::ChunkExtensionValue => self.chunk_extension_value(rest, at, sink),
            State::ChunkData => self.chunk_data(rest, at, sink),
            State::ChunkEnd => self.chunk_end(rest, at, sink),
            State::CrlfAfterLastChunk => self.crlf_after_last_chunk(rest, at, sink),
            State::TrailerName => self.trailer_name(rest, at, sink),
            State::TrailerValue => self.trailer_value(rest, at, sink),
            State::Finish | State::Error => Ok(Step::Suspend),
        }
    }

    fn enter_tunnel(&mut self) -> StepResult {
        self.values.flags |= FLAG_TUNNEL;
        self.move_to(State::Tunnel, 0)
    }

    fn move_to(&mut self, state: State, advance: usize) -> StepResult {
        self.state = state;
        Ok(Step::Advance(advance))
    }

    fn emit(&mut self, sink: &mut dyn EventSink, event: Event, at: usize, len: usize) -> Result<(), Halt> {
        if sink.emit(&self.values(), event, at as u32, len as u32) {
            return Ok(());
        }
        self.fail_with(
            ERROR_CALLBACK_ERROR,
            format!("Callback for {} has thrown an error.", event.name()),
        );
        Err(Halt)
    }

    fn fail<T>(&mut self, sink: &mut dyn EventSink, at: usize, code: u32, description: &str) -> Result<T, Halt> {
        self.fail_with(code, description.to_string());
        // The parser is already failed; a fault raised by on_error changes nothing.
        sink.emit(&self.values(), Event::Error, at as u32, 0);
        Err(Halt)
    }

    fn enter_finish(&mut self, sink: &mut dyn EventSink, at: usize) -> Result<(), Halt> {
        self.state = State::Finish;
        self.emit(sink, Event::Finish, at, 0)
    }

    fn begin_message(&mut self, sink: &mut dyn EventSink, at: usize, message_type: u32, next: State) -> StepResult {
        self.values.message_type = message_type;
        self.emit(sink, Event::MessageStart, at, 0)?;
        self.move_to(next, 0)
    }

    fn complete_message(&mut self, sink: &mut dyn EventSink, at: usize, advance: usize) -> StepResult {
        self.emit(sink, Event::MessageComplete, at, 0)?;

        let connection = self.values.connection;
        self.clear();
        self.emit(sink, Event::Reset, at, 0)?;

        if connection == CONNECTION_CLOSE {
            self.enter_finish(sink, at)?;
        } else {
            self.state = State::Start;
        }
        Ok(Step::Advance(advance))
    }

    fn start(&mut self, at: usize, sink: &mut dyn EventSink) -> StepResult {
        match self.values.mode {
            MESSAGE_TYPE_AUTODETECT => self.move_to(State::Message, 0),
            MESSAGE_TYPE_REQUEST => self.begin_message(sink, at, MESSAGE_TYPE_REQUEST, State::Request),
            MESSAGE_TYPE_RESPONSE => self.begin_message(sink, at, MESSAGE_TYPE_RESPONSE, State::Response),
            _ => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid mode"),
        }
    }

    fn message(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match prefix(rest, b"\r\n") {
            Prefix::Match => return Ok(Step::Advance(2)),
            Prefix::Partial => return Ok(Step::Suspend),
            Prefix::Mismatch => {}
        }

        match protocol(rest) {
            Prefix::Match => {
                return self.begin_message(sink, at, MESSAGE_TYPE_RESPONSE, State::Response)
            }
            Prefix::Partial => return Ok(Step::Suspend),
            Prefix::Mismatch => {}
        }

        let token = span_of(rest, is_token);
        match rest.get(token) {
            None => Ok(Step::Suspend),
            Some(b' ') if token > 0 => {
                self.begin_message(sink, at, MESSAGE_TYPE_REQUEST, State::Request)
            }
            _ => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Unexpected data"),
        }
    }

    fn request(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match prefix(rest, b"\r\n") {
            Prefix::Match => Ok(Step::Advance(2)),
            Prefix::Partial => Ok(Step::Suspend),
            Prefix::Mismatch if is_token(rest[0]) => self.move_to(State::RequestMethod, 0),
            Prefix::Mismatch => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected method"),
        }
    }

    fn request_method(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let token = span_of(rest, is_token);
        match rest.get(token) {
            None => Ok(Step::Suspend),
            Some(b' ') if token > 0 => {
                let Some(method) = find_method(&rest[..token]) else {
                    return self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid method");
                };
                self.values.method = method;
                if method == METHOD_CONNECT {
                    self.values.flags |= FLAG_IS_CONNECT;
                }

                self.emit(sink, Event::Method, at, token)?;
                self.move_to(State::RequestUrl, token + 1)
            }
            _ => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected token character"),
        }
    }

    fn request_url(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let url = span_of(rest, is_url);
        match rest.get(url) {
            None => Ok(Step::Suspend),
            Some(b' ') if url > 0 => {
                self.emit(sink, Event::Url, at, url)?;
                self.move_to(State::RequestProtocol, url + 1)
            }
            _ => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected URL character"),
        }
    }

    fn request_protocol(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match protocol(rest) {
            Prefix::Match => {
                self.emit(sink, Event::Protocol, at, 4)?;
                self.move_to(State::RequestVersion, 5)
            }
            Prefix::Partial => Ok(Step::Suspend),
            Prefix::Mismatch => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected protocol"),
        }
    }

    fn set_version(&mut self, sink: &mut dyn EventSink, at: usize, version: &[u8]) -> Result<(), Halt> {
        match version {
            b"1.1" | b"1.0" => {
                self.values.version_major = 1;
                self.values.version_minor = u32::from(version[2] - b'0');
                Ok(())
            }
            b"2.0" => self.fail(sink, at, ERROR_UNSUPPORTED_HTTP_VERSION, "HTTP/2.0 is not supported"),
            _ => self.fail(sink, at, ERROR_INVALID_VERSION, "Invalid HTTP version"),
        }
    }

    fn request_version(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let Some(line) = rest.get(..5) else {
            return Ok(Step::Suspend);
        };
        let well_formed = line[0].is_ascii_digit()
            && line[1] == b'.'
            && line[2].is_ascii_digit()
            && &line[3..] == b"\r\n";
        if !well_formed {
            return self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected HTTP version");
        }

        self.set_version(sink, at, &line[..3])?;
        self.emit(sink, Event::Version, at, 3)?;
        self.emit(sink, Event::Request, at + 5, 0)?;
        self.move_to(State::HeaderName, 5)
    }

    fn response(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match prefix(rest, b"\r\n") {
            Prefix::Match => return Ok(Step::Advance(2)),
            Prefix::Partial => return Ok(Step::Suspend),
            Prefix::Mismatch => {}
        }

        match protocol(rest) {
            Prefix::Match => {
                self.emit(sink, Event::Protocol, at, 4)?;
                self.move_to(State::ResponseVersion, 5)
            }
            Prefix::Partial => Ok(Step::Suspend),
            Prefix::Mismatch => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected protocol"),
        }
    }

    fn response_version(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let Some(token) = rest.get(..4) else {
            return Ok(Step::Suspend);
        };
        let well_formed = token[0].is_ascii_digit()
            && token[1] == b'.'
            && token[2].is_ascii_digit()
            && token[3] == b' ';
        if !well_formed {
            return self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected HTTP version");
        }

        self.set_version(sink, at, &token[..3])?;
        self.emit(sink, Event::Version, at, 3)?;
        self.move_to(State::ResponseStatus, 4)
    }

    fn response_status(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let Some(token) = rest.get(..4) else {
            return Ok(Step::Suspend);
        };
        let status = match parse_decimal(&token[..3]) {
            Some(status) if token[..3].iter().all(u8::is_ascii_digit) && token[3] == b' ' => status,
            _ => return self.fail(sink, at, ERROR_INVALID_STATUS, "Expected HTTP response status"),
        };

        self.values.status = status as u32;
        self.emit(sink, Event::Status, at, 3)?;
        self.move_to(State::ResponseReason, 4)
    }

    fn response_reason(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let reason = span_of(rest, is_value);
        match crlf_at(rest, reason) {
            Prefix::Match => {
                if reason > 0 {
                    self.emit(sink, Event::Reason, at, reason)?;
                }
                self.emit(sink, Event::Response, at + reason + 2, 0)?;
                self.move_to(State::HeaderName, reason + 2)
            }
            Prefix::Partial => Ok(Step::Suspend),
            Prefix::Mismatch => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected status reason"),
        }
    }

    fn header_name(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match prefix(rest, b"\r\n") {
            Prefix::Match => {
                self.continue_without_data = true;
                return self.move_to(State::Headers, 2);
            }
            Prefix::Partial => return Ok(Step::Suspend),
            Prefix::Mismatch => {}
        }

        let token = span_of(rest, is_token);
        match rest.get(token) {
            None => Ok(Step::Suspend),
            Some(b':') if token > 0 => self.header(sink, at, &rest[..token]),
            _ => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid header field name character"),
        }
    }

    fn header(&mut self, sink: &mut dyn EventSink, at: usize, name: &[u8]) -> StepResult {
        let status = self.values.status;

        let next = if name.eq_ignore_ascii_case(b"content-length") {
            if self.values.has_flag(FLAG_HAS_CHUNKED_TRANSFER_ENCODING) {
                return self.fail(
                    sink,
                    at,
                    ERROR_UNEXPECTED_CONTENT_LENGTH,
                    "Unexpected Content-Length header when Transfer-Encoding header is present",
                );
            }
            if status == 204 || status / 100 == 1 {
                return self.fail(
                    sink,
                    at,
                    ERROR_UNEXPECTED_CONTENT_LENGTH,
                    "Unexpected Content-Length header for a response with status 204 or 1xx",
                );
            }
            if self.values.has_flag(FLAG_HAS_CONTENT_LENGTH) {
                return self.fail(sink, at, ERROR_INVALID_CONTENT_LENGTH, "Invalid duplicate Content-Length header");
            }
            self.values.flags |= FLAG_HAS_CONTENT_LENGTH;
            State::HeaderContentLength
        } else if name.eq_ignore_ascii_case(b"transfer-encoding") {
            if self.values.has_flag(FLAG_HAS_CONTENT_LENGTH) {
                return self.fail(
                    sink,
                    at,
                    ERROR_UNEXPECTED_TRANSFER_ENCODING,
                    "Unexpected Transfer-Encoding header when Content-Length header is present",
                );
            }
            if status == 304 {
                return self.fail(
                    sink,
                    at,
                    ERROR_UNEXPECTED_TRANSFER_ENCODING,
                    "Unexpected Transfer-Encoding header for a response with status 304",
                );
            }
            State::HeaderTransferEncoding
        } else if name.eq_ignore_ascii_case(b"connection") {
            State::HeaderConnection
        } else if name.eq_ignore_ascii_case(b"trailer") {
            self.values.flags |= FLAG_HAS_TRAILERS;
            State::HeaderValue
        } else if name.eq_ignore_ascii_case(b"upgrade") {
            self.values.flags |= FLAG_HAS_UPGRADE;
            State::HeaderValue
        } else {
            State::HeaderValue
        };

        self.emit(sink, Event::HeaderName, at, name.len())?;
        self.move_to(next, name.len() + 1)
    }

    fn header_value(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let invalid_code = match self.state {
            State::HeaderContentLength => ERROR_INVALID_CONTENT_LENGTH,
            State::HeaderTransferEncoding => ERROR_INVALID_TRANSFER_ENCODING,
            _ => ERROR_UNEXPECTED_CHARACTER,
        };

        let (start, len, advance) = match header_line(rest) {
            Line::Complete { start, len, advance } if len > 0 => (start, len, advance),
            Line::Incomplete => return Ok(Step::Suspend),
            _ => return self.fail(sink, at, invalid_code, "Invalid header field value character"),
        };
        let value = &rest[start..start + len];

        match self.state {
            State::HeaderContentLength => {
                let length = match parse_decimal(value) {
                    Some(length) if value.iter().all(u8::is_ascii_digit) => length,
                    _ => return self.fail(sink, at, invalid_code, "Invalid Content-Length header"),
                };
                self.values.content_length = length;
                self.values.remaining_content_length = length;
            }
            State::HeaderTransferEncoding => {
                if self.values.has_flag(FLAG_HAS_CHUNKED_TRANSFER_ENCODING) {
                    return self.fail(
                        sink,
                        at,
                        invalid_code,
                        "The value \"chunked\" in the Transfer-Encoding header must be the last provided",
                    );
                }
                let last = value.rsplit(|c| *c == b',').next().map(trim_ws).unwrap_or_default();
                if last.eq_ignore_ascii_case(b"chunked") {
                    self.values.flags |= FLAG_HAS_CHUNKED_TRANSFER_ENCODING;
                }
            }
            State::HeaderConnection => {
                if value.eq_ignore_ascii_case(b"close") {
                    self.values.connection = CONNECTION_CLOSE;
                } else if value.eq_ignore_ascii_case(b"keep-alive") {
                    self.values.connection = CONNECTION_KEEPALIVE;
                } else if value.eq_ignore_ascii_case(b"upgrade") {
                    self.values.connection = CONNECTION_UPGRADE;
                }
            }
            _ => {}
        }

        self.emit(sink, Event::HeaderValue, at + start, len)?;
        self.move_to(State::HeaderName, advance)
    }

    fn headers(&mut self, at: usize, sink: &mut dyn EventSink) -> StepResult {
        let values = self.values;
        let chunked = values.has_flag(FLAG_HAS_CHUNKED_TRANSFER_ENCODING);

        if values.has_flag(FLAG_HAS_UPGRADE) && values.connection != CONNECTION_UPGRADE {
            return self.fail(
                sink,
                at,
                ERROR_MISSING_CONNECTION_UPGRADE,
                "Missing Connection header set to \"upgrade\" when using the Upgrade header",
            );
        }

        self.emit(sink, Event::Headers, at, 0)?;

        if values.has_flag(FLAG_HAS_UPGRADE) {
            self.emit(sink, Event::Upgrade, at, 0)?;
            return self.enter_tunnel();
        }
        if values.has_flag(FLAG_IS_CONNECT) {
            self.emit(sink, Event::Connect, at, 0)?;
            return self.enter_tunnel();
        }

        if values.message_type == MESSAGE_TYPE_REQUEST
            && (values.method == METHOD_GET || values.method == METHOD_HEAD)
            && values.content_length > 0
        {
            return self.fail(
                sink,
                at,
                ERROR_UNEXPECTED_CONTENT,
                "Unexpected content for the request (GET or HEAD)",
            );
        }

        if values.message_type == MESSAGE_TYPE_REQUEST {
            if values.has_content_length() {
                if values.content_length == 0 {
                    return self.complete_message(sink, at, 0);
                }
            } else if !chunked {
                return self.complete_message(sink, at, 0);
            }
        } else {
            let no_body = (values.status < 200 && values.status != 101)
                || values.method == METHOD_HEAD
                || values.has_flag(FLAG_SKIP_BODY);
            if no_body {
                return self.complete_message(sink, at, 0);
            }
            if values.content_length == 0 {
                if values.has_content_length() {
                    return self.complete_message(sink, at, 0);
                } else if !chunked {
                    return self.move_to(State::BodyWithNoLength, 0);
                }
            }
        }

        if values.content_length > 0 {
            return self.move_to(State::BodyViaContentLength, 0);
        }

        if values.has_trailers() && !chunked {
            return self.fail(
                sink,
                at,
                ERROR_UNTRAILERS,
                "Trailers are not allowed when not using chunked transfer encoding",
            );
        }

        self.move_to(State::ChunkLength, 0)
    }

    fn body_via_content_length(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        if rest.is_empty() {
            return Ok(Step::Suspend);
        }

        let expected = self.values.remaining_content_length;
        let available = rest.len() as u64;
        if available < expected {
            self.values.remaining_content_length -= available;
            self.emit(sink, Event::Data, at, rest.len())?;
            return Ok(Step::Advance(rest.len()));
        }

        let len = expected as usize;
        self.values.remaining_content_length = 0;
        self.emit(sink, Event::Data, at, len)?;
        self.emit(sink, Event::Body, at + len, 0)?;
        self.complete_message(sink, at + len, len)
    }

    fn body_with_no_length(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        if rest.is_empty() {
            return Ok(Step::Suspend);
        }
        self.emit(sink, Event::Data, at, rest.len())?;
        Ok(Step::Advance(rest.len()))
    }

    fn set_chunk_size(&mut self, size: u64) {
        self.values.chunk_size = size;
        self.values.remaining_chunk_size = size;
    }

    fn chunk_length(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let digits = span_of(rest, |c| c.is_ascii_hexdigit());
        let Some(&next) = rest.get(digits) else {
            return Ok(Step::Suspend);
        };
        if digits == 0 {
            return self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid chunk length character");
        }
        let Some(size) = parse_hex(&rest[..digits]) else {
            return self.fail(sink, at, ERROR_INVALID_CHUNK_SIZE, "Invalid chunk length");
        };

        match (next, crlf_at(rest, digits)) {
            (b';', _) => {
                self.set_chunk_size(size);
                self.emit(sink, Event::ChunkLength, at, digits)?;
                self.move_to(State::ChunkExtensionName, digits + 1)
            }
            (_, Prefix::Match) => {
                self.set_chunk_size(size);
                self.emit(sink, Event::ChunkLength, at, digits)?;
                self.continue_without_data = true;
                self.move_to(State::ChunkData, digits + 2)
            }
            (_, Prefix::Partial) => Ok(Step::Suspend),
            (_, Prefix::Mismatch) => {
                self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid chunk length character")
            }
        }
    }

    /// Dispatches on what follows an extension name or value at `after`.
    fn after_extension(
        &mut self,
        rest: &[u8],
        at: usize,
        sink: &mut dyn EventSink,
        event: Event,
        span: (usize, usize),
        after: usize,
    ) -> StepResult {
        let Some(&next) = rest.get(after) else {
            return Ok(Step::Suspend);
        };

        match (next, crlf_at(rest, after)) {
            (b'=', _) if event == Event::ChunkExtensionName => {
                self.emit(sink, event, at + span.0, span.1)?;
                self.move_to(State::ChunkExtensionValue, after + 1)
            }
            (b';', _) => {
                self.emit(sink, event, at + span.0, span.1)?;
                self.move_to(State::ChunkExtensionName, after + 1)
            }
            (_, Prefix::Match) => {
                self.emit(sink, event, at + span.0, span.1)?;
                self.continue_without_data = true;
                self.move_to(State::ChunkData, after + 2)
            }
            (_, Prefix::Partial) => Ok(Step::Suspend),
            (_, Prefix::Mismatch) => {
                self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid chunk extension character")
            }
        }
    }

    fn chunk_extension_name(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let name = span_of(rest, is_token);
        if name == 0 && !rest.is_empty() {
            return self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid chunk extension name character");
        }
        self.after_extension(rest, at, sink, Event::ChunkExtensionName, (0, name), name)
    }

    fn chunk_extension_value(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        let Some(&first) = rest.first() else {
            return Ok(Step::Suspend);
        };

        if first != b'"' {
            let value = span_of(rest, is_token);
            if value == 0 {
                return self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid chunk extension value character");
            }
            return self.after_extension(rest, at, sink, Event::ChunkExtensionValue, (0, value), value);
        }

        let mut i = 1;
        while i < rest.len() {
            match rest[i] {
                b'\\' => i += 2,
                b'"' => {
                    return self.after_extension(rest, at, sink, Event::ChunkExtensionValue, (1, i - 1), i + 1)
                }
                c if is_value(c) => i += 1,
                _ => {
                    return self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid chunk extension quoted value")
                }
            }
        }
        Ok(Step::Suspend)
    }

    fn chunk_data(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        if self.values.chunk_size == 0 {
            self.emit(sink, Event::Body, at, 0)?;
            let next = if self.values.has_trailers() {
                State::TrailerName
            } else {
                State::CrlfAfterLastChunk
            };
            return self.move_to(next, 0);
        }

        if rest.is_empty() {
            return Ok(Step::Suspend);
        }

        let expected = self.values.remaining_chunk_size;
        let available = rest.len() as u64;
        if available < expected {
            self.values.remaining_chunk_size -= available;
            self.emit(sink, Event::Data, at, rest.len())?;
            return Ok(Step::Advance(rest.len()));
        }

        let len = expected as usize;
        self.values.remaining_chunk_size = 0;
        self.emit(sink, Event::Data, at, len)?;
        self.move_to(State::ChunkEnd, len)
    }

    fn chunk_end(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match prefix(rest, b"\r\n") {
            Prefix::Match => {
                self.set_chunk_size(0);
                self.move_to(State::ChunkLength, 2)
            }
            Prefix::Partial => Ok(Step::Suspend),
            Prefix::Mismatch => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Unexpected character after chunk data"),
        }
    }

    fn crlf_after_last_chunk(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match prefix(rest, b"\r\n") {
            Prefix::Match => self.complete_message(sink, at + 2, 2),
            Prefix::Partial => Ok(Step::Suspend),
            Prefix::Mismatch => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Expected CRLF after the last chunk"),
        }
    }

    fn trailer_name(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match prefix(rest, b"\r\n") {
            Prefix::Match => {
                self.emit(sink, Event::Trailers, at, 0)?;
                return self.complete_message(sink, at + 2, 2);
            }
            Prefix::Partial => return Ok(Step::Suspend),
            Prefix::Mismatch => {}
        }

        let token = span_of(rest, is_token);
        match rest.get(token) {
            None => Ok(Step::Suspend),
            Some(b':') if token > 0 => {
                self.emit(sink, Event::TrailerName, at, token)?;
                self.move_to(State::TrailerValue, token + 1)
            }
            _ => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid trailer field name character"),
        }
    }

    fn trailer_value(&mut self, rest: &[u8], at: usize, sink: &mut dyn EventSink) -> StepResult {
        match header_line(rest) {
            Line::Complete { start, len, advance } if len > 0 => {
                self.emit(sink, Event::TrailerValue, at + start, len)?;
                self.move_to(State::TrailerName, advance)
            }
            Line::Incomplete => Ok(Step::Suspend),
            _ => self.fail(sink, at, ERROR_UNEXPECTED_CHARACTER, "Invalid trailer field value character"),
        }
    }
}

// Generated by wasm-parser-bridge. Do not edit.
//
// Debug profile: true

#![allow(dead_code)]

use wasm_parser_bridge::bridge::{
    Bridge, BridgeOptions, CallbackContext, CallbackFault, CallbackResult, DispatchMode,
    OffsetRecord, RawValue, Values, WasmGuest,
};
use wasm_parser_bridge::errors::BridgeResult;

pub const VERSION: &str = "1.0.0";

/// Function exports of the guest this module was generated from.
pub const GUEST_EXPORTS: [&str; 16] = [
    "create",
    "destroy",
    "parse",
    "alloc",
    "dealloc",
    "fail",
    "get_values",
    "get_offsets",
    "get_error_description_raw",
    "get_position",
    "get_mode",
    "get_content_length",
    "is_paused",
    "set_mode",
    "set_content_length",
    "reset",
];

pub mod constants {
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
    pub const METHOD_ACL: u32 = 0;
    pub const METHOD_BIND: u32 = 1;
    pub const METHOD_CHECKOUT: u32 = 2;
    pub const METHOD_CONNECT: u32 = 3;
    pub const METHOD_COPY: u32 = 4;
    pub const METHOD_DELETE: u32 = 5;
    pub const METHOD_GET: u32 = 6;
    pub const METHOD_HEAD: u32 = 7;
    pub const METHOD_LINK: u32 = 8;
    pub const METHOD_LOCK: u32 = 9;
    pub const METHOD_M_SEARCH: u32 = 10;
    pub const METHOD_MERGE: u32 = 11;
    pub const METHOD_MKACTIVITY: u32 = 12;
    pub const METHOD_MKCALENDAR: u32 = 13;
    pub const METHOD_MKCOL: u32 = 14;
    pub const METHOD_MOVE: u32 = 15;
    pub const METHOD_NOTIFY: u32 = 16;
    pub const METHOD_OPTIONS: u32 = 17;
    pub const METHOD_PATCH: u32 = 18;
    pub const METHOD_POST: u32 = 19;
    pub const METHOD_PRI: u32 = 20;
    pub const METHOD_PROPFIND: u32 = 21;
    pub const METHOD_PROPPATCH: u32 = 22;
    pub const METHOD_PURGE: u32 = 23;
    pub const METHOD_PUT: u32 = 24;
    pub const METHOD_QUERY: u32 = 25;
    pub const METHOD_REBIND: u32 = 26;
    pub const METHOD_REPORT: u32 = 27;
    pub const METHOD_SEARCH: u32 = 28;
    pub const METHOD_SOURCE: u32 = 29;
    pub const METHOD_SUBSCRIBE: u32 = 30;
    pub const METHOD_TRACE: u32 = 31;
    pub const METHOD_UNBIND: u32 = 32;
    pub const METHOD_UNLINK: u32 = 33;
    pub const METHOD_UNLOCK: u32 = 34;
    pub const METHOD_UNSUBSCRIBE: u32 = 35;
    pub const CONNECTION_KEEPALIVE: u32 = 0;
    pub const CONNECTION_CLOSE: u32 = 1;
    pub const CONNECTION_UPGRADE: u32 = 2;
    pub const MESSAGE_TYPE_AUTODETECT: u32 = 0;
    pub const MESSAGE_TYPE_REQUEST: u32 = 1;
    pub const MESSAGE_TYPE_RESPONSE: u32 = 2;
    pub const CALLBACK_ON_ERROR: u32 = 0;
    pub const CALLBACK_ON_FINISH: u32 = 1;
    pub const CALLBACK_ON_MESSAGE_START: u32 = 2;
    pub const CALLBACK_ON_MESSAGE_COMPLETE: u32 = 3;
    pub const CALLBACK_ON_REQUEST: u32 = 4;
    pub const CALLBACK_ON_RESPONSE: u32 = 5;
    pub const CALLBACK_ON_RESET: u32 = 6;
    pub const CALLBACK_ON_METHOD: u32 = 7;
    pub const CALLBACK_ON_URL: u32 = 8;
    pub const CALLBACK_ON_PROTOCOL: u32 = 9;
    pub const CALLBACK_ON_VERSION: u32 = 10;
    pub const CALLBACK_ON_STATUS: u32 = 11;
    pub const CALLBACK_ON_REASON: u32 = 12;
    pub const CALLBACK_ON_HEADER_NAME: u32 = 13;
    pub const CALLBACK_ON_HEADER_VALUE: u32 = 14;
    pub const CALLBACK_ON_HEADERS: u32 = 15;
    pub const CALLBACK_ON_CONNECT: u32 = 16;
    pub const CALLBACK_ON_UPGRADE: u32 = 17;
    pub const CALLBACK_ON_CHUNK_LENGTH: u32 = 18;
    pub const CALLBACK_ON_CHUNK_EXTENSION_NAME: u32 = 19;
    pub const CALLBACK_ON_CHUNK_EXTENSION_VALUE: u32 = 20;
    pub const CALLBACK_ON_DATA: u32 = 21;
    pub const CALLBACK_ON_BODY: u32 = 22;
    pub const CALLBACK_ON_TRAILER_NAME: u32 = 23;
    pub const CALLBACK_ON_TRAILER_VALUE: u32 = 24;
    pub const CALLBACK_ON_TRAILERS: u32 = 25;
    pub const STATE_START: u32 = 0;
    pub const STATE_FINISH: u32 = 1;
    pub const STATE_ERROR: u32 = 2;
    pub const STATE_MESSAGE: u32 = 3;
    pub const STATE_REQUEST: u32 = 4;
    pub const STATE_REQUEST_METHOD: u32 = 5;
    pub const STATE_REQUEST_URL: u32 = 6;
    pub const STATE_REQUEST_PROTOCOL: u32 = 7;
    pub const STATE_REQUEST_VERSION: u32 = 8;
    pub const STATE_RESPONSE: u32 = 9;
    pub const STATE_RESPONSE_VERSION: u32 = 10;
    pub const STATE_RESPONSE_STATUS: u32 = 11;
    pub const STATE_RESPONSE_REASON: u32 = 12;
    pub const STATE_HEADER_NAME: u32 = 13;
    pub const STATE_HEADER_TRANSFER_ENCODING: u32 = 14;
    pub const STATE_HEADER_CONTENT_LENGTH: u32 = 15;
    pub const STATE_HEADER_CONNECTION: u32 = 16;
    pub const STATE_HEADER_VALUE: u32 = 17;
    pub const STATE_HEADERS: u32 = 18;
    pub const STATE_TUNNEL: u32 = 19;
    pub const STATE_BODY_VIA_CONTENT_LENGTH: u32 = 20;
    pub const STATE_BODY_WITH_NO_LENGTH: u32 = 21;
    pub const STATE_CHUNK_LENGTH: u32 = 22;
    pub const STATE_CHUNK_EXTENSION_NAME: u32 = 23;
    pub const STATE_CHUNK_EXTENSION_VALUE: u32 = 24;
    pub const STATE_CHUNK_DATA: u32 = 25;
    pub const STATE_CHUNK_END: u32 = 26;
    pub const STATE_CRLF_AFTER_LAST_CHUNK: u32 = 27;
    pub const STATE_TRAILER_NAME: u32 = 28;
    pub const STATE_TRAILER_VALUE: u32 = 29;
    pub const OFFSET_POSITION: u32 = 0;
    pub const OFFSET_STATE: u32 = 4;
    pub const OFFSET_ERROR_CODE: u32 = 8;
    pub const OFFSET_MESSAGE_TYPE: u32 = 12;
    pub const OFFSET_METHOD: u32 = 16;
    pub const OFFSET_STATUS: u32 = 20;
    pub const OFFSET_VERSION_MAJOR: u32 = 24;
    pub const OFFSET_VERSION_MINOR: u32 = 28;
    pub const OFFSET_CONNECTION: u32 = 32;
    pub const OFFSET_MODE: u32 = 36;
    pub const OFFSET_FLAGS: u32 = 40;
    pub const OFFSET_CONTENT_LENGTH: u32 = 48;
    pub const OFFSET_CHUNK_SIZE: u32 = 56;
    pub const OFFSET_REMAINING_CONTENT_LENGTH: u32 = 64;
    pub const OFFSET_REMAINING_CHUNK_SIZE: u32 = 72;
    pub const OFFSET_PARSED: u32 = 80;
}

pub mod errors {
    pub const NONE: u32 = 0;
    pub const UNEXPECTED_DATA: u32 = 1;
    pub const UNEXPECTED_EOF: u32 = 2;
    pub const CALLBACK_ERROR: u32 = 3;
    pub const UNEXPECTED_CHARACTER: u32 = 4;
    pub const UNEXPECTED_CONTENT_LENGTH: u32 = 5;
    pub const UNEXPECTED_TRANSFER_ENCODING: u32 = 6;
    pub const UNEXPECTED_CONTENT: u32 = 7;
    pub const UNTRAILERS: u32 = 8;
    pub const INVALID_VERSION: u32 = 9;
    pub const INVALID_STATUS: u32 = 10;
    pub const INVALID_CONTENT_LENGTH: u32 = 11;
    pub const INVALID_TRANSFER_ENCODING: u32 = 12;
    pub const INVALID_CHUNK_SIZE: u32 = 13;
    pub const MISSING_CONNECTION_UPGRADE: u32 = 14;
    pub const UNSUPPORTED_HTTP_VERSION: u32 = 15;

    pub const ALL: [(&str, u32); 16] = [
        ("NONE", 0),
        ("UNEXPECTED_DATA", 1),
        ("UNEXPECTED_EOF", 2),
        ("CALLBACK_ERROR", 3),
        ("UNEXPECTED_CHARACTER", 4),
        ("UNEXPECTED_CONTENT_LENGTH", 5),
        ("UNEXPECTED_TRANSFER_ENCODING", 6),
        ("UNEXPECTED_CONTENT", 7),
        ("UNTRAILERS", 8),
        ("INVALID_VERSION", 9),
        ("INVALID_STATUS", 10),
        ("INVALID_CONTENT_LENGTH", 11),
        ("INVALID_TRANSFER_ENCODING", 12),
        ("INVALID_CHUNK_SIZE", 13),
        ("MISSING_CONNECTION_UPGRADE", 14),
        ("UNSUPPORTED_HTTP_VERSION", 15),
    ];

    pub fn name_of(value: u32) -> Option<&'static str> {
        match value {
            0 => Some("NONE"),
            1 => Some("UNEXPECTED_DATA"),
            2 => Some("UNEXPECTED_EOF"),
            3 => Some("CALLBACK_ERROR"),
            4 => Some("UNEXPECTED_CHARACTER"),
            5 => Some("UNEXPECTED_CONTENT_LENGTH"),
            6 => Some("UNEXPECTED_TRANSFER_ENCODING"),
            7 => Some("UNEXPECTED_CONTENT"),
            8 => Some("UNTRAILERS"),
            9 => Some("INVALID_VERSION"),
            10 => Some("INVALID_STATUS"),
            11 => Some("INVALID_CONTENT_LENGTH"),
            12 => Some("INVALID_TRANSFER_ENCODING"),
            13 => Some("INVALID_CHUNK_SIZE"),
            14 => Some("MISSING_CONNECTION_UPGRADE"),
            15 => Some("UNSUPPORTED_HTTP_VERSION"),
            _ => None,
        }
    }

    pub fn value_of(name: &str) -> Option<u32> {
        match name {
            "NONE" => Some(NONE),
            "UNEXPECTED_DATA" => Some(UNEXPECTED_DATA),
            "UNEXPECTED_EOF" => Some(UNEXPECTED_EOF),
            "CALLBACK_ERROR" => Some(CALLBACK_ERROR),
            "UNEXPECTED_CHARACTER" => Some(UNEXPECTED_CHARACTER),
            "UNEXPECTED_CONTENT_LENGTH" => Some(UNEXPECTED_CONTENT_LENGTH),
            "UNEXPECTED_TRANSFER_ENCODING" => Some(UNEXPECTED_TRANSFER_ENCODING),
            "UNEXPECTED_CONTENT" => Some(UNEXPECTED_CONTENT),
            "UNTRAILERS" => Some(UNTRAILERS),
            "INVALID_VERSION" => Some(INVALID_VERSION),
            "INVALID_STATUS" => Some(INVALID_STATUS),
            "INVALID_CONTENT_LENGTH" => Some(INVALID_CONTENT_LENGTH),
            "INVALID_TRANSFER_ENCODING" => Some(INVALID_TRANSFER_ENCODING),
            "INVALID_CHUNK_SIZE" => Some(INVALID_CHUNK_SIZE),
            "MISSING_CONNECTION_UPGRADE" => Some(MISSING_CONNECTION_UPGRADE),
            "UNSUPPORTED_HTTP_VERSION" => Some(UNSUPPORTED_HTTP_VERSION),
            _ => None,
        }
    }
}

pub mod states {
    pub const START: u32 = 0;
    pub const FINISH: u32 = 1;
    pub const ERROR: u32 = 2;
    pub const MESSAGE: u32 = 3;
    pub const REQUEST: u32 = 4;
    pub const REQUEST_METHOD: u32 = 5;
    pub const REQUEST_URL: u32 = 6;
    pub const REQUEST_PROTOCOL: u32 = 7;
    pub const REQUEST_VERSION: u32 = 8;
    pub const RESPONSE: u32 = 9;
    pub const RESPONSE_VERSION: u32 = 10;
    pub const RESPONSE_STATUS: u32 = 11;
    pub const RESPONSE_REASON: u32 = 12;
    pub const HEADER_NAME: u32 = 13;
    pub const HEADER_TRANSFER_ENCODING: u32 = 14;
    pub const HEADER_CONTENT_LENGTH: u32 = 15;
    pub const HEADER_CONNECTION: u32 = 16;
    pub const HEADER_VALUE: u32 = 17;
    pub const HEADERS: u32 = 18;
    pub const TUNNEL: u32 = 19;
    pub const BODY_VIA_CONTENT_LENGTH: u32 = 20;
    pub const BODY_WITH_NO_LENGTH: u32 = 21;
    pub const CHUNK_LENGTH: u32 = 22;
    pub const CHUNK_EXTENSION_NAME: u32 = 23;
    pub const CHUNK_EXTENSION_VALUE: u32 = 24;
    pub const CHUNK_DATA: u32 = 25;
    pub const CHUNK_END: u32 = 26;
    pub const CRLF_AFTER_LAST_CHUNK: u32 = 27;
    pub const TRAILER_NAME: u32 = 28;
    pub const TRAILER_VALUE: u32 = 29;

    pub const ALL: [(&str, u32); 30] = [
        ("START", 0),
        ("FINISH", 1),
        ("ERROR", 2),
        ("MESSAGE", 3),
        ("REQUEST", 4),
        ("REQUEST_METHOD", 5),
        ("REQUEST_URL", 6),
        ("REQUEST_PROTOCOL", 7),
        ("REQUEST_VERSION", 8),
        ("RESPONSE", 9),
        ("RESPONSE_VERSION", 10),
        ("RESPONSE_STATUS", 11),
        ("RESPONSE_REASON", 12),
        ("HEADER_NAME", 13),
        ("HEADER_TRANSFER_ENCODING", 14),
        ("HEADER_CONTENT_LENGTH", 15),
        ("HEADER_CONNECTION", 16),
        ("HEADER_VALUE", 17),
        ("HEADERS", 18),
        ("TUNNEL", 19),
        ("BODY_VIA_CONTENT_LENGTH", 20),
        ("BODY_WITH_NO_LENGTH", 21),
        ("CHUNK_LENGTH", 22),
        ("CHUNK_EXTENSION_NAME", 23),
        ("CHUNK_EXTENSION_VALUE", 24),
        ("CHUNK_DATA", 25),
        ("CHUNK_END", 26),
        ("CRLF_AFTER_LAST_CHUNK", 27),
        ("TRAILER_NAME", 28),
        ("TRAILER_VALUE", 29),
    ];

    pub fn name_of(value: u32) -> Option<&'static str> {
        match value {
            0 => Some("START"),
            1 => Some("FINISH"),
            2 => Some("ERROR"),
            3 => Some("MESSAGE"),
            4 => Some("REQUEST"),
            5 => Some("REQUEST_METHOD"),
            6 => Some("REQUEST_URL"),
            7 => Some("REQUEST_PROTOCOL"),
            8 => Some("REQUEST_VERSION"),
            9 => Some("RESPONSE"),
            10 => Some("RESPONSE_VERSION"),
            11 => Some("RESPONSE_STATUS"),
            12 => Some("RESPONSE_REASON"),
            13 => Some("HEADER_NAME"),
            14 => Some("HEADER_TRANSFER_ENCODING"),
            15 => Some("HEADER_CONTENT_LENGTH"),
            16 => Some("HEADER_CONNECTION"),
            17 => Some("HEADER_VALUE"),
            18 => Some("HEADERS"),
            19 => Some("TUNNEL"),
            20 => Some("BODY_VIA_CONTENT_LENGTH"),
            21 => Some("BODY_WITH_NO_LENGTH"),
            22 => Some("CHUNK_LENGTH"),
            23 => Some("CHUNK_EXTENSION_NAME"),
            24 => Some("CHUNK_EXTENSION_VALUE"),
            25 => Some("CHUNK_DATA"),
            26 => Some("CHUNK_END"),
            27 => Some("CRLF_AFTER_LAST_CHUNK"),
            28 => Some("TRAILER_NAME"),
            29 => Some("TRAILER_VALUE"),
            _ => None,
        }
    }

    pub fn value_of(name: &str) -> Option<u32> {
        match name {
            "START" => Some(START),
            "FINISH" => Some(FINISH),
            "ERROR" => Some(ERROR),
            "MESSAGE" => Some(MESSAGE),
            "REQUEST" => Some(REQUEST),
            "REQUEST_METHOD" => Some(REQUEST_METHOD),
            "REQUEST_URL" => Some(REQUEST_URL),
            "REQUEST_PROTOCOL" => Some(REQUEST_PROTOCOL),
            "REQUEST_VERSION" => Some(REQUEST_VERSION),
            "RESPONSE" => Some(RESPONSE),
            "RESPONSE_VERSION" => Some(RESPONSE_VERSION),
            "RESPONSE_STATUS" => Some(RESPONSE_STATUS),
            "RESPONSE_REASON" => Some(RESPONSE_REASON),
            "HEADER_NAME" => Some(HEADER_NAME),
            "HEADER_TRANSFER_ENCODING" => Some(HEADER_TRANSFER_ENCODING),
            "HEADER_CONTENT_LENGTH" => Some(HEADER_CONTENT_LENGTH),
            "HEADER_CONNECTION" => Some(HEADER_CONNECTION),
            "HEADER_VALUE" => Some(HEADER_VALUE),
            "HEADERS" => Some(HEADERS),
            "TUNNEL" => Some(TUNNEL),
            "BODY_VIA_CONTENT_LENGTH" => Some(BODY_VIA_CONTENT_LENGTH),
            "BODY_WITH_NO_LENGTH" => Some(BODY_WITH_NO_LENGTH),
            "CHUNK_LENGTH" => Some(CHUNK_LENGTH),
            "CHUNK_EXTENSION_NAME" => Some(CHUNK_EXTENSION_NAME),
            "CHUNK_EXTENSION_VALUE" => Some(CHUNK_EXTENSION_VALUE),
            "CHUNK_DATA" => Some(CHUNK_DATA),
            "CHUNK_END" => Some(CHUNK_END),
            "CRLF_AFTER_LAST_CHUNK" => Some(CRLF_AFTER_LAST_CHUNK),
            "TRAILER_NAME" => Some(TRAILER_NAME),
            "TRAILER_VALUE" => Some(TRAILER_VALUE),
            _ => None,
        }
    }
}

pub mod methods {
    pub const ACL: u32 = 0;
    pub const BIND: u32 = 1;
    pub const CHECKOUT: u32 = 2;
    pub const CONNECT: u32 = 3;
    pub const COPY: u32 = 4;
    pub const DELETE: u32 = 5;
    pub const GET: u32 = 6;
    pub const HEAD: u32 = 7;
    pub const LINK: u32 = 8;
    pub const LOCK: u32 = 9;
    pub const M_SEARCH: u32 = 10;
    pub const MERGE: u32 = 11;
    pub const MKACTIVITY: u32 = 12;
    pub const MKCALENDAR: u32 = 13;
    pub const MKCOL: u32 = 14;
    pub const MOVE: u32 = 15;
    pub const NOTIFY: u32 = 16;
    pub const OPTIONS: u32 = 17;
    pub const PATCH: u32 = 18;
    pub const POST: u32 = 19;
    pub const PRI: u32 = 20;
    pub const PROPFIND: u32 = 21;
    pub const PROPPATCH: u32 = 22;
    pub const PURGE: u32 = 23;
    pub const PUT: u32 = 24;
    pub const QUERY: u32 = 25;
    pub const REBIND: u32 = 26;
    pub const REPORT: u32 = 27;
    pub const SEARCH: u32 = 28;
    pub const SOURCE: u32 = 29;
    pub const SUBSCRIBE: u32 = 30;
    pub const TRACE: u32 = 31;
    pub const UNBIND: u32 = 32;
    pub const UNLINK: u32 = 33;
    pub const UNLOCK: u32 = 34;
    pub const UNSUBSCRIBE: u32 = 35;

    pub const ALL: [(&str, u32); 36] = [
        ("ACL", 0),
        ("BIND", 1),
        ("CHECKOUT", 2),
        ("CONNECT", 3),
        ("COPY", 4),
        ("DELETE", 5),
        ("GET", 6),
        ("HEAD", 7),
        ("LINK", 8),
        ("LOCK", 9),
        ("M_SEARCH", 10),
        ("MERGE", 11),
        ("MKACTIVITY", 12),
        ("MKCALENDAR", 13),
        ("MKCOL", 14),
        ("MOVE", 15),
        ("NOTIFY", 16),
        ("OPTIONS", 17),
        ("PATCH", 18),
        ("POST", 19),
        ("PRI", 20),
        ("PROPFIND", 21),
        ("PROPPATCH", 22),
        ("PURGE", 23),
        ("PUT", 24),
        ("QUERY", 25),
        ("REBIND", 26),
        ("REPORT", 27),
        ("SEARCH", 28),
        ("SOURCE", 29),
        ("SUBSCRIBE", 30),
        ("TRACE", 31),
        ("UNBIND", 32),
        ("UNLINK", 33),
        ("UNLOCK", 34),
        ("UNSUBSCRIBE", 35),
    ];

    pub fn name_of(value: u32) -> Option<&'static str> {
        match value {
            0 => Some("ACL"),
            1 => Some("BIND"),
            2 => Some("CHECKOUT"),
            3 => Some("CONNECT"),
            4 => Some("COPY"),
            5 => Some("DELETE"),
            6 => Some("GET"),
            7 => Some("HEAD"),
            8 => Some("LINK"),
            9 => Some("LOCK"),
            10 => Some("M_SEARCH"),
            11 => Some("MERGE"),
            12 => Some("MKACTIVITY"),
            13 => Some("MKCALENDAR"),
            14 => Some("MKCOL"),
            15 => Some("MOVE"),
            16 => Some("NOTIFY"),
            17 => Some("OPTIONS"),
            18 => Some("PATCH"),
            19 => Some("POST"),
            20 => Some("PRI"),
            21 => Some("PROPFIND"),
            22 => Some("PROPPATCH"),
            23 => Some("PURGE"),
            24 => Some("PUT"),
            25 => Some("QUERY"),
            26 => Some("REBIND"),
            27 => Some("REPORT"),
            28 => Some("SEARCH"),
            29 => Some("SOURCE"),
            30 => Some("SUBSCRIBE"),
            31 => Some("TRACE"),
            32 => Some("UNBIND"),
            33 => Some("UNLINK"),
            34 => Some("UNLOCK"),
            35 => Some("UNSUBSCRIBE"),
            _ => None,
        }
    }

    pub fn value_of(name: &str) -> Option<u32> {
        match name {
            "ACL" => Some(ACL),
            "BIND" => Some(BIND),
            "CHECKOUT" => Some(CHECKOUT),
            "CONNECT" => Some(CONNECT),
            "COPY" => Some(COPY),
            "DELETE" => Some(DELETE),
            "GET" => Some(GET),
            "HEAD" => Some(HEAD),
            "LINK" => Some(LINK),
            "LOCK" => Some(LOCK),
            "M_SEARCH" => Some(M_SEARCH),
            "MERGE" => Some(MERGE),
            "MKACTIVITY" => Some(MKACTIVITY),
            "MKCALENDAR" => Some(MKCALENDAR),
            "MKCOL" => Some(MKCOL),
            "MOVE" => Some(MOVE),
            "NOTIFY" => Some(NOTIFY),
            "OPTIONS" => Some(OPTIONS),
            "PATCH" => Some(PATCH),
            "POST" => Some(POST),
            "PRI" => Some(PRI),
            "PROPFIND" => Some(PROPFIND),
            "PROPPATCH" => Some(PROPPATCH),
            "PURGE" => Some(PURGE),
            "PUT" => Some(PUT),
            "QUERY" => Some(QUERY),
            "REBIND" => Some(REBIND),
            "REPORT" => Some(REPORT),
            "SEARCH" => Some(SEARCH),
            "SOURCE" => Some(SOURCE),
            "SUBSCRIBE" => Some(SUBSCRIBE),
            "TRACE" => Some(TRACE),
            "UNBIND" => Some(UNBIND),
            "UNLINK" => Some(UNLINK),
            "UNLOCK" => Some(UNLOCK),
            "UNSUBSCRIBE" => Some(UNSUBSCRIBE),
            _ => None,
        }
    }
}

pub mod callbacks {
    pub const ON_ERROR: u32 = 0;
    pub const ON_FINISH: u32 = 1;
    pub const ON_MESSAGE_START: u32 = 2;
    pub const ON_MESSAGE_COMPLETE: u32 = 3;
    pub const ON_REQUEST: u32 = 4;
    pub const ON_RESPONSE: u32 = 5;
    pub const ON_RESET: u32 = 6;
    pub const ON_METHOD: u32 = 7;
    pub const ON_URL: u32 = 8;
    pub const ON_PROTOCOL: u32 = 9;
    pub const ON_VERSION: u32 = 10;
    pub const ON_STATUS: u32 = 11;
    pub const ON_REASON: u32 = 12;
    pub const ON_HEADER_NAME: u32 = 13;
    pub const ON_HEADER_VALUE: u32 = 14;
    pub const ON_HEADERS: u32 = 15;
    pub const ON_CONNECT: u32 = 16;
    pub const ON_UPGRADE: u32 = 17;
    pub const ON_CHUNK_LENGTH: u32 = 18;
    pub const ON_CHUNK_EXTENSION_NAME: u32 = 19;
    pub const ON_CHUNK_EXTENSION_VALUE: u32 = 20;
    pub const ON_DATA: u32 = 21;
    pub const ON_BODY: u32 = 22;
    pub const ON_TRAILER_NAME: u32 = 23;
    pub const ON_TRAILER_VALUE: u32 = 24;
    pub const ON_TRAILERS: u32 = 25;

    pub const ALL: [(&str, u32); 26] = [
        ("ON_ERROR", 0),
        ("ON_FINISH", 1),
        ("ON_MESSAGE_START", 2),
        ("ON_MESSAGE_COMPLETE", 3),
        ("ON_REQUEST", 4),
        ("ON_RESPONSE", 5),
        ("ON_RESET", 6),
        ("ON_METHOD", 7),
        ("ON_URL", 8),
        ("ON_PROTOCOL", 9),
        ("ON_VERSION", 10),
        ("ON_STATUS", 11),
        ("ON_REASON", 12),
        ("ON_HEADER_NAME", 13),
        ("ON_HEADER_VALUE", 14),
        ("ON_HEADERS", 15),
        ("ON_CONNECT", 16),
        ("ON_UPGRADE", 17),
        ("ON_CHUNK_LENGTH", 18),
        ("ON_CHUNK_EXTENSION_NAME", 19),
        ("ON_CHUNK_EXTENSION_VALUE", 20),
        ("ON_DATA", 21),
        ("ON_BODY", 22),
        ("ON_TRAILER_NAME", 23),
        ("ON_TRAILER_VALUE", 24),
        ("ON_TRAILERS", 25),
    ];

    pub fn name_of(value: u32) -> Option<&'static str> {
        match value {
            0 => Some("ON_ERROR"),
            1 => Some("ON_FINISH"),
            2 => Some("ON_MESSAGE_START"),
            3 => Some("ON_MESSAGE_COMPLETE"),
            4 => Some("ON_REQUEST"),
            5 => Some("ON_RESPONSE"),
            6 => Some("ON_RESET"),
            7 => Some("ON_METHOD"),
            8 => Some("ON_URL"),
            9 => Some("ON_PROTOCOL"),
            10 => Some("ON_VERSION"),
            11 => Some("ON_STATUS"),
            12 => Some("ON_REASON"),
            13 => Some("ON_HEADER_NAME"),
            14 => Some("ON_HEADER_VALUE"),
            15 => Some("ON_HEADERS"),
            16 => Some("ON_CONNECT"),
            17 => Some("ON_UPGRADE"),
            18 => Some("ON_CHUNK_LENGTH"),
            19 => Some("ON_CHUNK_EXTENSION_NAME"),
            20 => Some("ON_CHUNK_EXTENSION_VALUE"),
            21 => Some("ON_DATA"),
            22 => Some("ON_BODY"),
            23 => Some("ON_TRAILER_NAME"),
            24 => Some("ON_TRAILER_VALUE"),
            25 => Some("ON_TRAILERS"),
            _ => None,
        }
    }

    pub fn value_of(name: &str) -> Option<u32> {
        match name {
            "ON_ERROR" => Some(ON_ERROR),
            "ON_FINISH" => Some(ON_FINISH),
            "ON_MESSAGE_START" => Some(ON_MESSAGE_START),
            "ON_MESSAGE_COMPLETE" => Some(ON_MESSAGE_COMPLETE),
            "ON_REQUEST" => Some(ON_REQUEST),
            "ON_RESPONSE" => Some(ON_RESPONSE),
            "ON_RESET" => Some(ON_RESET),
            "ON_METHOD" => Some(ON_METHOD),
            "ON_URL" => Some(ON_URL),
            "ON_PROTOCOL" => Some(ON_PROTOCOL),
            "ON_VERSION" => Some(ON_VERSION),
            "ON_STATUS" => Some(ON_STATUS),
            "ON_REASON" => Some(ON_REASON),
            "ON_HEADER_NAME" => Some(ON_HEADER_NAME),
            "ON_HEADER_VALUE" => Some(ON_HEADER_VALUE),
            "ON_HEADERS" => Some(ON_HEADERS),
            "ON_CONNECT" => Some(ON_CONNECT),
            "ON_UPGRADE" => Some(ON_UPGRADE),
            "ON_CHUNK_LENGTH" => Some(ON_CHUNK_LENGTH),
            "ON_CHUNK_EXTENSION_NAME" => Some(ON_CHUNK_EXTENSION_NAME),
            "ON_CHUNK_EXTENSION_VALUE" => Some(ON_CHUNK_EXTENSION_VALUE),
            "ON_DATA" => Some(ON_DATA),
            "ON_BODY" => Some(ON_BODY),
            "ON_TRAILER_NAME" => Some(ON_TRAILER_NAME),
            "ON_TRAILER_VALUE" => Some(ON_TRAILER_VALUE),
            "ON_TRAILERS" => Some(ON_TRAILERS),
            _ => None,
        }
    }
}

pub mod message_types {
    pub const AUTODETECT: u32 = 0;
    pub const REQUEST: u32 = 1;
    pub const RESPONSE: u32 = 2;

    pub const ALL: [(&str, u32); 3] = [
        ("AUTODETECT", 0),
        ("REQUEST", 1),
        ("RESPONSE", 2),
    ];

    pub fn name_of(value: u32) -> Option<&'static str> {
        match value {
            0 => Some("AUTODETECT"),
            1 => Some("REQUEST"),
            2 => Some("RESPONSE"),
            _ => None,
        }
    }

    pub fn value_of(name: &str) -> Option<u32> {
        match name {
            "AUTODETECT" => Some(AUTODETECT),
            "REQUEST" => Some(REQUEST),
            "RESPONSE" => Some(RESPONSE),
            _ => None,
        }
    }
}

pub mod connections {
    pub const KEEPALIVE: u32 = 0;
    pub const CLOSE: u32 = 1;
    pub const UPGRADE: u32 = 2;

    pub const ALL: [(&str, u32); 3] = [
        ("KEEPALIVE", 0),
        ("CLOSE", 1),
        ("UPGRADE", 2),
    ];

    pub fn name_of(value: u32) -> Option<&'static str> {
        match value {
            0 => Some("KEEPALIVE"),
            1 => Some("CLOSE"),
            2 => Some("UPGRADE"),
            _ => None,
        }
    }

    pub fn value_of(name: &str) -> Option<u32> {
        match name {
            "KEEPALIVE" => Some(KEEPALIVE),
            "CLOSE" => Some(CLOSE),
            "UPGRADE" => Some(UPGRADE),
            _ => None,
        }
    }
}

pub mod offsets {
    pub const POSITION: u32 = 0;
    pub const STATE: u32 = 4;
    pub const ERROR_CODE: u32 = 8;
    pub const MESSAGE_TYPE: u32 = 12;
    pub const METHOD: u32 = 16;
    pub const STATUS: u32 = 20;
    pub const VERSION_MAJOR: u32 = 24;
    pub const VERSION_MINOR: u32 = 28;
    pub const CONNECTION: u32 = 32;
    pub const MODE: u32 = 36;
    pub const FLAGS: u32 = 40;
    pub const CONTENT_LENGTH: u32 = 48;
    pub const CHUNK_SIZE: u32 = 56;
    pub const REMAINING_CONTENT_LENGTH: u32 = 64;
    pub const REMAINING_CHUNK_SIZE: u32 = 72;
    pub const PARSED: u32 = 80;

    pub const ALL: [(&str, u32); 16] = [
        ("POSITION", 0),
        ("STATE", 4),
        ("ERROR_CODE", 8),
        ("MESSAGE_TYPE", 12),
        ("METHOD", 16),
        ("STATUS", 20),
        ("VERSION_MAJOR", 24),
        ("VERSION_MINOR", 28),
        ("CONNECTION", 32),
        ("MODE", 36),
        ("FLAGS", 40),
        ("CONTENT_LENGTH", 48),
        ("CHUNK_SIZE", 56),
        ("REMAINING_CONTENT_LENGTH", 64),
        ("REMAINING_CHUNK_SIZE", 72),
        ("PARSED", 80),
    ];

    pub fn name_of(value: u32) -> Option<&'static str> {
        match value {
            0 => Some("POSITION"),
            4 => Some("STATE"),
            8 => Some("ERROR_CODE"),
            12 => Some("MESSAGE_TYPE"),
            16 => Some("METHOD"),
            20 => Some("STATUS"),
            24 => Some("VERSION_MAJOR"),
            28 => Some("VERSION_MINOR"),
            32 => Some("CONNECTION"),
            36 => Some("MODE"),
            40 => Some("FLAGS"),
            48 => Some("CONTENT_LENGTH"),
            56 => Some("CHUNK_SIZE"),
            64 => Some("REMAINING_CONTENT_LENGTH"),
            72 => Some("REMAINING_CHUNK_SIZE"),
            80 => Some("PARSED"),
            _ => None,
        }
    }

    pub fn value_of(name: &str) -> Option<u32> {
        match name {
            "POSITION" => Some(POSITION),
            "STATE" => Some(STATE),
            "ERROR_CODE" => Some(ERROR_CODE),
            "MESSAGE_TYPE" => Some(MESSAGE_TYPE),
            "METHOD" => Some(METHOD),
            "STATUS" => Some(STATUS),
            "VERSION_MAJOR" => Some(VERSION_MAJOR),
            "VERSION_MINOR" => Some(VERSION_MINOR),
            "CONNECTION" => Some(CONNECTION),
            "MODE" => Some(MODE),
            "FLAGS" => Some(FLAGS),
            "CONTENT_LENGTH" => Some(CONTENT_LENGTH),
            "CHUNK_SIZE" => Some(CHUNK_SIZE),
            "REMAINING_CONTENT_LENGTH" => Some(REMAINING_CONTENT_LENGTH),
            "REMAINING_CHUNK_SIZE" => Some(REMAINING_CHUNK_SIZE),
            "PARSED" => Some(PARSED),
            _ => None,
        }
    }
}

/// Import bindings recorded at generation time.
pub fn imports() -> Vec<wasm_parser_bridge::bridge::ImportBinding> {
    use wasm_parser_bridge::bridge::{ImportBinding, ImportRole};

    vec![
        ImportBinding::new("env", "run_callback", ImportRole::Callback),
        ImportBinding::new("env", "logger", ImportRole::Logger),
        ImportBinding::new("wbg", "__wbg_now_5f1e2d3c", ImportRole::Passthrough("__now".to_string())),
    ]
}

pub const DEBUG: bool = true;

/// Guest error code reported when a host callback fails.
pub const CALLBACK_ERROR: u32 = 3;

pub type Handle = u32;

pub struct Binding {
    bridge: Bridge<WasmGuest>,
}

impl Binding {
    /// Instantiates the guest and wires the runtime bridge.
    pub fn load() -> BridgeResult<Self> {
        let bytes = load_guest_bytes()?;
        let guest = WasmGuest::new(&bytes, &imports())?;
        let options = BridgeOptions::new(DispatchMode::PerEvent, CALLBACK_ERROR);
        #[allow(unused_mut)]
        let mut bridge = Bridge::new(guest, options);
        bridge.enable_tracing_sink();
        Ok(Self { bridge })
    }

    pub fn bridge(&mut self) -> &mut Bridge<WasmGuest> {
        &mut self.bridge
    }

    pub fn create(&mut self) -> BridgeResult<Handle> {
        self.bridge.create()
    }

    pub fn destroy(&mut self, handle: Handle) -> BridgeResult<()> {
        self.bridge.destroy(handle)
    }

    /// Feeds `data`; returns the number of bytes consumed.
    pub fn parse(&mut self, handle: Handle, data: &[u8]) -> BridgeResult<u32> {
        self.bridge.parse(handle, data)
    }

    pub fn values(&mut self, handle: Handle) -> BridgeResult<Values> {
        self.bridge.values(handle)
    }

    pub fn drain(&mut self, handle: Handle) -> BridgeResult<Vec<OffsetRecord>> {
        self.bridge.drain(handle)
    }

    pub fn alloc(&mut self, len: u32) -> BridgeResult<u32> {
        self.bridge.alloc(len)
    }

    pub fn dealloc(&mut self, ptr: u32, len: u32) -> BridgeResult<()> {
        self.bridge.dealloc(ptr, len)
    }

    pub fn fail(&mut self, handle: Handle, code: u32, description: &str) -> BridgeResult<()> {
        self.bridge.fail(handle, code, description)
    }

    pub fn get_error_description(&mut self, handle: Handle) -> BridgeResult<String> {
        self.bridge.get_error_description(handle)
    }

    pub fn take_callback_error(&mut self, handle: Handle) -> BridgeResult<Option<CallbackFault>> {
        self.bridge.take_callback_error(handle)
    }

    pub fn reset(&mut self, handle: u32, keep_position: bool) -> BridgeResult<()> {
        self.bridge.reset(handle, keep_position)
    }

    pub fn get_position(&mut self, handle: u32) -> BridgeResult<u32> {
        self.bridge.get_u32(handle, "get_position")
    }

    pub fn get_mode(&mut self, handle: u32) -> BridgeResult<u32> {
        self.bridge.get_u32(handle, "get_mode")
    }

    pub fn get_content_length(&mut self, handle: u32) -> BridgeResult<u64> {
        self.bridge.get_u64(handle, "get_content_length")
    }

    pub fn is_paused(&mut self, handle: u32) -> BridgeResult<bool> {
        self.bridge.get_bool(handle, "is_paused")
    }

    pub fn set_mode(&mut self, handle: u32, value: u32) -> BridgeResult<()> {
        self.bridge.set(handle, "set_mode", RawValue::I32(value))
    }

    pub fn set_content_length(&mut self, handle: u32, value: u64) -> BridgeResult<()> {
        self.bridge.set(handle, "set_content_length", RawValue::I64(value))
    }

    pub fn set_on_error<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 0, Box::new(callback))
    }

    pub fn set_on_finish<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 1, Box::new(callback))
    }

    pub fn set_on_message_start<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 2, Box::new(callback))
    }

    pub fn set_on_message_complete<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 3, Box::new(callback))
    }

    pub fn set_on_request<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 4, Box::new(callback))
    }

    pub fn set_on_response<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 5, Box::new(callback))
    }

    pub fn set_on_reset<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 6, Box::new(callback))
    }

    pub fn set_on_method<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 7, Box::new(callback))
    }

    pub fn set_on_url<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 8, Box::new(callback))
    }

    pub fn set_on_protocol<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 9, Box::new(callback))
    }

    pub fn set_on_version<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 10, Box::new(callback))
    }

    pub fn set_on_status<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 11, Box::new(callback))
    }

    pub fn set_on_reason<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 12, Box::new(callback))
    }

    pub fn set_on_header_name<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 13, Box::new(callback))
    }

    pub fn set_on_header_value<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 14, Box::new(callback))
    }

    pub fn set_on_headers<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 15, Box::new(callback))
    }

    pub fn set_on_connect<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 16, Box::new(callback))
    }

    pub fn set_on_upgrade<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 17, Box::new(callback))
    }

    pub fn set_on_chunk_length<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 18, Box::new(callback))
    }

    pub fn set_on_chunk_extension_name<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 19, Box::new(callback))
    }

    pub fn set_on_chunk_extension_value<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 20, Box::new(callback))
    }

    pub fn set_on_data<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 21, Box::new(callback))
    }

    pub fn set_on_body<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 22, Box::new(callback))
    }

    pub fn set_on_trailer_name<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 23, Box::new(callback))
    }

    pub fn set_on_trailer_value<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 24, Box::new(callback))
    }

    pub fn set_on_trailers<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>
    where
        F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,
    {
        self.bridge.set_callback(handle, 25, Box::new(callback))
    }
}

fn load_guest_bytes() -> BridgeResult<Vec<u8>> {
    wasm_parser_bridge::bridge::read_artifact("tests/fixtures/guest.wat")
}

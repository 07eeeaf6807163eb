// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` so log text lives in one place
//! instead of as format strings scattered through the code.
//!
//! # Organization
//!
//! * `generator` - Manifest/artifact loading and binding generation
//! * `bridge` - Handle lifecycle, memory growth and callback faults
//!
//! # Usage Pattern
//!
//! ```rust
//! use wasm_parser_bridge::observability::messages::generator::ManifestLoaded;
//!
//! let msg = ManifestLoaded {
//!     manifest_path: "manifests/http.json",
//!     constant_count: 112,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod bridge;
pub mod generator;

/// Messages that also carry their fields as structured tracing data.
pub trait StructuredLog {
    /// Emits the message with its fields attached.
    fn log(&self);

    /// Opens a span carrying the message's identifying fields.
    fn span(&self, name: &str) -> Span;
}

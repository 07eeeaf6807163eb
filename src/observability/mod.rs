// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display`
//! implementation, organized by subsystem:
//! * `messages::generator` - build-time generation events
//! * `messages::bridge` - run-time bridge events
//!
//! # Usage
//!
//! ```rust
//! use wasm_parser_bridge::observability::messages::bridge::HandleCreated;
//!
//! let msg = HandleCreated {
//!     handle: 0,
//!     input_capacity: 1024,
//! };
//!
//! tracing::debug!("{}", msg);
//! ```

pub mod messages;

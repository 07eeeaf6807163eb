// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Two disjoint error domains: build-time generation and run-time bridging.

mod bridge;
mod generator;

pub use bridge::{BridgeError, BridgeResult};
pub use generator::{GeneratorError, GeneratorResult};

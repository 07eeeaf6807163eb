// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod bridge;     // runtime protocol driven by generated bindings
pub mod config;     // generation config + defaults
pub mod embed;      // base64 artifact inlining
pub mod errors;     // error handling
pub mod extractor;  // manifest + artifact -> descriptor
pub mod generator;  // per-profile build pipeline
pub mod manifest;
pub mod native;     // in-process reference guest
pub mod observability;
pub mod template;   // placeholder engine

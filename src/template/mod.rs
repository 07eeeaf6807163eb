// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Template Transform Engine
//!
//! Turns a hand-authored template plus a [`Descriptor`](crate::extractor::Descriptor)
//! into one Rust binding module. The grammar is a line-oriented text scanner
//! over `$bind_<name>` placeholders with an explicit allow-list (see
//! [`placeholder`]).
//!
//! | placeholder | expands to |
//! |---|---|
//! | `$bind_getter(export, class)` | one getter wrapper |
//! | `$bind_setter(export, type)` | one setter wrapper |
//! | `$bind_enum(Name, PREFIX_)` | a lookup module for one constant family |
//! | `$bind_callbacks` | one `set_<callback>` registrar per slot |
//! | `$bind_export(section)` | `wasm`, `getters`, `setters`, `actions`, `enums`, `constants`, `version` or `imports` |
//! | `$bind_debug_start` | tracing sink setup, debug profiles only |
//! | `$bind_callback_error_index` | the `ERROR_CALLBACK_ERROR` literal |
//! | `$bind_flag_debug` | `true` or `false` |
//! | `$bind_dispatch_mode` | the profile's `DispatchMode` variant |
//! | `$bind_artifact_path` | the runtime artifact path as a string literal |
//!
//! Generated methods refer to `BridgeResult`, `RawValue`, `CallbackContext`
//! and `CallbackResult` unqualified and expect `self.bridge`; the template
//! brings those into scope.

pub mod emit;
pub mod engine;
pub mod placeholder;

use std::fs;
use std::path::Path;

use crate::bridge::DispatchMode;
use crate::errors::GeneratorResult;

pub use engine::render;
pub use placeholder::{Directive, Placeholder, Section};

/// The template bundled with the crate.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/binding.rs.tpl");

/// Per-profile inputs that are not part of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderProfile {
    pub debug: bool,
    pub dispatch: DispatchMode,
    /// Path the non-embedded loader reads at run time.
    pub artifact_path: String,
}

/// Reads a template from disk, or returns the bundled one.
pub fn load_template(path: Option<&Path>) -> GeneratorResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

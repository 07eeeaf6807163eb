// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Roles of the functions a guest imports.

use std::fmt::{Display, Formatter};

/// Host implementation a guest import is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRole {
    /// `run_callback(handle, slot, at, len) -> i32`
    Callback,
    /// `logger(raw: i64)`
    Logger,
    /// Bound by host name to a runtime shim.
    Passthrough(String),
}

impl Display for ImportRole {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ImportRole::Callback => write!(f, "callback"),
            ImportRole::Logger => write!(f, "logger"),
            ImportRole::Passthrough(name) => write!(f, "passthrough({})", name),
        }
    }
}

/// Raises a guest-side exception: `(ptr: i32, len: i32)`.
pub const THROW_SHIM: &str = "__throw";
/// Wall clock in milliseconds: `() -> f64` or `() -> i64`.
pub const NOW_SHIM: &str = "__now";
/// Passthrough host names the runtime links.
pub const HOST_SHIMS: [&str; 2] = [THROW_SHIM, NOW_SHIM];

impl ImportRole {
    /// Whether the runtime has a host implementation for this role.
    pub fn is_supported(&self) -> bool {
        match self {
            ImportRole::Passthrough(host_name) => HOST_SHIMS.contains(&host_name.as_str()),
            ImportRole::Callback | ImportRole::Logger => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub module: String,
    pub name: String,
    pub role: ImportRole,
}

impl ImportBinding {
    pub fn new(module: &str, name: &str, role: ImportRole) -> Self {
        Self {
            module: module.to_string(),
            name: name.to_string(),
            role,
        }
    }

    /// Binds `module.name` according to [`classify_import`].
    pub fn classify(module: &str, name: &str) -> Self {
        Self::new(module, name, classify_import(name))
    }
}

pub fn classify_import(name: &str) -> ImportRole {
    if name == "run_callback" || name.starts_with("__wbg_runCallback") {
        ImportRole::Callback
    } else if name == "logger" || name.starts_with("__wbg_log") {
        ImportRole::Logger
    } else {
        ImportRole::Passthrough(passthrough_name(name))
    }
}

/// Host name for a passthrough import.
///
/// `__wbg_<name>_<hash>` drops the prefix and the hash segment,
/// `__wbindgen_<name>` drops the prefix, and the result gains a `__` prefix.
pub fn passthrough_name(name: &str) -> String {
    let stripped = if let Some(rest) = name.strip_prefix("__wbg_") {
        match rest.rsplit_once('_') {
            Some((base, hash)) if is_hash_segment(hash) => base,
            _ => rest,
        }
    } else if let Some(rest) = name.strip_prefix("__wbindgen_") {
        rest
    } else {
        name.trim_start_matches('_')
    };

    format!("__{}", stripped)
}

fn is_hash_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_roles() {
        assert_eq!(classify_import("run_callback"), ImportRole::Callback);
        assert_eq!(classify_import("__wbg_runCallback_9f8e7d"), ImportRole::Callback);
        assert_eq!(classify_import("logger"), ImportRole::Logger);
        assert_eq!(classify_import("__wbg_log_0a1b2c3d"), ImportRole::Logger);
    }

    #[test]
    fn test_passthrough_name_transform() {
        assert_eq!(passthrough_name("__wbindgen_throw"), "__throw");
        assert_eq!(passthrough_name("__wbg_now_1a2b3c4d"), "__now");
        assert_eq!(passthrough_name("__wbg_random_not_a_hash"), "__random_not_a_hash");
        assert_eq!(passthrough_name("abort"), "__abort");
        assert_eq!(
            classify_import("__wbindgen_throw"),
            ImportRole::Passthrough("__throw".to_string())
        );
    }

    #[test]
    fn test_only_shimmed_passthroughs_are_supported() {
        assert!(classify_import("run_callback").is_supported());
        assert!(classify_import("__wbg_log_0a1b2c3d").is_supported());
        assert!(classify_import("__wbindgen_throw").is_supported());
        assert!(classify_import("__wbg_now_0a1b2c3d").is_supported());
        assert!(!classify_import("__wbg_random_0a1b2c3d").is_supported());
        assert!(!classify_import("abort").is_supported());
    }

    #[test]
    fn test_passthrough_name_is_deterministic() {
        assert_eq!(passthrough_name("__wbg_now_ffff"), passthrough_name("__wbg_now_ffff"));
    }
}

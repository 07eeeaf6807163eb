// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build manifest emitted next to a compiled guest.
//!
//! ```json
//! {
//!   "version": { "major": 1, "minor": 0, "patch": 0 },
//!   "flags": { "debug": false, "batch_offsets": true },
//!   "constants": { "ERROR_NONE": 0, "ERROR_UNEXPECTED_DATA": 1 }
//! }
//! ```
//!
//! Constant order is the document order and fixes the order of everything
//! generated from the manifest.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{GeneratorError, GeneratorResult};
use crate::observability::messages::generator::ManifestLoaded;

/// Constant families every manifest is partitioned into.
pub const PREFIXES: [&str; 7] = [
    "ERROR_",
    "STATE_",
    "METHOD_",
    "CALLBACK_",
    "MESSAGE_TYPE_",
    "CONNECTION_",
    "OFFSET_",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: Version,
    #[serde(default)]
    pub flags: IndexMap<String, bool>,
    pub constants: IndexMap<String, u32>,
}

impl Manifest {
    pub fn from_json(text: &str) -> GeneratorResult<Self> {
        let manifest: Manifest = serde_json::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let manifest = Self::from_json(&fs::read_to_string(path)?)?;

        tracing::info!(
            "{}",
            ManifestLoaded {
                manifest_path: &path.display().to_string(),
                constant_count: manifest.constants.len(),
            }
        );
        Ok(manifest)
    }

    pub fn to_json(&self) -> GeneratorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> GeneratorResult<()> {
        for name in self.constants.keys() {
            let valid = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
            if !valid {
                return Err(GeneratorError::Manifest(format!(
                    "constant name '{}' must be upper snake case",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Value of a flag, `false` when absent.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn constant(&self, name: &str) -> Option<u32> {
        self.constants.get(name).copied()
    }

    /// Entries whose name starts with `prefix`, prefix stripped, in manifest order.
    pub fn partition_constants(&self, prefix: &str) -> Vec<(String, u32)> {
        self.constants
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), *value))
            })
            .collect()
    }
}

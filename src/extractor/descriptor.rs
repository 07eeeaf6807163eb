// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The Binding Surface Descriptor: everything the template engine needs to
//! know about one guest build.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::bridge::{Action, ImportBinding};
use crate::errors::{GeneratorError, GeneratorResult};
use crate::manifest::Version;

/// Width class of a getter result or setter argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueClass {
    U32,
    U64,
    Bool,
}

impl ValueClass {
    /// Parses the type names templates use: `u32`, `u64`, `bool`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "u32" => Some(ValueClass::U32),
            "u64" => Some(ValueClass::U64),
            "bool" => Some(ValueClass::Bool),
            _ => None,
        }
    }

    pub fn rust_type(self) -> &'static str {
        match self {
            ValueClass::U32 => "u32",
            ValueClass::U64 => "u64",
            ValueClass::Bool => "bool",
        }
    }
}

impl Display for ValueClass {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.rust_type())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetterSpec {
    pub export: String,
    pub class: ValueClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterSpec {
    pub export: String,
    /// Whether the guest takes the value as `i64`.
    pub wide: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackSpec {
    pub slot: u32,
    /// Host-facing name, e.g. `on_header_name`.
    pub name: String,
}

impl CallbackSpec {
    pub fn registrar(&self) -> String {
        format!("set_{}", self.name)
    }
}

/// One constant family, prefix stripped, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumFamily {
    pub prefix: String,
    pub members: Vec<(String, u32)>,
}

#[derive(Debug, Clone)]
pub struct Descriptor {
    pub version: Version,
    pub flags: IndexMap<String, bool>,
    pub constants: IndexMap<String, u32>,
    pub enums: Vec<EnumFamily>,
    pub getters: Vec<GetterSpec>,
    pub setters: Vec<SetterSpec>,
    pub actions: Vec<Action>,
    pub callbacks: Vec<CallbackSpec>,
    pub imports: Vec<ImportBinding>,
    /// Every function export of the artifact, in declaration order.
    pub exports: Vec<String>,
}

impl Descriptor {
    pub fn getter(&self, export: &str) -> Option<&GetterSpec> {
        self.getters.iter().find(|getter| getter.export == export)
    }

    pub fn setter(&self, export: &str) -> Option<&SetterSpec> {
        self.setters.iter().find(|setter| setter.export == export)
    }

    /// The family for `prefix`; an empty one when the manifest has none.
    pub fn family(&self, prefix: &str) -> EnumFamily {
        self.enums
            .iter()
            .find(|family| family.prefix == prefix)
            .cloned()
            .unwrap_or_else(|| EnumFamily {
                prefix: prefix.to_string(),
                members: Vec::new(),
            })
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Value of `ERROR_CALLBACK_ERROR`. Without it a binding could not tell
    /// its own callback faults from protocol errors.
    pub fn callback_error_code(&self) -> GeneratorResult<u32> {
        self.constants.get("ERROR_CALLBACK_ERROR").copied().ok_or_else(|| {
            GeneratorError::Manifest("missing constant ERROR_CALLBACK_ERROR".to_string())
        })
    }
}

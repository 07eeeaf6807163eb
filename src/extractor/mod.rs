// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Metadata Extractor
//!
//! Combines a build manifest with the declared surface of the compiled guest
//! into a [`Descriptor`]. Nothing here guesses: an export with a return type
//! the bridge cannot convert, a callback family that drifted from the event
//! catalog or a Values offset that disagrees with the layout all fail the
//! build.

pub mod artifact;
pub mod descriptor;
pub mod naming;

pub use artifact::{ensure_core_module, inspect, read_artifact, ArtifactSurface, FunctionExport, Scalar};
pub use descriptor::{CallbackSpec, Descriptor, EnumFamily, GetterSpec, SetterSpec, ValueClass};

use crate::bridge::layout::value_field_offset;
use crate::bridge::{Action, Event, ImportBinding, ImportRole};
use crate::errors::{GeneratorError, GeneratorResult};
use crate::manifest::{Manifest, PREFIXES};
use crate::observability::messages::generator::SurfaceExtracted;
use crate::observability::messages::StructuredLog;

/// Exports every guest must provide, besides `memory`.
pub const REQUIRED_EXPORTS: [&str; 9] = [
    "create",
    "destroy",
    "parse",
    "alloc",
    "dealloc",
    "fail",
    "get_values",
    "get_offsets",
    "get_error_description_raw",
];

const GETTER_PREFIXES: [&str; 3] = ["get_", "is_", "has_"];

/// Builds the descriptor for one guest build.
pub fn extract(manifest: &Manifest, artifact: &[u8]) -> GeneratorResult<Descriptor> {
    let surface = inspect(artifact)?;

    if !surface.memories.iter().any(|memory| memory == "memory") {
        return Err(GeneratorError::MissingExport("memory".to_string()));
    }
    for name in REQUIRED_EXPORTS {
        if surface.function(name).is_none() {
            return Err(GeneratorError::MissingExport(name.to_string()));
        }
    }

    let mut getters = Vec::new();
    let mut setters = Vec::new();
    let mut actions = Vec::new();

    for function in &surface.functions {
        if REQUIRED_EXPORTS.contains(&function.name.as_str()) {
            continue;
        }
        if let Some(action) = classify_action(function) {
            actions.push(action);
        } else if let Some(getter) = classify_getter(function)? {
            getters.push(getter);
        } else if let Some(setter) = classify_setter(function) {
            setters.push(setter);
        }
    }

    let imports = describe_imports(&surface);
    if let Some(import) = imports.iter().find(|import| !import.role.is_supported()) {
        let host_name = match &import.role {
            ImportRole::Passthrough(host_name) => host_name.clone(),
            role => role.to_string(),
        };
        return Err(GeneratorError::UnsupportedImport {
            module: import.module.clone(),
            name: import.name.clone(),
            host_name,
        });
    }

    let descriptor = Descriptor {
        version: manifest.version,
        flags: manifest.flags.clone(),
        constants: manifest.constants.clone(),
        enums: enum_families(manifest),
        getters,
        setters,
        actions,
        callbacks: callbacks(manifest)?,
        imports,
        exports: surface.functions.iter().map(|f| f.name.clone()).collect(),
    };
    check_offsets(manifest)?;

    SurfaceExtracted {
        getters: descriptor.getters.len(),
        setters: descriptor.setters.len(),
        callbacks: descriptor.callbacks.len(),
        imports: descriptor.imports.len(),
    }
    .log();

    Ok(descriptor)
}

/// Binds every function import by name.
pub fn describe_imports(surface: &ArtifactSurface) -> Vec<ImportBinding> {
    surface
        .imports
        .iter()
        .map(|(module, name)| ImportBinding::classify(module, name))
        .collect()
}

fn classify_action(function: &FunctionExport) -> Option<Action> {
    let action = Action::from_export(&function.name)?;
    let shape = function.params.len() == action.arity()
        && function.params.iter().all(|param| *param == Scalar::I32)
        && function.results.is_empty();
    shape.then_some(action)
}

/// `get_*`, `is_*` and `has_*` taking a handle are getters; their result must
/// be `i32` or `i64`.
fn classify_getter(function: &FunctionExport) -> GeneratorResult<Option<GetterSpec>> {
    let name = function.name.as_str();
    let Some(prefix) = GETTER_PREFIXES.iter().find(|prefix| name.starts_with(*prefix)) else {
        return Ok(None);
    };
    if function.params != [Scalar::I32] {
        return Ok(None);
    }

    let class = match function.results.as_slice() {
        [Scalar::I32] if *prefix == "get_" => ValueClass::U32,
        [Scalar::I32] => ValueClass::Bool,
        [Scalar::I64] => ValueClass::U64,
        _ => {
            return Err(GeneratorError::UnsupportedReturnClass {
                getter: name.to_string(),
                found: function.results_signature(),
            })
        }
    };

    Ok(Some(GetterSpec {
        export: name.to_string(),
        class,
    }))
}

fn classify_setter(function: &FunctionExport) -> Option<SetterSpec> {
    if !function.name.starts_with("set_") || !function.results.is_empty() {
        return None;
    }
    let wide = match function.params.as_slice() {
        [Scalar::I32, Scalar::I32] => false,
        [Scalar::I32, Scalar::I64] => true,
        _ => return None,
    };
    Some(SetterSpec {
        export: function.name.clone(),
        wide,
    })
}

fn enum_families(manifest: &Manifest) -> Vec<EnumFamily> {
    PREFIXES
        .iter()
        .map(|prefix| EnumFamily {
            prefix: prefix.to_string(),
            members: manifest.partition_constants(prefix),
        })
        .filter(|family| !family.members.is_empty())
        .collect()
}

/// The CALLBACK_ family, checked name by name against the event catalog.
fn callbacks(manifest: &Manifest) -> GeneratorResult<Vec<CallbackSpec>> {
    let family = manifest.partition_constants("CALLBACK_");

    for event in Event::ALL {
        let constant = event.constant_name();
        let Some((_, slot)) = family.iter().find(|(name, _)| *name == constant) else {
            return Err(GeneratorError::CatalogMismatch {
                constant: format!("CALLBACK_{}", constant),
                found: event.id(),
                expected: "an entry in the manifest".to_string(),
            });
        };
        if *slot != event.id() {
            return Err(GeneratorError::CatalogMismatch {
                constant: format!("CALLBACK_{}", constant),
                found: *slot,
                expected: format!("slot {}", event.id()),
            });
        }
    }

    family
        .into_iter()
        .map(|(name, slot)| match Event::from_id(slot) {
            Some(event) if event.constant_name() == name => Ok(CallbackSpec {
                slot,
                name: naming::snake_case(&name),
            }),
            _ => Err(GeneratorError::CatalogMismatch {
                constant: format!("CALLBACK_{}", name),
                found: slot,
                expected: "no event at this slot".to_string(),
            }),
        })
        .collect()
}

fn check_offsets(manifest: &Manifest) -> GeneratorResult<()> {
    for (field, offset) in manifest.partition_constants("OFFSET_") {
        match value_field_offset(&field) {
            Some(expected) if expected as u32 == offset => {}
            Some(expected) => {
                return Err(GeneratorError::CatalogMismatch {
                    constant: format!("OFFSET_{}", field),
                    found: offset,
                    expected: format!("Values offset {}", expected),
                })
            }
            None => {
                return Err(GeneratorError::CatalogMismatch {
                    constant: format!("OFFSET_{}", field),
                    found: offset,
                    expected: "a Values field".to_string(),
                })
            }
        }
    }
    Ok(())
}

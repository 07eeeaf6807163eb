// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Rust source emitted for each directive. Every function here is a pure
//! function of the descriptor, so equal inputs give byte-identical output.

use std::collections::HashSet;

use super::placeholder::Section;
use super::RenderProfile;
use crate::bridge::{Action, DispatchMode, ImportRole};
use crate::errors::{GeneratorError, GeneratorResult};
use crate::extractor::naming::{const_ident, family_module, is_identifier, module_name};
use crate::extractor::{Descriptor, EnumFamily, GetterSpec, SetterSpec, ValueClass};

/// `$bind_getter(export, class)`
pub fn getter(descriptor: &Descriptor, export: &str, declared: ValueClass) -> GeneratorResult<String> {
    let spec = descriptor
        .getter(export)
        .ok_or_else(|| GeneratorError::MissingExport(export.to_string()))?;
    if spec.class != declared {
        return Err(GeneratorError::ClassMismatch {
            getter: export.to_string(),
            declared: declared.to_string(),
            actual: spec.class.to_string(),
        });
    }
    Ok(getter_wrapper(spec))
}

/// `$bind_setter(export, type)`
pub fn setter(descriptor: &Descriptor, export: &str, declared: ValueClass) -> GeneratorResult<String> {
    let spec = descriptor
        .setter(export)
        .ok_or_else(|| GeneratorError::MissingExport(export.to_string()))?;
    if spec.wide != (declared == ValueClass::U64) {
        return Err(GeneratorError::ClassMismatch {
            getter: export.to_string(),
            declared: declared.to_string(),
            actual: if spec.wide { "i64" } else { "i32" }.to_string(),
        });
    }
    Ok(setter_wrapper(spec, declared))
}

fn getter_wrapper(spec: &GetterSpec) -> String {
    format!(
        "pub fn {name}(&mut self, handle: u32) -> BridgeResult<{ty}> {{\n    self.bridge.get_{ty}(handle, {export:?})\n}}\n",
        name = spec.export,
        ty = spec.class.rust_type(),
        export = spec.export,
    )
}

fn setter_wrapper(spec: &SetterSpec, class: ValueClass) -> String {
    let raw = match class {
        ValueClass::U64 => "RawValue::I64(value)",
        ValueClass::U32 => "RawValue::I32(value)",
        ValueClass::Bool => "RawValue::I32(value as u32)",
    };
    format!(
        "pub fn {name}(&mut self, handle: u32, value: {ty}) -> BridgeResult<()> {{\n    self.bridge.set(handle, {export:?}, {raw})\n}}\n",
        name = spec.export,
        ty = class.rust_type(),
        export = spec.export,
        raw = raw,
    )
}

fn action_wrapper(action: Action) -> String {
    match action {
        Action::Reset => "pub fn reset(&mut self, handle: u32, keep_position: bool) -> BridgeResult<()> {\n    self.bridge.reset(handle, keep_position)\n}\n".to_string(),
        other => format!(
            "pub fn {name}(&mut self, handle: u32) -> BridgeResult<()> {{\n    self.bridge.{name}(handle)\n}}\n",
            name = other.export_name(),
        ),
    }
}

/// `$bind_enum(Name, PREFIX_)`
pub fn enum_module(descriptor: &Descriptor, name: &str, prefix: &str, line: usize) -> GeneratorResult<String> {
    let module = module_name(name);
    if !is_identifier(&module) {
        return Err(GeneratorError::MalformedPlaceholder {
            name: "enum".to_string(),
            line,
            reason: format!("'{}' is not a usable module name", name),
        });
    }
    let family = descriptor.family(prefix);
    if family.members.is_empty() {
        return Err(GeneratorError::MalformedPlaceholder {
            name: "enum".to_string(),
            line,
            reason: format!("the manifest has no constants with prefix {}", prefix),
        });
    }
    render_enum(&module, &family)
}

/// Forward consts, the `ALL` table and both lookups in one module.
fn render_enum(module: &str, family: &EnumFamily) -> GeneratorResult<String> {
    let mut idents = Vec::with_capacity(family.members.len());
    for (name, _) in &family.members {
        let ident = const_ident(name);
        if !is_identifier(&ident) {
            return Err(GeneratorError::Manifest(format!(
                "constant {}{} cannot be named in Rust",
                family.prefix, name
            )));
        }
        idents.push(ident);
    }

    let mut out = format!("pub mod {} {{\n", module);
    for (ident, (_, value)) in idents.iter().zip(&family.members) {
        out.push_str(&format!("    pub const {}: u32 = {};\n", ident, value));
    }

    out.push_str(&format!(
        "\n    pub const ALL: [(&str, u32); {}] = [\n",
        family.members.len()
    ));
    for (name, value) in &family.members {
        out.push_str(&format!("        ({:?}, {}),\n", name, value));
    }
    out.push_str("    ];\n");

    // Aliased values resolve to the first name in manifest order.
    let mut seen = HashSet::new();
    out.push_str("\n    pub fn name_of(value: u32) -> Option<&'static str> {\n        match value {\n");
    for (name, value) in &family.members {
        if seen.insert(*value) {
            out.push_str(&format!("            {} => Some({:?}),\n", value, name));
        }
    }
    out.push_str("            _ => None,\n        }\n    }\n");

    out.push_str("\n    pub fn value_of(name: &str) -> Option<u32> {\n        match name {\n");
    for (ident, (name, _)) in idents.iter().zip(&family.members) {
        out.push_str(&format!("            {:?} => Some({}),\n", name, ident));
    }
    out.push_str("            _ => None,\n        }\n    }\n}\n");

    Ok(out)
}

/// `$bind_callbacks`
pub fn callbacks(descriptor: &Descriptor) -> String {
    descriptor
        .callbacks
        .iter()
        .map(|callback| {
            format!(
                "pub fn {registrar}<F>(&mut self, handle: u32, callback: F) -> BridgeResult<()>\nwhere\n    F: FnMut(&CallbackContext<'_>) -> CallbackResult + 'static,\n{{\n    self.bridge.set_callback(handle, {slot}, Box::new(callback))\n}}\n",
                registrar = callback.registrar(),
                slot = callback.slot,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `$bind_export(section)`
pub fn section(descriptor: &Descriptor, section: Section) -> GeneratorResult<String> {
    let rendered = match section {
        Section::Getters => join(descriptor.getters.iter().map(getter_wrapper)),
        Section::Setters => join(descriptor.setters.iter().map(|spec| {
            let class = if spec.wide { ValueClass::U64 } else { ValueClass::U32 };
            setter_wrapper(spec, class)
        })),
        Section::Actions => join(descriptor.actions.iter().copied().map(action_wrapper)),
        Section::Enums => {
            let modules = descriptor
                .enums
                .iter()
                .map(|family| render_enum(&family_module(&family.prefix), family))
                .collect::<GeneratorResult<Vec<_>>>()?;
            modules.join("\n")
        }
        Section::Constants => constants(descriptor)?,
        Section::Version => format!("pub const VERSION: &str = \"{}\";\n", descriptor.version),
        Section::Imports => imports(descriptor),
        Section::Wasm => {
            let mut out = format!(
                "pub const GUEST_EXPORTS: [&str; {}] = [\n",
                descriptor.exports.len()
            );
            for export in &descriptor.exports {
                out.push_str(&format!("    {:?},\n", export));
            }
            out.push_str("];\n");
            out
        }
    };
    Ok(rendered)
}

fn constants(descriptor: &Descriptor) -> GeneratorResult<String> {
    let mut out = String::from("pub mod constants {\n");
    for (name, value) in &descriptor.constants {
        if !is_identifier(name) {
            return Err(GeneratorError::Manifest(format!(
                "constant {} cannot be named in Rust",
                name
            )));
        }
        out.push_str(&format!("    pub const {}: u32 = {};\n", name, value));
    }
    out.push_str("}\n");
    Ok(out)
}

fn imports(descriptor: &Descriptor) -> String {
    let mut out = String::from(
        "pub fn imports() -> Vec<wasm_parser_bridge::bridge::ImportBinding> {\n    use wasm_parser_bridge::bridge::{ImportBinding, ImportRole};\n\n    vec![\n",
    );
    for import in &descriptor.imports {
        let role = match &import.role {
            ImportRole::Callback => "ImportRole::Callback".to_string(),
            ImportRole::Logger => "ImportRole::Logger".to_string(),
            ImportRole::Passthrough(name) => {
                format!("ImportRole::Passthrough({:?}.to_string())", name)
            }
        };
        out.push_str(&format!(
            "        ImportBinding::new({:?}, {:?}, {}),\n",
            import.module, import.name, role
        ));
    }
    out.push_str("    ]\n}\n");
    out
}

/// `$bind_debug_start`: present only in debug profiles.
pub fn debug_start(profile: &RenderProfile) -> String {
    if profile.debug {
        "bridge.enable_tracing_sink();\n".to_string()
    } else {
        String::new()
    }
}

pub fn dispatch_mode(profile: &RenderProfile) -> &'static str {
    match profile.dispatch {
        DispatchMode::PerEvent => "DispatchMode::PerEvent",
        DispatchMode::Batched => "DispatchMode::Batched",
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join("\n")
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Case conversions between manifest names and generated identifiers.

/// `ON_HEADER_NAME` -> `on_header_name`
pub fn snake_case(upper_snake: &str) -> String {
    upper_snake.to_ascii_lowercase()
}

/// `MessageTypes` -> `message_types`; upper snake input passes through lowercased.
pub fn module_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            let after_lower = name[..i].chars().last().map_or(false, |p| p.is_ascii_lowercase());
            if after_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Default module for a constant family: `MESSAGE_TYPE_` -> `message_types`.
pub fn family_module(prefix: &str) -> String {
    format!("{}s", snake_case(prefix.trim_end_matches('_')))
}

/// A manifest member name usable as a Rust `const` identifier.
pub fn const_ident(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", name),
        _ => name.to_string(),
    }
}

/// Whether `name` is a plain Rust identifier (no keywords check beyond `_`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

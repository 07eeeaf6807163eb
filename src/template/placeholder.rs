// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Placeholder grammar.
//!
//! ```text
//! placeholder := "$bind_" name [ "(" arg { "," arg } ")" ]
//! name        := [a-z0-9_]+
//! ```
//!
//! Only the names in [`Directive`] are accepted.

use crate::errors::{GeneratorError, GeneratorResult};
use crate::extractor::ValueClass;

pub const SIGIL: &str = "$bind_";

/// One placeholder occurrence on a template line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub args: Vec<String>,
    /// Byte range of the whole placeholder within its line.
    pub start: usize,
    pub end: usize,
}

/// Descriptor sections `$bind_export(section)` can re-export.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    Wasm,
    Getters,
    Setters,
    Actions,
    Enums,
    Constants,
    Version,
    Imports,
}

impl Section {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "wasm" => Some(Section::Wasm),
            "getters" => Some(Section::Getters),
            "setters" => Some(Section::Setters),
            "actions" => Some(Section::Actions),
            "enums" => Some(Section::Enums),
            "constants" => Some(Section::Constants),
            "version" => Some(Section::Version),
            "imports" => Some(Section::Imports),
            _ => None,
        }
    }
}

/// A recognized placeholder with validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Getter { export: String, class: ValueClass },
    Setter { export: String, class: ValueClass },
    Enum { module: String, prefix: String },
    Callbacks,
    Export(Section),
    DebugStart,
    CallbackErrorIndex,
    FlagDebug,
    DispatchMode,
    ArtifactPath,
}

impl Directive {
    pub fn parse(placeholder: &Placeholder, line: usize) -> GeneratorResult<Self> {
        let malformed = |reason: String| GeneratorError::MalformedPlaceholder {
            name: placeholder.name.clone(),
            line,
            reason,
        };
        let expect_args = |count: usize| {
            if placeholder.args.len() == count {
                Ok(())
            } else {
                Err(malformed(format!(
                    "expected {} argument(s), found {}",
                    count,
                    placeholder.args.len()
                )))
            }
        };
        let args = &placeholder.args;

        match placeholder.name.as_str() {
            "getter" | "setter" => {
                expect_args(2)?;
                let class = ValueClass::parse(&args[1])
                    .ok_or_else(|| malformed(format!("unknown class '{}'", args[1])))?;
                let export = args[0].clone();
                Ok(if placeholder.name == "getter" {
                    Directive::Getter { export, class }
                } else {
                    Directive::Setter { export, class }
                })
            }
            "enum" => {
                expect_args(2)?;
                if !args[1].ends_with('_') {
                    return Err(malformed(format!("prefix '{}' must end with '_'", args[1])));
                }
                Ok(Directive::Enum {
                    module: args[0].clone(),
                    prefix: args[1].clone(),
                })
            }
            "export" => {
                expect_args(1)?;
                Section::parse(&args[0])
                    .map(Directive::Export)
                    .ok_or_else(|| malformed(format!("unknown section '{}'", args[0])))
            }
            "callbacks" => expect_args(0).map(|_| Directive::Callbacks),
            "debug_start" => expect_args(0).map(|_| Directive::DebugStart),
            "callback_error_index" => expect_args(0).map(|_| Directive::CallbackErrorIndex),
            "flag_debug" => expect_args(0).map(|_| Directive::FlagDebug),
            "dispatch_mode" => expect_args(0).map(|_| Directive::DispatchMode),
            "artifact_path" => expect_args(0).map(|_| Directive::ArtifactPath),
            other => Err(GeneratorError::UnknownPlaceholder(other.to_string())),
        }
    }

    /// Block directives expand to whole items and must stand alone on a line.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Directive::Getter { .. }
                | Directive::Setter { .. }
                | Directive::Enum { .. }
                | Directive::Callbacks
                | Directive::Export(_)
                | Directive::DebugStart
        )
    }
}

/// Finds every placeholder on `line` (1-based `line_no`, for errors).
pub fn scan(line: &str, line_no: usize) -> GeneratorResult<Vec<Placeholder>> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find(SIGIL) {
        let start = cursor + offset;
        let name_start = start + SIGIL.len();
        let name_len = line[name_start..]
            .find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
            .unwrap_or(line.len() - name_start);
        let name = &line[name_start..name_start + name_len];
        let mut end = name_start + name_len;

        if name.is_empty() {
            return Err(GeneratorError::MalformedPlaceholder {
                name: String::new(),
                line: line_no,
                reason: "missing name after '$bind_'".to_string(),
            });
        }

        let mut args = Vec::new();
        if line[end..].starts_with('(') {
            let close = line[end..].find(')').ok_or_else(|| GeneratorError::MalformedPlaceholder {
                name: name.to_string(),
                line: line_no,
                reason: "unterminated argument list".to_string(),
            })?;
            let inner = line[end + 1..end + close].trim();
            if !inner.is_empty() {
                args = inner.split(',').map(|arg| arg.trim().to_string()).collect();
            }
            if args.iter().any(String::is_empty) {
                return Err(GeneratorError::MalformedPlaceholder {
                    name: name.to_string(),
                    line: line_no,
                    reason: "empty argument".to_string(),
                });
            }
            end += close + 1;
        }

        found.push(Placeholder {
            name: name.to_string(),
            args,
            start,
            end,
        });
        cursor = end;
    }

    Ok(found)
}

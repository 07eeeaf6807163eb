// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::emit;
use super::placeholder::{scan, Directive};
use super::RenderProfile;
use crate::errors::{GeneratorError, GeneratorResult};
use crate::extractor::Descriptor;

/// Renders `template` line by line.
///
/// Block directives replace their whole line; each emitted line takes the
/// placeholder's indentation. Inline directives are substituted in place.
/// A line left empty by its directives is dropped.
pub fn render(template: &str, descriptor: &Descriptor, profile: &RenderProfile) -> GeneratorResult<String> {
    let mut out = String::with_capacity(template.len() * 4);

    for (index, line) in template.lines().enumerate() {
        let line_no = index + 1;
        let placeholders = scan(line, line_no)?;
        if placeholders.is_empty() {
            out.push_str(line);
            out.push('\n');
            continue;
        }

        let directives = placeholders
            .iter()
            .map(|placeholder| Directive::parse(placeholder, line_no))
            .collect::<GeneratorResult<Vec<_>>>()?;

        if let Some(position) = directives.iter().position(Directive::is_block) {
            let placeholder = &placeholders[position];
            if directives.len() > 1 || line.trim() != &line[placeholder.start..placeholder.end] {
                return Err(GeneratorError::MalformedPlaceholder {
                    name: placeholder.name.clone(),
                    line: line_no,
                    reason: "block placeholders must stand alone on their line".to_string(),
                });
            }
            let indent = &line[..line.len() - line.trim_start().len()];
            let block = expand_block(&directives[position], descriptor, profile, line_no)?;
            for emitted in block.lines() {
                if !emitted.is_empty() {
                    out.push_str(indent);
                    out.push_str(emitted);
                }
                out.push('\n');
            }
            continue;
        }

        let mut rendered = String::with_capacity(line.len());
        let mut cursor = 0;
        for (placeholder, directive) in placeholders.iter().zip(&directives) {
            rendered.push_str(&line[cursor..placeholder.start]);
            rendered.push_str(&expand_inline(directive, descriptor, profile)?);
            cursor = placeholder.end;
        }
        rendered.push_str(&line[cursor..]);

        if !rendered.trim().is_empty() {
            out.push_str(&rendered);
            out.push('\n');
        }
    }

    Ok(out)
}

fn expand_block(
    directive: &Directive,
    descriptor: &Descriptor,
    profile: &RenderProfile,
    line: usize,
) -> GeneratorResult<String> {
    match directive {
        Directive::Getter { export, class } => emit::getter(descriptor, export, *class),
        Directive::Setter { export, class } => emit::setter(descriptor, export, *class),
        Directive::Enum { module, prefix } => emit::enum_module(descriptor, module, prefix, line),
        Directive::Callbacks => Ok(emit::callbacks(descriptor)),
        Directive::Export(section) => emit::section(descriptor, *section),
        Directive::DebugStart => Ok(emit::debug_start(profile)),
        inline => expand_inline(inline, descriptor, profile),
    }
}

fn expand_inline(
    directive: &Directive,
    descriptor: &Descriptor,
    profile: &RenderProfile,
) -> GeneratorResult<String> {
    match directive {
        Directive::CallbackErrorIndex => Ok(descriptor.callback_error_code()?.to_string()),
        Directive::FlagDebug => Ok(profile.debug.to_string()),
        Directive::DispatchMode => Ok(emit::dispatch_mode(profile).to_string()),
        Directive::ArtifactPath => Ok(format!("{:?}", profile.artifact_path)),
        block => expand_block(block, descriptor, profile, 0),
    }
}

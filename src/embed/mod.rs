// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Embedding Variant
//!
//! Rewrites the body of the generated `load_guest_bytes` loader so the guest
//! binary ships inside the binding module as base64. Matching is done on code
//! only: string literals and comments never count as a loader or a brace.

use base64::Engine as _;

use crate::config::consts::LOADER_FUNCTION;
use crate::errors::{GeneratorError, GeneratorResult};

/// Replaces the loader body in `source` with a decode of `artifact`.
pub fn embed(source: &str, artifact: &[u8]) -> GeneratorResult<String> {
    if artifact.is_empty() {
        return Err(GeneratorError::MissingArtifact(
            "cannot embed an empty artifact".to_string(),
        ));
    }

    let code = code_mask(source);
    let needle = format!("fn {}(", LOADER_FUNCTION);
    let matches: Vec<usize> = source
        .match_indices(&needle)
        .map(|(index, _)| index)
        .filter(|index| code[*index] && is_word_start(source, *index))
        .collect();

    let start = match matches.as_slice() {
        [start] => *start,
        [] => return Err(GeneratorError::LoaderNotFound(LOADER_FUNCTION.to_string())),
        many => {
            return Err(GeneratorError::AmbiguousLoader {
                name: LOADER_FUNCTION.to_string(),
                count: many.len(),
            })
        }
    };

    let (open, close) = body_range(source, &code, start)
        .ok_or_else(|| GeneratorError::LoaderNotFound(LOADER_FUNCTION.to_string()))?;

    let line_start = source[..start].rfind('\n').map_or(0, |index| index + 1);
    let indent: String = source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let payload = base64::engine::general_purpose::STANDARD.encode(artifact);

    let mut out = String::with_capacity(source.len() + payload.len() + 128);
    out.push_str(&source[..=open]);
    out.push('\n');
    out.push_str(&format!("{}    const PAYLOAD: &str = \"{}\";\n", indent, payload));
    out.push_str(&format!(
        "{}    wasm_parser_bridge::bridge::decode_payload(PAYLOAD)\n",
        indent
    ));
    out.push_str(&indent);
    out.push_str(&source[close..]);
    Ok(out)
}

fn is_word_start(source: &str, index: usize) -> bool {
    source[..index]
        .chars()
        .last()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
}

/// Byte offsets of the `{` and `}` delimiting the function body that starts at `start`.
fn body_range(source: &str, code: &[bool], start: usize) -> Option<(usize, usize)> {
    let bytes = source.as_bytes();
    let open = (start..bytes.len()).find(|&i| code[i] && bytes[i] == b'{')?;

    let mut depth = 0usize;
    for i in open..bytes.len() {
        if !code[i] {
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, i));
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Copy, Clone)]
enum Lex {
    Code,
    LineComment,
    BlockComment(usize),
    Str,
    RawStr(usize),
    Char,
}

/// `true` for every byte of `source` that is code rather than a literal or comment.
fn code_mask(source: &str) -> Vec<bool> {
    let bytes = source.as_bytes();
    let mut mask = vec![false; bytes.len()];
    let mut state = Lex::Code;
    let mut i = 0;

    while i < bytes.len() {
        let next = bytes.get(i + 1).copied();
        match state {
            Lex::Code => match bytes[i] {
                b'/' if next == Some(b'/') => {
                    state = Lex::LineComment;
                    i += 2;
                    continue;
                }
                b'/' if next == Some(b'*') => {
                    state = Lex::BlockComment(1);
                    i += 2;
                    continue;
                }
                b'"' => state = Lex::Str,
                b'r' if matches!(next, Some(b'"') | Some(b'#')) => {
                    let hashes = bytes[i + 1..].iter().take_while(|b| **b == b'#').count();
                    if bytes.get(i + 1 + hashes) == Some(&b'"') {
                        state = Lex::RawStr(hashes);
                        i += hashes + 2;
                        continue;
                    }
                    mask[i] = true;
                }
                b'\'' if next == Some(b'\\') || bytes.get(i + 2) == Some(&b'\'') => {
                    state = Lex::Char
                }
                _ => mask[i] = true,
            },
            Lex::LineComment => {
                if bytes[i] == b'\n' {
                    state = Lex::Code;
                    mask[i] = true;
                }
            }
            Lex::BlockComment(depth) => {
                if bytes[i] == b'*' && next == Some(b'/') {
                    state = if depth == 1 { Lex::Code } else { Lex::BlockComment(depth - 1) };
                    i += 2;
                    continue;
                }
                if bytes[i] == b'/' && next == Some(b'*') {
                    state = Lex::BlockComment(depth + 1);
                    i += 2;
                    continue;
                }
            }
            Lex::Str => match bytes[i] {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' => state = Lex::Code,
                _ => {}
            },
            Lex::RawStr(hashes) => {
                if bytes[i] == b'"'
                    && bytes[i + 1..].iter().take(hashes).filter(|b| **b == b'#').count() == hashes
                {
                    state = Lex::Code;
                    i += hashes + 1;
                    continue;
                }
            }
            Lex::Char => match bytes[i] {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'\'' => state = Lex::Code,
                _ => {}
            },
        }
        i += 1;
    }

    mask
}

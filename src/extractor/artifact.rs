// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Guest artifact introspection.
//!
//! Encoding is checked with `wasmparser` before anything is compiled: only
//! classic core modules carry the numeric ABI the bridge speaks. Component
//! Model binaries and legacy preview 1 components (a core module with a
//! `component` custom section) are rejected.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use wasmparser::{Encoding, Parser, Payload};
use wasmtime::{Engine, ExternType, Module, ValType};

use crate::config::consts::MAX_ARTIFACT_SIZE;
use crate::errors::{GeneratorError, GeneratorResult};
use crate::observability::messages::generator::{ArtifactLoadFailed, ArtifactLoaded};

/// Scalar type of a function parameter or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    I32,
    I64,
    F32,
    F64,
    Other(String),
}

impl From<&ValType> for Scalar {
    fn from(ty: &ValType) -> Self {
        match ty {
            ValType::I32 => Scalar::I32,
            ValType::I64 => Scalar::I64,
            ValType::F32 => Scalar::F32,
            ValType::F64 => Scalar::F64,
            other => Scalar::Other(other.to_string()),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Scalar::I32 => write!(f, "i32"),
            Scalar::I64 => write!(f, "i64"),
            Scalar::F32 => write!(f, "f32"),
            Scalar::F64 => write!(f, "f64"),
            Scalar::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionExport {
    pub name: String,
    pub params: Vec<Scalar>,
    pub results: Vec<Scalar>,
}

impl FunctionExport {
    /// Results rendered for error messages, e.g. `(f32)` or `()`.
    pub fn results_signature(&self) -> String {
        let results: Vec<String> = self.results.iter().map(Scalar::to_string).collect();
        format!("({})", results.join(", "))
    }
}

/// Declared imports and exports of a core module.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSurface {
    pub functions: Vec<FunctionExport>,
    pub memories: Vec<String>,
    /// `(module, name)` pairs of function imports.
    pub imports: Vec<(String, String)>,
}

impl ArtifactSurface {
    pub fn function(&self, name: &str) -> Option<&FunctionExport> {
        self.functions.iter().find(|function| function.name == name)
    }
}

/// Reads an artifact, refusing empty and oversized files.
pub fn read_artifact<P: AsRef<Path>>(path: P) -> GeneratorResult<Vec<u8>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let bytes = match load(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!(
                "{}",
                ArtifactLoadFailed {
                    artifact_path: &path_str,
                    error: &error,
                }
            );
            return Err(error);
        }
    };

    tracing::info!(
        "{}",
        ArtifactLoaded {
            artifact_path: &path_str,
            size_bytes: bytes.len(),
        }
    );
    Ok(bytes)
}

fn load(path: &Path) -> GeneratorResult<Vec<u8>> {
    let metadata = fs::metadata(path)
        .map_err(|_| GeneratorError::MissingArtifact(path.display().to_string()))?;
    if metadata.len() > MAX_ARTIFACT_SIZE {
        return Err(GeneratorError::UnsupportedEncoding(format!(
            "artifact is {} bytes (max: {} bytes)",
            metadata.len(),
            MAX_ARTIFACT_SIZE
        )));
    }

    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(GeneratorError::MissingArtifact(format!("{} is empty", path.display())));
    }
    Ok(bytes)
}

/// Fails unless `bytes` is a classic core module.
pub fn ensure_core_module(bytes: &[u8]) -> GeneratorResult<()> {
    if bytes.is_empty() {
        return Err(GeneratorError::MissingArtifact("empty artifact".to_string()));
    }

    let mut encoding = None;
    let mut has_component_section = false;

    for payload in Parser::new(0).parse_all(bytes) {
        match payload? {
            Payload::Version { encoding: found, .. } => encoding = Some(found),
            Payload::CustomSection(reader) if reader.name() == "component" => {
                has_component_section = true;
            }
            _ => {}
        }
    }

    match encoding {
        Some(Encoding::Module) if !has_component_section => Ok(()),
        Some(Encoding::Module) => Err(GeneratorError::UnsupportedEncoding(
            "legacy preview 1 component; expected a core module".to_string(),
        )),
        Some(Encoding::Component) => Err(GeneratorError::UnsupportedEncoding(
            "Component Model binary; expected a core module".to_string(),
        )),
        None => Err(GeneratorError::UnsupportedEncoding("not a WASM binary".to_string())),
    }
}

/// Lists the function and memory exports and the function imports of `bytes`.
pub fn inspect(bytes: &[u8]) -> GeneratorResult<ArtifactSurface> {
    ensure_core_module(bytes)?;

    let engine = Engine::default();
    let module = Module::new(&engine, bytes)?;
    let mut surface = ArtifactSurface::default();

    for export in module.exports() {
        match export.ty() {
            ExternType::Func(ty) => surface.functions.push(FunctionExport {
                name: export.name().to_string(),
                params: ty.params().map(|ty| Scalar::from(&ty)).collect(),
                results: ty.results().map(|ty| Scalar::from(&ty)).collect(),
            }),
            ExternType::Memory(_) => surface.memories.push(export.name().to_string()),
            _ => {}
        }
    }

    surface.imports = module
        .imports()
        .filter(|import| matches!(import.ty(), ExternType::Func(_)))
        .map(|import| (import.module().to_string(), import.name().to_string()))
        .collect();

    Ok(surface)
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build-time errors raised while generating a binding module.
//!
//! Every variant is fatal: the generator aborts and writes nothing rather than
//! emitting a partially-correct module.

use thiserror::Error;

/// Error type for the metadata extractor, the template transform engine and the
/// embedding variant.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A getter export returns a type the generator has no conversion for.
    #[error("Unsupported return type {found} for getter '{getter}' (expected i32 or i64)")]
    UnsupportedReturnClass { getter: String, found: String },

    /// A template placeholder is not part of the allow-list.
    #[error("Unsupported placeholder '$bind_{0}'")]
    UnknownPlaceholder(String),

    /// A known placeholder was used with the wrong arguments.
    #[error("Malformed placeholder '$bind_{name}' at line {line}: {reason}")]
    MalformedPlaceholder {
        name: String,
        line: usize,
        reason: String,
    },

    /// The template refers to an export the guest artifact does not provide.
    #[error("Guest artifact does not export '{0}'")]
    MissingExport(String),

    /// The template declares a getter class that disagrees with the artifact.
    #[error("Getter '{getter}' is declared as {declared} but the artifact returns {actual}")]
    ClassMismatch {
        getter: String,
        declared: String,
        actual: String,
    },

    /// The manifest callback family drifted from the runtime event catalog.
    #[error("Manifest constant {constant} = {found} does not match the event catalog ({expected})")]
    CatalogMismatch {
        constant: String,
        found: u32,
        expected: String,
    },

    /// The embedding variant was asked to inline an artifact that is absent or empty.
    #[error("Missing embeddable artifact: {0}")]
    MissingArtifact(String),

    /// The embedding variant could not find the loader function to replace.
    #[error("Cannot find the '{0}' loader function in the generated source")]
    LoaderNotFound(String),

    /// The embedding variant found more than one candidate loader function.
    #[error("Found {count} '{name}' loader functions in the generated source, expected exactly one")]
    AmbiguousLoader { name: String, count: usize },

    /// The artifact imports a function the runtime has no host implementation for.
    #[error("Guest import '{module}.{name}' (host name '{host_name}') has no runtime implementation")]
    UnsupportedImport {
        module: String,
        name: String,
        host_name: String,
    },

    /// The artifact is not a classic core module.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The build manifest is malformed.
    #[error("Invalid build manifest: {0}")]
    Manifest(String),

    /// The generation config is malformed.
    #[error("Invalid generation config: {0}")]
    Config(String),

    /// File I/O error while reading inputs or writing outputs.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON decoding error for the build manifest.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Wasmtime failed to compile the artifact for introspection.
    #[error("WASM module error: {0}")]
    ModuleError(#[from] wasmtime::Error),

    /// WASM binary parsing error from wasmparser.
    #[error("WASM parser error: {0}")]
    ParserError(#[from] wasmparser::BinaryReaderError),
}

/// Result type alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for binding generation events.
//!
//! This module contains message types for logging events related to:
//! * Manifest and artifact loading
//! * Binding surface extraction
//! * Per-profile generation and output

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Build manifest loaded.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::generator::ManifestLoaded;
///
/// let msg = ManifestLoaded {
///     manifest_path: "manifests/http.json",
///     constant_count: 112,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ManifestLoaded<'a> {
    pub manifest_path: &'a str,
    pub constant_count: usize,
}

impl Display for ManifestLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded build manifest: {} ({} constants)",
            self.manifest_path, self.constant_count
        )
    }
}

/// Guest artifact loaded from disk.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::generator::ArtifactLoaded;
///
/// let msg = ArtifactLoaded {
///     artifact_path: "target/parser.wasm",
///     size_bytes: 65536,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ArtifactLoaded<'a> {
    pub artifact_path: &'a str,
    pub size_bytes: usize,
}

impl Display for ArtifactLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded guest artifact: {} ({} bytes)",
            self.artifact_path, self.size_bytes
        )
    }
}

/// Guest artifact could not be loaded.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::generator::ArtifactLoadFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
/// let msg = ArtifactLoadFailed {
///     artifact_path: "target/missing.wasm",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ArtifactLoadFailed<'a> {
    pub artifact_path: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ArtifactLoadFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to load guest artifact '{}': {}",
            self.artifact_path, self.error
        )
    }
}

/// Binding surface extracted from manifest and artifact.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::generator::SurfaceExtracted;
///
/// let msg = SurfaceExtracted {
///     getters: 20,
///     setters: 3,
///     callbacks: 26,
///     imports: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct SurfaceExtracted {
    pub getters: usize,
    pub setters: usize,
    pub callbacks: usize,
    pub imports: usize,
}

impl Display for SurfaceExtracted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Extracted binding surface: {} getters, {} setters, {} callbacks, {} imports",
            self.getters, self.setters, self.callbacks, self.imports
        )
    }
}

impl StructuredLog for SurfaceExtracted {
    fn log(&self) {
        tracing::info!(
            getters = self.getters,
            setters = self.setters,
            callbacks = self.callbacks,
            imports = self.imports,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "extraction",
            span_name = name,
            getters = self.getters,
            callbacks = self.callbacks,
        )
    }
}

/// One profile rendered in memory.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::generator::ProfileGenerated;
///
/// let msg = ProfileGenerated {
///     profile: "release",
///     output_path: "generated/release.rs",
///     size_bytes: 18000,
///     embedded: false,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ProfileGenerated<'a> {
    pub profile: &'a str,
    pub output_path: &'a str,
    pub size_bytes: usize,
    pub embedded: bool,
}

impl Display for ProfileGenerated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generated profile '{}' for {} ({} bytes, embedded={})",
            self.profile, self.output_path, self.size_bytes, self.embedded
        )
    }
}

impl StructuredLog for ProfileGenerated<'_> {
    fn log(&self) {
        tracing::info!(
            profile = self.profile,
            output_path = self.output_path,
            size_bytes = self.size_bytes,
            embedded = self.embedded,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("profile", span_name = name, profile = self.profile)
    }
}

/// A generated module written to disk.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::generator::OutputWritten;
///
/// let msg = OutputWritten {
///     output_path: "generated/debug.rs",
///     size_bytes: 19000,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct OutputWritten<'a> {
    pub output_path: &'a str,
    pub size_bytes: usize,
}

impl Display for OutputWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Wrote {} ({} bytes)", self.output_path, self.size_bytes)
    }
}

/// Generation aborted; nothing was written.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use wasm_parser_bridge::observability::messages::generator::GenerationFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "unknown placeholder");
/// let msg = GenerationFailed {
///     profile: "debug",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct GenerationFailed<'a> {
    pub profile: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for GenerationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generation failed for profile '{}', no output written: {}",
            self.profile, self.error
        )
    }
}

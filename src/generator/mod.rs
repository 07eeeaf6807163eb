// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build-time pipeline: Metadata Extractor -> Template Transform Engine ->
//! (optionally) Embedding Variant, once per configured profile.
//!
//! Every profile is rendered in memory first. Files are written only when all
//! of them succeeded, so a failing build leaves no partial output behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::bridge::DispatchMode;
use crate::config::consts::{FLAG_BATCH_OFFSETS, FLAG_DEBUG};
use crate::config::{load_config, GenerationConfig, ProfileConfig};
use crate::embed::embed;
use crate::errors::GeneratorResult;
use crate::extractor::{extract, read_artifact, Descriptor};
use crate::manifest::Manifest;
use crate::observability::messages::generator::{GenerationFailed, OutputWritten, ProfileGenerated};
use crate::observability::messages::StructuredLog;
use crate::template::{load_template, render, RenderProfile};

/// One rendered binding module, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub profile: String,
    pub output: PathBuf,
    pub source: String,
}

/// Loads `config_path`, generates every profile and writes the results.
pub fn run<P: AsRef<Path>>(config_path: P) -> GeneratorResult<Vec<GeneratedModule>> {
    let config = load_config(config_path)?;
    let modules = generate(&config)?;
    write_outputs(&modules)?;
    Ok(modules)
}

/// Renders every profile of `config` in memory.
pub fn generate(config: &GenerationConfig) -> GeneratorResult<Vec<GeneratedModule>> {
    let manifest = Manifest::load(&config.manifest)?;
    let artifact = read_artifact(&config.artifact)?;
    let descriptor = extract(&manifest, &artifact)?;
    let template = load_template(config.template.as_deref())?;

    config
        .profiles
        .iter()
        .map(|profile| {
            render_profile(config, profile, &descriptor, &template, &artifact).map_err(|error| {
                tracing::error!(
                    "{}",
                    GenerationFailed {
                        profile: &profile.name,
                        error: &error,
                    }
                );
                error
            })
        })
        .collect()
}

/// Renders one profile; profile settings override the manifest flags.
pub fn render_profile(
    config: &GenerationConfig,
    profile: &ProfileConfig,
    descriptor: &Descriptor,
    template: &str,
    artifact: &[u8],
) -> GeneratorResult<GeneratedModule> {
    let render_profile = RenderProfile {
        debug: profile.debug.unwrap_or_else(|| descriptor.flag(FLAG_DEBUG)),
        dispatch: DispatchMode::from_batch_flag(
            profile
                .batch_offsets
                .unwrap_or_else(|| descriptor.flag(FLAG_BATCH_OFFSETS)),
        ),
        artifact_path: profile.runtime_artifact_path(config),
    };

    let mut source = render(template, descriptor, &render_profile)?;
    if profile.embed {
        source = embed(&source, artifact)?;
    }

    let output = profile.output.display().to_string();
    ProfileGenerated {
        profile: &profile.name,
        output_path: &output,
        size_bytes: source.len(),
        embedded: profile.embed,
    }
    .log();

    Ok(GeneratedModule {
        profile: profile.name.clone(),
        output: profile.output.clone(),
        source,
    })
}

pub fn write_outputs(modules: &[GeneratedModule]) -> GeneratorResult<()> {
    for module in modules {
        if let Some(parent) = module.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&module.output, &module.source)?;
        tracing::info!(
            "{}",
            OutputWritten {
                output_path: &module.output.display().to_string(),
                size_bytes: module.source.len(),
            }
        );
    }
    Ok(())
}

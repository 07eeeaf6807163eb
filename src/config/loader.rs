// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{GeneratorError, GeneratorResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Generation configuration: which guest to describe and which binding
/// modules to produce from it.
///
/// Relative paths are resolved against the directory holding the config file.
///
/// # Fields
/// * `manifest` - Build manifest (JSON) emitted next to the guest artifact
/// * `artifact` - Compiled guest module introspected for its exports and imports
/// * `template` - Binding template (optional, defaults to the bundled template)
/// * `profiles` - One generated module per entry
///
/// # Example
/// ```yaml
/// manifest: manifests/http.json
/// artifact: target/wasm32-unknown-unknown/release/parser.wasm
/// profiles:
///   - name: debug
///     output: generated/debug.rs
///     debug: true
///   - name: release
///     output: generated/release.rs
///     embed: true
///     batch_offsets: true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    pub manifest: PathBuf,
    pub artifact: PathBuf,
    #[serde(default)]
    pub template: Option<PathBuf>,
    pub profiles: Vec<ProfileConfig>,
}

/// One build profile.
///
/// # Fields
/// * `name` - Profile name used in logs
/// * `output` - Where the generated module is written
/// * `debug` - Keep `$bind_debug_start` sections (optional, defaults to the manifest `debug` flag)
/// * `embed` - Inline the artifact as base64 (optional, defaults to false)
/// * `batch_offsets` - Dispatch mode override (optional, defaults to the manifest flag)
/// * `artifact_path` - Path the non-embedded loader reads at run time
///   (optional, defaults to `artifact`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProfileConfig {
    pub name: String,
    pub output: PathBuf,
    #[serde(default)]
    pub debug: Option<bool>,
    #[serde(default)]
    pub embed: bool,
    #[serde(default)]
    pub batch_offsets: Option<bool>,
    #[serde(default)]
    pub artifact_path: Option<String>,
}

impl ProfileConfig {
    /// Runtime artifact path baked into a non-embedded loader.
    pub fn runtime_artifact_path(&self, config: &GenerationConfig) -> String {
        self.artifact_path
            .clone()
            .unwrap_or_else(|| config.artifact.display().to_string())
    }
}

/// Config file syntax, picked from the file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> GeneratorResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(GeneratorError::Config(format!(
                "unsupported config extension {:?} for {} (expected .yaml, .yml or .toml)",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

/// Parses and validates a generation config from text.
pub fn parse_config(contents: &str, format: ConfigFormat) -> GeneratorResult<GenerationConfig> {
    let config: GenerationConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| GeneratorError::Config(e.to_string()))?,
        ConfigFormat::Toml => {
            toml::from_str(contents).map_err(|e| GeneratorError::Config(e.to_string()))?
        }
    };
    validate_profiles(&config.profiles)?;
    Ok(config)
}

/// Loads a generation config, resolving its paths against the config's directory.
pub fn load_config<P: AsRef<Path>>(path: P) -> GeneratorResult<GenerationConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let mut config = parse_config(&contents, ConfigFormat::from_path(path)?)?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.manifest = resolve(base, &config.manifest);
    config.artifact = resolve(base, &config.artifact);
    config.template = config.template.as_deref().map(|template| resolve(base, template));
    for profile in &mut config.profiles {
        profile.output = resolve(base, &profile.output);
    }

    Ok(config)
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn validate_profiles(profiles: &[ProfileConfig]) -> GeneratorResult<()> {
    if profiles.is_empty() {
        return Err(GeneratorError::Config(
            "at least one profile is required".to_string(),
        ));
    }

    let mut names = HashSet::new();
    let mut outputs = HashSet::new();
    for profile in profiles {
        if profile.name.trim().is_empty() {
            return Err(GeneratorError::Config("profile name must not be empty".to_string()));
        }
        if !names.insert(profile.name.as_str()) {
            return Err(GeneratorError::Config(format!(
                "duplicate profile name '{}'",
                profile.name
            )));
        }
        if !outputs.insert(profile.output.as_path()) {
            return Err(GeneratorError::Config(format!(
                "profiles share the output path {}",
                profile.output.display()
            )));
        }
    }
    Ok(())
}

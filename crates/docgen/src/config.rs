/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Layered YAML configuration for docgen
 */

//! Configuration loading.
//!
//! `resources/docgen.yml` is embedded into the binary. A user file passed
//! with `--config` is layered on top of it, and `-M TOKEN=VALUE` flags are
//! layered on top of that.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../resources/docgen.yml");

/// Output path used when neither the config nor the command line names one.
pub const DEFAULT_OUTPUT: &str = "README.md";

/// Settings for a render run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocgenConfig {
    /// Where to write the rendered file (`-` for stdout).
    pub output: Option<PathBuf>,
    /// Treat citation warnings as errors.
    pub strict: bool,
    /// Placeholder token to replacement value.
    pub placeholders: BTreeMap<String, String>,
}

impl DocgenConfig {
    /// The embedded defaults.
    pub fn defaults() -> Result<Self> {
        Self::from_yaml(DEFAULT_CONFIG).context("Failed to parse built-in configuration")
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&source)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Layer `other` on top of `self`.
    ///
    /// Placeholders are merged key by key, `output` is replaced when `other`
    /// sets it, and strict mode stays on once any layer enables it.
    pub fn merge(mut self, other: DocgenConfig) -> Self {
        if other.output.is_some() {
            self.output = other.output;
        }
        self.strict |= other.strict;
        self.placeholders.extend(other.placeholders);
        self
    }

    /// Apply `TOKEN=VALUE` overrides from the command line.
    pub fn with_placeholders(mut self, overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        self.placeholders.extend(overrides);
        self
    }

    pub fn output_path(&self) -> &Path {
        self.output
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_OUTPUT))
    }
}

/// Load the built-in configuration, layering `user_config` on top if given.
pub fn load(user_config: Option<&Path>) -> Result<DocgenConfig> {
    let config = DocgenConfig::defaults()?;
    match user_config {
        Some(path) => Ok(config.merge(DocgenConfig::from_file(path)?)),
        None => Ok(config),
    }
}

/// Parse a `TOKEN=VALUE` command-line override.
///
/// Splits on the first `=`, so values may contain `=` (query strings, for example).
pub fn parse_placeholder(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((token, value)) if !token.is_empty() => Ok((token.to_string(), value.to_string())),
        _ => Err(format!("expected TOKEN=VALUE, got '{}'", arg)),
    }
}

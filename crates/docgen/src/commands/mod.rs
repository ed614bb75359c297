/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Command implementations for the docgen CLI.
//!
//! Each command loads the template and configuration, then delegates the
//! actual rewriting to docgen-refs.

pub mod citations;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};
use docgen_refs::{Diagnostic, DiagnosticKind, PlaceholderMap};
use tracing::{error, warn};

use crate::config::DocgenConfig;

/// README template shipped with the binary, rendered when no input is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../resources/README.template.md");

/// Token naming whatever generated the output.
pub const GENERATOR_TOKEN: &str = "[[GEN]]";

/// A template and the name it is reported under.
#[derive(Debug)]
pub struct Template {
    pub text: String,
    /// File name of the template, or the program name for the built-in one.
    pub name: String,
}

impl Template {
    /// Read `input`, or fall back to the built-in template.
    pub fn load(input: Option<&Path>) -> Result<Self> {
        match input {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read template: {}", path.display()))?;
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                Ok(Self { text, name })
            }
            None => Ok(Self {
                text: DEFAULT_TEMPLATE.to_string(),
                name: env!("CARGO_PKG_NAME").to_string(),
            }),
        }
    }

    /// Placeholders for this template: `[[GEN]]` first, then the configured ones.
    pub fn placeholders(&self, config: &DocgenConfig) -> PlaceholderMap {
        let mut placeholders = PlaceholderMap::new();
        placeholders.insert(GENERATOR_TOKEN, self.name.clone());
        placeholders.extend(config.placeholders.clone());
        placeholders
    }
}

/// Log each diagnostic as one line on the diagnostic stream.
pub fn report_diagnostics(source: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.kind {
            DiagnosticKind::Warning => warn!("{}: {}", source, diagnostic),
            DiagnosticKind::Error => error!("{}: {}", source, diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_is_named_after_program() {
        let template = Template::load(None).unwrap();
        assert_eq!(template.name, "docgen");
        assert!(template.text.starts_with("<!--- Generated by [[GEN]] -->"));
    }

    #[test]
    fn test_config_can_override_generator() {
        let template = Template::load(None).unwrap();
        let config = DocgenConfig::default()
            .with_placeholders([(GENERATOR_TOKEN.to_string(), "README.py".to_string())]);
        assert_eq!(template.placeholders(&config).get(GENERATOR_TOKEN), Some("README.py"));
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let err = Template::load(Some(Path::new("/nonexistent/README.template.md"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read template"));
    }
}

/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Reads one template, substitutes placeholders, resolves citations and
//! writes one output file. Citation problems are logged as warnings and do
//! not stop the run unless strict mode is on, in which case nothing is
//! written.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use docgen_refs::{ResolveOptions, render};

use super::{Template, report_diagnostics};
use crate::config;

/// Arguments for the render command
#[derive(Debug, Default)]
pub struct RenderArgs {
    /// Template file; the built-in README template when absent
    pub input: Option<PathBuf>,
    /// Output file (`-` for stdout)
    pub output: Option<PathBuf>,
    /// User configuration file
    pub config: Option<PathBuf>,
    /// `TOKEN=VALUE` placeholder overrides
    pub placeholders: Vec<(String, String)>,
    /// Treat citation warnings as errors
    pub strict: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let mut config = config::load(args.config.as_deref())?.with_placeholders(args.placeholders);
    config.strict |= args.strict;
    if let Some(output) = args.output {
        config.output = Some(output);
    }

    let template = Template::load(args.input.as_deref())?;
    let placeholders = template.placeholders(&config);
    debug!(
        template = %template.name,
        placeholders = placeholders.len(),
        strict = config.strict,
        "Rendering template"
    );

    let options = ResolveOptions {
        strict: config.strict,
    };
    let resolution = render(&template.text, &placeholders, &options)?;
    report_diagnostics(&template.name, &resolution.diagnostics);
    resolution.check()?;

    let output_path = config.output_path();
    write_output(output_path, &resolution.text)?;

    if output_path != Path::new("-") {
        info!(
            "Wrote {} ({} citations)",
            output_path.display(),
            resolution.citations.len()
        );
    }
    Ok(())
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write output: {}", path.display()))
}

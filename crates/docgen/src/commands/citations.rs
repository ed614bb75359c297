/*
 * citations.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `docgen citations`: print the numbering a render would produce, without
//! writing anything.

use std::path::PathBuf;

use anyhow::Result;

use docgen_refs::{CitationTable, ResolveOptions, render};

use super::{Template, report_diagnostics};
use crate::config;

/// Arguments for the citations command
#[derive(Debug, Default)]
pub struct CitationsArgs {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Print the table as JSON
    pub json: bool,
}

pub fn execute(args: CitationsArgs) -> Result<()> {
    let config = config::load(args.config.as_deref())?;
    let template = Template::load(args.input.as_deref())?;
    let resolution = render(
        &template.text,
        &template.placeholders(&config),
        &ResolveOptions::default(),
    )?;
    report_diagnostics(&template.name, &resolution.diagnostics);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution.citations)?);
    } else {
        print!("{}", format_table(&resolution.citations));
    }
    Ok(())
}

/// One line per citation: index, name and URL (or `-`).
fn format_table(citations: &CitationTable) -> String {
    let width = citations.iter().map(|r| r.name.len()).max().unwrap_or(0);
    citations
        .iter()
        .map(|record| {
            format!(
                "{:>3}. {:<width$}  {}\n",
                record.index,
                record.name,
                record.url.as_deref().unwrap_or("-"),
                width = width
            )
        })
        .collect()
}

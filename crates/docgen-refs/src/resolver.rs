/*
 * resolver.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Citation resolution and the full render pipeline.
//!
//! Resolution runs in two phases over an immutable input:
//!
//! 1. scan every marker with its span and build the [`CitationTable`]
//! 2. copy the text once, replacing each marker span with its rendered form
//!
//! Because the rewrite is a single pass over precomputed, non-overlapping
//! spans, rendered text (which itself contains `[[1]]`-style brackets) is
//! never rescanned.
//!
//! A reference to a name with no definition is left exactly as written and
//! reported as an `unmatched-reference` diagnostic.

use std::collections::HashSet;

use serde::Serialize;

use crate::citation::CitationTable;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector, DiagnosticKind};
use crate::error::{DocgenError, DocgenResult};
use crate::marker::{MarkerKind, scan_markers};
use crate::placeholder::PlaceholderMap;

/// Options controlling citation resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Strict mode: record diagnostics as errors.
    pub strict: bool,
}

impl ResolveOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Output of a resolution pass.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The rendered text.
    pub text: String,
    /// Numbering table the text was rendered with.
    pub citations: CitationTable,
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Fail if strict mode turned any diagnostic into an error.
    pub fn check(&self) -> DocgenResult<()> {
        match self.error_count() {
            0 => Ok(()),
            count => Err(DocgenError::Strict { count }),
        }
    }
}

/// Renumber and rewrite all citation markers in `text`.
pub fn resolve_citations(text: &str, options: &ResolveOptions) -> Resolution {
    let markers = scan_markers(text);
    let citations = CitationTable::collect(text, &markers);
    let mut diagnostics = DiagnosticCollector::new().with_strict(options.strict);

    for duplicate in citations.duplicates() {
        diagnostics.warn_at(
            DiagnosticCode::DuplicateDefinition,
            format!(
                "duplicate definition of citation '{}' (numbered {}); references use the first",
                duplicate.name, duplicate.index
            ),
            text,
            duplicate.span.start,
        );
    }

    let referenced: HashSet<&str> = markers
        .iter()
        .filter(|m| m.is_reference())
        .map(|m| m.name.as_str())
        .collect();
    for record in &citations {
        let is_canonical = citations
            .lookup(&record.name)
            .is_some_and(|r| r.index == record.index);
        if record.url.is_none() && is_canonical && referenced.contains(record.name.as_str()) {
            diagnostics.warn_at(
                DiagnosticCode::MissingUrl,
                format!("no URL found for citation '{}'", record.name),
                text,
                record.span.start,
            );
        }
    }

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut rewritten = 0usize;
    for marker in &markers {
        output.push_str(&text[cursor..marker.span.start]);
        cursor = marker.span.end;

        let replacement = match marker.kind {
            MarkerKind::Definition => citations
                .at_offset(marker.span.start)
                .map(|record| record.render_definition()),
            MarkerKind::Reference => match citations.lookup(&marker.name) {
                Some(record) => Some(record.render_reference()),
                None => {
                    diagnostics.warn_at(
                        DiagnosticCode::UnmatchedReference,
                        format!(
                            "no definition found for citation reference '{}'",
                            marker.literal()
                        ),
                        text,
                        marker.span.start,
                    );
                    None
                }
            },
        };

        match replacement {
            Some(rendered) => {
                output.push_str(&rendered);
                rewritten += 1;
            }
            None => output.push_str(&text[marker.span.clone()]),
        }
    }
    output.push_str(&text[cursor..]);

    tracing::debug!(
        definitions = citations.len(),
        markers = markers.len(),
        rewritten,
        "Resolved citations"
    );

    Resolution {
        text: output,
        citations,
        diagnostics: diagnostics.into_diagnostics(),
    }
}

/// Substitute placeholders, then resolve citations in the substituted text.
pub fn render(
    text: &str,
    placeholders: &PlaceholderMap,
    options: &ResolveOptions,
) -> DocgenResult<Resolution> {
    let substituted = placeholders.substitute(text)?;
    Ok(resolve_citations(&substituted, options))
}

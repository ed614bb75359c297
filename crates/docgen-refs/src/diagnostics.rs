/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Non-fatal diagnostics reported while resolving citations.
//!
//! Nothing in the resolver aborts on a bad citation. Problems are recorded
//! here with their byte offset and line, and the caller decides how to
//! surface them (the CLI logs each one as a warning).

use std::fmt;

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    Warning,
    Error,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A `[[ref:name]]` with no `[[item:name]]` anywhere in the text.
    UnmatchedReference,
    /// A referenced definition with no URL before the next definition.
    MissingUrl,
    /// A second `[[item:name]]` for a name that is already defined.
    DuplicateDefinition,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnmatchedReference => "unmatched-reference",
            DiagnosticCode::MissingUrl => "missing-url",
            DiagnosticCode::DuplicateDefinition => "duplicate-definition",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic message with its location in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: DiagnosticCode,
    pub message: String,
    /// Byte offset of the offending marker.
    pub offset: usize,
    /// 1-based line of the offending marker.
    pub line: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} [{}]", self.line, self.message, self.code)
    }
}

/// Collector for diagnostics produced during one resolution pass.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    /// Strict mode: record warnings as errors.
    strict: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            strict: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Add a warning located at `offset` within `text`.
    ///
    /// In strict mode the diagnostic is recorded as an error instead.
    pub fn warn_at(
        &mut self,
        code: DiagnosticCode,
        message: impl Into<String>,
        text: &str,
        offset: usize,
    ) {
        let kind = if self.strict {
            DiagnosticKind::Error
        } else {
            DiagnosticKind::Warning
        };
        self.diagnostics.push(Diagnostic {
            kind,
            code,
            message: message.into(),
            offset,
            line: line_of(text, offset),
        });
    }

    /// Check if any errors were collected (warnings don't count).
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector and return the diagnostics, sorted by offset.
    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| d.offset);
        self.diagnostics
    }
}

/// 1-based line number of a byte offset.
fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_numbers() {
        let text = "one\ntwo\nthree";
        assert_eq!(line_of(text, 0), 1);
        assert_eq!(line_of(text, 4), 2);
        assert_eq!(line_of(text, 8), 3);
        assert_eq!(line_of(text, 1000), 3);
    }

    #[test]
    fn test_into_diagnostics_sorted_by_offset() {
        let text = "a\nb\nc";
        let mut collector = DiagnosticCollector::new();
        collector.warn_at(DiagnosticCode::MissingUrl, "late", text, 4);
        collector.warn_at(DiagnosticCode::UnmatchedReference, "early", text, 0);

        assert!(!collector.has_errors());
        let diags = collector.into_diagnostics();
        assert_eq!(diags[0].message, "early");
        assert_eq!(diags[1].line, 3);
    }

    #[test]
    fn test_strict_mode_records_errors() {
        let mut collector = DiagnosticCollector::new().with_strict(true);
        collector.warn_at(DiagnosticCode::MissingUrl, "no URL", "x", 0);
        assert!(collector.has_errors());
        assert_eq!(collector.diagnostics()[0].kind, DiagnosticKind::Error);
    }

    #[test]
    fn test_display_includes_line_and_code() {
        let mut collector = DiagnosticCollector::new();
        collector.warn_at(
            DiagnosticCode::UnmatchedReference,
            "no definition for citation 'x'",
            "see [[ref:x]]",
            4,
        );
        let diag = &collector.diagnostics()[0];
        assert_eq!(
            diag.to_string(),
            "line 1: no definition for citation 'x' [unmatched-reference]"
        );
    }
}

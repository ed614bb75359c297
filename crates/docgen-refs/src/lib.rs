/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Placeholder substitution and citation renumbering for generated markdown.
//!
//! Templates contain two kinds of markup:
//!
//! - Placeholder tokens such as `[[GEN]]`, replaced verbatim from a [`PlaceholderMap`]
//! - Citation markers: `[[item:name]]` declares an entry, `[[ref:name]]` cites it
//!
//! Entries are numbered by the order of their `[[item:...]]` markers. Each
//! definition is rewritten to `n.` and each reference to `[[n]](url)` when a
//! parenthesized URL follows the definition, or `[n]` otherwise.
//!
//! # Example
//!
//! ```
//! use docgen_refs::{PlaceholderMap, ResolveOptions, render};
//!
//! # fn main() -> Result<(), docgen_refs::DocgenError> {
//! let template = "Generated by [[GEN]]. See [[ref:a]].\n\n[[item:a]] Paper (https://doi.org/x)\n";
//! let placeholders = PlaceholderMap::with_placeholders([("[[GEN]]", "docgen")]);
//! let resolution = render(template, &placeholders, &ResolveOptions::default())?;
//! assert_eq!(
//!     resolution.text,
//!     "Generated by docgen. See [[1]](https://doi.org/x).\n\n1. Paper (https://doi.org/x)\n"
//! );
//! # Ok(())
//! # }
//! ```

pub mod citation;
pub mod diagnostics;
pub mod error;
pub mod marker;
pub mod placeholder;
pub mod resolver;

// Re-export main types at crate root
pub use citation::{CitationRecord, CitationTable};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector, DiagnosticKind};
pub use error::{DocgenError, DocgenResult};
pub use marker::{Marker, MarkerKind, scan_markers};
pub use placeholder::PlaceholderMap;
pub use resolver::{Resolution, ResolveOptions, render, resolve_citations};

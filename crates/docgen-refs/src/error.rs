/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for placeholder and citation rendering.

use thiserror::Error;

/// Errors that can occur while rendering a template.
///
/// Unmatched references are never errors on their own; they are reported as
/// diagnostics and only become fatal under strict mode.
#[derive(Debug, Error)]
pub enum DocgenError {
    /// A placeholder token was registered with an empty string.
    #[error("Placeholder token must not be empty")]
    EmptyPlaceholder,

    /// One placeholder token occurs inside another, so substitution would be ambiguous.
    #[error("Placeholder tokens overlap: '{first}' occurs within '{second}'")]
    OverlappingPlaceholders { first: String, second: String },

    /// A replacement value contains a placeholder token.
    #[error("Replacement for '{token}' contains placeholder token '{contained}'")]
    RecursivePlaceholder { token: String, contained: String },

    /// A replacement joined with the surrounding text to form a new token.
    #[error("Substitution formed placeholder token '{token}' from adjacent text")]
    PlaceholderFormed { token: String },

    /// The combined token pattern could not be compiled (e.g. it exceeds the size limit).
    #[error("Invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Warnings were reported while strict mode was enabled.
    #[error("{count} warning(s) reported in strict mode")]
    Strict { count: usize },
}

/// Result type for rendering operations.
pub type DocgenResult<T> = Result<T, DocgenError>;

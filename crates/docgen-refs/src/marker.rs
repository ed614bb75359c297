/*
 * marker.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Citation marker scanning.
//!
//! Two marker families are recognized:
//!
//! ```text
//! [[ref:partstr]]    inline citation of the entry named `partstr`
//! [[item:partstr]]   definition of the entry named `partstr`
//! ```
//!
//! Names may contain any character except `]`. Anything that does not match
//! these shapes exactly (for example an unterminated `[[ref:x]`) is not a
//! marker and is left alone by the resolver.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Matches both marker families in one pass so that spans come out in
/// document order. Group 1 is the family tag, group 2 the name.
static MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(ref|item):([^\]]*)\]\]").unwrap());

/// The two kinds of citation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    /// Inline citation, `[[ref:name]]`.
    Reference,
    /// Citation entry, `[[item:name]]`.
    Definition,
}

impl MarkerKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ref" => Some(MarkerKind::Reference),
            "item" => Some(MarkerKind::Definition),
            _ => None,
        }
    }

    /// The tag used inside the marker brackets.
    pub fn tag(self) -> &'static str {
        match self {
            MarkerKind::Reference => "ref",
            MarkerKind::Definition => "item",
        }
    }
}

/// A marker located in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub name: String,
    /// Byte range of the whole marker, brackets included.
    pub span: Range<usize>,
}

impl Marker {
    /// The literal marker text as it appears in the source.
    pub fn literal(&self) -> String {
        format!("[[{}:{}]]", self.kind.tag(), self.name)
    }

    pub fn is_definition(&self) -> bool {
        self.kind == MarkerKind::Definition
    }

    pub fn is_reference(&self) -> bool {
        self.kind == MarkerKind::Reference
    }
}

/// Collect every marker in `text`, in document order.
///
/// Spans never overlap since the pattern cannot match across a `]`.
pub fn scan_markers(text: &str) -> Vec<Marker> {
    MARKER_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = MarkerKind::from_tag(caps.get(1)?.as_str())?;
            Some(Marker {
                kind,
                name: caps[2].to_string(),
                span: whole.range(),
            })
        })
        .collect()
}

/*
 * citation.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Citation records and the numbering table.
//!
//! Numbering is purely positional: the n-th `[[item:...]]` in the document
//! gets index n, no matter where (or whether) it is referenced. Each
//! definition may carry a URL, taken from the first parenthesized
//! `http(s)://` link between the definition and the next one:
//!
//! ```text
//! [[item:ees]] S. M. H. Hashemi, ... 2019
//!   [10.1039/C9EE00219G](https://doi.org/10.1039/C9EE00219G)
//! [[item:pasc19]] ...
//! ```
//!
//! Here `ees` gets `https://doi.org/10.1039/C9EE00219G`.

use std::collections::HashMap;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::marker::Marker;

/// A parenthesized URL. Group 1 is the URL without the parentheses.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((https?://[^)]*)\)").unwrap());

/// One resolved citation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationRecord {
    /// 1-based position among all definitions.
    pub index: usize,
    pub name: String,
    pub url: Option<String>,
    /// Byte range of the `[[item:...]]` marker in the source.
    pub span: Range<usize>,
}

impl CitationRecord {
    /// Text that replaces the definition marker, e.g. `3.`
    pub fn render_definition(&self) -> String {
        format!("{}.", self.index)
    }

    /// Text that replaces every reference to this entry: `[[3]](url)` when a
    /// URL is known, `[3]` otherwise.
    pub fn render_reference(&self) -> String {
        match &self.url {
            Some(url) => format!("[[{}]]({})", self.index, url),
            None => format!("[{}]", self.index),
        }
    }
}

/// All definitions of a document in numbering order, with lookup by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CitationTable {
    records: Vec<CitationRecord>,
    /// Name to position in `records`. The first definition of a name wins.
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl CitationTable {
    /// Build the table from the markers of `text`.
    ///
    /// `markers` must be the output of [`crate::marker::scan_markers`] on the
    /// same text; reference markers are skipped.
    pub fn collect(text: &str, markers: &[Marker]) -> Self {
        let definitions: Vec<&Marker> = markers.iter().filter(|m| m.is_definition()).collect();

        let mut table = CitationTable::default();
        for (i, def) in definitions.iter().enumerate() {
            let window_end = definitions
                .get(i + 1)
                .map_or(text.len(), |next| next.span.start);
            let window = &text[def.span.end..window_end];
            let url = URL_PATTERN
                .captures(window)
                .map(|caps| caps[1].to_string());

            table.by_name.entry(def.name.clone()).or_insert(i);
            table.records.push(CitationRecord {
                index: i + 1,
                name: def.name.clone(),
                url,
                span: def.span.clone(),
            });
        }
        table
    }

    /// The record that references to `name` resolve to.
    pub fn lookup(&self, name: &str) -> Option<&CitationRecord> {
        self.by_name.get(name).map(|&i| &self.records[i])
    }

    /// The record whose definition marker starts at `offset`.
    pub fn at_offset(&self, offset: usize) -> Option<&CitationRecord> {
        self.records
            .binary_search_by_key(&offset, |r| r.span.start)
            .ok()
            .map(|i| &self.records[i])
    }

    /// Definitions that repeat an earlier name. References never resolve to these.
    pub fn duplicates(&self) -> impl Iterator<Item = &CitationRecord> {
        self.records
            .iter()
            .enumerate()
            .filter(|(i, r)| self.by_name.get(&r.name) != Some(i))
            .map(|(_, r)| r)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CitationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a CitationTable {
    type Item = &'a CitationRecord;
    type IntoIter = std::slice::Iter<'a, CitationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::scan_markers;

    fn table(text: &str) -> CitationTable {
        CitationTable::collect(text, &scan_markers(text))
    }

    #[test]
    fn test_numbering_follows_definition_order() {
        let t = table("[[ref:b]] [[ref:a]]\n[[item:a]] first\n[[item:b]] second\n");
        assert_eq!(t.len(), 2);
        assert_eq!(t.lookup("a").unwrap().index, 1);
        assert_eq!(t.lookup("b").unwrap().index, 2);
    }

    #[test]
    fn test_url_is_taken_from_own_window_only() {
        let t = table("[[item:a]] no link here\n[[item:b]] see (https://ex.com/b)\n");
        assert_eq!(t.lookup("a").unwrap().url, None);
        assert_eq!(t.lookup("b").unwrap().url.as_deref(), Some("https://ex.com/b"));
    }

    #[test]
    fn test_first_url_in_window_wins() {
        let t = table("[[item:a]] [doi](http://one.org) [[link]](http://two.org)");
        assert_eq!(t.lookup("a").unwrap().url.as_deref(), Some("http://one.org"));
    }

    #[test]
    fn test_url_before_definition_is_ignored() {
        let t = table("intro (http://intro.org)\n[[item:a]] plain\n");
        assert_eq!(t.lookup("a").unwrap().url, None);
    }

    #[test]
    fn test_parenthesized_non_url_is_ignored() {
        let t = table("[[item:a]] (optional) (ftp://files.org) (doc/sphinx)");
        assert_eq!(t.lookup("a").unwrap().url, None);
    }

    #[test]
    fn test_render_forms() {
        let t = table("[[item:a]] (http://ex.com/a)\n[[item:b]] none\n");
        let a = t.lookup("a").unwrap();
        let b = t.lookup("b").unwrap();
        assert_eq!(a.render_definition(), "1.");
        assert_eq!(a.render_reference(), "[[1]](http://ex.com/a)");
        assert_eq!(b.render_definition(), "2.");
        assert_eq!(b.render_reference(), "[2]");
    }

    #[test]
    fn test_duplicate_definitions_keep_positions() {
        let t = table("[[item:a]] x\n[[item:a]] y (http://y.org)\n[[item:c]] z\n");
        assert_eq!(t.len(), 3);
        assert_eq!(t.lookup("a").unwrap().index, 1);
        assert_eq!(t.lookup("c").unwrap().index, 3);

        let dups: Vec<_> = t.duplicates().map(|r| r.index).collect();
        assert_eq!(dups, vec![2]);
    }

    #[test]
    fn test_at_offset() {
        let text = "abc [[item:a]] [[item:b]]";
        let t = table(text);
        assert_eq!(t.at_offset(4).unwrap().name, "a");
        assert_eq!(t.at_offset(15).unwrap().name, "b");
        assert!(t.at_offset(5).is_none());
    }

    #[test]
    fn test_empty_text() {
        let t = table("");
        assert!(t.is_empty());
        assert!(t.lookup("a").is_none());
    }
}

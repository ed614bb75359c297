/*
 * placeholder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Literal placeholder substitution.
//!
//! A placeholder is a fixed token such as `[[GEN]]` or `[[VIDEOS]]` that is
//! replaced verbatim with a configured value. All tokens are replaced in a
//! single left-to-right pass, so a replacement is never rescanned.
//!
//! Three rules keep the substitution well defined and idempotent:
//!
//! - no token may occur inside another token
//! - no replacement may contain any token
//! - no replacement may form a token together with the text around it

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::{DocgenError, DocgenResult};

/// Mapping from placeholder token to replacement text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: BTreeMap<String, String>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace a placeholder.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(token.into(), value.into());
        self
    }

    /// Create a map with the given placeholders.
    pub fn with_placeholders(
        placeholders: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut map = Self::new();
        for (token, value) in placeholders {
            map.insert(token, value);
        }
        map
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that the tokens are non-empty, disjoint and not reproduced by any replacement.
    pub fn validate(&self) -> DocgenResult<()> {
        for (token, value) in &self.entries {
            if token.is_empty() {
                return Err(DocgenError::EmptyPlaceholder);
            }
            for other in self.entries.keys() {
                if other != token && other.contains(token.as_str()) {
                    return Err(DocgenError::OverlappingPlaceholders {
                        first: token.clone(),
                        second: other.clone(),
                    });
                }
                if value.contains(other.as_str()) {
                    return Err(DocgenError::RecursivePlaceholder {
                        token: token.clone(),
                        contained: other.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Replace every occurrence of every token in `text`.
    pub fn substitute(&self, text: &str) -> DocgenResult<String> {
        self.validate()?;
        if self.entries.is_empty() {
            return Ok(text.to_string());
        }

        let alternation = self
            .entries
            .keys()
            .map(|token| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation)?;

        let mut count = 0usize;
        let output = pattern.replace_all(text, |caps: &regex::Captures<'_>| {
            count += 1;
            self.entries[&caps[0]].clone()
        });
        tracing::debug!(replacements = count, "Substituted placeholders");

        // Every token in the input was replaced, so any match now spans a
        // replacement boundary and a second pass would change the text.
        if let Some(formed) = pattern.find(&output) {
            return Err(DocgenError::PlaceholderFormed {
                token: formed.as_str().to_string(),
            });
        }
        Ok(output.into_owned())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_placeholders(iter)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PlaceholderMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (token, value) in iter {
            self.insert(token, value);
        }
    }
}

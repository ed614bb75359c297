/*
 * resolver_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for docgen-refs using test fixtures.
 */

use docgen_refs::{
    DiagnosticCode, PlaceholderMap, ResolveOptions, render, resolve_citations, scan_markers,
};
use pretty_assertions::assert_eq;
use std::path::Path;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("test-fixtures").join(name)
}

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

fn resolve(text: &str) -> docgen_refs::Resolution {
    resolve_citations(text, &ResolveOptions::default())
}

#[test]
fn test_publications_fixture() {
    let template = load_fixture("publications.template.md");
    let expected = load_fixture("publications.expected.md");

    let placeholders = PlaceholderMap::with_placeholders([
        ("[[GEN]]", "publications.template.md"),
        ("[[VIDEOS]]", "https://example.org/videos"),
    ]);
    let resolution = render(&template, &placeholders, &ResolveOptions::default()).unwrap();

    assert_eq!(resolution.text, expected);
    assert_eq!(resolution.citations.len(), 4);

    // icmf is cited but has no URL in its entry
    assert_eq!(resolution.diagnostics.len(), 1);
    assert_eq!(resolution.diagnostics[0].code, DiagnosticCode::MissingUrl);
    assert!(resolution.diagnostics[0].message.contains("icmf"));
}

#[test]
fn test_numbering_ignores_reference_order() {
    let text = "[[ref:c]] [[ref:b]] [[ref:a]]\n[[item:a]]\n[[item:b]]\n[[item:c]]\n";
    let res = resolve(text);
    assert_eq!(res.text, "[3] [2] [1]\n1.\n2.\n3.\n");

    let indices: Vec<_> = res.citations.iter().map(|r| (r.name.as_str(), r.index)).collect();
    assert_eq!(indices, vec![("a", 1), ("b", 2), ("c", 3)]);
}

#[test]
fn test_all_references_to_a_name_render_identically() {
    let text = "[[ref:a]] [[ref:b]] [[ref:a]]\n[[item:b]] none\n[[item:a]] (https://a.org)\n[[ref:a]] [[ref:b]]";
    let res = resolve(text);
    assert_eq!(
        res.text,
        "[[2]](https://a.org) [1] [[2]](https://a.org)\n1. none\n2. (https://a.org)\n\
         [[2]](https://a.org) [1]"
    );
}

#[test]
fn test_unmatched_reference_scenario() {
    let res = resolve("see [[ref:x]]");
    insta::assert_snapshot!(res.text, @"see [[ref:x]]");

    assert_eq!(res.diagnostics.len(), 1);
    let diag = &res.diagnostics[0];
    assert_eq!(diag.code, DiagnosticCode::UnmatchedReference);
    assert!(diag.message.contains('x'));
}

#[test]
fn test_no_matched_markers_remain() {
    let template = load_fixture("publications.template.md");
    let res = resolve(&template);
    assert!(scan_markers(&res.text).is_empty());
}

#[test]
fn test_malformed_markers_left_verbatim() {
    let text = "[[ref:a] [[item:a]] [[item:b (http://b.org)";
    let res = resolve(text);
    insta::assert_snapshot!(res.text, @"[[ref:a] 1. [[item:b (http://b.org)");
}

#[test]
fn test_concrete_scenario() {
    let text = "[[item:a]] text (http://ex.com/a) ... [[ref:a]] ... \
                [[item:b]] text, no url ... [[ref:b]] ... [[ref:a]]";
    let res = resolve(text);
    insta::assert_snapshot!(
        res.text,
        @"1. text (http://ex.com/a) ... [[1]](http://ex.com/a) ... 2. text, no url ... [2] ... [[1]](http://ex.com/a)"
    );
}

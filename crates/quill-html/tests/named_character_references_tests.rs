//! Integration tests for named character reference lookup.

use quill_html::tokenizer::{ReferenceMatch, reference_trie};

fn lookup(name: &str) -> Option<&'static str> {
    reference_trie().lookup(name)
}

fn has_prefix(prefix: &str) -> bool {
    reference_trie().has_prefix(prefix)
}

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup("amp;"), Some("&"));
    assert_eq!(lookup("lt;"), Some("<"));
    assert_eq!(lookup("gt;"), Some(">"));
    assert_eq!(lookup("quot;"), Some("\""));
    assert_eq!(lookup("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup("amp"), Some("&"));
    assert_eq!(lookup("lt"), Some("<"));
    assert_eq!(lookup("gt"), Some(">"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup("notarealentity;"), None);
    assert_eq!(lookup(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(has_prefix("a")); // amp, apos, alpha, etc.
    assert!(has_prefix("am")); // amp
    assert!(has_prefix("amp")); // amp, amp;
    assert!(has_prefix("amp;")); // amp;
    assert!(!has_prefix("ampx")); // nothing
    assert!(!has_prefix("xyz")); // nothing
}

#[test]
fn test_longest_match_stops_at_dead_end() {
    let trie = reference_trie();
    assert_eq!(
        trie.longest_match("ampersand".chars()),
        Some(ReferenceMatch {
            length: 3,
            value: "&",
            has_semicolon: false,
        })
    );
    assert_eq!(trie.longest_match("zzz".chars()), None);
}

#[test]
fn test_longest_match_reports_semicolon() {
    let found = reference_trie()
        .longest_match("hellip;".chars())
        .expect("hellip; is a named reference");
    assert_eq!(found.value, "\u{2026}");
    assert_eq!(found.length, 7);
    assert!(found.has_semicolon);
}

#[test]
fn test_step_walks_one_character() {
    let trie = reference_trie();
    let a = trie.step(trie.root(), 'a').expect("names start with 'a'");
    assert!(trie.has_children(a));
    assert_eq!(trie.value(a), None);
    assert!(trie.step(trie.root(), '#').is_none());
}

#[test]
fn test_names_are_case_sensitive() {
    assert_eq!(lookup("AMP;"), Some("&"));
    assert_eq!(lookup("Amp;"), None);
}

//! Integration tests for named character reference lookup.

use wren_html::tokenizer::named_character_references::{longest_match, lookup_entity};

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("gt"), Some(">"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity("apos"), None); // only valid with the semicolon
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_multi_code_point_entity() {
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{0338}"));
}

#[test]
fn test_longest_match_prefers_semicolon() {
    let found = longest_match(&chars("notin; rest")).unwrap();
    assert_eq!(found.entity, "notin;");
    assert_eq!(found.code_points, "\u{2209}");
    assert_eq!(found.consumed_len, 6);
    assert!(found.ends_with_semicolon());
}

#[test]
fn test_longest_match_falls_back_to_legacy_prefix() {
    let found = longest_match(&chars("notit;")).unwrap();
    assert_eq!(found.entity, "not");
    assert_eq!(found.consumed_len, 3);
    assert!(!found.ends_with_semicolon());
}

#[test]
fn test_longest_match_none() {
    assert_eq!(longest_match(&chars("xyz;")), None);
    assert_eq!(longest_match(&chars(";")), None);
    assert_eq!(longest_match(&[]), None);
}

#[test]
fn test_table_covers_every_whatwg_name() {
    assert_eq!(lookup_entity("copysr;"), Some("\u{2117}"));
    assert_eq!(lookup_entity("Aopf;"), Some("\u{1D538}"));
    assert_eq!(lookup_entity("rightarrow;"), Some("\u{2192}"));
    assert_eq!(lookup_entity("hookrightarrow;"), Some("\u{21AA}"));
    assert_eq!(lookup_entity("NotEqual;"), Some("\u{2260}"));
    assert_eq!(lookup_entity("lbrace;"), Some("{"));
    assert_eq!(lookup_entity("CounterClockwiseContourIntegral;"), Some("\u{2233}"));
}

#[test]
fn test_longest_match_beats_legacy_prefix() {
    // "copy" and "gt" are legacy names, but the full names win.
    let found = longest_match(&chars("copysr;")).unwrap();
    assert_eq!(found.entity, "copysr;");
    assert_eq!(found.code_points, "\u{2117}");

    let found = longest_match(&chars("gtrless;")).unwrap();
    assert_eq!(found.entity, "gtrless;");
    assert_eq!(found.code_points, "\u{2277}");
    assert_eq!(found.consumed_len, 8);
}

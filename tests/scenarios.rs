//! Integration tests for the concrete (pattern, text, expected) scenarios
//! from `spec.md` §8, run against the public `compile`/`match_at` surface
//! rather than any internal module (the point of an integration test).

use pt_regex::{compile, match_at, Mode, MatchStatus};

fn run(pattern: &str, text: &[u8]) -> pt_regex::MatchResult {
    let m = compile(pattern.as_bytes(), Mode::Silent);
    assert!(m.is_valid(), "pattern {pattern:?} should compile");
    match_at(&m, text, 0, Mode::Silent)
}

#[test]
fn scenario_1_plain_concatenation() {
    let r = run("abcd", b"aaa  b-b#bbbbabcdlmnop");
    assert_eq!(r.status, MatchStatus::Found);
    assert!((12..=13).contains(&r.match_start));
    assert_eq!(r.match_end - r.match_start, 4);
}

#[test]
fn scenario_2_optional_atom_absent() {
    let r = run("abc?d", b"aaabbbbbbabdlmnop");
    assert_eq!(r.status, MatchStatus::Found);
    assert_eq!(r.match_end - r.match_start, 3);
}

#[test]
fn scenario_3_kleene_star_spans_run() {
    let text: &[u8] = b"aaabbbbbbc a.kas";
    let r = run("ab*c", text);
    assert_eq!(r.status, MatchStatus::Found);
    assert_eq!(&text[r.match_start..r.match_end], b"abbbbbbc");
}

#[test]
fn scenario_4_plus_with_no_mandatory_atom_fails() {
    let r = run("ab+c", b"aaacd");
    assert_eq!(r.status, MatchStatus::NotFound);
}

#[test]
fn scenario_5_alternation_inside_group() {
    let text: &[u8] = b"aaaaaadabcd";
    let r = run("(ab|da)bc", text);
    assert_eq!(r.status, MatchStatus::Found);
    assert_eq!(&text[r.match_start..r.match_end], b"dabc");
}

#[test]
fn scenario_6_digit_class_plus() {
    let r = run("[0-9]+", b"abc123xyz");
    assert_eq!(r.status, MatchStatus::Found);
    assert!(r.match_start >= 3 && r.match_start < 6);
}

#[test]
fn scenario_7_escaped_parens_are_literal() {
    let text: &[u8] = b"zzb(cd)a...";
    let r = run(r"a\(cd\)a", text);
    assert_eq!(r.status, MatchStatus::Found);
    assert_eq!(&text[r.match_start..r.match_end], b"(cd)a");
}

#[test]
fn scenario_8_malformed_pattern_is_a_sticky_error() {
    let m = compile(b"(abc", Mode::Silent);
    assert!(!m.is_valid());
    let r = match_at(&m, b"abc", 0, Mode::Silent);
    assert_eq!(r.status, MatchStatus::InvalidInput);
}

#[test]
fn unmatched_close_paren_is_rejected() {
    let m = compile(b"abc)", Mode::Silent);
    assert!(!m.is_valid());
}

#[test]
fn bad_class_range_is_rejected() {
    let m = compile(b"[0-5]", Mode::Silent);
    assert!(!m.is_valid());
}

#[test]
fn trailing_operator_is_rejected() {
    let m = compile(b"a|", Mode::Silent);
    assert!(!m.is_valid());
}

#[test]
fn wildcard_matches_any_printable_byte() {
    let r = run("a$c", b"xxabcxx");
    assert_eq!(r.status, MatchStatus::Found);
}

#[test]
fn letter_class_matches_either_case() {
    let r = run("[a-zA-Z]+", b"123 Hello 456");
    assert_eq!(r.status, MatchStatus::Found);
}

//! Property tests for the "for every compiled matcher"/"for every pattern"
//! invariants in `spec.md` §8, using `proptest` to generate the inputs
//! (the more actively maintained, combinator-based choice among the
//! property-testing crates used elsewhere in the retrieval pack; see
//! `DESIGN.md`).

use pt_regex::{compile, match_at, Mode, MatchStatus};
use proptest::prelude::*;

/// A small, always-valid pattern grammar: literals from a tiny alphabet,
/// the four operators, alternation, grouping, and the bracket classes —
/// recursive enough to exercise nested `*`/`+`/`?`/`|` without ever
/// producing a pattern this engine considers malformed.
fn arb_pattern() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
        Just("[0-9]".to_string()),
        Just("[a-z]".to_string()),
        Just("$".to_string()),
    ];
    leaf.prop_recursive(4, 64, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|a| format!("{a}*")),
            inner.clone().prop_map(|a| format!("{a}+")),
            inner.clone().prop_map(|a| format!("{a}?")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}{b}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}|{b})")),
        ]
    })
}

fn arb_text() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(b'1'), Just(b'9'), Just(b' ')], 0..24)
}

proptest! {
    /// Compile is deterministic: the same pattern always compiles to the
    /// same validity and, on a valid compile, agrees with itself on the
    /// same (text, start) match query repeated twice.
    #[test]
    fn compile_is_deterministic(pattern in arb_pattern()) {
        let m1 = compile(pattern.as_bytes(), Mode::Silent);
        let m2 = compile(pattern.as_bytes(), Mode::Silent);
        prop_assert_eq!(m1.is_valid(), m2.is_valid());
    }

    /// Match is idempotent: calling it twice with the same arguments
    /// yields the same result.
    #[test]
    fn match_is_idempotent(pattern in arb_pattern(), text in arb_text()) {
        let m = compile(pattern.as_bytes(), Mode::Silent);
        prop_assume!(m.is_valid());
        prop_assume!(!text.is_empty());
        let r1 = match_at(&m, &text, 0, Mode::Silent);
        let r2 = match_at(&m, &text, 0, Mode::Silent);
        prop_assert_eq!(r1, r2);
    }

    /// Found offsets always satisfy `0 <= match_start <= match_end <= len(text)`.
    #[test]
    fn found_offsets_are_well_formed(pattern in arb_pattern(), text in arb_text()) {
        let m = compile(pattern.as_bytes(), Mode::Silent);
        prop_assume!(m.is_valid());
        prop_assume!(!text.is_empty());
        let r = match_at(&m, &text, 0, Mode::Silent);
        if r.status == MatchStatus::Found {
            prop_assert!(r.match_start <= r.match_end);
            prop_assert!(r.match_end <= text.len());
        } else {
            prop_assert_eq!(r.match_start, 0);
            prop_assert_eq!(r.match_end, 0);
        }
    }

    /// An empty target is always `InvalidInput`, regardless of pattern.
    #[test]
    fn empty_text_is_always_invalid_input(pattern in arb_pattern()) {
        let m = compile(pattern.as_bytes(), Mode::Silent);
        let r = match_at(&m, b"", 0, Mode::Silent);
        prop_assert_eq!(r.status, MatchStatus::InvalidInput);
    }
}

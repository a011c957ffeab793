//! A small regex engine built the way Ken Thompson's construction is
//! usually taught: rewrite infix syntax to postfix with explicit
//! concatenation, assemble an NFA out of fragments, then derive a
//! byte-indexed matcher graph from the NFA so that scanning a target
//! string is a straight-line walk with no backtracking.
//!
//! The four pipeline stages live in their own modules, each consuming the
//! previous stage's output and nothing else:
//!
//! - [`lexer`] — §4.1: validates the pattern, expands the four bracket
//!   class shorthands, and inserts explicit concatenation markers.
//! - [`shunting`] — §4.2: infix to postfix, via a textbook operator-stack
//!   shunting-yard.
//! - [`nfa`] — §4.3: Thompson's fragment-assembly construction.
//! - [`dfa`] — §4.4: subset construction from the NFA into a byte-indexed
//!   matcher graph (no ε-transitions left to walk at match time).
//! - [`matcher`] — §4.5 and §6: the public `compile`/`match_at`/`destroy`
//!   surface and the linear scan that drives it.
//!
//! # Surface syntax
//!
//! Printable ASCII only (32..=126). `|` alternation, `*`/`+`/`?` postfix
//! repetition, `(`/`)` grouping, `\` escape, the bracket shorthands
//! `[0-9]`/`[a-z]`/`[A-Z]`/`[a-zA-Z]`, and `$` as a wildcard matching any
//! byte in `0..=126`. That last one is a deliberate departure from
//! POSIX/PCRE, where `$` anchors end-of-string: this engine has no line
//! anchors at all (see Non-goals below), and `$` is repurposed as the
//! wildcard the reference design it's built from uses. Anyone embedding
//! this crate in a context where users expect POSIX `$` should treat that
//! as a documented incompatibility, not a bug.
//!
//! # Non-goals
//!
//! Unicode, `^`/`$` as line anchors, backreferences, lookaround, and
//! submatch capture (no capture groups — `(...)` is grouping only). This
//! engine reports *that* a match exists and its `[start, end)` byte
//! offsets, first-match rather than leftmost-longest.
//!
//! # Example
//!
//! ```
//! use pt_regex::{compile, match_at, Mode, MatchStatus};
//!
//! let m = compile(b"[0-9]+", Mode::Silent);
//! assert!(m.is_valid());
//! let r = match_at(&m, b"order #42 shipped", 0, Mode::Silent);
//! assert_eq!(r.status, MatchStatus::Found);
//! ```

mod diagnostics;
pub mod error;

mod dfa;
mod lexer;
mod matcher;
mod nfa;
mod shunting;
pub mod token;

pub use error::{CompileError, MatchError};
pub use matcher::{compile, destroy, match_at, match_at_checked, MatchResult, MatchStatus, Matcher};
pub use token::{ClassKind, Token};

/// The hard cap on pattern length, in bytes. `spec.md` §4.1 calls this
/// "sufficient for the intended workload... a configuration choice, not a
/// correctness requirement" — 150 is the number the reference design
/// names; nothing else in the pipeline depends on this specific value.
pub const MAX_PATTERN_LEN: usize = 150;

/// The width of a matcher-graph composite's byte-indexed transition table.
/// `spec.md` §3/§4.4/§9 note that the reference implementation caps this
/// at 140-145 (an artifact of the printable-ASCII-only surface syntax) and
/// explicitly recommends a reimplementation "pick 128 or 256 deliberately"
/// instead. This crate picks the full byte range so that matching against
/// arbitrary (non-pattern) input text — which is not limited to printable
/// ASCII — never has an out-of-bounds transition lookup.
pub const TRANSITION_TABLE_SIZE: usize = 256;

/// Whether a compile/match call should emit `tracing` diagnostic events.
///
/// `spec.md` §6 calls this the "diagnostic mode": verbose mode traces the
/// rewritten pattern, the postfix form, the built NFA, and per-byte
/// matcher-graph transitions; silent mode has no side effects at all, not
/// even a disabled-tracing-level check. See `src/diagnostics.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Silent,
    Verbose,
}

impl Mode {
    pub fn is_verbose(self) -> bool {
        matches!(self, Mode::Verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_example_pattern_compiles_and_matches() {
        let m = compile(b"[0-9]+", Mode::Silent);
        assert!(m.is_valid());
        let r = match_at(&m, b"order #42 shipped", 0, Mode::Silent);
        assert_eq!(r.status, MatchStatus::Found);
    }
}

//! §4.5 Match simulator, plus the `compile`/`match`/`destroy` surface from §6.
//!
//! Because `crate::dfa` already finished the ε-closure work at compile
//! time, this stage is the "simpler consumer" §1 promises: a single linear
//! scan that walks the matcher graph one byte at a time, with no
//! backtracking and no recomputation of NFA state.

use crate::dfa::Dfa;
use crate::error::{CompileError, MatchError};
use crate::{dfa, lexer, nfa, shunting, Mode};

/// A compiled pattern. Carries one of {valid, error}, per §6; the error is
/// sticky — every subsequent `match_at` call against an error-state matcher
/// reports [`MatchStatus::InvalidInput`] without touching the target text.
///
/// There is no separate `destroy` step required for correctness in Rust —
/// dropping a `Matcher` walks the `Vec`-backed creation chains of both
/// arenas exactly once, which is what §5's "Resource lifetime" asks for —
/// but [`destroy`] is provided anyway as an explicit, named operation so
/// the surface matches §6 one-for-one and so callers coming from the
/// teacher's C-shaped API (`compile`/`match`/`destroy`) have a direct
/// translation.
pub struct Matcher {
    result: Result<Dfa, CompileError>,
}

impl Matcher {
    /// True if compilation succeeded and `match_at` can find real matches.
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// The compile error, if this matcher is in the error state.
    pub fn compile_error(&self) -> Option<CompileError> {
        self.result.as_ref().err().copied()
    }
}

/// Compile `pattern` into a reusable [`Matcher`]. Never panics: a malformed
/// pattern produces a matcher in the error state rather than an `Err`
/// return, matching §6's "Matcher carries one of {valid, error}" — the
/// caller always gets a `Matcher` back and asks it whether it's usable.
pub fn compile(pattern: &[u8], mode: Mode) -> Matcher {
    let result = compile_inner(pattern, mode);
    if let Err(e) = &result {
        tracing::debug!(error = %e, "compile failed");
    }
    Matcher { result }
}

fn compile_inner(pattern: &[u8], mode: Mode) -> Result<Dfa, CompileError> {
    let infix = lexer::rewrite(pattern, mode)?;
    let postfix = shunting::to_postfix(&infix, mode)?;
    let built = nfa::build(&postfix, mode)?;
    Ok(dfa::build(&built, mode))
}

/// Release the matcher's arenas. Safe to call on an error-state matcher.
/// In this implementation this is exactly `drop(matcher)`; the function
/// exists so the library's surface names the operation explicitly.
pub fn destroy(matcher: Matcher) {
    drop(matcher);
}

/// The outcome of a single [`match_at`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// The target text was empty, the start offset was out of range, or
    /// the matcher was in the error state.
    InvalidInput,
    /// A match was found; see [`MatchResult::match_start`]/`match_end`.
    Found,
    /// The scan reached the end of input without entering an accepting
    /// composite.
    NotFound,
}

/// The result of a [`match_at`] call. `match_start`/`match_end` are zero
/// unless `status == MatchStatus::Found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub status: MatchStatus,
    pub match_start: usize,
    pub match_end: usize,
}

impl MatchResult {
    fn invalid() -> Self {
        MatchResult { status: MatchStatus::InvalidInput, match_start: 0, match_end: 0 }
    }

    fn not_found() -> Self {
        MatchResult { status: MatchStatus::NotFound, match_start: 0, match_end: 0 }
    }

    fn found(start: usize, end: usize) -> Self {
        MatchResult { status: MatchStatus::Found, match_start: start, match_end: end }
    }
}

/// Scan `text` for the leftmost, first-found match starting no earlier
/// than `start`, per §4.5. Returns [`MatchError::InvalidInput`] wrapped as
/// [`MatchStatus::InvalidInput`] on empty text, an out-of-range `start`, or
/// a matcher in the error state — never panics.
pub fn match_at(matcher: &Matcher, text: &[u8], start: usize, mode: Mode) -> MatchResult {
    let dfa = match &matcher.result {
        Ok(dfa) => dfa,
        Err(_) => {
            if mode.is_verbose() {
                crate::diagnostics::log_match_result("invalid-input (matcher in error state)", 0, 0);
            }
            return MatchResult::invalid();
        }
    };
    if text.is_empty() || start > text.len() {
        if mode.is_verbose() {
            crate::diagnostics::log_match_result("invalid-input", 0, 0);
        }
        return MatchResult::invalid();
    }

    let result = scan(dfa, text, start, mode);
    if mode.is_verbose() {
        let label = match result.status {
            MatchStatus::Found => "found",
            MatchStatus::NotFound => "not-found",
            MatchStatus::InvalidInput => "invalid-input",
        };
        crate::diagnostics::log_match_result(label, result.match_start, result.match_end);
    }
    result
}

/// The actual linear scan, once `text`/`start` are known valid and the
/// matcher is known to hold a built graph.
fn scan(dfa: &Dfa, text: &[u8], start: usize, mode: Mode) -> MatchResult {
    let mut current = dfa.start;
    let mut tentative_start = start;
    let mut tentative_end = start;

    if dfa.states[current as usize].contains_accept {
        return MatchResult::found(tentative_start, tentative_end);
    }

    for i in start..text.len() {
        let byte = text[i];
        match dfa.states[current as usize].transitions[byte as usize] {
            Some(next) => {
                current = next;
                tentative_end = i + 1;
            }
            None => {
                current = dfa.start;
                tentative_start = i + 1;
                tentative_end = i + 1;
            }
        }
        let accepting = dfa.states[current as usize].contains_accept;
        if mode.is_verbose() {
            crate::diagnostics::log_match_step(i, byte, current, accepting);
        }
        if accepting {
            return MatchResult::found(tentative_start, tentative_end);
        }
    }
    MatchResult::not_found()
}

/// Convenience wrapper matching §7's single match-time error tag, for
/// callers that prefer a `Result`-shaped API over inspecting `status`.
pub fn match_at_checked(
    matcher: &Matcher,
    text: &[u8],
    start: usize,
    mode: Mode,
) -> Result<MatchResult, MatchError> {
    let result = match_at(matcher, text, start, mode);
    if result.status == MatchStatus::InvalidInput {
        Err(MatchError::InvalidInput)
    } else {
        Ok(result)
    }
}

//! `[AMBIENT]` verbose-mode tracing events.
//!
//! §1 calls "diagnostic printing (verbose mode)" an out-of-scope
//! collaborator, and §6 says silent mode must have no side effects at all.
//! What's left unspecified is *how* a verbose trace gets from the pipeline
//! to the caller; this crate answers that with `tracing` events, the way
//! the larger crates in the retrieval pack do stage-by-stage diagnostics.
//! Every function here is called only from a site that has already checked
//! `mode.is_verbose()`, so `Mode::Silent` truly emits nothing — not even a
//! disabled-level check — rather than relying on a subscriber filter that
//! might not be installed.

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::token::Token;

pub(crate) fn log_rewrite(pattern: &[u8], tokens: &[Token]) {
    tracing::debug!(
        pattern = %String::from_utf8_lossy(pattern),
        ?tokens,
        "lexical rewrite"
    );
}

pub(crate) fn log_postfix(tokens: &[Token]) {
    tracing::debug!(?tokens, "postfix form");
}

pub(crate) fn log_nfa(nfa: &Nfa) {
    tracing::debug!(start = nfa.start, state_count = nfa.states.len(), "nfa built");
    for (id, state) in nfa.states.iter().enumerate() {
        tracing::trace!(id, ?state, "nfa state");
    }
}

pub(crate) fn log_dfa(dfa: &Dfa) {
    tracing::debug!(start = dfa.start, state_count = dfa.states.len(), "matcher graph built");
}

pub(crate) fn log_match_step(position: usize, byte: u8, composite: u32, accepting: bool) {
    tracing::trace!(position, byte = byte as char, composite, accepting, "match step");
}

pub(crate) fn log_match_result(status: &str, start: usize, end: usize) {
    tracing::debug!(status, start, end, "match result");
}

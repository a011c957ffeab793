//! §4.1 Lexical rewriter.
//!
//! Validates the raw pattern bytes, expands the four character-class
//! shorthands into single [`Token::Class`] tokens, and inserts explicit
//! [`Token::Concat`] markers between adjacent atoms. The teacher's `re2post`
//! does concatenation-insertion and postfix conversion in the same pass
//! (it operates over raw bytes with `.` standing in for the marker); this
//! crate splits that into two stages, as the reference design's component
//! table does, so that class-shorthand expansion and escape handling have
//! one clear place to live before the shunting-yard stage ever sees a
//! token.

use crate::error::CompileError;
use crate::token::{ClassKind, Token};
use crate::{Mode, MAX_PATTERN_LEN};

/// Rewrite a raw pattern into an infix token stream with concatenation
/// made explicit and classes expanded.
pub fn rewrite(pattern: &[u8], mode: Mode) -> Result<Vec<Token>, CompileError> {
    if pattern.is_empty() {
        return Err(CompileError::PatternEmptyOrNull);
    }
    if pattern.len() > MAX_PATTERN_LEN {
        return Err(CompileError::PatternTooLong);
    }
    if let Some(&bad) = pattern.iter().find(|&&b| !(32..=126).contains(&b)) {
        let _ = bad;
        return Err(CompileError::PatternNonPrintableByte);
    }

    let mut out = Vec::with_capacity(pattern.len() * 2);
    // Whether the token just emitted can end an atom or group: a literal, a
    // class, a wildcard, `)`, or a unary postfix operator. Concatenation is
    // inserted before the next token only when this is true.
    let mut last_is_atom_end = false;
    let mut i = 0;
    while i < pattern.len() {
        let byte = pattern[i];
        match byte {
            b'(' => {
                if last_is_atom_end {
                    out.push(Token::Concat);
                }
                out.push(Token::LParen);
                last_is_atom_end = false;
                i += 1;
            }
            b')' => {
                out.push(Token::RParen);
                last_is_atom_end = true;
                i += 1;
            }
            b'|' => {
                out.push(Token::Alternate);
                last_is_atom_end = false;
                i += 1;
            }
            b'*' => {
                out.push(Token::ZeroOrMore);
                last_is_atom_end = true;
                i += 1;
            }
            b'+' => {
                out.push(Token::OneOrMore);
                last_is_atom_end = true;
                i += 1;
            }
            b'?' => {
                out.push(Token::ZeroOrOne);
                last_is_atom_end = true;
                i += 1;
            }
            b'\\' => {
                let escaped = *pattern
                    .get(i + 1)
                    .ok_or(CompileError::PatternEscapeAtEndOfInput)?;
                if last_is_atom_end {
                    out.push(Token::Concat);
                }
                out.push(Token::Escape);
                out.push(Token::Literal(escaped));
                last_is_atom_end = true;
                i += 2;
            }
            b'[' => {
                let (class, consumed) = parse_class(&pattern[i..])?;
                if last_is_atom_end {
                    out.push(Token::Concat);
                }
                out.push(Token::Class(class));
                last_is_atom_end = true;
                i += consumed;
            }
            b'$' => {
                if last_is_atom_end {
                    out.push(Token::Concat);
                }
                out.push(Token::Wildcard);
                last_is_atom_end = true;
                i += 1;
            }
            _ => {
                if last_is_atom_end {
                    out.push(Token::Concat);
                }
                out.push(Token::Literal(byte));
                last_is_atom_end = true;
                i += 1;
            }
        }
    }

    if mode.is_verbose() {
        crate::diagnostics::log_rewrite(pattern, &out);
    }
    Ok(out)
}

/// Parse a bracket expression starting at `rest[0] == b'['`. Returns the
/// recognized class and the number of bytes consumed (including both
/// brackets), or `PatternBadClassRange` for anything else: an unterminated
/// bracket, or contents other than the four recognized shorthands.
fn parse_class(rest: &[u8]) -> Result<(ClassKind, usize), CompileError> {
    debug_assert_eq!(rest.first(), Some(&b'['));
    const SHORTHANDS: &[(&[u8], ClassKind)] = &[
        (b"0-9", ClassKind::Digit),
        (b"a-z", ClassKind::Lower),
        (b"A-Z", ClassKind::Upper),
        (b"a-zA-Z", ClassKind::Letter),
    ];
    for (body, kind) in SHORTHANDS {
        let end = 1 + body.len();
        if rest.len() > end && &rest[1..end] == *body && rest[end] == b']' {
            return Ok((*kind, end + 1));
        }
    }
    Err(CompileError::PatternBadClassRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token::*;

    fn toks(pattern: &str) -> Vec<Token> {
        rewrite(pattern.as_bytes(), Mode::Silent).unwrap()
    }

    #[test]
    fn inserts_concat_between_literals() {
        assert_eq!(
            toks("ab"),
            vec![Literal(b'a'), Concat, Literal(b'b')]
        );
    }

    #[test]
    fn no_concat_after_pipe_or_open_paren() {
        assert_eq!(
            toks("a|b"),
            vec![Literal(b'a'), Alternate, Literal(b'b')]
        );
        assert_eq!(
            toks("(a)"),
            vec![LParen, Literal(b'a'), RParen]
        );
    }

    #[test]
    fn concat_before_open_paren_after_atom() {
        assert_eq!(
            toks("a(b)"),
            vec![Literal(b'a'), Concat, LParen, Literal(b'b'), RParen]
        );
    }

    #[test]
    fn class_shorthand_becomes_one_token() {
        assert_eq!(toks("[0-9]"), vec![Class(ClassKind::Digit)]);
        assert_eq!(toks("[a-zA-Z]"), vec![Class(ClassKind::Letter)]);
    }

    #[test]
    fn bad_class_range_is_rejected() {
        assert_eq!(
            rewrite(b"[0-5]", Mode::Silent),
            Err(CompileError::PatternBadClassRange)
        );
    }

    #[test]
    fn escape_pair_is_preserved_and_operator_byte_becomes_literal() {
        assert_eq!(
            toks(r"a\(b"),
            vec![Literal(b'a'), Concat, Escape, Literal(b'('), Concat, Literal(b'b')]
        );
    }

    #[test]
    fn trailing_backslash_is_rejected() {
        assert_eq!(
            rewrite(b"a\\", Mode::Silent),
            Err(CompileError::PatternEscapeAtEndOfInput)
        );
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(rewrite(b"", Mode::Silent), Err(CompileError::PatternEmptyOrNull));
    }

    #[test]
    fn non_printable_byte_is_rejected() {
        assert_eq!(
            rewrite(b"a\nb", Mode::Silent),
            Err(CompileError::PatternNonPrintableByte)
        );
    }

    #[test]
    fn too_long_pattern_is_rejected() {
        let pattern = vec![b'a'; MAX_PATTERN_LEN + 1];
        assert_eq!(rewrite(&pattern, Mode::Silent), Err(CompileError::PatternTooLong));
    }

    /// §8: "the rewriter output contains no two adjacent operator tokens
    /// except operator pairs that are syntactically legal (a `)` followed
    /// by `*`, `+`, or `?`; a unary operator followed by `)`, `|`, or
    /// end-of-input)." `RParen` counts as operand-like here, matching
    /// `Token::is_operand_like`, so the only illegal adjacency left to
    /// rule out is two consecutive binary/structural operators.
    #[test]
    fn rewriter_output_has_no_illegal_adjacent_operators() {
        for pattern in [
            "a(b|c)*d?e+", "[0-9]+[a-z]*", "(a|b|c)", "a\\*b?", "$*a",
        ] {
            let tokens = toks(pattern);
            for w in tokens.windows(2) {
                let (prev, next) = (w[0], w[1]);
                let prev_is_atom_end = prev.is_operand_like() || prev.is_unary_operator();
                let next_is_unary = next.is_unary_operator();
                // A unary operator only ever follows something that just
                // finished an atom; two unary operators or an operand
                // directly followed by a binary operator with no operand
                // between them would violate the invariant.
                if next_is_unary {
                    assert!(
                        prev_is_atom_end,
                        "pattern {pattern:?}: {next:?} follows non-atom-ending {prev:?}"
                    );
                }
            }
        }
    }
}

//! The token alphabet shared by the lexer, the shunting-yard converter, and
//! the NFA builder.
//!
//! The teacher (`examples/BurntSushi-rsc-regexp`) represents every token as
//! a raw `u8`, overloading the regex surface syntax bytes themselves as the
//! postfix opcode stream. That's a fine trick in a ~150-line translation of
//! a C program that does the same thing, but it means a literal `.` can
//! never appear in a pattern (it collides with the internal concatenation
//! marker) and escape sequences have nowhere to live. This crate follows
//! the tagged-variant representation the reference design's own design
//! notes recommend instead: a closed `Token` enum that can represent a
//! literal byte, a character class, an operator, or an escape marker
//! without colliding with pattern bytes.

/// One of the four recognized character-class shorthands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// `[0-9]`
    Digit,
    /// `[a-z]`
    Lower,
    /// `[A-Z]`
    Upper,
    /// `[a-zA-Z]`
    Letter,
}

impl ClassKind {
    /// True if `byte` belongs to this class.
    pub fn matches(self, byte: u8) -> bool {
        match self {
            ClassKind::Digit => byte.is_ascii_digit(),
            ClassKind::Lower => byte.is_ascii_lowercase(),
            ClassKind::Upper => byte.is_ascii_uppercase(),
            ClassKind::Letter => byte.is_ascii_alphabetic(),
        }
    }
}

/// A single token in either the infix (rewritten) or postfix token stream.
///
/// `Escape` and the `Literal` immediately following it are always adjacent
/// and are never merged into one token: the NFA builder (§4.3 of the
/// reference design) is specified to receive them as a pair and collapse
/// them into a single literal state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A literal byte, including one that came from a backslash escape.
    Literal(u8),
    /// One of the four character-class shorthands.
    Class(ClassKind),
    /// `$`, matching any byte in 0..=126 (see the crate-level docs for why
    /// this isn't an end-of-string anchor).
    Wildcard,
    /// Marks that the following `Literal` was produced by a `\` escape and
    /// should be treated as an operand, never as an operator, by the
    /// shunting-yard stage.
    Escape,
    /// Explicit concatenation, inserted by the lexer between adjacent atoms.
    Concat,
    /// `|`
    Alternate,
    /// `?`
    ZeroOrOne,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl Token {
    /// True for tokens that behave as a complete operand (for the purposes
    /// of deciding where to insert [`Token::Concat`] and for validating
    /// operator placement). `Escape` is excluded: it never stands alone,
    /// the `Literal` it precedes is the operand.
    pub fn is_operand_like(self) -> bool {
        matches!(
            self,
            Token::Literal(_) | Token::Class(_) | Token::Wildcard | Token::RParen
        )
    }

    /// True for the three postfix unary operators.
    pub fn is_unary_operator(self) -> bool {
        matches!(self, Token::ZeroOrOne | Token::ZeroOrMore | Token::OneOrMore)
    }
}

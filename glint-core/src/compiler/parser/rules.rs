//! Pratt rule table
//!
//! Prefix handler, infix handler and infix precedence per token kind, kept as
//! plain data so the table can be inspected without parsing anything.

use crate::compiler::lexer::TokenKind;

/// Binding power, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None,
    Assignment, // =
    Or,         // or
    And,        // and
    Equality,   // == !=
    Comparison, // < > <= >=
    Term,       // + -
    Factor,     // * / %
    Unary,      // ! -
    Call,       // . ()
    Primary,
}

impl Precedence {
    /// One level tighter; `Primary` stays `Primary`
    pub fn next(self) -> Self {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Parse handlers a rule can name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFn {
    Grouping,
    Unary,
    Binary,
    Number,
    String,
    Literal,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRule {
    pub prefix: Option<ParseFn>,
    pub infix: Option<ParseFn>,
    pub precedence: Precedence,
}

const fn rule(prefix: Option<ParseFn>, infix: Option<ParseFn>, precedence: Precedence) -> ParseRule {
    ParseRule {
        prefix,
        infix,
        precedence,
    }
}

const NONE: ParseRule = rule(None, None, Precedence::None);

/// Rule for a token kind
pub const fn rule_for(kind: TokenKind) -> ParseRule {
    use ParseFn::*;
    use TokenKind as T;

    match kind {
        T::LeftParen => rule(Some(Grouping), None, Precedence::None),
        T::Minus => rule(Some(Unary), Some(Binary), Precedence::Term),
        T::Plus => rule(None, Some(Binary), Precedence::Term),
        T::Slash | T::Star | T::Percent => rule(None, Some(Binary), Precedence::Factor),
        T::Bang => rule(Some(Unary), None, Precedence::None),
        T::BangEqual | T::EqualEqual => rule(None, Some(Binary), Precedence::Equality),
        T::Greater | T::GreaterEqual | T::Less | T::LessEqual => {
            rule(None, Some(Binary), Precedence::Comparison)
        }
        T::Identifier => rule(Some(Variable), None, Precedence::None),
        T::String => rule(Some(String), None, Precedence::None),
        T::Number => rule(Some(Number), None, Precedence::None),
        T::False | T::True | T::Nil => rule(Some(Literal), None, Precedence::None),
        _ => NONE,
    }
}

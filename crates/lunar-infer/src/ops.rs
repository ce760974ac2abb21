//! Operator and literal typing rules.
//!
//! Pure tables from an operator token to the rule that types the
//! expression. The engine applies a rule and only infers the operands the
//! rule asks for.

use lunar_syntax::ast::expr::{Literal, LiteralKind};
use lunar_syntax::SyntaxKind;

use crate::ty::Ty;

/// How a binary expression's type is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryRule {
    /// `..` always yields a string.
    Concat,
    /// `<=, ==, <, ~=, >=, >` always yield a boolean.
    Relational,
    /// `and`: the right operand's type.
    RightOperand,
    /// `or`: either operand's type.
    EitherOperand,
    /// Arithmetic and bitwise operators: the left operand's type.
    ///
    /// Metamethod overloads are not looked up.
    LeftOperand,
    Unknown,
}

impl BinaryRule {
    /// The result type when the rule does not depend on the operands.
    pub fn fixed_result(self) -> Option<Ty> {
        match self {
            BinaryRule::Concat => Some(Ty::String),
            BinaryRule::Relational => Some(Ty::Boolean),
            BinaryRule::Unknown => Some(Ty::Unknown),
            BinaryRule::RightOperand | BinaryRule::EitherOperand | BinaryRule::LeftOperand => None,
        }
    }
}

/// The typing rule for a binary operator token.
pub fn binary_rule(op: SyntaxKind) -> BinaryRule {
    use SyntaxKind::*;
    match op {
        CONCAT => BinaryRule::Concat,
        LT_EQ | EQ_EQ | LT | NOT_EQ | GT_EQ | GT => BinaryRule::Relational,
        AND_KW => BinaryRule::RightOperand,
        OR_KW => BinaryRule::EitherOperand,
        AMP | SHL | PIPE | SHR | TILDE | CARET | PLUS | MINUS | STAR | SLASH | DOUBLE_SLASH
        | PERCENT => BinaryRule::LeftOperand,
        _ => BinaryRule::Unknown,
    }
}

/// How a unary expression's type is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryRule {
    /// `-x` keeps the operand's type.
    Operand,
    /// `#x` is a length.
    Number,
    Unknown,
}

/// The typing rule for a unary operator token.
pub fn unary_rule(op: SyntaxKind) -> UnaryRule {
    match op {
        SyntaxKind::MINUS => UnaryRule::Operand,
        SyntaxKind::HASH => UnaryRule::Number,
        _ => UnaryRule::Unknown,
    }
}

/// The type of a literal, from its token alone.
pub fn literal_type(lit: &Literal) -> Ty {
    match lit.kind() {
        Some(LiteralKind::Bool(_)) => Ty::Boolean,
        Some(LiteralKind::String) => Ty::String,
        Some(LiteralKind::Number) => Ty::Number,
        Some(LiteralKind::Nil) => Ty::Nil,
        None => Ty::Unknown,
    }
}

//! Constant initializer expressions.
//!
//! Only literal-built expressions appear here; anything referring to other
//! signals or parameters is a front-end concern.

use crate::literal::Literal;
use serde::{Deserialize, Serialize};

/// Binary operator of a constant expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `+`
    Add,
    /// `-`
    Sub,
}

/// A constant expression usable as a port initializer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstExpr {
    /// A literal.
    Literal(Literal),
    /// `~operand`
    Not(Box<ConstExpr>),
    /// `lhs op rhs`
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<ConstExpr>,
        /// Right operand.
        rhs: Box<ConstExpr>,
    },
    /// `{a, b, ...}`, first element in the most significant position.
    Concat(Vec<ConstExpr>),
}

impl ConstExpr {
    /// Shorthand for a binary expression.
    pub fn binary(op: BinaryOp, lhs: impl Into<ConstExpr>, rhs: impl Into<ConstExpr>) -> Self {
        ConstExpr::Binary {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
    }

    /// Shorthand for a complement.
    pub fn not(operand: impl Into<ConstExpr>) -> Self {
        ConstExpr::Not(Box::new(operand.into()))
    }

    /// The literal itself if this expression is a bare literal.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            ConstExpr::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Literal> for ConstExpr {
    fn from(lit: Literal) -> Self {
        ConstExpr::Literal(lit)
    }
}

impl From<u64> for ConstExpr {
    fn from(value: u64) -> Self {
        ConstExpr::Literal(Literal::Unsized(value))
    }
}

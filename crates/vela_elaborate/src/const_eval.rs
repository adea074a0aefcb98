//! Folding of constant initializer expressions.
//!
//! Outside a concatenation, operands of `~`, bitwise and arithmetic operators
//! are first zero-extended to the context width (the target), so `~0` on an
//! 8-bit port is `8'hff`. Binary operators then work at the wider operand
//! width. `+` and `-` wrap at that width and give all-`X` when either operand
//! holds an `X` or `Z` bit. Concatenations add their operand widths and give
//! their operands no context. Fill literals (`'1`) take the context width.

use thiserror::Error;
use vela_ast::literal::minimal_width;
use vela_ast::{BinaryOp, ConstExpr, Literal};
use vela_common::{Logic, LogicVec};

/// Why an expression could not be folded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    /// `{}` with no operands.
    #[error("empty concatenation")]
    EmptyConcat,
    /// A fill literal inside a concatenation, where it has no width.
    #[error("fill literal `'{0}` has no width inside a concatenation")]
    UnsizedFill(Logic),
    /// Arithmetic beyond 64 bits.
    #[error("arithmetic on {0}-bit operands is not supported (maximum 64)")]
    ArithmeticTooWide(u32),
}

/// Folds `expr` to a constant.
///
/// `context_width` is the width fill literals expand to; inside a
/// concatenation there is none. The result keeps its natural width, callers
/// compare it against the target.
pub fn fold(expr: &ConstExpr, context_width: Option<u32>) -> Result<LogicVec, FoldError> {
    match expr {
        ConstExpr::Literal(lit) => literal_value(lit, context_width),
        ConstExpr::Not(operand) => {
            Ok(widen(fold(operand, context_width)?, context_width).complement())
        }
        ConstExpr::Binary { op, lhs, rhs } => {
            let lhs = widen(fold(lhs, context_width)?, context_width);
            let rhs = widen(fold(rhs, context_width)?, context_width);
            match op {
                BinaryOp::And => Ok(lhs.zip_with(&rhs, |a, b| a & b)),
                BinaryOp::Or => Ok(lhs.zip_with(&rhs, |a, b| a | b)),
                BinaryOp::Xor => Ok(lhs.zip_with(&rhs, |a, b| a ^ b)),
                BinaryOp::Add => arithmetic(&lhs, &rhs, u64::wrapping_add),
                BinaryOp::Sub => arithmetic(&lhs, &rhs, u64::wrapping_sub),
            }
        }
        ConstExpr::Concat(parts) => {
            let mut parts = parts.iter();
            let first = parts.next().ok_or(FoldError::EmptyConcat)?;
            parts.try_fold(fold(first, None)?, |acc, part| {
                Ok(acc.concat(&fold(part, None)?))
            })
        }
    }
}

/// Zero-extends `value` to the context width when it is narrower.
fn widen(value: LogicVec, context_width: Option<u32>) -> LogicVec {
    match context_width {
        Some(w) if w > value.width() => value.zero_extend(w),
        _ => value,
    }
}

fn literal_value(lit: &Literal, context_width: Option<u32>) -> Result<LogicVec, FoldError> {
    match lit {
        Literal::Unsized(v) => Ok(LogicVec::from_u64(*v, minimal_width(*v))),
        Literal::Sized(bits) => Ok(bits.clone()),
        Literal::Fill(bit) => context_width
            .map(|w| LogicVec::filled(w, *bit))
            .ok_or(FoldError::UnsizedFill(*bit)),
    }
}

fn arithmetic(
    lhs: &LogicVec,
    rhs: &LogicVec,
    op: impl Fn(u64, u64) -> u64,
) -> Result<LogicVec, FoldError> {
    let width = lhs.width().max(rhs.width());
    if width > 64 {
        return Err(FoldError::ArithmeticTooWide(width));
    }
    match (lhs.to_u64(), rhs.to_u64()) {
        (Some(a), Some(b)) => Ok(LogicVec::from_u64(op(a, b), width)),
        _ => Ok(LogicVec::filled(width, Logic::X)),
    }
}

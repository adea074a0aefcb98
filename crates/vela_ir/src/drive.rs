//! Constant drive operations.

use crate::ids::SignalId;
use serde::{Deserialize, Serialize};
use vela_common::LogicVec;
use vela_source::Span;

/// Continuously assigns a constant to one output of the enclosing entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveOp {
    /// Driven output.
    pub target: SignalId,
    /// Value, exactly as wide as the target's type.
    pub value: LogicVec,
    /// Where the value came from (initializer or port declaration).
    pub span: Span,
}

impl DriveOp {
    /// Creates a drive of `value` onto `target`.
    pub fn new(target: SignalId, value: LogicVec, span: Span) -> Self {
        Self {
            target,
            value,
            span,
        }
    }
}

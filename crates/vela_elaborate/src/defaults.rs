//! Turning port initializers into drive operations.

use crate::const_eval;
use crate::errors::{ElabError, PortSite};
use vela_ast::{ConstExpr, Direction, PortDecl};
use vela_common::LogicVec;
use vela_ir::{DriveOp, Signal, SignalId};

/// Where an output's constant value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource<'a> {
    /// The port's declared initializer.
    Declared(&'a ConstExpr),
    /// Companion output of an `inout`: always driven with zero.
    InoutCompanion,
    /// Output of a 2-state type without initializer: its implicit zero.
    TwoStateInitial,
    /// Nothing drives the output.
    Undriven,
}

impl<'a> DefaultSource<'a> {
    /// Picks the default source for the output half of `port`.
    ///
    /// `two_state_defaults` enables the implicit zero of 2-state outputs.
    /// An `inout` with an initializer is rejected.
    pub fn for_port(
        port: &'a PortDecl,
        two_state_defaults: bool,
        site: &PortSite<'_>,
    ) -> Result<Self, ElabError> {
        match (port.direction, &port.default) {
            (Direction::Inout, Some(_)) => Err(site.default_on_inout()),
            (Direction::Inout, None) => Ok(DefaultSource::InoutCompanion),
            (_, Some(expr)) => Ok(DefaultSource::Declared(expr)),
            (_, None) if two_state_defaults && port.ty.is_two_state() => {
                Ok(DefaultSource::TwoStateInitial)
            }
            (_, None) => Ok(DefaultSource::Undriven),
        }
    }
}

/// Produces the drive for output `target`, or `None` when it stays undriven.
///
/// Declared values are folded at the target width; a result wider than the
/// target fails with [`ElabError::WidthMismatch`] and a narrower one is
/// zero-extended.
pub fn materialize(
    target: SignalId,
    signal: &Signal,
    origin: DefaultSource<'_>,
    site: &PortSite<'_>,
) -> Result<Option<DriveOp>, ElabError> {
    let width = signal.ty.width;
    let value = match origin {
        DefaultSource::Undriven => return Ok(None),
        DefaultSource::InoutCompanion | DefaultSource::TwoStateInitial => LogicVec::zeros(width),
        DefaultSource::Declared(expr) => {
            let folded = const_eval::fold(expr, Some(width)).map_err(|e| site.const_fold(e))?;
            if folded.width() > width {
                return Err(site.width_mismatch(folded.width(), width));
            }
            folded.zero_extend(width)
        }
    };
    Ok(Some(DriveOp::new(target, value, site.span)))
}

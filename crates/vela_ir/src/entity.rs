//! The elaborated form of one module.

use crate::arena::Arena;
use crate::drive::DriveOp;
use crate::ids::SignalId;
use crate::signal::{Signal, SignalRole};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use vela_common::{ContentHash, Ident};
use vela_source::Span;

/// A flat, unidirectional netlist unit.
///
/// Built once from a module and never mutated afterwards. Every signal lives
/// in `signals`; `inputs` and `outputs` fix the boundary order and `body`
/// holds the constant drives in output discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name, same as the module's.
    pub name: Ident,
    /// Signal storage.
    pub signals: Arena<SignalId, Signal>,
    /// Input signals in port order.
    pub inputs: Vec<SignalId>,
    /// Output signals in port order, companions right after their port's input.
    pub outputs: Vec<SignalId>,
    /// Constant drives.
    pub body: Vec<DriveOp>,
    /// Hash of the module this entity was built from.
    pub content_hash: ContentHash,
    /// Module declaration.
    pub span: Span,
}

/// A broken structural rule found by [`Entity::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// Two boundary signals share a name.
    #[error("signal name used twice on the entity boundary")]
    DuplicateName {
        /// The repeated name.
        name: Ident,
    },
    /// A signal listed in `inputs` or `outputs` has the wrong role.
    #[error("signal {signal:?} is listed with the wrong role")]
    RoleMismatch {
        /// Offending signal.
        signal: SignalId,
    },
    /// A drive targets something that is not one of the entity's outputs.
    #[error("drive target {target:?} is not an output")]
    TargetNotOutput {
        /// Offending target.
        target: SignalId,
    },
    /// An output is driven more than once.
    #[error("output {target:?} has more than one driver")]
    MultipleDrivers {
        /// Offending target.
        target: SignalId,
    },
    /// A drive value does not match the target width.
    #[error("drive of {value_width} bits onto {target:?} of {target_width} bits")]
    DriveWidth {
        /// Offending target.
        target: SignalId,
        /// Width of the value.
        value_width: u32,
        /// Width of the target type.
        target_width: u32,
    },
}

impl Entity {
    /// An entity with no signals.
    pub fn new(name: Ident, content_hash: ContentHash, span: Span) -> Self {
        Self {
            name,
            signals: Arena::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            body: Vec::new(),
            content_hash,
            span,
        }
    }

    /// Stores `signal` and lists it as an input or output according to its role.
    pub fn add_signal(&mut self, signal: Signal) -> SignalId {
        let role = signal.role;
        let id = self.signals.alloc(signal);
        match role {
            SignalRole::Input => self.inputs.push(id),
            SignalRole::Output => self.outputs.push(id),
        }
        id
    }

    /// Appends a drive to the body.
    pub fn push_drive(&mut self, drive: DriveOp) {
        self.body.push(drive);
    }

    /// Looks up a signal.
    pub fn signal(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(id)
    }

    /// Input signals in order.
    pub fn input_signals(&self) -> impl Iterator<Item = &Signal> {
        self.inputs.iter().map(|&id| &self.signals[id])
    }

    /// Output signals in order.
    pub fn output_signals(&self) -> impl Iterator<Item = &Signal> {
        self.outputs.iter().map(|&id| &self.signals[id])
    }

    /// Finds a boundary signal by name.
    pub fn find(&self, name: Ident) -> Option<SignalId> {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .copied()
            .find(|&id| self.signals[id].name == name)
    }

    /// The drive assigned to `target`, if any.
    pub fn drive_of(&self, target: SignalId) -> Option<&DriveOp> {
        self.body.iter().find(|d| d.target == target)
    }

    /// Validates the structural rules every built entity must satisfy:
    /// unique boundary names, consistent roles, and at most one drive per
    /// output with a value of exactly the output's width.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut names = HashSet::new();
        for (&id, role) in self
            .inputs
            .iter()
            .map(|id| (id, SignalRole::Input))
            .chain(self.outputs.iter().map(|id| (id, SignalRole::Output)))
        {
            let signal = self
                .signal(id)
                .ok_or(InvariantViolation::RoleMismatch { signal: id })?;
            if signal.role != role {
                return Err(InvariantViolation::RoleMismatch { signal: id });
            }
            if !names.insert(signal.name) {
                return Err(InvariantViolation::DuplicateName { name: signal.name });
            }
        }

        let mut drivers: HashMap<SignalId, usize> = HashMap::new();
        for drive in &self.body {
            if !self.outputs.contains(&drive.target) {
                return Err(InvariantViolation::TargetNotOutput {
                    target: drive.target,
                });
            }
            let count = drivers.entry(drive.target).or_default();
            *count += 1;
            if *count > 1 {
                return Err(InvariantViolation::MultipleDrivers {
                    target: drive.target,
                });
            }
            let target_width = self.signals[drive.target].ty.width;
            if drive.value.width() != target_width {
                return Err(InvariantViolation::DriveWidth {
                    target: drive.target,
                    value_width: drive.value.width(),
                    target_width,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveType;
    use vela_common::LogicVec;

    fn ident(n: u32) -> Ident {
        Ident::from_raw(n)
    }

    fn sample() -> Entity {
        let mut e = Entity::new(ident(0), ContentHash::from_bytes(b"B"), Span::DUMMY);
        e.add_signal(Signal::input(ident(1), PrimitiveType::bit(), Span::DUMMY));
        let y = e.add_signal(Signal::output(ident(2), PrimitiveType::bit(), Span::DUMMY));
        e.add_signal(Signal::input(ident(3), PrimitiveType::bit(), Span::DUMMY));
        let z0 = e.add_signal(Signal::companion(
            ident(4),
            ident(3),
            PrimitiveType::bit(),
            Span::DUMMY,
        ));
        e.push_drive(DriveOp::new(y, LogicVec::zeros(1), Span::DUMMY));
        e.push_drive(DriveOp::new(z0, LogicVec::zeros(1), Span::DUMMY));
        e
    }

    #[test]
    fn add_signal_routes_by_role() {
        let e = sample();
        assert_eq!(e.inputs.len(), 2);
        assert_eq!(e.outputs.len(), 2);
        let outs: Vec<Ident> = e.output_signals().map(|s| s.name).collect();
        assert_eq!(outs, vec![ident(2), ident(4)]);
        assert_eq!(e.input_signals().count(), 2);
    }

    #[test]
    fn lookup_by_name_and_drive() {
        let e = sample();
        let z0 = e.find(ident(4)).unwrap();
        assert!(e.drive_of(z0).unwrap().value.is_zero());
        assert!(e.find(ident(9)).is_none());
        assert_eq!(e.signal(z0).unwrap().companion_of, Some(ident(3)));
    }

    #[test]
    fn well_formed_entity_passes() {
        assert_eq!(sample().check_invariants(), Ok(()));
        let empty = Entity::new(ident(0), ContentHash::from_bytes(b""), Span::DUMMY);
        assert_eq!(empty.check_invariants(), Ok(()));
    }

    #[test]
    fn duplicate_name_detected() {
        let mut e = sample();
        e.add_signal(Signal::output(ident(1), PrimitiveType::bit(), Span::DUMMY));
        assert_eq!(
            e.check_invariants(),
            Err(InvariantViolation::DuplicateName { name: ident(1) })
        );
    }

    #[test]
    fn drive_rules() {
        let mut e = sample();
        let x = e.inputs[0];
        e.push_drive(DriveOp::new(x, LogicVec::zeros(1), Span::DUMMY));
        assert_eq!(
            e.check_invariants(),
            Err(InvariantViolation::TargetNotOutput { target: x })
        );

        let mut e = sample();
        let y = e.outputs[0];
        e.push_drive(DriveOp::new(y, LogicVec::zeros(1), Span::DUMMY));
        assert_eq!(
            e.check_invariants(),
            Err(InvariantViolation::MultipleDrivers { target: y })
        );

        let mut e = sample();
        e.body[0].value = LogicVec::zeros(2);
        assert!(matches!(
            e.check_invariants(),
            Err(InvariantViolation::DriveWidth { value_width: 2, target_width: 1, .. })
        ));
    }

    #[test]
    fn role_mismatch_detected() {
        let mut e = sample();
        let y = e.outputs[0];
        e.inputs.push(y);
        assert_eq!(
            e.check_invariants(),
            Err(InvariantViolation::RoleMismatch { signal: y })
        );
    }

    #[test]
    fn serde_roundtrip() {
        let e = sample();
        let json = serde_json::to_string(&e).unwrap();
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}

//! The flat entity IR produced by elaboration.
//!
//! An [`Entity`] owns its [`Signal`]s in an [`Arena`], lists them as ordered
//! inputs and outputs, and carries an ordered body of [`DriveOp`]s assigning
//! constants to outputs. All signals are unidirectional; bidirectional ports
//! appear as an input plus a companion output. [`print::print_entity`] renders
//! the textual form used by tests and downstream tools.

#![warn(missing_docs)]

pub mod arena;
pub mod drive;
pub mod entity;
pub mod ids;
pub mod print;
pub mod signal;
pub mod types;

pub use arena::{Arena, ArenaId};
pub use drive::DriveOp;
pub use entity::{Entity, InvariantViolation};
pub use ids::{EntityId, SignalId};
pub use print::{print_entity, EntityDisplay};
pub use signal::{Signal, SignalRole};
pub use types::PrimitiveType;

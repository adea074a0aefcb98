//! Surface-syntax module declarations consumed by elaboration.
//!
//! These types are what a front-end parser hands to `vela_elaborate`: a
//! [`Module`] with its ordered [`PortDecl`]s, their declared [`SurfaceType`]s
//! and optional constant initializers ([`ConstExpr`] over [`Literal`]s).

#![warn(missing_docs)]

pub mod expr;
pub mod literal;
pub mod module;

pub use expr::{BinaryOp, ConstExpr};
pub use literal::Literal;
pub use module::{Direction, Module, PortDecl, SurfaceType};

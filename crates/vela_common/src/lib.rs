//! Foundational types shared by every Vela crate.
//!
//! Interned identifiers, 4-state logic values and packed constant vectors,
//! content hashing for the elaboration cache, and the internal error type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod logic;
pub mod logic_vec;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use logic_vec::LogicVec;
pub use result::{InternalError, VelaResult};

//! Port elaboration: surface modules to flat, unidirectional entities.
//!
//! For each [`Module`](vela_ast::Module) the builder resolves port types,
//! splits `inout` ports into an input plus a companion output, and turns
//! initializers into constant drives. [`ElaborationSession`] caches entities
//! across calls and elaborates batches of modules on a rayon pool.
//!
//! # Usage
//!
//! ```ignore
//! let mut session = ElaborationSession::new(&interner, config, &sink);
//! let entity = session.elaborate(&module)?;
//! println!("{}", vela_ir::print::print_entity(entity, &interner));
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod const_eval;
pub mod defaults;
pub mod errors;
pub mod ports;
pub mod session;
pub mod types;

pub use builder::{build_entity, module_hash};
pub use defaults::{materialize, DefaultSource};
pub use errors::{ElabError, PortSite};
pub use ports::{split_port, SplitPort};
pub use session::ElaborationSession;
pub use types::resolve_type;

//! Source locations for surface declarations and diagnostics.
//!
//! [`Span`] ties AST and IR nodes back to the text they came from, and
//! [`SourceDb`] turns spans into `file:line:col` for rendered diagnostics.

#![warn(missing_docs)]

pub mod source_db;
pub mod span;

pub use source_db::{ResolvedSpan, SourceDb, SourceFile};
pub use span::{FileId, Span};

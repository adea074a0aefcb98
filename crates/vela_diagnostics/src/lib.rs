//! Structured diagnostics for elaboration errors.
//!
//! A [`Diagnostic`] carries a severity, a stable [`DiagnosticCode`], a message
//! and source [`Label`]s. Elaboration workers push them into a shared
//! [`DiagnosticSink`]; a [`TerminalRenderer`] prints them rustc-style.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, Label, LabelStyle, Severity};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use sink::DiagnosticSink;

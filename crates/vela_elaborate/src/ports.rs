//! Splitting surface ports into unidirectional signals.

use vela_ast::{Direction, PortDecl};
use vela_common::Interner;
use vela_ir::{PrimitiveType, Signal};

/// The signals produced by one port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPort {
    /// Input half, present for `input` and `inout`.
    pub input: Option<Signal>,
    /// Output half, present for `output` and `inout` (the companion).
    pub output: Option<Signal>,
}

/// Name of the companion output of an `inout` port.
pub fn companion_name(port: &str, suffix: &str) -> String {
    format!("{port}{suffix}")
}

/// Produces the signal(s) for `port`.
///
/// An `inout` yields an input under its own name plus an output named
/// `<name><suffix>` whose `companion_of` points back at the port.
pub fn split_port(
    port: &PortDecl,
    ty: PrimitiveType,
    interner: &Interner,
    suffix: &str,
) -> SplitPort {
    match port.direction {
        Direction::Input => SplitPort {
            input: Some(Signal::input(port.name, ty, port.span)),
            output: None,
        },
        Direction::Output => SplitPort {
            input: None,
            output: Some(Signal::output(port.name, ty, port.span)),
        },
        Direction::Inout => {
            let companion =
                interner.get_or_intern(&companion_name(interner.resolve(port.name), suffix));
            SplitPort {
                input: Some(Signal::input(port.name, ty, port.span)),
                output: Some(Signal::companion(companion, port.name, ty, port.span)),
            }
        }
    }
}

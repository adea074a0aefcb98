//! Unidirectional signals.

use crate::types::PrimitiveType;
use serde::{Deserialize, Serialize};
use vela_common::Ident;
use vela_source::Span;

/// Which side of the entity boundary a signal sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalRole {
    /// Read by the entity.
    Input,
    /// Driven by the entity.
    Output,
}

/// A named, typed signal owned by an [`Entity`](crate::Entity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal name, unique within its entity.
    pub name: Ident,
    /// Value type.
    pub ty: PrimitiveType,
    /// Direction.
    pub role: SignalRole,
    /// For the output half of a split `inout`, the name of the port it came from.
    pub companion_of: Option<Ident>,
    /// Declaration of the originating port.
    pub span: Span,
}

impl Signal {
    /// An input signal.
    pub fn input(name: Ident, ty: PrimitiveType, span: Span) -> Self {
        Self {
            name,
            ty,
            role: SignalRole::Input,
            companion_of: None,
            span,
        }
    }

    /// An output signal.
    pub fn output(name: Ident, ty: PrimitiveType, span: Span) -> Self {
        Self {
            name,
            ty,
            role: SignalRole::Output,
            companion_of: None,
            span,
        }
    }

    /// The synthesized output half of the `inout` port `port`.
    pub fn companion(name: Ident, port: Ident, ty: PrimitiveType, span: Span) -> Self {
        Self {
            companion_of: Some(port),
            ..Self::output(name, ty, span)
        }
    }

    /// Returns `true` for the output half of a split `inout`.
    pub fn is_companion(&self) -> bool {
        self.companion_of.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_is_an_output() {
        let s = Signal::companion(
            Ident::from_raw(1),
            Ident::from_raw(0),
            PrimitiveType::bit(),
            Span::DUMMY,
        );
        assert_eq!(s.role, SignalRole::Output);
        assert_eq!(s.companion_of, Some(Ident::from_raw(0)));
        assert!(s.is_companion());
        assert!(!Signal::input(Ident::from_raw(0), PrimitiveType::bit(), Span::DUMMY).is_companion());
    }
}

//! Module and port declarations.

use crate::expr::ConstExpr;
use serde::{Deserialize, Serialize};
use std::fmt;
use vela_common::Ident;
use vela_source::Span;

/// Direction keyword of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Inout => "inout",
        })
    }
}

/// Declared data type of a port, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    /// `bit`
    Bit,
    /// `logic`
    Logic,
    /// `bit [width-1:0]`, optionally `signed`.
    BitVector {
        /// Number of bits.
        width: u32,
        /// `signed` keyword present.
        signed: bool,
    },
    /// `logic [width-1:0]`, optionally `signed`.
    LogicVector {
        /// Number of bits.
        width: u32,
        /// `signed` keyword present.
        signed: bool,
    },
    /// `byte`
    Byte,
    /// `shortint`
    Shortint,
    /// `int`
    Int,
    /// `longint`
    Longint,
    /// `integer`
    Integer,
    /// `real`
    Real,
    /// `string`
    Str,
    /// A user-defined type name (typedef, struct, interface).
    Named(Ident),
}

impl SurfaceType {
    /// 2-state types start out as all-zero; 4-state types start out unknown.
    pub fn is_two_state(&self) -> bool {
        matches!(
            self,
            SurfaceType::Bit
                | SurfaceType::BitVector { .. }
                | SurfaceType::Byte
                | SurfaceType::Shortint
                | SurfaceType::Int
                | SurfaceType::Longint
        )
    }

    /// Keyword used in diagnostics. Named types print as `named type`.
    pub fn keyword(&self) -> &'static str {
        match self {
            SurfaceType::Bit | SurfaceType::BitVector { .. } => "bit",
            SurfaceType::Logic | SurfaceType::LogicVector { .. } => "logic",
            SurfaceType::Byte => "byte",
            SurfaceType::Shortint => "shortint",
            SurfaceType::Int => "int",
            SurfaceType::Longint => "longint",
            SurfaceType::Integer => "integer",
            SurfaceType::Real => "real",
            SurfaceType::Str => "string",
            SurfaceType::Named(_) => "named type",
        }
    }
}

/// One port of a module declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDecl {
    /// Port name.
    pub name: Ident,
    /// Direction keyword.
    pub direction: Direction,
    /// Declared type.
    pub ty: SurfaceType,
    /// Initializer (`output bit x = 1`). Never present on a valid `inout`.
    pub default: Option<ConstExpr>,
    /// Location of the declaration.
    pub span: Span,
}

impl PortDecl {
    /// A port without initializer or source location.
    pub fn new(name: Ident, direction: Direction, ty: SurfaceType) -> Self {
        Self {
            name,
            direction,
            ty,
            default: None,
            span: Span::DUMMY,
        }
    }

    /// Sets the initializer.
    pub fn with_default(mut self, default: impl Into<ConstExpr>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the source location.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// A module declaration: a name and its ports in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Module name.
    pub name: Ident,
    /// Ports in declaration order.
    pub ports: Vec<PortDecl>,
    /// Location of the declaration.
    pub span: Span,
}

impl Module {
    /// A module with no ports.
    pub fn new(name: Ident) -> Self {
        Self {
            name,
            ports: Vec::new(),
            span: Span::DUMMY,
        }
    }

    /// Appends a port.
    pub fn with_port(mut self, port: PortDecl) -> Self {
        self.ports.push(port);
        self
    }

    /// Number of `inout` ports.
    pub fn inout_count(&self) -> usize {
        self.ports
            .iter()
            .filter(|p| p.direction == Direction::Inout)
            .count()
    }
}

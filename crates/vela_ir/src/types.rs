//! Primitive signal types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-width integer type carried by a signal.
///
/// Signedness only affects arithmetic performed by later stages; the textual
/// form is `i<width>` either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveType {
    /// Number of bits, always at least 1.
    pub width: u32,
    /// Two's-complement interpretation.
    pub signed: bool,
}

impl PrimitiveType {
    /// An unsigned type of `width` bits.
    pub fn unsigned(width: u32) -> Self {
        Self {
            width,
            signed: false,
        }
    }

    /// A signed type of `width` bits.
    pub fn signed(width: u32) -> Self {
        Self {
            width,
            signed: true,
        }
    }

    /// The single-bit type of `bit` and `logic`.
    pub fn bit() -> Self {
        Self::unsigned(1)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.width)
    }
}

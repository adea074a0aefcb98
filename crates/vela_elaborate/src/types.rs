//! Surface port types to IR [`PrimitiveType`] resolution.

use crate::errors::{ElabError, PortSite};
use vela_ast::{PortDecl, SurfaceType};
use vela_ir::PrimitiveType;

/// Maps the declared type of `port` to its primitive signal type.
///
/// Scalars `bit` and `logic` are one unsigned bit, packed vectors keep their
/// width and signedness, and the integer atoms have their fixed signed
/// widths. `real`, `string`, named types and zero-width vectors have no
/// primitive form and fail with [`ElabError::UnsupportedType`].
pub fn resolve_type(port: &PortDecl, site: &PortSite<'_>) -> Result<PrimitiveType, ElabError> {
    let ty = match &port.ty {
        SurfaceType::Bit | SurfaceType::Logic => PrimitiveType::bit(),
        SurfaceType::BitVector { width, signed } | SurfaceType::LogicVector { width, signed } => {
            if *width == 0 {
                return Err(site.unsupported_type(format!("{} [-1:0]", port.ty.keyword())));
            }
            PrimitiveType {
                width: *width,
                signed: *signed,
            }
        }
        SurfaceType::Byte => PrimitiveType::signed(8),
        SurfaceType::Shortint => PrimitiveType::signed(16),
        SurfaceType::Int | SurfaceType::Integer => PrimitiveType::signed(32),
        SurfaceType::Longint => PrimitiveType::signed(64),
        SurfaceType::Real | SurfaceType::Str | SurfaceType::Named(_) => {
            return Err(site.unsupported_type(port.ty.keyword()));
        }
    };
    Ok(ty)
}

//! Elaboration errors and their diagnostic codes.
//!
//! Codes `E300`--`E305` cover user-facing elaboration failures; `E399` marks
//! internal compiler errors.

use thiserror::Error;
use vela_common::InternalError;
use vela_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use vela_source::Span;

/// Port type with no primitive mapping.
pub const E300: DiagnosticCode = DiagnosticCode::new(Category::Error, 300);

/// Initializer wider than its target.
pub const E301: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);

/// Two ports produce the same signal name.
pub const E302: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);

/// Built entity has a repeated boundary name.
pub const E303: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);

/// `inout` port with an initializer.
pub const E304: DiagnosticCode = DiagnosticCode::new(Category::Error, 304);

/// Initializer expression could not be folded.
pub const E305: DiagnosticCode = DiagnosticCode::new(Category::Error, 305);

/// Internal compiler error.
pub const E399: DiagnosticCode = DiagnosticCode::new(Category::Error, 399);

/// A failure elaborating one module.
///
/// Names are resolved strings so the error can be rendered without the interner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElabError {
    /// The port's declared type has no primitive mapping.
    #[error("port `{port}` of module `{module}` has unsupported type `{ty}`")]
    UnsupportedType {
        /// Module name.
        module: String,
        /// Port name.
        port: String,
        /// Declared type keyword.
        ty: String,
        /// Port declaration.
        span: Span,
    },
    /// An initializer does not fit the port without truncation.
    #[error(
        "initializer of port `{port}` in module `{module}` is {literal_width} bits wide but the port has {target_width}"
    )]
    WidthMismatch {
        /// Module name.
        module: String,
        /// Port name.
        port: String,
        /// Width of the folded initializer.
        literal_width: u32,
        /// Width of the port type.
        target_width: u32,
        /// Port declaration.
        span: Span,
    },
    /// Two ports would produce signals with the same name.
    #[error("signal name `{name}` in module `{module}` is produced by both `{first_port}` and `{second_port}`")]
    NameCollision {
        /// Module name.
        module: String,
        /// The colliding signal name.
        name: String,
        /// Port that claimed the name first.
        first_port: String,
        /// Port that tried to claim it again.
        second_port: String,
        /// Declaration of `second_port`.
        span: Span,
        /// Declaration of `first_port`.
        first_span: Span,
    },
    /// The built entity repeats a boundary name.
    #[error("entity `{module}` declares signal `{name}` more than once")]
    DuplicateName {
        /// Module name.
        module: String,
        /// Repeated signal name.
        name: String,
        /// Module declaration.
        span: Span,
    },
    /// An `inout` port carries an initializer.
    #[error("inout port `{port}` of module `{module}` cannot have an initializer")]
    InvalidDefaultOnInout {
        /// Module name.
        module: String,
        /// Port name.
        port: String,
        /// Port declaration.
        span: Span,
    },
    /// The initializer expression could not be reduced to a constant.
    #[error("cannot evaluate initializer of port `{port}` in module `{module}`: {reason}")]
    ConstFold {
        /// Module name.
        module: String,
        /// Port name.
        port: String,
        /// What went wrong.
        reason: String,
        /// Port declaration.
        span: Span,
    },
    /// A bug in the elaborator itself.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl ElabError {
    /// The diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            ElabError::UnsupportedType { .. } => E300,
            ElabError::WidthMismatch { .. } => E301,
            ElabError::NameCollision { .. } => E302,
            ElabError::DuplicateName { .. } => E303,
            ElabError::InvalidDefaultOnInout { .. } => E304,
            ElabError::ConstFold { .. } => E305,
            ElabError::Internal(_) => E399,
        }
    }

    /// Primary source location.
    pub fn span(&self) -> Span {
        match self {
            ElabError::UnsupportedType { span, .. }
            | ElabError::WidthMismatch { span, .. }
            | ElabError::NameCollision { span, .. }
            | ElabError::DuplicateName { span, .. }
            | ElabError::InvalidDefaultOnInout { span, .. }
            | ElabError::ConstFold { span, .. } => *span,
            ElabError::Internal(_) => Span::DUMMY,
        }
    }

    /// Converts the error into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string(), self.span());
        match self {
            ElabError::UnsupportedType { .. } => diag
                .with_label(Label::primary(self.span(), "no primitive mapping"))
                .with_help("use `bit`, `logic`, a packed vector, or a 2-state integer type"),
            ElabError::WidthMismatch { target_width, .. } => diag
                .with_label(Label::primary(self.span(), "initializer does not fit"))
                .with_note(format!("narrower values are zero-extended to {target_width} bits")),
            ElabError::NameCollision {
                first_port,
                first_span,
                ..
            } => diag
                .with_label(Label::primary(self.span(), "name produced here"))
                .with_label(Label::secondary(
                    *first_span,
                    format!("first produced by `{first_port}`"),
                ))
                .with_help("rename one of the ports or change `elaborate.companion_suffix`"),
            ElabError::DuplicateName { .. } => {
                diag.with_note("this indicates a bug in the elaborator")
            }
            ElabError::InvalidDefaultOnInout { .. } => diag
                .with_label(Label::primary(self.span(), "initializer not allowed here"))
                .with_note("the companion output of an inout port is always driven with zero"),
            ElabError::ConstFold { .. } => {
                diag.with_label(Label::primary(self.span(), "in this initializer"))
            }
            ElabError::Internal(_) => diag.with_note("this is a bug in the elaborator"),
        }
    }
}

/// The port currently being elaborated, used to attribute errors.
#[derive(Debug, Clone, Copy)]
pub struct PortSite<'a> {
    /// Module name.
    pub module: &'a str,
    /// Port name.
    pub port: &'a str,
    /// Port declaration.
    pub span: Span,
}

impl PortSite<'_> {
    pub(crate) fn unsupported_type(&self, ty: impl Into<String>) -> ElabError {
        ElabError::UnsupportedType {
            module: self.module.to_string(),
            port: self.port.to_string(),
            ty: ty.into(),
            span: self.span,
        }
    }

    pub(crate) fn width_mismatch(&self, literal_width: u32, target_width: u32) -> ElabError {
        ElabError::WidthMismatch {
            module: self.module.to_string(),
            port: self.port.to_string(),
            literal_width,
            target_width,
            span: self.span,
        }
    }

    pub(crate) fn default_on_inout(&self) -> ElabError {
        ElabError::InvalidDefaultOnInout {
            module: self.module.to_string(),
            port: self.port.to_string(),
            span: self.span,
        }
    }

    pub(crate) fn const_fold(&self, reason: impl ToString) -> ElabError {
        ElabError::ConstFold {
            module: self.module.to_string(),
            port: self.port.to_string(),
            reason: reason.to_string(),
            span: self.span,
        }
    }
}

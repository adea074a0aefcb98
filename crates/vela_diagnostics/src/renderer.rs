//! Text rendering of diagnostics.

use crate::diagnostic::{Diagnostic, LabelStyle};
use std::fmt::Write;
use vela_source::{SourceDb, Span};

/// Turns a diagnostic into printable text.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic.
    fn render(&self, diag: &Diagnostic, sources: &SourceDb) -> String;
}

/// rustc-style plain-text output:
///
/// ```text
/// error[E302]: signal name `z0` is already used in module `B`
///   --> b.sv:4:13
///    |
///  4 |   inout bit z
///    |             ^ companion of this inout port
///    = note: ...
/// ```
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }

    fn snippet(out: &mut String, sources: &SourceDb, span: Span, message: &str, marker: char) {
        let (Some(file), Some(resolved)) = (sources.file(span.file), sources.resolve(span)) else {
            return;
        };
        let line_no = resolved.line.to_string();
        let gutter = " ".repeat(line_no.len());
        let _ = writeln!(out, "{gutter}--> {resolved}");
        let _ = writeln!(out, "{gutter} |");
        let _ = writeln!(out, "{line_no} | {}", file.line_text(span.start));
        let underline = marker.to_string().repeat(span.len().max(1) as usize);
        let indent = " ".repeat(resolved.col as usize - 1);
        let sep = if message.is_empty() { "" } else { " " };
        let _ = writeln!(out, "{gutter} | {indent}{underline}{sep}{message}");
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, sources: &SourceDb) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}[{}]: {}", diag.severity, diag.code, diag.message);

        let primary = diag
            .labels
            .iter()
            .find(|l| l.style == LabelStyle::Primary)
            .map_or("", |l| l.message.as_str());
        Self::snippet(&mut out, sources, diag.primary_span, primary, '^');
        for label in diag.labels.iter().filter(|l| l.style == LabelStyle::Secondary) {
            Self::snippet(&mut out, sources, label.span, &label.message, '-');
        }

        for note in &diag.notes {
            let _ = writeln!(out, "   = note: {note}");
        }
        for help in &diag.help {
            let _ = writeln!(out, "   = help: {help}");
        }
        out
    }
}

//! In-memory source text and span-to-line/column resolution.

use crate::span::{FileId, Span};
use std::fmt;
use std::path::PathBuf;

/// One source text with a precomputed line index.
pub struct SourceFile {
    /// Display name used in diagnostics.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i as u32 + 1),
            )
            .collect();
        Self {
            path,
            content,
            line_starts,
        }
    }

    /// 1-based `(line, column)` of a byte offset.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        (line as u32 + 1, offset - self.line_starts[line] + 1)
    }

    /// Full text of the line holding `offset`, without its newline.
    pub fn line_text(&self, offset: u32) -> &str {
        let (line, _) = self.line_col(offset);
        let start = self.line_starts[line as usize - 1] as usize;
        let end = self
            .line_starts
            .get(line as usize)
            .map_or(self.content.len(), |&next| next as usize - 1);
        &self.content[start..end]
    }
}

/// A span resolved to a printable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// File display name.
    pub path: PathBuf,
    /// 1-based line of the span start.
    pub line: u32,
    /// 1-based column of the span start.
    pub col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.col)
    }
}

/// All source texts of one session, indexed by [`FileId`].
#[derive(Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `content` under the display name `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: impl Into<String>) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(name.into(), content.into()));
        id
    }

    /// Looks up a file. Returns `None` for [`FileId::DUMMY`] and unknown ids.
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Resolves the start of `span`, or `None` if the span has no file here.
    pub fn resolve(&self, span: Span) -> Option<ResolvedSpan> {
        let file = self.file(span.file)?;
        let (line, col) = file.line_col(span.start);
        Some(ResolvedSpan {
            path: file.path.clone(),
            line,
            col,
        })
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> Option<&str> {
        self.file(span.file)?
            .content
            .get(span.start as usize..span.end as usize)
    }
}

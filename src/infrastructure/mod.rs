// Infrastructure implementations for strictc.

pub mod args;
pub mod clang_ingest;
pub mod clang_runner;
pub mod logging;

use crate::domain::ast::AstNode;
use crate::domain::diagnostic::Diagnostic;
use crate::ports::{AstProvider, DiagnosticSink};
use std::io::Write;

/// AST provider backed by the host clang binary's JSON AST dump.
pub struct ClangAstProvider {
    pub clang: String,
}

impl ClangAstProvider {
    pub fn new(clang: impl Into<String>) -> Self {
        Self { clang: clang.into() }
    }
}

impl AstProvider for ClangAstProvider {
    fn translation_units(&self, args: &[String]) -> anyhow::Result<Vec<AstNode>> {
        let json = clang_runner::dump_ast_json(&self.clang, args)?;
        let units = clang_ingest::ingest(&json)?;
        if units.is_empty() {
            anyhow::bail!("{} produced no translation unit", self.clang);
        }
        Ok(units)
    }
}

/// Writes rendered diagnostics to a stream (stderr for the CLI).
pub struct StreamSink<W: Write> {
    out: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for StreamSink<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> std::io::Result<()> {
        write!(self.out, "{}", diagnostic)?;
        self.out.flush()
    }
}

use crate::domain::ast::AstNode;
use crate::domain::diagnostic::Diagnostic;

/// Produces parsed translation units from forwarded compiler arguments.
pub trait AstProvider {
    fn translation_units(&self, args: &[String]) -> anyhow::Result<Vec<AstNode>>;
}

/// Receives diagnostics in traversal order.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: &Diagnostic) -> std::io::Result<()>;
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: &Diagnostic) -> std::io::Result<()> {
        self.push(diagnostic.clone());
        Ok(())
    }
}

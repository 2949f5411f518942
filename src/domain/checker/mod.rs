//! Strict type-spelling checker.
//!
//! A single depth-first pass over a translation unit. Function definitions are registered as
//! they are reached, so a call can only be checked against a function defined earlier in
//! traversal order.

mod compare;
mod dispatch;
mod handlers;
mod unwrap;

pub use unwrap::unwrap_transparent;

use crate::domain::ast::{AstNode, TypeInfo};
use crate::domain::include_set::IncludeSet;
use crate::domain::registry::FunctionRegistry;
use crate::ports::DiagnosticSink;
use std::io;

pub struct Checker<'a, 'ast> {
    includes: &'a IncludeSet,
    registry: FunctionRegistry<'ast>,
    sink: &'a mut dyn DiagnosticSink,
    reported: usize,
    /// Declared return type of the function whose body is being walked.
    return_type: Option<TypeInfo>,
}

impl<'a, 'ast> Checker<'a, 'ast> {
    pub fn new(includes: &'a IncludeSet, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            includes,
            registry: FunctionRegistry::new(),
            sink,
            reported: 0,
            return_type: None,
        }
    }

    /// Check one translation unit. The registry carries over to later units of the same run.
    #[tracing::instrument(skip_all, fields(top_level = unit.children.len()))]
    pub fn check(&mut self, unit: &'ast AstNode) -> io::Result<()> {
        self.dispatch(unit, 0)
    }

    pub fn registry(&self) -> &FunctionRegistry<'ast> {
        &self.registry
    }

    /// Number of diagnostics emitted so far.
    pub fn reported(&self) -> usize {
        self.reported
    }
}

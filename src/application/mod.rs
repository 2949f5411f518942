use crate::domain::ast::{dump_tree, AstNode};
use crate::domain::checker::Checker;
use crate::domain::include_set::IncludeSet;
use crate::ports::{AstProvider, DiagnosticSink};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Summary of one checking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub units: usize,
    pub functions: usize,
    pub diagnostics: usize,
}

pub struct AnalyzeUsecase<'a> {
    pub provider: &'a dyn AstProvider,
}

impl<'a> AnalyzeUsecase<'a> {
    /// Build the include set, parse, and check every translation unit in order.
    /// The include set is built first so that a bad include root fails before any parsing.
    pub fn run(
        &self,
        include_dirs: &[PathBuf],
        clang_args: &[String],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<AnalysisReport> {
        let includes = IncludeSet::build(include_dirs)?;
        if includes.is_empty() {
            tracing::warn!("include roots contain no files, every mismatch will be filtered out");
        }
        let units = self.provider.translation_units(clang_args)?;
        check_units(&units, &includes, sink)
    }

    /// Parse only, and render each translation unit as an indented tree.
    pub fn dump(&self, clang_args: &[String]) -> Result<String> {
        let units = self.provider.translation_units(clang_args)?;
        Ok(units.iter().map(dump_tree).collect())
    }
}

/// Check translation units with one registry shared across the whole run.
pub fn check_units(units: &[AstNode], includes: &IncludeSet, sink: &mut dyn DiagnosticSink) -> Result<AnalysisReport> {
    let mut checker = Checker::new(includes, sink);
    for unit in units {
        checker.check(unit).context("Failed to write diagnostics")?;
    }

    Ok(AnalysisReport {
        units: units.len(),
        functions: checker.registry().len(),
        diagnostics: checker.reported(),
    })
}

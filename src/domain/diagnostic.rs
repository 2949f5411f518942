use crate::domain::ast::{SourceLocation, TypeInfo};
use std::fmt;

/// A reported type-spelling mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub location: SourceLocation,
    pub left: TypeInfo,
    pub right: TypeInfo,
    /// Extra trailing line, e.g. where the called function is defined.
    pub tail: Option<String>,
}

impl Diagnostic {
    /// Whether the two sides still resolve to the same underlying type.
    /// Context only: a mismatch is reported either way.
    pub fn canonically_equal(&self) -> bool {
        self.left.canonical == self.right.canonical
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(f, "\t@{}", self.location)?;
        writeln!(
            f,
            "\t\"{}\" (\"{}\") != \"{}\" (\"{}\")",
            self.left.spelling, self.left.canonical, self.right.spelling, self.right.canonical
        )?;
        if let Some(tail) = &self.tail {
            writeln!(f, "{}", tail)?;
        }
        writeln!(f)
    }
}

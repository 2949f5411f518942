// Domain model for strictc: the AST view, the function registry, the include filter and the checker.

pub mod ast;
pub mod checker;
pub mod diagnostic;
pub mod include_set;
pub mod registry;

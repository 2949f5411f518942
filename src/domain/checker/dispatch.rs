use super::Checker;
use crate::domain::ast::{AstNode, AstNodeKind};
use std::io;

/// What the dispatcher does with a node of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Handler {
    /// Type declarations and literals: nothing below them can mismatch.
    Ignore,
    /// Uninteresting kind: keep walking its children.
    Walk,
    FunctionDefinition,
    BinaryOperator,
    CallExpr,
    VarDecl,
    ReturnStmt,
}

pub(super) fn handler_for(kind: &AstNodeKind) -> Handler {
    match kind {
        AstNodeKind::TypedefDecl
        | AstNodeKind::RecordDecl
        | AstNodeKind::EnumDecl
        | AstNodeKind::IntegerLiteral
        | AstNodeKind::FloatingLiteral
        | AstNodeKind::ImaginaryLiteral
        | AstNodeKind::StringLiteral
        | AstNodeKind::CharacterLiteral
        | AstNodeKind::FixedPointLiteral
        | AstNodeKind::BoolLiteral => Handler::Ignore,
        AstNodeKind::FunctionDecl => Handler::FunctionDefinition,
        AstNodeKind::BinaryOperator => Handler::BinaryOperator,
        AstNodeKind::CallExpr => Handler::CallExpr,
        AstNodeKind::VarDecl => Handler::VarDecl,
        AstNodeKind::ReturnStmt => Handler::ReturnStmt,
        AstNodeKind::TranslationUnit
        | AstNodeKind::ParmDecl
        | AstNodeKind::CompoundStmt
        | AstNodeKind::CompoundAssignOperator
        | AstNodeKind::DeclRefExpr
        | AstNodeKind::Unexposed
        | AstNodeKind::Other(_) => Handler::Walk,
    }
}

impl<'a, 'ast> Checker<'a, 'ast> {
    /// Route every child of `node` to its handler. Handlers resume the walk below their node.
    pub(super) fn dispatch(&mut self, node: &'ast AstNode, depth: usize) -> io::Result<()> {
        for child in &node.children {
            let handler = handler_for(&child.kind);
            tracing::trace!(kind = %child.kind, depth, ?handler, "visit");

            match handler {
                Handler::Ignore => {}
                Handler::Walk => self.dispatch(child, depth + 1)?,
                Handler::FunctionDefinition => self.check_function_definition(child, depth + 1)?,
                Handler::BinaryOperator => self.check_binary_operator(child, depth + 1)?,
                Handler::CallExpr => self.check_call(child, depth + 1)?,
                Handler::VarDecl => self.check_variable_declaration(child, depth + 1)?,
                Handler::ReturnStmt => self.check_return(child, depth + 1)?,
            }
        }
        Ok(())
    }
}

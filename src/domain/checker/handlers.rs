// Construct handlers: pick the two type-bearing positions of a construct, compare them,
// then keep dispatching below the construct so nested constructs are checked too.

use super::unwrap::unwrap_transparent;
use super::Checker;
use crate::domain::ast::{AstNode, AstNodeKind};
use std::io;

impl<'a, 'ast> Checker<'a, 'ast> {
    /// Register the function, then walk its body. Prototypes carry no body and are skipped.
    pub(super) fn check_function_definition(&mut self, node: &'ast AstNode, depth: usize) -> io::Result<()> {
        let mut bodies = node
            .children
            .iter()
            .filter(|child| child.kind == AstNodeKind::CompoundStmt)
            .peekable();

        if bodies.peek().is_none() {
            tracing::debug!(function = node.display_name(), "prototype, not registered");
            return Ok(());
        }

        let record = self.registry.register(node);
        tracing::debug!(function = record.name, params = record.params.len(), "registered function");

        let enclosing = std::mem::replace(&mut self.return_type, node.ty.return_type());
        let walked = bodies.try_for_each(|body| self.dispatch(body, depth + 1));
        self.return_type = enclosing;
        walked
    }

    pub(super) fn check_binary_operator(&mut self, node: &'ast AstNode, depth: usize) -> io::Result<()> {
        if let [left, right, ..] = node.children.as_slice() {
            self.compare(
                &unwrap_transparent(left).ty,
                &unwrap_transparent(right).ty,
                node.location.as_ref(),
                "Type mismatch in binary operation:",
                None,
            )?;
        }

        self.dispatch(node, depth)
    }

    /// Arguments are matched positionally against the first function registered under the
    /// callee's name; surplus arguments (variadics) are not checked.
    pub(super) fn check_call(&mut self, node: &'ast AstNode, depth: usize) -> io::Result<()> {
        let callee = node.first_leaf().display_name();
        let message = format!("Type mismatch in function call of \"{}\":", callee);

        match self.registry.lookup(callee).cloned() {
            Some(function) => {
                let tail = function
                    .location
                    .map(|location| format!("\tfunction defined @{}", location));
                let arguments = node.children.iter().skip(1);

                for (param, argument) in function.params.iter().zip(arguments) {
                    self.compare(
                        &param.ty,
                        &unwrap_transparent(argument).ty,
                        argument.location.as_ref(),
                        &message,
                        tail.clone(),
                    )?;
                }
            }
            None => tracing::debug!(callee, "no earlier definition, call not checked"),
        }

        self.dispatch(node, depth)
    }

    /// The initializer is the last child; a declaration without one has nothing to compare.
    pub(super) fn check_variable_declaration(&mut self, node: &'ast AstNode, depth: usize) -> io::Result<()> {
        if let Some(initializer) = node.children.last() {
            self.compare(
                &node.ty,
                &unwrap_transparent(initializer).ty,
                node.location.as_ref(),
                "Type mismatch in variable declaration:",
                None,
            )?;
        }

        self.dispatch(node, depth)
    }

    /// The returned expression, unwrapped, against the enclosing function's declared return type.
    /// When that type cannot be read off the function's type, the outermost node of the returned
    /// expression stands in for it.
    pub(super) fn check_return(&mut self, node: &'ast AstNode, depth: usize) -> io::Result<()> {
        if let Some(returned) = node.children.first() {
            let expected = self.return_type.clone().unwrap_or_else(|| returned.ty.clone());
            self.compare(
                &expected,
                &unwrap_transparent(returned).ty,
                node.location.as_ref(),
                "Type mismatch in return statement:",
                None,
            )?;
        }

        self.dispatch(node, depth)
    }
}

use crate::domain::ast::{AstNode, AstNodeKind};

/// Strip compiler-synthesized wrappers (implicit casts, temporaries) down to the
/// expression whose declared type was written in the source.
pub fn unwrap_transparent(node: &AstNode) -> &AstNode {
    let mut node = node;
    while node.kind == AstNodeKind::Unexposed {
        match node.children.first() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

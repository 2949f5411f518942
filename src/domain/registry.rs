// Function registry for strictc.
// Records function definitions in the order the traversal reaches them, for call-site resolution.

use crate::domain::ast::{AstNode, AstNodeKind, SourceLocation};

/// A function definition seen during traversal.
#[derive(Debug, Clone)]
pub struct FunctionRecord<'ast> {
    /// Display name truncated at the first `(`.
    pub name: &'ast str,
    pub params: Vec<&'ast AstNode>,
    pub location: Option<&'ast SourceLocation>,
}

impl<'ast> FunctionRecord<'ast> {
    pub fn from_node(node: &'ast AstNode) -> Self {
        let display = node.display_name();
        let name = display.split('(').next().unwrap_or(display);
        let params = node
            .children
            .iter()
            .filter(|child| child.kind == AstNodeKind::ParmDecl)
            .collect();

        Self {
            name,
            params,
            location: node.location.as_ref(),
        }
    }
}

/// Function definitions in registration order. Lives for one run; there is no removal.
#[derive(Debug, Default)]
pub struct FunctionRegistry<'ast> {
    records: Vec<FunctionRecord<'ast>>,
}

impl<'ast> FunctionRegistry<'ast> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node: &'ast AstNode) -> &FunctionRecord<'ast> {
        self.records.push(FunctionRecord::from_node(node));
        &self.records[self.records.len() - 1]
    }

    /// First record registered under `name`; duplicates never shadow it.
    pub fn lookup(&self, name: &str) -> Option<&FunctionRecord<'ast>> {
        self.records.iter().find(|record| record.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ast::TypeInfo;

    fn function(display: &str, line: u32, params: &[(&str, &str)]) -> AstNode {
        let mut children: Vec<AstNode> = params
            .iter()
            .map(|(name, ty)| {
                AstNode::new(AstNodeKind::ParmDecl)
                    .with_name(*name)
                    .with_type(TypeInfo::plain(*ty))
            })
            .collect();
        children.push(AstNode::new(AstNodeKind::CompoundStmt));
        AstNode::new(AstNodeKind::FunctionDecl)
            .with_name(display)
            .at(SourceLocation::new("main.c", line, 5))
            .with_children(children)
    }

    #[test]
    fn test_record_truncates_display_name() {
        let node = function("add(int, int)", 1, &[("a", "int"), ("b", "int")]);
        let record = FunctionRecord::from_node(&node);
        assert_eq!(record.name, "add");
        assert_eq!(record.params.len(), 2);
        assert_eq!(record.params[1].display_name(), "b");
    }

    #[test]
    fn test_lookup_first_registered_wins() {
        let first = function("f(int)", 1, &[("a", "int")]);
        let second = function("f(long)", 9, &[("a", "long")]);
        let mut registry = FunctionRegistry::new();
        assert!(registry.is_empty());
        registry.register(&first);
        registry.register(&second);

        let found = registry.lookup("f").unwrap();
        assert_eq!(found.location.unwrap().line, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_requires_exact_name() {
        let node = function("foobar(void)", 1, &[]);
        let mut registry = FunctionRegistry::new();
        registry.register(&node);

        assert!(registry.lookup("foo").is_none());
        assert!(registry.lookup("foobar").is_some());
    }
}

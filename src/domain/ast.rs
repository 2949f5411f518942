// AST data structures for strictc.
// These types represent a parsed C translation unit in a form suitable for the strict type check.

use std::fmt;
use std::path::PathBuf;

/// A node in the abstract syntax tree.
#[derive(Debug, Clone, Default)]
pub struct AstNode {
    pub kind: AstNodeKind,
    /// Human-readable display name (`f(int, long)` for functions, `x` for variables).
    pub name: Option<String>,
    pub ty: TypeInfo,
    pub location: Option<SourceLocation>,
    pub children: Vec<AstNode>,
}

/// Declared type of a node: the spelling as written, and its fully resolved form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub spelling: String,
    pub canonical: String,
}

impl TypeInfo {
    pub fn new(spelling: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            canonical: canonical.into(),
        }
    }

    /// A type whose spelling is already canonical (`int`, `double`, ...).
    pub fn plain(spelling: impl Into<String>) -> Self {
        let spelling = spelling.into();
        Self {
            canonical: spelling.clone(),
            spelling,
        }
    }

    /// Return type of a function type spelled `R (params)`.
    /// `None` for spellings that are not of that form (function-pointer returns, trailing attributes).
    pub fn return_type(&self) -> Option<TypeInfo> {
        let spelling = return_spelling(&self.spelling)?;
        let canonical = return_spelling(&self.canonical).unwrap_or(spelling);
        Some(TypeInfo::new(spelling, canonical))
    }
}

fn return_spelling(function_type: &str) -> Option<&str> {
    let inner = function_type.strip_suffix(')')?;
    let mut depth = 0usize;
    for (index, ch) in inner.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' if depth == 0 => {
                let ret = inner[..index].trim_end();
                return (!ret.is_empty() && !ret.contains('(')).then_some(ret);
            }
            '(' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// A position in a source file, as reported by the AST provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Node kinds the checker distinguishes. Everything else is carried as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AstNodeKind {
    #[default]
    TranslationUnit,
    FunctionDecl,
    ParmDecl,
    VarDecl,
    TypedefDecl,
    RecordDecl,
    EnumDecl,
    CompoundStmt,
    ReturnStmt,
    BinaryOperator,
    CompoundAssignOperator,
    CallExpr,
    DeclRefExpr,
    IntegerLiteral,
    FloatingLiteral,
    ImaginaryLiteral,
    StringLiteral,
    CharacterLiteral,
    FixedPointLiteral,
    BoolLiteral,
    /// Compiler-synthesized wrapper (implicit cast, temporaries).
    Unexposed,
    Other(String),
}

impl AstNodeKind {
    /// Map a clang AST dump kind name onto the kinds the checker cares about.
    pub fn from_clang(kind: &str) -> Self {
        match kind {
            "TranslationUnitDecl" => AstNodeKind::TranslationUnit,
            "FunctionDecl" => AstNodeKind::FunctionDecl,
            "ParmVarDecl" => AstNodeKind::ParmDecl,
            "VarDecl" => AstNodeKind::VarDecl,
            "TypedefDecl" => AstNodeKind::TypedefDecl,
            "RecordDecl" => AstNodeKind::RecordDecl,
            "EnumDecl" => AstNodeKind::EnumDecl,
            "CompoundStmt" => AstNodeKind::CompoundStmt,
            "ReturnStmt" => AstNodeKind::ReturnStmt,
            "BinaryOperator" => AstNodeKind::BinaryOperator,
            "CompoundAssignOperator" => AstNodeKind::CompoundAssignOperator,
            "CallExpr" => AstNodeKind::CallExpr,
            "DeclRefExpr" => AstNodeKind::DeclRefExpr,
            "IntegerLiteral" => AstNodeKind::IntegerLiteral,
            "FloatingLiteral" => AstNodeKind::FloatingLiteral,
            "ImaginaryLiteral" => AstNodeKind::ImaginaryLiteral,
            "StringLiteral" => AstNodeKind::StringLiteral,
            "CharacterLiteral" => AstNodeKind::CharacterLiteral,
            "FixedPointLiteral" => AstNodeKind::FixedPointLiteral,
            "CXXBoolLiteralExpr" => AstNodeKind::BoolLiteral,
            "ImplicitCastExpr" | "ExprWithCleanups" | "MaterializeTemporaryExpr" | "ConstantExpr" => {
                AstNodeKind::Unexposed
            }
            other => AstNodeKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AstNodeKind::TranslationUnit => "TranslationUnit",
            AstNodeKind::FunctionDecl => "FunctionDecl",
            AstNodeKind::ParmDecl => "ParmDecl",
            AstNodeKind::VarDecl => "VarDecl",
            AstNodeKind::TypedefDecl => "TypedefDecl",
            AstNodeKind::RecordDecl => "RecordDecl",
            AstNodeKind::EnumDecl => "EnumDecl",
            AstNodeKind::CompoundStmt => "CompoundStmt",
            AstNodeKind::ReturnStmt => "ReturnStmt",
            AstNodeKind::BinaryOperator => "BinaryOperator",
            AstNodeKind::CompoundAssignOperator => "CompoundAssignOperator",
            AstNodeKind::CallExpr => "CallExpr",
            AstNodeKind::DeclRefExpr => "DeclRefExpr",
            AstNodeKind::IntegerLiteral => "IntegerLiteral",
            AstNodeKind::FloatingLiteral => "FloatingLiteral",
            AstNodeKind::ImaginaryLiteral => "ImaginaryLiteral",
            AstNodeKind::StringLiteral => "StringLiteral",
            AstNodeKind::CharacterLiteral => "CharacterLiteral",
            AstNodeKind::FixedPointLiteral => "FixedPointLiteral",
            AstNodeKind::BoolLiteral => "BoolLiteral",
            AstNodeKind::Unexposed => "UnexposedExpr",
            AstNodeKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AstNode {
    pub fn new(kind: AstNodeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, ty: TypeInfo) -> Self {
        self.ty = ty;
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_children(mut self, children: Vec<AstNode>) -> Self {
        self.children = children;
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Declared type spelling.
    pub fn spelling(&self) -> &str {
        &self.ty.spelling
    }

    /// Fully resolved type spelling.
    pub fn canonical(&self) -> &str {
        &self.ty.canonical
    }

    /// Follow the first child until a leaf is reached.
    pub fn first_leaf(&self) -> &AstNode {
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = first;
        }
        node
    }
}

/// Render a tree one node per line: indented kind, display name, type spelling.
pub fn dump_tree(root: &AstNode) -> String {
    let mut out = String::new();
    for child in &root.children {
        dump_node(child, 0, &mut out);
    }
    out
}

fn dump_node(node: &AstNode, depth: usize, out: &mut String) {
    let kind = format!("{}{}", "    ".repeat(depth), node.kind);
    out.push_str(&format!(
        "{:<64} {:<64} {:<64}",
        kind,
        node.display_name(),
        node.spelling()
    ));
    // Trailing padding carries no information.
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
    for child in &node.children {
        dump_node(child, depth + 1, out);
    }
}

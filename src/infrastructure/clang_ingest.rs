/// Clang JSON AST Ingestor.
/// Converts `clang -Xclang -ast-dump=json` output into `AstNode` trees.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::ast::{AstNode, AstNodeKind, SourceLocation, TypeInfo};

/// One node of the JSON dump. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ClangNode {
    #[serde(default)]
    kind: String,
    name: Option<String>,
    #[serde(rename = "type")]
    ty: Option<ClangType>,
    loc: Option<ClangLoc>,
    range: Option<ClangRange>,
    #[serde(rename = "referencedDecl")]
    referenced_decl: Option<ClangDeclRef>,
    #[serde(default)]
    inner: Vec<ClangNode>,
}

#[derive(Debug, Deserialize)]
struct ClangType {
    #[serde(rename = "qualType")]
    qual_type: String,
    #[serde(rename = "desugaredQualType")]
    desugared_qual_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ClangLoc {
    file: Option<String>,
    line: Option<u32>,
    col: Option<u32>,
    #[serde(rename = "spellingLoc")]
    spelling_loc: Option<Box<ClangLoc>>,
    #[serde(rename = "expansionLoc")]
    expansion_loc: Option<Box<ClangLoc>>,
}

#[derive(Debug, Default, Deserialize)]
struct ClangRange {
    #[serde(default)]
    begin: ClangLoc,
    #[serde(default)]
    end: ClangLoc,
}

#[derive(Debug, Deserialize)]
struct ClangDeclRef {
    name: Option<String>,
}

/// Clang only prints a location's file and line when they differ from the previously printed
/// location, so every location has to be replayed in print order.
#[derive(Debug, Default)]
struct LocationTracker {
    file: Option<String>,
    line: Option<u32>,
}

impl LocationTracker {
    fn resolve(&mut self, loc: &ClangLoc) -> Option<SourceLocation> {
        if loc.spelling_loc.is_some() || loc.expansion_loc.is_some() {
            // Macro location: spelling is printed first, the expansion site is what we report.
            if let Some(spelling) = &loc.spelling_loc {
                self.resolve(spelling);
            }
            return loc.expansion_loc.as_ref().and_then(|expansion| self.resolve(expansion));
        }

        if let Some(file) = &loc.file {
            self.file = Some(file.clone());
        }
        if let Some(line) = loc.line {
            self.line = Some(line);
        }

        let column = loc.col?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => Some(SourceLocation::new(file.as_str(), line, column)),
            _ => None,
        }
    }
}

/// Parse every translation unit in a dump. Several `.c` inputs produce consecutive documents.
pub fn ingest(json: &[u8]) -> Result<Vec<AstNode>> {
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    deserializer.disable_recursion_limit();

    let mut units = Vec::new();
    for (index, document) in deserializer.into_iter::<ClangNode>().enumerate() {
        let document =
            document.with_context(|| format!("Failed to parse JSON AST dump (translation unit #{})", index + 1))?;
        let mut tracker = LocationTracker::default();
        if let Some(unit) = convert(&document, &mut tracker) {
            units.push(unit);
        }
    }

    tracing::info!(units = units.len(), "ingested translation units");
    Ok(units)
}

/// Convert one node. Attribute and comment nodes are dropped, after their locations have been
/// replayed.
fn convert(node: &ClangNode, tracker: &mut LocationTracker) -> Option<AstNode> {
    let loc = node.loc.as_ref().and_then(|loc| tracker.resolve(loc));
    let begin = node.range.as_ref().and_then(|range| {
        let begin = tracker.resolve(&range.begin);
        tracker.resolve(&range.end);
        begin
    });

    let children: Vec<AstNode> = node
        .inner
        .iter()
        .filter_map(|child| convert(child, tracker))
        .collect();

    if is_annotation(&node.kind) {
        return None;
    }

    let kind = AstNodeKind::from_clang(&node.kind);
    let name = display_name(node, &kind, &children);
    let ty = node
        .ty
        .as_ref()
        .map(|ty| {
            let canonical = ty.desugared_qual_type.as_deref().unwrap_or(&ty.qual_type);
            TypeInfo::new(ty.qual_type.as_str(), canonical)
        })
        .unwrap_or_default();

    Some(AstNode {
        kind,
        name,
        ty,
        location: loc.or(begin),
        children,
    })
}

/// Attributes (`UnusedAttr`, ...) and documentation comments (`FullComment`, `TextComment`, ...)
/// hang off declarations next to their real children.
fn is_annotation(kind: &str) -> bool {
    kind.ends_with("Attr") || kind.ends_with("Comment")
}

fn display_name(node: &ClangNode, kind: &AstNodeKind, children: &[AstNode]) -> Option<String> {
    match kind {
        AstNodeKind::FunctionDecl => {
            let name = node.name.as_deref()?;
            let params: Vec<&str> = children
                .iter()
                .filter(|child| child.kind == AstNodeKind::ParmDecl)
                .map(|param| param.spelling())
                .collect();
            Some(format!("{}({})", name, params.join(", ")))
        }
        AstNodeKind::DeclRefExpr => node
            .referenced_decl
            .as_ref()
            .and_then(|decl| decl.name.clone()),
        _ => node.name.clone(),
    }
}

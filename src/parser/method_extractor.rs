//! Method extractor - turns a C# syntax tree into `SourceMethod` records

use crate::error::ExtractionError;
use crate::parser::ast_helpers::{
    attribute_names, for_each_descendant, has_leading_comment, is_type_declaration, method_body,
    node_text, statement_kind,
};
use crate::parser::csharp::parse_source;
use crate::{Invocation, SourceMethod, Statement};
use tree_sitter::{Node, Tree};

/// Owning type name for methods declared outside any type
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Extracts every method declaration from a parsed C# file
pub struct MethodExtractor<'a> {
    source: &'a str,
}

impl<'a> MethodExtractor<'a> {
    /// Create a new method extractor
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Extract all methods from a parsed tree, in source order
    pub fn extract(&self, tree: &Tree) -> Vec<SourceMethod> {
        let mut methods = Vec::new();
        self.visit_node(tree.root_node(), &mut methods, None);
        methods
    }

    fn visit_node(&self, node: Node, methods: &mut Vec<SourceMethod>, owner: Option<&str>) {
        if node.kind() == "method_declaration" {
            methods.push(self.build_method(node, owner));
            return;
        }

        if is_type_declaration(node) {
            let name = node
                .child_by_field_name("name")
                .map(|n| node_text(n, self.source));
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                self.visit_node(child, methods, name.or(owner));
            }
            return;
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit_node(child, methods, owner);
        }
    }

    fn build_method(&self, node: Node, owner: Option<&str>) -> SourceMethod {
        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(n, self.source))
            .unwrap_or_default();

        let body = method_body(node);
        let statements = body
            .map(|body| self.collect_statements(body))
            .unwrap_or_default();

        SourceMethod {
            class_name: owner.unwrap_or(UNKNOWN_CLASS).to_string(),
            name: name.to_string(),
            attributes: attribute_names(node, self.source),
            statements,
            invocations: self.collect_invocations(node),
            has_documentation: has_leading_comment(node),
            text: node_text(node, self.source).to_string(),
            line: node.start_position().row + 1,
        }
    }

    /// All statements below the body, nested and lambda bodies included.
    /// The body block itself is not a statement of the method.
    fn collect_statements(&self, body: Node) -> Vec<Statement> {
        let mut statements = Vec::new();
        for_each_descendant(body, &mut |node| {
            if let Some(kind) = statement_kind(node) {
                statements.push(Statement {
                    kind,
                    text: node_text(node, self.source).to_string(),
                });
            }
        });
        statements
    }

    fn collect_invocations(&self, method: Node) -> Vec<Invocation> {
        let mut invocations = Vec::new();
        for_each_descendant(method, &mut |node| {
            if node.kind() != "invocation_expression" {
                return;
            }
            let callee = node
                .child_by_field_name("function")
                .or_else(|| node.named_child(0))
                .map(|f| node_text(f, self.source))
                .unwrap_or_default();
            invocations.push(Invocation {
                callee: callee.to_string(),
                text: node_text(node, self.source).to_string(),
            });
        });
        invocations
    }
}

/// Parse `source` and extract its methods.
///
/// Any syntax error fails the whole file; partial trees are never analyzed.
pub fn extract_methods(source: &str) -> Result<Vec<SourceMethod>, ExtractionError> {
    let (source, tree) = parse_source(source)?;
    Ok(MethodExtractor::new(source).extract(&tree))
}

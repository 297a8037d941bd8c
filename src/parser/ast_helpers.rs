//! Shared AST traversal helpers for the C# syntax tree.
//!
//! Keeps node-kind knowledge in one place so the extractor and the
//! framework detector do not re-implement traversal.

use crate::StatementKind;
use tree_sitter::Node;

/// Type declarations that give a method its owning class name
const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "record_declaration",
    "record_struct_declaration",
    "interface_declaration",
];

/// Get the source text of a node
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// 1-indexed (line, column) of the first error or missing node, if any
pub fn first_syntax_error(node: Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column + 1));
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_syntax_error(child) {
            return Some(found);
        }
    }
    None
}

/// Whether the node declares a type (class, struct, record, interface)
pub fn is_type_declaration(node: Node) -> bool {
    TYPE_DECLARATION_KINDS.contains(&node.kind())
}

/// Map a statement node to its kind; `None` for non-statement nodes
pub fn statement_kind(node: Node) -> Option<StatementKind> {
    let kind = match node.kind() {
        "expression_statement" => StatementKind::Expression,
        "local_declaration_statement" => StatementKind::Declaration,
        "if_statement" => StatementKind::If,
        "for_statement" => StatementKind::For,
        "foreach_statement" => StatementKind::ForEach,
        "while_statement" => StatementKind::While,
        "do_statement" => StatementKind::Do,
        "switch_statement" => StatementKind::Switch,
        "try_statement" if has_child_of_kind(node, "catch_clause") => StatementKind::Try,
        "try_statement" => StatementKind::TryFinally,
        "block" => StatementKind::Block,
        "return_statement" => StatementKind::Return,
        "throw_statement" => StatementKind::Throw,
        "using_statement" => StatementKind::Using,
        other if other.ends_with("_statement") => StatementKind::Other,
        _ => return None,
    };
    Some(kind)
}

fn has_child_of_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).any(|c| c.kind() == kind);
    found
}

/// The body of a method: a block or an arrow expression clause
pub fn method_body(method: Node) -> Option<Node> {
    if let Some(body) = method.child_by_field_name("body") {
        return Some(body);
    }
    let mut cursor = method.walk();
    let found = method
        .named_children(&mut cursor)
        .find(|child| matches!(child.kind(), "block" | "arrow_expression_clause"));
    found
}

/// Attribute names of a declaration, in source order.
///
/// `[Test, Category("Slow")]` yields `Test` and `Category`.
pub fn attribute_names(declaration: Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = declaration.walk();
    for list in declaration.named_children(&mut cursor) {
        if list.kind() != "attribute_list" {
            continue;
        }
        let mut list_cursor = list.walk();
        for attribute in list.named_children(&mut list_cursor) {
            if attribute.kind() != "attribute" {
                continue;
            }
            if let Some(name) = attribute.child_by_field_name("name") {
                names.push(node_text(name, source).to_string());
            }
        }
    }
    names
}

/// Whether a comment sits directly before the declaration.
///
/// A comment trailing the previous member on its closing line belongs to
/// that member, not this one.
pub fn has_leading_comment(declaration: Node) -> bool {
    let Some(prev) = declaration.prev_named_sibling() else {
        return false;
    };
    if prev.kind() != "comment" {
        return false;
    }

    let mut before = prev.prev_named_sibling();
    while let Some(node) = before {
        if node.kind() != "comment" {
            break;
        }
        before = node.prev_named_sibling();
    }
    match before {
        Some(owner) => owner.end_position().row < prev.start_position().row,
        None => true,
    }
}

/// Visit every descendant of `node` in pre-order (the node itself excluded)
pub fn for_each_descendant<'t>(node: Node<'t>, visit: &mut impl FnMut(Node<'t>)) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child);
        for_each_descendant(child, visit);
    }
}

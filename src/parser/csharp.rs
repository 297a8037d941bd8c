//! C# parser using tree-sitter

use crate::error::ExtractionError;
use crate::parser::ast_helpers::first_syntax_error;
use tree_sitter::{Language, Parser, Tree};

/// Parser for C# files using tree-sitter
pub struct CSharpParser {
    parser: Parser,
}

impl CSharpParser {
    /// Create a new C# parser
    pub fn new() -> Result<Self, ExtractionError> {
        let mut parser = Parser::new();
        parser.set_language(&Self::language())?;
        Ok(Self { parser })
    }

    /// Parse source code into a syntax tree; error-recovered trees are returned as-is
    pub fn parse(&mut self, source: &str) -> Result<Tree, ExtractionError> {
        self.parser
            .parse(source, None)
            .ok_or(ExtractionError::NoTree)
    }

    /// Parse source code, rejecting any tree that contains an error or missing node
    pub fn parse_strict(&mut self, source: &str) -> Result<Tree, ExtractionError> {
        let tree = self.parse(source)?;
        if let Some((line, column)) = first_syntax_error(tree.root_node()) {
            return Err(ExtractionError::Syntax { line, column });
        }
        Ok(tree)
    }

    /// Get the tree-sitter language for C#
    pub fn language() -> Language {
        tree_sitter_c_sharp::LANGUAGE.into()
    }
}

/// Drop a leading UTF-8 byte order mark, common in Visual Studio generated files
pub fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

/// Strip the BOM and parse strictly. Returns the text the tree's byte
/// offsets refer to, together with the tree.
pub fn parse_source(source: &str) -> Result<(&str, Tree), ExtractionError> {
    let source = strip_bom(source);
    let tree = CSharpParser::new()?.parse_strict(source)?;
    Ok((source, tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let mut parser = CSharpParser::new().unwrap();
        let tree = parser.parse("class Foo { }").unwrap();
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_parse_method() {
        let mut parser = CSharpParser::new().unwrap();
        let source = r#"
            namespace Demo
            {
                public class Greeter
                {
                    public string Greet(string name)
                    {
                        return $"Hello, {name}!";
                    }
                }
            }
        "#;
        let tree = parser.parse_strict(source).unwrap();
        assert_eq!(tree.root_node().kind(), "compilation_unit");
    }

    #[test]
    fn test_parse_strict_reports_position() {
        let mut parser = CSharpParser::new().unwrap();
        let source = "class Foo {\n    void Bar( {\n}\n";
        match parser.parse_strict(source) {
            Err(ExtractionError::Syntax { line, .. }) => assert!(line >= 1),
            other => panic!("expected syntax error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_source_offsets_skip_bom() {
        let (source, tree) = parse_source("\u{feff}class Foo { }").unwrap();
        assert_eq!(source, "class Foo { }");
        assert_eq!(tree.root_node().end_byte(), source.len());
        assert!(matches!(
            parse_source("class { ;"),
            Err(ExtractionError::Syntax { .. })
        ));
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}class A {}"), "class A {}");
        assert_eq!(strip_bom("class A {}"), "class A {}");
    }
}

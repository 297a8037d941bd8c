//! Parser module for C# source files

pub mod ast_helpers;
pub mod csharp;
pub mod method_extractor;

pub use ast_helpers::{first_syntax_error, node_text};
pub use csharp::{parse_source, strip_bom, CSharpParser};
pub use method_extractor::{extract_methods, MethodExtractor, UNKNOWN_CLASS};

//! Source code parsers using tree-sitter
//!
//! Only Java is supported: the readability engine analyzes Java sources.

pub mod java;

pub use java::{method_declarations, method_start_lines};

/// A method declaration located in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    /// Simple method name
    pub name: String,
    /// 1-based line of the declaration (after any annotations)
    pub line: u32,
    /// Abstract and interface methods have no body
    pub has_body: bool,
}

impl MethodDeclaration {
    /// 0-based line index, as the span extractor expects
    pub fn start_index(&self) -> usize {
        self.line.saturating_sub(1) as usize
    }
}

/// Get the language name for a file extension
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "java" => Some("Java"),
        _ => None,
    }
}

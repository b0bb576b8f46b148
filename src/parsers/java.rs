//! Java parser using tree-sitter
//!
//! Locates method declarations (in top-level, nested, local and anonymous
//! classes, enums, records and interfaces) so the span extractor knows where
//! each method starts.

use crate::error::{ReadabilityError, ReadabilityResult};
use crate::parsers::MethodDeclaration;
use tree_sitter::{Node, Parser};

/// Parse Java source and list every method declaration in document order.
///
/// Constructors are not method declarations and are skipped.
pub fn method_declarations(source: &str) -> ReadabilityResult<Vec<MethodDeclaration>> {
    let mut parser = Parser::new();
    let language = tree_sitter_java::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|e| ReadabilityError::Parse(format!("Failed to set Java language: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadabilityError::Parse("parser produced no syntax tree".to_string()))?;

    let mut declarations = Vec::new();
    collect_methods(&tree.root_node(), source.as_bytes(), &mut declarations);
    Ok(declarations)
}

/// 0-based start lines of the methods that have a body
pub fn method_start_lines(source: &str) -> ReadabilityResult<Vec<usize>> {
    Ok(method_declarations(source)?
        .into_iter()
        .filter(|decl| decl.has_body)
        .map(|decl| decl.start_index())
        .collect())
}

/// Pre-order walk; a method is recorded before any method nested inside it
fn collect_methods(node: &Node, source: &[u8], out: &mut Vec<MethodDeclaration>) {
    for child in node.children(&mut node.walk()) {
        if child.kind() == "method_declaration" {
            if let Some(decl) = parse_method_node(&child, source) {
                out.push(decl);
            }
        }
        collect_methods(&child, source, out);
    }
}

fn parse_method_node(node: &Node, source: &[u8]) -> Option<MethodDeclaration> {
    let name_node = node.child_by_field_name("name")?;
    let name = name_node.utf8_text(source).ok()?.to_string();

    Some(MethodDeclaration {
        name,
        line: declaration_row(node) as u32 + 1,
        has_body: node.child_by_field_name("body").is_some(),
    })
}

/// Row of the first token after the modifier list.
///
/// Annotations live inside `modifiers`; starting after them keeps
/// `@SuppressWarnings({"a", "b"})` from supplying the first brace.
fn declaration_row(node: &Node) -> usize {
    node.children(&mut node.walk())
        .find(|child| child.kind() != "modifiers")
        .unwrap_or(*node)
        .start_position()
        .row
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn names(decls: &[MethodDeclaration]) -> Vec<&str> {
        decls.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_parse_methods() {
        let source = indoc! {r#"
            public class Calculator {
                public int add(int a, int b) {
                    return a + b;
                }

                public int subtract(int a, int b) {
                    return a - b;
                }
            }
        "#};
        let decls = method_declarations(source).expect("should parse Java source");

        assert_eq!(names(&decls), vec!["add", "subtract"]);
        assert_eq!(decls[0].line, 2);
        assert_eq!(decls[1].line, 6);
        assert!(decls.iter().all(|d| d.has_body));
    }

    #[test]
    fn test_constructors_are_skipped() {
        let source = indoc! {r#"
            class Lamp {
                Lamp() {
                    init();
                }
                void turnOn() {}
            }
        "#};
        let decls = method_declarations(source).expect("should parse Java source");
        assert_eq!(names(&decls), vec!["turnOn"]);
    }

    #[test]
    fn test_abstract_and_interface_methods_have_no_body() {
        let source = indoc! {r#"
            interface Shape {
                double area();
                default String describe() {
                    return "shape";
                }
            }

            abstract class Base {
                abstract void run();
            }
        "#};
        let decls = method_declarations(source).expect("should parse Java source");
        assert_eq!(names(&decls), vec!["area", "describe", "run"]);
        assert_eq!(
            decls.iter().map(|d| d.has_body).collect::<Vec<_>>(),
            vec![false, true, false]
        );

        let starts = method_start_lines(source).expect("should parse Java source");
        assert_eq!(starts, vec![2]);
    }

    #[test]
    fn test_nested_and_anonymous_classes_in_document_order() {
        let source = indoc! {r#"
            public class EventHandler {
                public void setup() {
                    button.addListener(new ActionListener() {
                        @Override
                        public void actionPerformed(ActionEvent e) {
                            handleClick();
                        }
                    });
                }

                static class Inner {
                    void innerMethod() {}
                }

                private void handleClick() {
                    System.out.println("clicked");
                }
            }
        "#};
        let decls = method_declarations(source).expect("should parse Java source");
        assert_eq!(
            names(&decls),
            vec!["setup", "actionPerformed", "innerMethod", "handleClick"]
        );
    }

    #[test]
    fn test_start_line_skips_annotations() {
        let source = indoc! {r#"
            class Service {
                @SuppressWarnings({"unchecked", "rawtypes"})
                @Deprecated
                public void oldMethod() {
                    work();
                }
            }
        "#};
        let decls = method_declarations(source).expect("should parse Java source");
        assert_eq!(decls[0].line, 4);
        assert_eq!(method_start_lines(source).expect("parse"), vec![3]);
    }

    #[test]
    fn test_enum_and_record_methods() {
        let source = indoc! {r#"
            enum Color {
                RED, GREEN;
                String lower() { return name().toLowerCase(); }
            }

            record Point(int x, int y) {
                int sum() { return x + y; }
            }
        "#};
        let decls = method_declarations(source).expect("should parse Java source");
        assert_eq!(names(&decls), vec!["lower", "sum"]);
    }
}

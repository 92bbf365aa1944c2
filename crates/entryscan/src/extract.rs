//! Type extraction: pulls a [`TypeDeclaration`] out of a parsed Java file.
//!
//! Only the first top-level `class`, `record` or `interface` is considered.
//! Enums and `@interface` annotation types are skipped, so a file holding only
//! those produces no declaration at all.

use std::path::Path;

use crate::parse::{find_child_by_kind, CompilationUnit};
use crate::{NameRef, TypeDeclaration, TypeKind};

/// Extract the first top-level class-or-interface declaration of a file.
///
/// Returns `None` when the file declares no class or interface at top level.
pub fn extract_declaration(unit: &CompilationUnit) -> Option<TypeDeclaration> {
    let root = unit.root();
    let source = unit.source().as_bytes();

    let mut found: Option<TypeDeclaration> = None;
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        let Some(decl) = extract_type(&child, source, unit.path()) else {
            continue;
        };
        match &found {
            None => found = Some(decl),
            Some(first) => {
                tracing::debug!(
                    "{:?}: ignoring top-level {} {} after {}",
                    unit.path(),
                    decl.kind,
                    decl.simple_name,
                    first.simple_name
                );
            }
        }
    }

    found
}

fn type_kind(node: &tree_sitter::Node) -> Option<TypeKind> {
    match node.kind() {
        "class_declaration" | "record_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        _ => None,
    }
}

fn extract_type(node: &tree_sitter::Node, source: &[u8], file: &Path) -> Option<TypeDeclaration> {
    let kind = type_kind(node)?;
    let name = node.child_by_field_name("name")?.utf8_text(source).ok()?;

    let modifiers = find_child_by_kind(node, "modifiers");
    let is_abstract = modifiers
        .map(|m| find_child_by_kind(&m, "abstract").is_some())
        .unwrap_or(false);
    let annotation_refs = modifiers
        .map(|m| extract_annotations(&m, source))
        .unwrap_or_default();

    let (implemented_or_extended_refs, superclass) = match kind {
        TypeKind::Class => (
            type_list_refs(node, "super_interfaces", source),
            extract_superclass(node, source),
        ),
        TypeKind::Interface => (type_list_refs(node, "extends_interfaces", source), None),
    };

    Some(TypeDeclaration {
        kind,
        simple_name: name.to_string(),
        is_abstract,
        annotation_refs,
        implemented_or_extended_refs,
        superclass,
        source_file: file.to_path_buf(),
    })
}

/// Extract annotations (e.g., @Service, @org.acme.Endpoint("/x")) from a modifiers node
fn extract_annotations(modifiers: &tree_sitter::Node, source: &[u8]) -> Vec<NameRef> {
    let mut annotations = Vec::new();
    let mut cursor = modifiers.walk();
    for child in modifiers.named_children(&mut cursor) {
        if child.kind() == "marker_annotation" || child.kind() == "annotation" {
            if let Some(name) = child
                .child_by_field_name("name")
                .and_then(|n| name_ref(&n, source))
            {
                annotations.push(name);
            }
        }
    }
    annotations
}

/// References listed in an `implements`/`extends` clause: `<clause> -> type_list -> types`
fn type_list_refs(node: &tree_sitter::Node, clause: &str, source: &[u8]) -> Vec<NameRef> {
    let Some(type_list) =
        find_child_by_kind(node, clause).and_then(|c| find_child_by_kind(&c, "type_list"))
    else {
        return Vec::new();
    };

    let mut cursor = type_list.walk();
    type_list
        .named_children(&mut cursor)
        .filter_map(|ty| name_ref(&ty, source))
        .collect()
}

fn extract_superclass(node: &tree_sitter::Node, source: &[u8]) -> Option<NameRef> {
    let superclass = node.child_by_field_name("superclass")?;
    let mut cursor = superclass.walk();
    let ty = superclass.named_children(&mut cursor).next()?;
    name_ref(&ty, source)
}

/// Normalize a name or type node into a [`NameRef`], dropping type arguments.
fn name_ref(node: &tree_sitter::Node, source: &[u8]) -> Option<NameRef> {
    let mut segments = Vec::new();
    collect_segments(node, source, &mut segments);
    NameRef::from_segments(&segments)
}

fn collect_segments(node: &tree_sitter::Node, source: &[u8], out: &mut Vec<String>) {
    match node.kind() {
        "identifier" | "type_identifier" => {
            if let Ok(text) = node.utf8_text(source) {
                out.push(text.to_string());
            }
        }
        "scoped_identifier" | "scoped_type_identifier" | "generic_type" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_segments(&child, source, out);
            }
        }
        // type_arguments, annotations inside qualified types, primitive types
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_source;

    fn extract(file: &str, source: &str) -> Option<TypeDeclaration> {
        let unit = parse_source(Path::new(file), source.to_string()).expect("source should parse");
        extract_declaration(&unit)
    }

    #[test]
    fn extracts_annotated_class() {
        let source = r#"
package com.example;

import org.springframework.stereotype.Service;

@Service
@org.acme.Endpoint("/users")
public class UserService {
    @Override
    public String toString() { return "x"; }
}
"#;
        let decl = extract("UserService.java", source).expect("Should find UserService");
        assert_eq!(decl.kind, TypeKind::Class);
        assert_eq!(decl.simple_name, "UserService");
        assert!(!decl.is_abstract);
        assert_eq!(
            decl.annotation_refs,
            vec![NameRef::new("Service"), NameRef::new("org.acme.Endpoint")]
        );
        assert_eq!(decl.source_file, Path::new("UserService.java"));
    }

    #[test]
    fn extracts_abstract_modifier() {
        let source = r#"
public abstract class BaseHandler implements Handler {
}
"#;
        let decl = extract("BaseHandler.java", source).unwrap();
        assert!(decl.is_abstract);
    }

    #[test]
    fn extracts_implements_list_without_type_arguments() {
        let source = r#"
package com.example;

public class Dog extends Animal implements Runnable, Comparable<Dog>, java.io.Serializable {
}
"#;
        let decl = extract("Dog.java", source).unwrap();
        assert_eq!(
            decl.implemented_or_extended_refs,
            vec![
                NameRef::new("Runnable"),
                NameRef::new("Comparable"),
                NameRef::new("java.io.Serializable"),
            ]
        );
        // Superclass is tracked separately
        assert_eq!(decl.superclass, Some(NameRef::new("Animal")));
        assert!(!decl
            .implemented_or_extended_refs
            .iter()
            .any(|r| r.simple_name() == "Animal"));
    }

    #[test]
    fn extracts_interface_extends_list() {
        let source = r#"
public interface Mid extends Base, org.acme.Marker<String> {
    void run();
}
"#;
        let decl = extract("Mid.java", source).unwrap();
        assert_eq!(decl.kind, TypeKind::Interface);
        assert_eq!(
            decl.implemented_or_extended_refs,
            vec![NameRef::new("Base"), NameRef::new("org.acme.Marker")]
        );
        assert_eq!(decl.superclass, None);
    }

    #[test]
    fn extracts_record_as_class() {
        let source = r#"
public record Point(int x, int y) implements Shape {
}
"#;
        let decl = extract("Point.java", source).unwrap();
        assert_eq!(decl.kind, TypeKind::Class);
        assert_eq!(decl.implemented_or_extended_refs, vec![NameRef::new("Shape")]);
    }

    #[test]
    fn enum_only_file_has_no_declaration() {
        let source = r#"
package com.example;

public enum Status {
    PENDING,
    ACTIVE
}
"#;
        assert!(extract("Status.java", source).is_none());
    }

    #[test]
    fn annotation_type_file_has_no_declaration() {
        let source = r#"
public @interface Service {
    String value() default "";
}
"#;
        assert!(extract("Service.java", source).is_none());
    }

    #[test]
    fn empty_file_has_no_declaration() {
        assert!(extract("Empty.java", "").is_none());
        assert!(extract("PackageOnly.java", "package com.example;\n").is_none());
    }

    #[test]
    fn first_top_level_declaration_wins() {
        let source = r#"
class First implements Alpha {}

@Service
class Second implements Beta {}
"#;
        let decl = extract("First.java", source).unwrap();
        assert_eq!(decl.simple_name, "First");
        assert_eq!(decl.implemented_or_extended_refs, vec![NameRef::new("Alpha")]);
        assert!(decl.annotation_refs.is_empty());
    }

    #[test]
    fn enum_before_class_is_skipped() {
        let source = r#"
enum Mode { ON, OFF }

public class Switch implements Toggle {}
"#;
        let decl = extract("Switch.java", source).unwrap();
        assert_eq!(decl.simple_name, "Switch");
    }

    #[test]
    fn nested_types_are_not_top_level() {
        let source = r#"
public class Outer {
    @Service
    static class Inner implements Handler {}
}
"#;
        let decl = extract("Outer.java", source).unwrap();
        assert_eq!(decl.simple_name, "Outer");
        assert!(decl.annotation_refs.is_empty());
        assert!(decl.implemented_or_extended_refs.is_empty());
    }

    #[test]
    fn scoped_generic_reference() {
        let source = r#"
public class Impl implements java.util.function.Supplier<String> {}
"#;
        let decl = extract("Impl.java", source).unwrap();
        assert_eq!(
            decl.implemented_or_extended_refs,
            vec![NameRef::new("java.util.function.Supplier")]
        );
    }
}

//! entryscan: Entry-class discovery for Java codebases
//!
//! This crate classifies the top-level type of every Java source file under a
//! directory by two independent criteria:
//! - Presence of a configured marker annotation (simple or dotted name)
//! - Direct or transitive implementation of a configured interface, following
//!   `implements`/`extends` chains across files through a run-scoped symbol index
//!
//! Parsing uses tree-sitter. No import resolution is attempted: references are
//! matched by their written text and simple name.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod annotations;
pub mod classify;
pub mod config;
pub mod extract;
pub mod index;
pub mod parse;
pub mod resolve;
pub mod scan;
pub mod walk;

// Re-export main types
pub use classify::{Classifier, MatchCriteria};
pub use config::{ConfigError, ScanConfig, DEFAULT_CONFIG_FILE};
pub use extract::extract_declaration;
pub use index::SymbolIndex;
pub use parse::{AstCache, CompilationUnit, ParseError, ParseErrorKind};
pub use resolve::InterfaceResolver;
pub use scan::{run_scan, scan_files, ScanContext, ScanResult};

/// Whether a top-level declaration is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Class => write!(f, "Class"),
            TypeKind::Interface => write!(f, "Interface"),
        }
    }
}

/// A reference to another type exactly as written in source.
///
/// `Service` is kept as [`NameRef::Simple`], `com.example.Service` as
/// [`NameRef::Qualified`]. Neither form is resolved against imports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameRef {
    Simple(String),
    Qualified(String),
}

impl NameRef {
    /// Build a reference from dotted text, picking the variant by whether a `.` is present.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains('.') {
            NameRef::Qualified(text)
        } else {
            NameRef::Simple(text)
        }
    }

    /// Join identifier segments with `.`. Returns `None` for an empty segment list.
    pub fn from_segments(segments: &[String]) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self::new(segments.join(".")))
        }
    }

    /// The full text as written: `Service` or `com.example.Service`.
    pub fn as_str(&self) -> &str {
        match self {
            NameRef::Simple(name) | NameRef::Qualified(name) => name,
        }
    }

    /// The trailing identifier: `Service` for both `Service` and `com.example.Service`.
    pub fn simple_name(&self) -> &str {
        match self {
            NameRef::Simple(name) => name,
            NameRef::Qualified(path) => simple_name(path),
        }
    }
}

impl std::fmt::Display for NameRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trailing component of a dotted name (`a.b.C` -> `C`).
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Normalized view of the first top-level class or interface in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Class or interface
    pub kind: TypeKind,
    /// Declared name: "UserServiceImpl"
    pub simple_name: String,
    /// True iff the `abstract` modifier is present
    pub is_abstract: bool,
    /// Annotations attached to the declaration, in source order
    pub annotation_refs: Vec<NameRef>,
    /// `implements` list for a class, `extends` list for an interface
    pub implemented_or_extended_refs: Vec<NameRef>,
    /// `extends` clause of a class (never part of `implemented_or_extended_refs`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<NameRef>,
    /// File the declaration was extracted from
    pub source_file: PathBuf,
}

impl TypeDeclaration {
    pub fn new(kind: TypeKind, simple_name: impl Into<String>, source_file: PathBuf) -> Self {
        Self {
            kind,
            simple_name: simple_name.into(),
            is_abstract: false,
            annotation_refs: Vec::new(),
            implemented_or_extended_refs: Vec::new(),
            superclass: None,
            source_file,
        }
    }

    /// Mark the declaration abstract
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Set annotation references from their written text
    pub fn with_annotations<I, S>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotation_refs = annotations.into_iter().map(NameRef::new).collect();
        self
    }

    /// Set implemented (class) or extended (interface) references from their written text
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implemented_or_extended_refs = parents.into_iter().map(NameRef::new).collect();
        self
    }

    /// Set the superclass reference
    pub fn with_superclass(mut self, superclass: Option<&str>) -> Self {
        self.superclass = superclass.map(NameRef::new);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_ref_variants() {
        assert_eq!(NameRef::new("Service"), NameRef::Simple("Service".to_string()));
        assert_eq!(
            NameRef::new("com.example.Service"),
            NameRef::Qualified("com.example.Service".to_string())
        );
    }

    #[test]
    fn test_name_ref_simple_name() {
        assert_eq!(NameRef::new("Service").simple_name(), "Service");
        assert_eq!(NameRef::new("com.example.Service").simple_name(), "Service");
        assert_eq!(NameRef::new("com.example.Service").as_str(), "com.example.Service");
    }

    #[test]
    fn test_name_ref_from_segments() {
        let segments = vec!["org".to_string(), "acme".to_string(), "Handler".to_string()];
        let name = NameRef::from_segments(&segments).unwrap();
        assert_eq!(name.to_string(), "org.acme.Handler");
        assert!(NameRef::from_segments(&[]).is_none());
    }

    #[test]
    fn test_type_kind_display() {
        assert_eq!(format!("{}", TypeKind::Class), "Class");
        assert_eq!(format!("{}", TypeKind::Interface), "Interface");
    }

    #[test]
    fn test_declaration_builder() {
        let decl = TypeDeclaration::new(TypeKind::Class, "Impl", PathBuf::from("Impl.java"))
            .with_abstract(true)
            .with_annotations(["Service"])
            .with_parents(["Mid", "java.io.Serializable"])
            .with_superclass(Some("Base"));
        assert!(decl.is_abstract);
        assert_eq!(decl.annotation_refs, vec![NameRef::new("Service")]);
        assert_eq!(decl.implemented_or_extended_refs.len(), 2);
        assert_eq!(decl.implemented_or_extended_refs[1].simple_name(), "Serializable");
        assert_eq!(decl.superclass, Some(NameRef::new("Base")));
    }
}

//! AST adapter: parses Java source files with tree-sitter.
//!
//! Every file is parsed at most once per scan. [`AstCache`] keeps the outcome
//! (tree or error) keyed by path, so a malformed file is never re-read.
//!
//! # Examples
//!
//! ```
//! use entryscan::parse::parse_source;
//! use std::path::Path;
//!
//! let unit = parse_source(Path::new("Greeter.java"), "public class Greeter {}".to_string())
//!     .expect("valid Java should parse");
//! assert_eq!(unit.root().kind(), "program");
//!
//! let err = parse_source(Path::new("Broken.java"), "public class {".to_string()).unwrap_err();
//! assert!(err.is_syntax());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// Thread-local parser reuse - avoids creating a new parser per file
thread_local! {
    static JAVA_PARSER: RefCell<tree_sitter::Parser> = RefCell::new({
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .expect("tree-sitter-java grammar incompatible with tree-sitter version");
        parser
    });
}

/// A source file that could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse {}: {kind}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// The file could not be read (permissions, vanished, not UTF-8)
    #[error("unreadable source ({0})")]
    Unreadable(String),

    /// The tree contains an ERROR or MISSING node (1-indexed position of the first one)
    #[error("syntax error at {line}:{column}")]
    Syntax { line: u32, column: u32 },

    /// tree-sitter returned no tree
    #[error("parser aborted")]
    Aborted,
}

impl ParseError {
    fn new(path: &Path, kind: ParseErrorKind) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
        }
    }

    /// True for malformed source, false for I/O problems
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Syntax { .. })
    }
}

/// One parsed source file: the text and the tree built from it.
pub struct CompilationUnit {
    path: PathBuf,
    source: String,
    tree: tree_sitter::Tree,
}

impl CompilationUnit {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The `program` node
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }
}

impl std::fmt::Debug for CompilationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationUnit")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Parse Java source text. Any syntax error in the tree makes this a [`ParseError`].
pub fn parse_source(path: &Path, source: String) -> Result<CompilationUnit, ParseError> {
    let tree = JAVA_PARSER
        .with(|parser| parser.borrow_mut().parse(&source, None))
        .ok_or_else(|| ParseError::new(path, ParseErrorKind::Aborted))?;

    let root = tree.root_node();
    if root.has_error() {
        let point = first_error_position(root).unwrap_or_else(|| root.start_position());
        return Err(ParseError::new(
            path,
            ParseErrorKind::Syntax {
                line: (point.row + 1) as u32,
                column: (point.column + 1) as u32,
            },
        ));
    }

    Ok(CompilationUnit {
        path: path.to_path_buf(),
        source,
        tree,
    })
}

/// Read and parse a file from disk.
pub fn parse_file(path: &Path) -> Result<CompilationUnit, ParseError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| ParseError::new(path, ParseErrorKind::Unreadable(e.to_string())))?;
    parse_source(path, source)
}

/// Locate the first ERROR/MISSING node, descending only into subtrees that contain one.
fn first_error_position(node: tree_sitter::Node) -> Option<tree_sitter::Point> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position());
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(point) = first_error_position(child) {
            return Some(point);
        }
    }
    None
}

/// Find a child node by its kind.
/// Uses cursor-based iteration for O(n) instead of O(n²) performance.
pub fn find_child_by_kind<'a>(
    node: &tree_sitter::Node<'a>,
    kind: &str,
) -> Option<tree_sitter::Node<'a>> {
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            if cursor.node().kind() == kind {
                return Some(cursor.node());
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    None
}

/// Per-scan cache of parse outcomes keyed by file path.
///
/// Failures are cached alongside successes: parsing is deterministic, so a
/// second attempt on the same bytes would fail the same way.
#[derive(Debug, Default)]
pub struct AstCache {
    units: HashMap<PathBuf, Result<CompilationUnit, ParseError>>,
}

impl AstCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `path` from disk, or return the cached outcome of an earlier call.
    pub fn parse(&mut self, path: &Path) -> Result<&CompilationUnit, ParseError> {
        self.units
            .entry(path.to_path_buf())
            .or_insert_with(|| parse_file(path))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Number of files parsed so far (including failures)
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of cached failures
    pub fn error_count(&self) -> usize {
        self.units.values().filter(|u| u.is_err()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_valid_class() {
        let source = r#"
package com.example;

public class User {
    private String name;
}
"#;
        let unit = parse_source(Path::new("User.java"), source.to_string()).unwrap();
        assert_eq!(unit.root().kind(), "program");
        assert_eq!(unit.path(), Path::new("User.java"));
        assert!(unit.source().contains("class User"));
    }

    #[test]
    fn reports_syntax_error_position() {
        let source = "package com.example;\n\npublic class {\n";
        let err = parse_source(Path::new("Broken.java"), source.to_string()).unwrap_err();
        assert!(err.is_syntax());
        match err.kind {
            ParseErrorKind::Syntax { line, column } => assert!(line >= 1 && column >= 1),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn reports_unreadable_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("Missing.java");
        let err = parse_file(&missing).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Unreadable(_)));
        assert!(!err.is_syntax());
    }

    #[test]
    fn cache_parses_each_file_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("A.java");
        std::fs::write(&path, "public class A {}").unwrap();

        let mut cache = AstCache::new();
        assert!(cache.parse(&path).is_ok());

        // Changing the file on disk must not matter: the first outcome is cached
        std::fs::write(&path, "public class {").unwrap();
        assert!(cache.parse(&path).is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_keeps_failures() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Bad.java");
        std::fs::write(&path, "class {{{").unwrap();

        let mut cache = AstCache::new();
        let first = cache.parse(&path).unwrap_err();

        // A fixed file is not re-read: no retries
        std::fs::write(&path, "class Good {}").unwrap();
        let second = cache.parse(&path).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(cache.error_count(), 1);
    }
}

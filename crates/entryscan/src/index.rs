//! Run-scoped symbol index: simple type name -> declarations.
//!
//! The index is built once from every extracted [`TypeDeclaration`] and is
//! read-only afterwards. Several files may declare the same simple name (same
//! class name in different packages). Since no import information is used,
//! [`SymbolIndex::lookup`] resolves such collisions deterministically: the
//! declaration from the lexicographically-first source path wins.
//!
//! # Examples
//!
//! ```
//! use entryscan::{SymbolIndex, TypeDeclaration, TypeKind};
//! use std::path::PathBuf;
//!
//! let index = SymbolIndex::build(vec![
//!     TypeDeclaration::new(TypeKind::Interface, "Handler", PathBuf::from("/src/b/Handler.java")),
//!     TypeDeclaration::new(TypeKind::Interface, "Handler", PathBuf::from("/src/a/Handler.java")),
//! ]);
//!
//! let found = index.lookup("Handler").unwrap();
//! assert_eq!(found.source_file, PathBuf::from("/src/a/Handler.java"));
//! assert!(index.lookup("Unknown").is_none());
//! ```

use std::collections::HashMap;

use crate::{simple_name, TypeDeclaration};

#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// All declarations, sorted by source file path
    declarations: Vec<TypeDeclaration>,

    /// Simple name -> positions in `declarations` (ascending, so path order)
    by_name: HashMap<String, Vec<usize>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from every extracted declaration.
    pub fn build(declarations: impl IntoIterator<Item = TypeDeclaration>) -> Self {
        let mut declarations: Vec<TypeDeclaration> = declarations.into_iter().collect();
        // Byte-wise on the path text: `a-b/` sorts before `a/`
        declarations.sort_by(|a, b| a.source_file.as_os_str().cmp(b.source_file.as_os_str()));

        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, decl) in declarations.iter().enumerate() {
            by_name.entry(decl.simple_name.clone()).or_default().push(pos);
        }

        for (name, positions) in &by_name {
            if positions.len() > 1 {
                tracing::debug!(
                    "{} declarations named {}; using {:?}",
                    positions.len(),
                    name,
                    declarations[positions[0]].source_file
                );
            }
        }

        Self {
            declarations,
            by_name,
        }
    }

    /// Resolve a type reference by simple name.
    ///
    /// Dotted names are looked up by their trailing component. Returns `None`
    /// for types declared outside the scanned files (JDK, libraries).
    pub fn lookup(&self, name: &str) -> Option<&TypeDeclaration> {
        self.candidates(name).next()
    }

    /// All declarations sharing the simple name, in path order.
    pub fn candidates<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a TypeDeclaration> + 'a {
        self.by_name
            .get(simple_name(name))
            .into_iter()
            .flatten()
            .map(move |&pos| &self.declarations[pos])
    }

    /// Every indexed declaration, sorted by source file path.
    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

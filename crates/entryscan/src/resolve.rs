//! Transitive interface resolution over the implements/extends graph.
//!
//! A declaration satisfies a target interface when the target's simple name
//! appears in its own reference list, or in the reference list of any
//! declaration reachable through references that resolve in the
//! [`SymbolIndex`]. References that do not resolve (JDK or library types) are
//! dead ends, not errors.
//!
//! The traversal is a depth-first walk over an explicit stack. A set of
//! visited simple names only ever grows, and each name is pushed at most once,
//! so the walk terminates on any graph, including cyclic ones.

use std::collections::HashSet;

use crate::{simple_name, NameRef, SymbolIndex, TypeDeclaration, TypeKind};

pub struct InterfaceResolver<'a> {
    index: &'a SymbolIndex,
    follow_superclass: bool,
}

impl<'a> InterfaceResolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self {
            index,
            follow_superclass: false,
        }
    }

    /// Also walk a class's `extends` edge.
    pub fn with_superclass(mut self, follow_superclass: bool) -> Self {
        self.follow_superclass = follow_superclass;
        self
    }

    /// Does `decl` implement (or extend) `target`, directly or through other scanned types?
    ///
    /// `target` is compared by simple name, so `Base` and `com.acme.Base` are equivalent.
    pub fn implements_target(&self, decl: &TypeDeclaration, target: &str) -> bool {
        let target = simple_name(target);

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(decl.simple_name.as_str());
        let mut stack: Vec<&TypeDeclaration> = vec![decl];

        while let Some(current) = stack.pop() {
            let edges = self.edges(current);

            if edges.iter().any(|r| r.simple_name() == target) {
                return true;
            }

            // Reversed so the first-listed parent is explored first
            for reference in edges.iter().rev() {
                match self.index.lookup(reference.simple_name()) {
                    Some(parent) => {
                        if visited.insert(parent.simple_name.as_str()) {
                            stack.push(parent);
                        }
                    }
                    None => {
                        tracing::trace!(
                            "{}: {} is not a scanned type",
                            current.simple_name,
                            reference
                        );
                    }
                }
            }
        }

        false
    }

    /// True if `decl` satisfies any of `targets`. An empty list never matches.
    pub fn has_any_target<S: AsRef<str>>(&self, decl: &TypeDeclaration, targets: &[S]) -> bool {
        targets
            .iter()
            .any(|target| self.implements_target(decl, target.as_ref()))
    }

    fn edges<'d>(&self, decl: &'d TypeDeclaration) -> Vec<&'d NameRef> {
        let superclass = match decl.kind {
            TypeKind::Class if self.follow_superclass => decl.superclass.as_ref(),
            _ => None,
        };
        decl.implemented_or_extended_refs
            .iter()
            .chain(superclass)
            .collect()
    }
}

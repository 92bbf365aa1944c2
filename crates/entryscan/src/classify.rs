//! Classification: combines abstract exclusion, annotation and interface matching.

use crate::annotations::has_configured_annotation;
use crate::{InterfaceResolver, SymbolIndex, TypeDeclaration};

/// What a declaration must satisfy to be reported. Fixed for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    /// Annotation names, simple (`Service`) or dotted (`com.example.Service`)
    pub annotations: Vec<String>,
    /// Target interface names, compared by simple name
    pub interfaces: Vec<String>,
    /// Skip declarations carrying the `abstract` modifier
    pub exclude_abstract: bool,
    /// Walk class `extends` edges during interface resolution
    pub follow_superclass: bool,
}

impl Default for MatchCriteria {
    fn default() -> Self {
        Self {
            annotations: Vec::new(),
            interfaces: Vec::new(),
            exclude_abstract: true,
            follow_superclass: false,
        }
    }
}

impl MatchCriteria {
    /// Build criteria from configured names. A leading `@` and surrounding
    /// whitespace are stripped; blank entries are dropped.
    pub fn new<A, I>(annotations: A, interfaces: I) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            annotations: normalize(annotations),
            interfaces: normalize(interfaces),
            ..Self::default()
        }
    }

    pub fn with_exclude_abstract(mut self, exclude_abstract: bool) -> Self {
        self.exclude_abstract = exclude_abstract;
        self
    }

    pub fn with_follow_superclass(mut self, follow_superclass: bool) -> Self {
        self.follow_superclass = follow_superclass;
        self
    }

    /// No annotation and no interface configured: nothing can match.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.interfaces.is_empty()
    }
}

fn normalize<T>(names: T) -> Vec<String>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().trim_start_matches('@').trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

pub struct Classifier<'a> {
    criteria: &'a MatchCriteria,
    resolver: InterfaceResolver<'a>,
}

impl<'a> Classifier<'a> {
    pub fn new(index: &'a SymbolIndex, criteria: &'a MatchCriteria) -> Self {
        Self {
            criteria,
            resolver: InterfaceResolver::new(index).with_superclass(criteria.follow_superclass),
        }
    }

    /// Abstract declarations are ineligible when `exclude_abstract` is set.
    pub fn is_eligible(&self, decl: &TypeDeclaration) -> bool {
        !(self.criteria.exclude_abstract && decl.is_abstract)
    }

    pub fn matches(&self, decl: &TypeDeclaration) -> bool {
        self.is_eligible(decl)
            && (has_configured_annotation(decl, &self.criteria.annotations[..])
                || self.resolver.has_any_target(decl, &self.criteria.interfaces[..]))
    }

    /// Declarations from `decls` that match, in their original order.
    pub fn matching<'d>(
        &'d self,
        decls: &'d [TypeDeclaration],
    ) -> impl Iterator<Item = &'d TypeDeclaration> + 'd {
        decls.iter().filter(move |decl| self.matches(decl))
    }
}

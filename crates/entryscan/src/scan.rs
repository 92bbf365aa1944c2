//! Scan orchestration: discover, parse, index, classify, aggregate.
//!
//! [`ScanContext`] owns everything a run accumulates (the parse cache and the
//! symbol index). It is fully built before the first declaration is classified,
//! because interface resolution may follow a reference into any scanned file.
//!
//! # Examples
//!
//! ```
//! use entryscan::{MatchCriteria, ScanContext, TypeDeclaration, TypeKind};
//! use std::path::PathBuf;
//!
//! let context = ScanContext::from_declarations(vec![
//!     TypeDeclaration::new(TypeKind::Interface, "Mid", PathBuf::from("/src/Mid.java"))
//!         .with_parents(["Base"]),
//!     TypeDeclaration::new(TypeKind::Class, "Impl", PathBuf::from("/src/Impl.java"))
//!         .with_parents(["Mid"]),
//! ]);
//!
//! let result = context.classify(&MatchCriteria::new(Vec::<String>::new(), ["Base"]));
//! assert_eq!(result.count, 2);
//! assert_eq!(result.files[1], PathBuf::from("/src/Mid.java"));
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::extract::extract_declaration;
use crate::parse::{AstCache, ParseError};
use crate::walk::find_source_files;
use crate::{Classifier, MatchCriteria, ScanConfig, SymbolIndex, TypeDeclaration};

/// Files whose top-level type matched, sorted ascending and duplicate-free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub count: usize,
    pub files: Vec<PathBuf>,
}

impl ScanResult {
    /// Aggregate matched file paths: sort by path text, deduplicate, count.
    pub fn from_matches(files: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut files: Vec<PathBuf> = files.into_iter().collect();
        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        files.dedup();
        Self {
            count: files.len(),
            files,
        }
    }

    /// Pretty-printed JSON document: `{ "count": N, "files": [...] }`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Per-run state: parsed trees and the symbol index built from them.
#[derive(Debug, Default)]
pub struct ScanContext {
    cache: AstCache,
    index: SymbolIndex,
    skipped: Vec<ParseError>,
}

impl ScanContext {
    /// Parse every file, extract its declaration and index them all.
    ///
    /// Files that fail to parse are skipped (logged) and remembered in
    /// [`ScanContext::skipped`]. Files without a class or interface are dropped.
    pub fn build(files: &[PathBuf]) -> Self {
        let mut cache = AstCache::new();
        let mut declarations = Vec::new();
        let mut skipped = Vec::new();

        for file in files {
            match cache.parse(file) {
                Ok(unit) => match extract_declaration(unit) {
                    Some(decl) => declarations.push(decl),
                    None => tracing::debug!("{:?}: no top-level class or interface", file),
                },
                Err(e) => {
                    if e.is_syntax() {
                        tracing::warn!("{}", e);
                    } else {
                        tracing::debug!("{}", e);
                    }
                    skipped.push(e);
                }
            }
        }

        Self {
            cache,
            index: SymbolIndex::build(declarations),
            skipped,
        }
    }

    /// Context over already-extracted declarations, with no parse cache.
    pub fn from_declarations(declarations: impl IntoIterator<Item = TypeDeclaration>) -> Self {
        Self {
            cache: AstCache::new(),
            index: SymbolIndex::build(declarations),
            skipped: Vec::new(),
        }
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn cache(&self) -> &AstCache {
        &self.cache
    }

    /// Files excluded because they could not be parsed
    pub fn skipped(&self) -> &[ParseError] {
        &self.skipped
    }

    /// Classify every indexed declaration and aggregate the matching files.
    pub fn classify(&self, criteria: &MatchCriteria) -> ScanResult {
        if criteria.is_empty() {
            tracing::debug!("No annotations or interfaces configured; nothing can match");
        }
        let classifier = Classifier::new(&self.index, criteria);
        ScanResult::from_matches(
            classifier
                .matching(self.index.declarations())
                .map(|decl| decl.source_file.clone()),
        )
    }
}

/// Classify an explicit list of files.
pub fn scan_files(files: &[PathBuf], criteria: &MatchCriteria) -> ScanResult {
    ScanContext::build(files).classify(criteria)
}

/// Run a complete scan as described by `config`.
pub fn run_scan(config: &ScanConfig) -> ScanResult {
    let root = config.resolved_scan_dir();
    let files = find_source_files(&root, &config.excluded_dirs());
    tracing::info!("Found {} source files under {:?}", files.len(), root);

    let context = ScanContext::build(&files);
    let result = context.classify(&config.criteria());
    tracing::info!(
        "Indexed {} types, skipped {} files, matched {}",
        context.index().len(),
        context.skipped().len(),
        result.count
    );
    result
}

//! Annotation matching by simple or fully-qualified name.
//!
//! A written annotation matches a configured name when their trailing simple
//! names agree, or when the full dotted texts are identical. Imports are not
//! consulted, so a bare `@Service` matches a configured `com.example.Service`
//! even if the file actually imported some other `Service`.

use crate::{simple_name, NameRef, TypeDeclaration};

/// Does the annotation written as `written` match the configured name?
pub fn annotation_matches(written: &NameRef, configured: &str) -> bool {
    written.simple_name() == simple_name(configured) || written.as_str() == configured
}

/// True if any annotation on `decl` matches any configured name.
pub fn has_configured_annotation<S: AsRef<str>>(decl: &TypeDeclaration, configured: &[S]) -> bool {
    configured.iter().any(|name| {
        decl.annotation_refs
            .iter()
            .any(|written| annotation_matches(written, name.as_ref()))
    })
}

//! Source file discovery.
//!
//! Recursively collects `.java` files under a root, skipping hidden
//! directories and excluded directory names. Hidden files (`.Gen.java`) are
//! still collected. Unreadable entries are skipped without surfacing a warning.

use std::path::{Path, PathBuf};

/// Check if a file has the Java source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "java")
        .unwrap_or(false)
}

/// Find all Java files under `root`, excluding directories named in `exclude_dirs`.
///
/// The result is sorted by path text, byte-wise.
pub fn find_source_files(root: &Path, exclude_dirs: &[&str]) -> Vec<PathBuf> {
    use ignore::overrides::{Override, OverrideBuilder};
    use ignore::WalkBuilder;

    // Exclusions by directory name: `!dir/` means "do not include this directory"
    let mut override_builder = OverrideBuilder::new(root);
    for dir in exclude_dirs {
        let pattern = format!("!{}/", dir);
        if let Err(e) = override_builder.add(&pattern) {
            tracing::warn!("Invalid exclude pattern '{}': {}", pattern, e);
        }
    }
    let overrides = override_builder.build().unwrap_or_else(|e| {
        tracing::warn!("Failed to build overrides: {}", e);
        Override::empty()
    });

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false) // No .gitignore/.ignore handling: plain walk
        .overrides(overrides)
        .filter_entry(|entry| {
            // Skip hidden directories (like .git, .idea) but not hidden files
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.'))
        });

    let mut files = Vec::new();
    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|t| t.is_file()) && is_source_file(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
            }
        }
    }

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "class X {}").unwrap();
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("src/App.java")));
        assert!(!is_source_file(Path::new("src/App.kt")));
        assert!(!is_source_file(Path::new("README")));
    }

    #[test]
    fn test_finds_java_files_sorted() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b/B.java");
        touch(temp.path(), "a/A.java");
        touch(temp.path(), "a/notes.txt");

        let files = find_source_files(temp.path(), &[]);
        assert_eq!(
            files,
            vec![temp.path().join("a/A.java"), temp.path().join("b/B.java")]
        );
    }

    #[test]
    fn test_skips_excluded_and_hidden_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "com/App.java");
        touch(temp.path(), "target/classes/Gen.java");
        touch(temp.path(), "nested/build/Gen.java");
        touch(temp.path(), ".hidden/Secret.java");
        touch(temp.path(), "generated/Stub.java");

        let files = find_source_files(temp.path(), &["target", "build", "generated"]);
        assert_eq!(files, vec![temp.path().join("com/App.java")]);
    }

    #[test]
    fn test_hidden_files_are_kept() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "com/.Gen.java");
        touch(temp.path(), "com/.idea/Cfg.java");

        let files = find_source_files(temp.path(), &[]);
        assert_eq!(files, vec![temp.path().join("com/.Gen.java")]);
    }

    #[test]
    fn test_sorted_by_path_text() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a/X.java");
        touch(temp.path(), "a-b/Y.java");

        // '-' sorts before '/', so a-b/ comes first
        let files = find_source_files(temp.path(), &[]);
        assert_eq!(
            files,
            vec![temp.path().join("a-b/Y.java"), temp.path().join("a/X.java")]
        );
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let files = find_source_files(&temp.path().join("absent"), &[]);
        assert!(files.is_empty());
    }
}

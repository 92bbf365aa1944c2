//! Configuration for entryscan.
//!
//! Loads the scan settings document (`entryscan.config.json` by default).
//! Uses figment for layered configuration with provenance tracking: built-in
//! defaults are overlaid by the document, which may be JSON or TOML depending
//! on its extension. Field names are camelCase in both formats.

use figment::{
    providers::{Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::MatchCriteria;

/// Config document looked up in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "entryscan.config.json";

/// Scan root used when the document has no `scanDir`.
pub const DEFAULT_SCAN_DIR: &str = "./src/main/java";

/// Build-output directories never descended into. Hidden directories are
/// skipped separately.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["target", "build", "out", "bin", "node_modules"];

/// Errors that abort a run before scanning starts
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid config {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },
}

/// Scan configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    /// Directory to scan (default: ./src/main/java)
    #[serde(default = "default_scan_dir")]
    pub scan_dir: PathBuf,

    /// Annotation names, simple or dotted
    #[serde(default)]
    pub annotations: Vec<String>,

    /// Target interface names
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Skip abstract declarations (default: true)
    #[serde(default = "default_exclude_abstract")]
    pub exclude_abstract: bool,

    /// Treat a class's superclass as an inheritance edge (default: false)
    #[serde(default)]
    pub follow_superclass: bool,

    /// Additional directories to exclude (merged with defaults)
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_dir: default_scan_dir(),
            annotations: Vec::new(),
            interfaces: Vec::new(),
            exclude_abstract: default_exclude_abstract(),
            follow_superclass: false,
            exclude_dirs: Vec::new(),
        }
    }
}

fn default_scan_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SCAN_DIR)
}

fn default_exclude_abstract() -> bool {
    true
}

impl ScanConfig {
    /// Load configuration from the document at `path`.
    ///
    /// A missing document is an error, as is any parse or type error; figment's
    /// message names the offending key and source.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        // Build layered config: defaults <- document
        let figment = Figment::from(Serialized::defaults(ScanConfig::default()));
        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            _ => figment.merge(Json::file(path)),
        };

        let config: ScanConfig = figment.extract().map_err(|e| ConfigError::Invalid {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Replace the scan root (command-line override).
    pub fn with_scan_dir(mut self, scan_dir: PathBuf) -> Self {
        self.scan_dir = scan_dir;
        self
    }

    /// Absolute scan root. Relative paths are taken from the current directory.
    pub fn resolved_scan_dir(&self) -> PathBuf {
        self.scan_dir
            .canonicalize()
            .or_else(|_| std::path::absolute(&self.scan_dir))
            .unwrap_or_else(|_| self.scan_dir.clone())
    }

    /// Get all directories to exclude (defaults + user-configured).
    pub fn excluded_dirs(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = DEFAULT_EXCLUDE_DIRS.to_vec();
        for dir in &self.exclude_dirs {
            if !dirs.contains(&dir.as_str()) {
                dirs.push(dir.as_str());
            }
        }
        dirs
    }

    /// Matching rules for the classifier
    pub fn criteria(&self) -> MatchCriteria {
        MatchCriteria::new(&self.annotations, &self.interfaces)
            .with_exclude_abstract(self.exclude_abstract)
            .with_follow_superclass(self.follow_superclass)
    }
}

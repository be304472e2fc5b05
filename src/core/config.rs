use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::{AnalysisError, Result};

pub const DEFAULT_COUPLING_THRESHOLD: usize = 5;

/// Tunables for the walk, the resolver and the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Front end used to parse source files
    pub language: String,
    /// Only files whose name ends with this suffix are analysed
    pub source_suffix: String,
    /// Directories whose name starts with any of these are never entered
    pub excluded_prefixes: Vec<String>,
    /// Directories with exactly these names are never entered
    pub excluded_dirs: Vec<String>,
    pub coupling_threshold: usize,
    /// Names never reported as dead code
    pub entry_points: Vec<String>,
    /// Names starting with this prefix are never reported as dead code
    pub private_prefix: String,
    /// Analyse files on the rayon pool
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: "python".to_string(),
            source_suffix: ".py".to_string(),
            excluded_prefixes: vec![".".to_string(), "__".to_string()],
            excluded_dirs: vec![
                "venv".to_string(),
                "env".to_string(),
                "node_modules".to_string(),
            ],
            coupling_threshold: DEFAULT_COUPLING_THRESHOLD,
            entry_points: vec!["main".to_string(), "__init__".to_string()],
            private_prefix: "_".to_string(),
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AnalysisError::configuration(format!(
                "cannot read config file {}: {err}",
                path.display()
            ))
        })?;
        let config = Self::from_json(&contents).map_err(|err| match err {
            AnalysisError::Configuration(msg) => {
                AnalysisError::configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|err| AnalysisError::configuration(format!("invalid config: {err}")))
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.coupling_threshold = threshold;
        self
    }

    pub fn with_excluded_dirs(mut self, dirs: Vec<String>) -> Self {
        self.excluded_dirs = dirs;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether the walker must skip a directory with this name.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
            || self.excluded_dirs.iter().any(|dir| dir == name)
    }

    pub fn is_source_file(&self, name: &str) -> bool {
        name.ends_with(self.source_suffix.as_str())
    }

    /// Entry points and private helpers are expected to have no callers.
    pub fn is_exempt_from_dead_code(&self, simple_name: &str) -> bool {
        self.entry_points.iter().any(|name| name == simple_name)
            || (!self.private_prefix.is_empty()
                && simple_name.starts_with(self.private_prefix.as_str()))
    }
}

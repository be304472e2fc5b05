use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::config::AnalysisConfig;
use super::error::{AnalysisError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,
}

pub struct FileScanner {
    config: AnalysisConfig,
}

impl FileScanner {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Fails with a configuration error unless `root` is an existing directory.
    pub fn validate_root(root_path: &Path) -> Result<()> {
        if root_path.is_dir() {
            Ok(())
        } else {
            Err(AnalysisError::configuration(format!(
                "The directory '{}' does not exist or is not a directory.",
                root_path.display()
            )))
        }
    }

    /// Lazily walk `root_path`, yielding source files in file-name order.
    ///
    /// Excluded directories are pruned before descent. Unreadable entries are
    /// logged and skipped.
    pub fn walk<'a>(
        &'a self,
        root_path: &'a Path,
    ) -> Result<impl Iterator<Item = SourceFile> + 'a> {
        Self::validate_root(root_path)?;

        let config = &self.config;
        let files = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || !is_excluded(entry, config))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Skipping: {}", AnalysisError::from(err));
                    None
                }
            })
            .filter(move |entry| {
                is_file_or_file_link(entry)
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| config.is_source_file(name))
            })
            .map(move |entry| SourceFile {
                relative_path: relative_path(root_path, entry.path()),
                path: entry.into_path(),
            });

        Ok(files)
    }

    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<SourceFile>> {
        Ok(self.walk(root_path)?.collect())
    }
}

/// Symlinked files are analysed; symlinked directories are never entered.
fn is_file_or_file_link(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn is_excluded(entry: &DirEntry, config: &AnalysisConfig) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_excluded_dir(name))
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

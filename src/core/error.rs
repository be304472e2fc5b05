use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures raised while scanning and analysing a source tree.
///
/// Only `Configuration` is fatal. `Parse` and `FileSystem` are reported for a
/// single file or directory, which is then skipped.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Invalid root directory or unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed source text in one file
    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Permission or I/O problem on one file or directory
    #[error("File system error at {}: {message}", .path.display())]
    FileSystem { path: PathBuf, message: String },
}

impl AnalysisError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn file_system(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::FileSystem {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Classify an I/O failure while reading a source file. Undecodable text
    /// counts as a parse failure, everything else as a file system failure.
    pub fn from_read_error(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::InvalidData {
            Self::parse(path, format!("not valid UTF-8: {err}"))
        } else {
            Self::file_system(path, err.to_string())
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<walkdir::Error> for AnalysisError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        Self::file_system(path, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

pub mod common;
pub mod python;

use std::path::Path;

use crate::core::error::{AnalysisError, Result};
use crate::core::{DefinedFunctionSet, RawCallMap};

/// Definitions and raw calls extracted from one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    pub definitions: DefinedFunctionSet,
    pub raw_calls: RawCallMap,
}

/// The shape of a call target, reduced to what name extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// `name(...)`
    Identifier(String),
    /// `receiver.member(...)`; the receiver is discarded
    Member(String),
    /// Anything else, e.g. `f()(...)` or `table[key](...)`
    Other,
}

impl CallTarget {
    pub fn called_name(&self) -> Option<&str> {
        match self {
            CallTarget::Identifier(name) | CallTarget::Member(name) => Some(name),
            CallTarget::Other => None,
        }
    }
}

pub trait LanguageParser {
    /// Analyse already-loaded source text. `relative_path` becomes the file
    /// component of every key produced.
    fn analyze_source(&self, source: &str, relative_path: &str) -> Result<FileAnalysis>;

    fn analyze_file(&self, file_path: &Path, relative_path: &str) -> Result<FileAnalysis> {
        let source = common::read_source(file_path)?;
        self.analyze_source(&source, relative_path)
            .map_err(|err| match err {
                AnalysisError::Parse { message, .. } => AnalysisError::parse(file_path, message),
                other => other,
            })
    }

    fn language_name(&self) -> &str;
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_parser(&self, language: &str) -> Result<Box<dyn LanguageParser + Send + Sync>> {
        match language {
            "python" => Ok(Box::new(python::PythonParser::new())),
            _ => Err(AnalysisError::configuration(format!(
                "Unsupported language: {language}"
            ))),
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

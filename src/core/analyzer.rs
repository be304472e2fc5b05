use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::aggregate::CallGraphAggregator;
use super::config::AnalysisConfig;
use super::error::Result;
use super::graph::{CallGraph, DefinedFunctionSet, DegreeTallies, RawCallMap};
use super::resolver::FunctionResolver;
use super::scanner::{FileScanner, SourceFile};
use crate::parsers::{FileAnalysis, LanguageParser, ParserFactory};

/// Everything computed by one full scan. Read-only once built.
#[derive(Debug, Clone)]
pub struct ProjectAnalysis {
    pub root: PathBuf,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub defined: DefinedFunctionSet,
    pub raw_calls: RawCallMap,
    pub graph: CallGraph,
    pub degrees: DegreeTallies,
}

impl ProjectAnalysis {
    pub fn total_functions(&self) -> usize {
        self.defined.len()
    }

    pub fn total_edges(&self) -> usize {
        self.graph.edge_count()
    }
}

pub struct CodebaseAnalyzer {
    config: AnalysisConfig,
    file_scanner: FileScanner,
    parser_factory: ParserFactory,
}

impl CodebaseAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            file_scanner: FileScanner::new(config.clone()),
            parser_factory: ParserFactory::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Walk, parse, merge and resolve the tree under `root_path`.
    ///
    /// Only an invalid root or an unsupported language fails the run; files
    /// that cannot be read or parsed are logged and skipped.
    pub fn analyze(&self, root_path: &Path) -> Result<ProjectAnalysis> {
        let parser = self.parser_factory.get_parser(&self.config.language)?;
        let root = root_path
            .canonicalize()
            .unwrap_or_else(|_| root_path.to_path_buf());

        log::info!("--- Scanning project: {} ---", root.display());
        let files = self.file_scanner.scan_directory(root_path)?;
        log::info!("Found {} {} files to analyze", files.len(), parser.language_name());

        let results = self.parse_files(parser.as_ref(), &files);

        let mut aggregator = CallGraphAggregator::new();
        let mut files_skipped = 0usize;
        for result in results {
            match result {
                Ok(analysis) => aggregator.merge(analysis),
                Err(err) => {
                    log::warn!("Could not parse: {err}");
                    files_skipped += 1;
                }
            }
        }
        let files_scanned = aggregator.files_merged();
        let (defined, raw_calls) = aggregator.finish();

        log::info!("Resolving function calls...");
        let mut resolver = FunctionResolver::new();
        resolver.build_indexes(&defined);
        let graph = resolver.resolve_calls(&defined, &raw_calls);
        let degrees = DegreeTallies::from_graph(&graph);

        Ok(ProjectAnalysis {
            root,
            files_scanned,
            files_skipped,
            defined,
            raw_calls,
            graph,
            degrees,
        })
    }

    /// Per-file analysis, optionally on the rayon pool. Results keep walk order
    /// so the serial merge that follows is deterministic.
    fn parse_files(
        &self,
        parser: &(dyn LanguageParser + Send + Sync),
        files: &[SourceFile],
    ) -> Vec<Result<FileAnalysis>> {
        let analyze_one = |file: &SourceFile| -> Result<FileAnalysis> {
            log::info!("  Parsing: {}", file.relative_path);
            parser.analyze_file(&file.path, &file.relative_path)
        };

        if self.config.parallel {
            files.par_iter().map(analyze_one).collect()
        } else {
            files.iter().map(analyze_one).collect()
        }
    }
}

impl Default for CodebaseAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Convenience wrapper: analyse `root_path` with `config`.
pub fn analyze_project(root_path: &Path, config: &AnalysisConfig) -> Result<ProjectAnalysis> {
    CodebaseAnalyzer::new(config.clone()).analyze(root_path)
}

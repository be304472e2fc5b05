pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod scanner;

pub use aggregate::CallGraphAggregator;
pub use analyzer::{analyze_project, CodebaseAnalyzer, ProjectAnalysis};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use graph::{
    CallGraph, DefinedFunctionSet, DegreeTallies, FunctionKey, GraphBuilder, RawCallMap,
};
pub use resolver::{resolve_name, FunctionResolver};
pub use scanner::{FileScanner, SourceFile};

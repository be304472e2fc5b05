//! # PYCOUPLING
//!
//! Heuristic call-graph and coupling analysis for Python source trees.
//!
//! The pipeline runs strictly forward: the scanner walks the tree, each file
//! is parsed into its definitions and raw call names, the results are merged
//! project-wide, call names are resolved to definitions by simple name, and
//! the report classifies functions by in-degree and out-degree.
//!
//! Resolution is name-based only. Imports, receivers and scopes are ignored,
//! so a call to a name defined in several files counts as a call to each of
//! them.
//!
//! ## Output Formats
//!
//! - **Text**: banner, three classified sections and a summary
//! - **JSON**: every function with its degrees, the edge list and the sections

pub mod core;
pub mod formatters;
pub mod parsers;

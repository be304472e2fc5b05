use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::{AnalysisConfig, FunctionKey, ProjectAnalysis};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedFunction {
    pub function: FunctionKey,
    pub degree: usize,
}

/// Classification of a finished analysis. Built from borrowed tallies; the
/// analysis itself is left untouched.
#[derive(Debug, Clone, Serialize)]
pub struct CouplingReport {
    pub root: PathBuf,
    pub threshold: usize,
    pub high_in_degree: Vec<RankedFunction>,
    pub high_out_degree: Vec<RankedFunction>,
    pub dead_code: Vec<FunctionKey>,
    pub total_functions: usize,
    pub total_edges: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

impl CouplingReport {
    pub fn from_analysis(analysis: &ProjectAnalysis, config: &AnalysisConfig) -> Self {
        let threshold = config.coupling_threshold;
        Self {
            root: analysis.root.clone(),
            threshold,
            high_in_degree: rank_by_degree(&analysis.degrees.in_degree, threshold),
            high_out_degree: rank_by_degree(&analysis.degrees.out_degree, threshold),
            dead_code: dead_code_candidates(&analysis.degrees.in_degree, config),
            total_functions: analysis.total_functions(),
            total_edges: analysis.degrees.total_edges(),
            files_scanned: analysis.files_scanned,
            files_skipped: analysis.files_skipped,
        }
    }
}

/// Functions with `degree >= threshold`, highest first; ties by key.
pub fn rank_by_degree(
    degrees: &BTreeMap<FunctionKey, usize>,
    threshold: usize,
) -> Vec<RankedFunction> {
    let mut ranked: Vec<RankedFunction> = degrees
        .iter()
        .filter(|&(_, &degree)| degree >= threshold)
        .map(|(function, &degree)| RankedFunction {
            function: function.clone(),
            degree,
        })
        .collect();
    // BTreeMap iteration is already key-ordered and sort_by is stable
    ranked.sort_by(|a, b| b.degree.cmp(&a.degree));
    ranked
}

/// Uncalled functions, minus entry points and private helpers, in key order.
pub fn dead_code_candidates(
    in_degree: &BTreeMap<FunctionKey, usize>,
    config: &AnalysisConfig,
) -> Vec<FunctionKey> {
    in_degree
        .iter()
        .filter(|&(key, &degree)| {
            degree == 0 && !config.is_exempt_from_dead_code(key.simple_name())
        })
        .map(|(key, _)| key.clone())
        .collect()
}

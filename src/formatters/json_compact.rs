use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;

use super::report::{CouplingReport, RankedFunction};
use super::ReportFormatter;
use crate::core::{FunctionKey, ProjectAnalysis};

/// JSON rendering of the call graph, degrees and classifications
pub struct JsonCompactFormatter {
    /// Positional arrays instead of keyed objects
    minimal: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self { minimal: true }
    }

    pub fn with_minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    fn format_json(&self, analysis: &ProjectAnalysis, report: &CouplingReport) -> Result<String> {
        // File table, in key order
        let mut files: Vec<&str> = Vec::new();
        let mut file_ids: HashMap<&str, usize> = HashMap::new();
        for key in &analysis.defined {
            file_ids.entry(key.file.as_str()).or_insert_with(|| {
                files.push(key.file.as_str());
                files.len() - 1
            });
        }

        let mut function_ids: HashMap<&FunctionKey, usize> = HashMap::new();
        let mut functions = Vec::with_capacity(analysis.defined.len());
        for (idx, key) in analysis.defined.iter().enumerate() {
            function_ids.insert(key, idx);
            let file_id = file_ids[key.file.as_str()];
            let in_degree = analysis.degrees.in_degree(key);
            let out_degree = analysis.degrees.out_degree(key);

            functions.push(if self.minimal {
                json!([key.name, file_id, in_degree, out_degree])
            } else {
                json!({
                    "id": key.to_string(),
                    "name": key.name,
                    "file": file_id,
                    "in": in_degree,
                    "out": out_degree
                })
            });
        }

        let mut edges: Vec<(usize, usize)> = analysis
            .graph
            .edges()
            .filter_map(|(caller, callee)| {
                Some((*function_ids.get(caller)?, *function_ids.get(callee)?))
            })
            .collect();
        edges.sort_unstable();

        let ranked = |entries: &[RankedFunction]| -> Vec<serde_json::Value> {
            entries
                .iter()
                .map(|entry| json!([entry.function.to_string(), entry.degree]))
                .collect()
        };
        let dead_code: Vec<String> = report.dead_code.iter().map(ToString::to_string).collect();

        let output = json!({
            "meta": {
                "root": report.root.display().to_string(),
                "files_scanned": report.files_scanned,
                "files_skipped": report.files_skipped,
                "functions": report.total_functions,
                "edges": report.total_edges,
                "threshold": report.threshold,
                "format": if self.minimal { "compact" } else { "full" }
            },
            "files": files,
            "functions": functions,
            "edges": edges,
            "high_in_degree": ranked(&report.high_in_degree),
            "high_out_degree": ranked(&report.high_out_degree),
            "dead_code": dead_code
        });

        Ok(serde_json::to_string(&output)?)
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonCompactFormatter {
    fn format_report(
        &self,
        analysis: &ProjectAnalysis,
        report: &CouplingReport,
    ) -> Result<String> {
        self.format_json(analysis, report)
    }
}

use anyhow::Result;
use std::fmt::Write;

use super::report::{CouplingReport, RankedFunction};
use super::ReportFormatter;
use crate::core::ProjectAnalysis;

const RULE_WIDTH: usize = 80;

/// Plain-text restructuring report
pub struct TextReportFormatter;

impl TextReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &CouplingReport) -> Result<String> {
        let mut out = String::new();
        let threshold = report.threshold;

        writeln!(out, "--- Scanning project: {} ---", report.root.display())?;
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "                 PROJECT RESTRUCTURING ANALYSIS REPORT")?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

        writeln!(out)?;
        writeln!(out, "--- 1. HIGH INDEGREE FUNCTIONS (High Coupling/Reusability) ---")?;
        writeln!(out, "  These functions are called by many other parts of the codebase.")?;
        writeln!(
            out,
            "  Consider: Are they well-tested? Could they be broken into smaller utilities?"
        )?;
        self.write_ranked(
            &mut out,
            &report.high_in_degree,
            &format!("  (No functions found with {threshold}+ internal callers.)"),
        )?;

        writeln!(out)?;
        writeln!(out, "--- 2. HIGH OUTDEGREE FUNCTIONS (High Complexity/Low Cohesion) ---")?;
        writeln!(
            out,
            "  These functions call many other internal functions. Potential 'God Functions'."
        )?;
        writeln!(
            out,
            "  Consider: Do they handle too many responsibilities? Can they be split?"
        )?;
        self.write_ranked(
            &mut out,
            &report.high_out_degree,
            &format!("  (No functions found that call {threshold}+ internal functions.)"),
        )?;

        writeln!(out)?;
        writeln!(out, "--- 3. UNCALLED FUNCTIONS (Dead Code Candidates) ---")?;
        writeln!(
            out,
            "  These functions are defined but not called by any other functions in the project."
        )?;
        writeln!(
            out,
            "  Consider: Are they external API entry points, or simply unused code?"
        )?;
        if report.dead_code.is_empty() {
            writeln!(out, "  (No clear dead code candidates found.)")?;
        } else {
            for function in &report.dead_code {
                writeln!(out, "  [0 calls]: {function}")?;
            }
        }

        writeln!(out)?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "SUMMARY:")?;
        writeln!(out, "  Total Python files scanned: {}", report.files_scanned)?;
        if report.files_skipped > 0 {
            writeln!(out, "  Files skipped (unreadable or invalid): {}", report.files_skipped)?;
        }
        writeln!(out, "  Total functions defined: {}", report.total_functions)?;
        writeln!(out, "  Total internal calls recorded: {}", report.total_edges)?;
        writeln!(out, "  High Coupling Threshold: {threshold}")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out)?;
        writeln!(
            out,
            "Note: This tool is simplified and does not fully resolve imports or method calls."
        )?;
        writeln!(out, "It provides function-level dependency hints for restructuring.")?;

        Ok(out)
    }

    fn write_ranked(&self, out: &mut String, ranked: &[RankedFunction], empty: &str) -> Result<()> {
        if ranked.is_empty() {
            writeln!(out, "{empty}")?;
        }
        for entry in ranked {
            writeln!(out, "  [{:2} calls]: {}", entry.degree, entry.function)?;
        }
        Ok(())
    }
}

impl Default for TextReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextReportFormatter {
    fn format_report(
        &self,
        _analysis: &ProjectAnalysis,
        report: &CouplingReport,
    ) -> Result<String> {
        self.render(report)
    }
}

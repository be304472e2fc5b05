pub mod json_compact;
pub mod report;
pub mod text;

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::ProjectAnalysis;

pub use json_compact::JsonCompactFormatter;
pub use report::{CouplingReport, RankedFunction};
pub use text::TextReportFormatter;

/// Renders a finished analysis and its classification.
pub trait ReportFormatter {
    fn format_report(&self, analysis: &ProjectAnalysis, report: &CouplingReport) -> Result<String>;

    fn format_to_file(
        &self,
        analysis: &ProjectAnalysis,
        report: &CouplingReport,
        output_path: &Path,
    ) -> Result<()> {
        let content = self.format_report(analysis, report)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}

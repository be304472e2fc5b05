use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use pycoupling::core::{AnalysisConfig, CodebaseAnalyzer};
use pycoupling::formatters::{
    CouplingReport, JsonCompactFormatter, ReportFormatter, TextReportFormatter,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pycoupling",
    version,
    author = "pycoupling developers",
    about = "Function-level call graph and coupling report for a Python project"
)]
struct Cli {
    /// Root directory to scan (defaults to the current directory)
    #[arg(value_name = "PATH")]
    root: Option<PathBuf>,

    /// Minimum in/out degree reported as highly coupled
    #[arg(short, long, value_name = "N")]
    threshold: Option<usize>,

    /// Output format: text, json
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Analyse files one at a time
    #[arg(long)]
    sequential: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        root,
        threshold,
        format,
        output,
        config,
        sequential,
        verbose: _,
    } = cli;

    let start_time = Instant::now();

    let mut analysis_config = match config {
        Some(path) => AnalysisConfig::from_file(&path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(threshold) = threshold {
        analysis_config = analysis_config.with_threshold(threshold);
    }
    if sequential {
        analysis_config = analysis_config.with_parallel(false);
    }

    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let analyzer = CodebaseAnalyzer::new(analysis_config.clone());
    let analysis = analyzer.analyze(&root)?;
    log::info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    let report = CouplingReport::from_analysis(&analysis, &analysis_config);
    let formatter: Box<dyn ReportFormatter> = match format {
        OutputFormat::Text => Box::new(TextReportFormatter::new()),
        OutputFormat::Json => Box::new(JsonCompactFormatter::new()),
    };

    match output {
        Some(path) => {
            formatter.format_to_file(&analysis, &report, &path)?;
            log::info!("Report written to {}", path.display());
        }
        None => print!("{}", formatter.format_report(&analysis, &report)?),
    }

    Ok(())
}

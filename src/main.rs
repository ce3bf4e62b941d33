//! AHP Sherpa CLI - Run a pairwise-comparison analysis from a JSON file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ahp_sherpa::adapters::{exporter_for, SummaryExporter};
use ahp_sherpa::application::{AnalysisInput, RunAnalysisHandler};
use ahp_sherpa::config::{AppConfig, LoggingConfig};
use ahp_sherpa::domain::ahp::AnalysisReport;
use ahp_sherpa::ports::{ExportError, ExportFormat, ReportExporter};

/// Exit status of a run that completed but produced a failed analysis.
const ANALYSIS_FAILED: u8 = 2;

#[derive(Parser)]
#[command(name = "ahp-sherpa")]
#[command(about = "AHP Sherpa - Pairwise-comparison decision analysis")]
struct Cli {
    /// Analysis input file (JSON)
    input: PathBuf,

    /// Output format: json, csv or summary
    #[arg(short, long, default_value = "json")]
    format: ExportFormat,

    /// Configuration file path (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sensitivity perturbation step, overriding configuration
    #[arg(long)]
    step: Option<f64>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_with_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::load().context("loading configuration")?,
    };
    if let Some(step) = cli.step {
        config.analysis.sensitivity_step = step;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging);

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let command = AnalysisInput::from_json(&text)
        .and_then(AnalysisInput::into_command)
        .with_context(|| format!("parsing {}", cli.input.display()))?;

    let handler = RunAnalysisHandler::from_config(&config.analysis);
    let report = AnalysisReport::new(handler.handle(&command));

    let rendered = match exporter_for(cli.format).export(&report) {
        Ok(rendered) => rendered,
        // Failed runs have no rows; show what went wrong instead.
        Err(ExportError::NoResults(_)) => SummaryExporter::new().export(&report)?,
        Err(err) => return Err(err.into()),
    };

    match &cli.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", rendered),
    }

    if report.outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(ANALYSIS_FAILED))
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

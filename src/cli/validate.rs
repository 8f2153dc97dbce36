use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

#[cfg(feature = "colorized_output")]
use console::style;

use thermotangent::config::AnalysisConfig;
use thermotangent::derivative::DerivativeEngine;
use thermotangent::ingest::{read_csv_file, DataIngestor, IngestReport};

use super::config;

/// Check an input file and report what ingest would keep
pub fn run(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = config::load(config_path.as_deref())?;

    info!("Validating {}", file.display());

    match check(&file, &config.analysis) {
        Ok((report, derivative_points)) => {
            print_report(&file, &report);
            println!("Derivative points: {}", derivative_points);
            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Ingest `file` and compute its derivative, returning the ingest report
/// and the number of derivative points
fn check(file: &Path, analysis: &AnalysisConfig) -> Result<(IngestReport, usize)> {
    let ingestor = DataIngestor::new(analysis.min_data_points);
    let report = ingestor.ingest(&read_csv_file(file)?)?;

    let engine = DerivativeEngine::new(analysis.derivative_anchor);
    let curves = engine.compute(&report.samples)?;
    Ok((report, curves.derivative.len()))
}

fn print_report(file: &Path, report: &IngestReport) {
    #[cfg(feature = "colorized_output")]
    {
        println!("{}: {}", style("File").bold(), file.display());
        println!("{}", style(report).green());
        for warning in report.warnings() {
            println!("{}: {}", style("WARNING").yellow().bold(), warning);
        }
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("File: {}", file.display());
        println!("{}", report);
        for warning in report.warnings() {
            println!("WARNING: {}", warning);
        }
    }
}

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use thermotangent::config::AnalysisConfig;
use thermotangent::report::AnalysisReport;
use thermotangent::session::AnalysisSession;

use super::config;

/// Build both tangents from the command line and print the report
pub fn run(
    input: PathBuf,
    first: f64,
    second: f64,
    zoom: Option<Vec<f64>>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = config::load(config_path.as_deref())?;
    let report = build_report(&input, first, second, zoom.as_deref(), config.analysis)?;

    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
        return Ok(());
    }

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    Ok(())
}

/// Load `input`, zoom if asked, and draw tangents near `first` and `second`
fn build_report(
    input: &Path,
    first: f64,
    second: f64,
    zoom: Option<&[f64]>,
    analysis: AnalysisConfig,
) -> Result<AnalysisReport> {
    let mut session = AnalysisSession::new(analysis);

    info!("Input: {}", input.display());
    let dataset = session
        .load_csv_file(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    for warning in dataset.report().warnings() {
        eprintln!("Warning: {}", warning);
    }

    if let Some(&[x_min, x_max]) = zoom {
        info!("Zooming to {} .. {}", x_min, x_max);
        session.on_main_x_range_changed(x_min, x_max)?;
    }

    session
        .click_derivative_at_temperature(first)
        .with_context(|| format!("Failed to build the first tangent near {}", first))?;
    session.select_slot(1)?;
    session
        .click_derivative_at_temperature(second)
        .with_context(|| format!("Failed to build the second tangent near {}", second))?;

    Ok(AnalysisReport::from_session(input.display().to_string(), &session)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN: &str = "Time,Temp,DTA\n0,600,10\n1,605,12\n2,610,20\n3,615,22\n4,620,100\n";

    #[test]
    fn test_report_for_two_tangents() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.csv");
        std::fs::write(&input, RUN).unwrap();

        let report = build_report(&input, 602.5, 607.5, None, AnalysisConfig::default()).unwrap();

        assert_eq!(report.samples, 5);
        assert_eq!(report.derivative_points, 4);
        let first = report.tangents[0].as_ref().unwrap();
        let second = report.tangents[1].as_ref().unwrap();
        assert!((first.slope - 0.4).abs() < 1e-12);
        assert!((second.slope - 1.6).abs() < 1e-12);
        assert!(report.transition_temperature().is_some());
    }

    #[test]
    fn test_zoom_is_applied_before_tangents() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.csv");
        std::fs::write(&input, RUN).unwrap();

        let zoom = [605.0, 615.0];
        let report =
            build_report(&input, 602.5, 612.5, Some(&zoom), AnalysisConfig::default()).unwrap();
        assert!(report.tangents.iter().all(Option::is_some));
    }

    #[test]
    fn test_missing_input_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.csv");

        let err = build_report(&input, 600.0, 610.0, None, AnalysisConfig::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to load"));
    }
}

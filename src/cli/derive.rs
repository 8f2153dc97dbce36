use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use thermotangent::session::{AnalysisSession, Dataset};

use super::config;

#[derive(Serialize)]
struct CurveRow {
    temperature: f64,
    signal: f64,
}

#[derive(Serialize)]
struct DerivativeRow {
    temperature: f64,
    derivative: f64,
    temp_gradient: f64,
}

/// Export the computed curves next to the input (or into `output`)
pub fn run(input: PathBuf, output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = config::load(config_path.as_deref())?;
    let mut session = AnalysisSession::new(config.analysis);
    let dataset = session
        .load_csv_file(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let dir = match output {
        Some(dir) => dir,
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "run".to_string());
    let curve_path = dir.join(format!("{}_curve.csv", stem));
    let derivative_path = dir.join(format!("{}_derivative.csv", stem));

    write_curves(dataset, &curve_path, &derivative_path)?;

    println!(
        "Wrote {} curve points to {}",
        dataset.curve().len(),
        curve_path.display()
    );
    println!(
        "Wrote {} derivative points to {}",
        dataset.derivative().len(),
        derivative_path.display()
    );
    Ok(())
}

fn write_curves(dataset: &Dataset, curve_path: &Path, derivative_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(curve_path)
        .with_context(|| format!("Failed to create {}", curve_path.display()))?;
    for point in dataset.curve() {
        writer.serialize(CurveRow {
            temperature: point.x,
            signal: point.y,
        })?;
    }
    writer.flush()?;
    info!("Curve written to {}", curve_path.display());

    let mut writer = csv::Writer::from_path(derivative_path)
        .with_context(|| format!("Failed to create {}", derivative_path.display()))?;
    for point in dataset.derivative() {
        writer.serialize(DerivativeRow {
            temperature: point.x,
            derivative: point.y,
            temp_gradient: point.temp_gradient,
        })?;
    }
    writer.flush()?;
    info!("Derivative written to {}", derivative_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.csv");
        std::fs::write(&input, "Time,Temp,DTA\n0,600,10\n1,605,12\n2,610,20\n").unwrap();

        let out = dir.path().join("out");
        run(input, Some(out.clone()), None).unwrap();

        let curve = std::fs::read_to_string(out.join("run_curve.csv")).unwrap();
        let mut lines = curve.lines();
        assert_eq!(lines.next(), Some("temperature,signal"));
        assert_eq!(lines.next(), Some("600.0,10.0"));
        assert_eq!(curve.lines().count(), 4);

        let derivative = std::fs::read_to_string(out.join("run_derivative.csv")).unwrap();
        let mut lines = derivative.lines();
        assert_eq!(lines.next(), Some("temperature,derivative,temp_gradient"));
        assert_eq!(lines.next(), Some("602.5,2.0,5.0"));
        assert_eq!(derivative.lines().count(), 3);
    }
}

use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use thermotangent::report::AnalysisReport;
use thermotangent::sample::{melting_trace, to_rows, MeltingTrace};
use thermotangent::session::AnalysisSession;
use thermotangent::walkthrough::{
    InstantPacer, Pacer, Step, StepEvent, ThreadPacer, Walkthrough, WalkthroughOutcome,
};

use super::config;

/// Run the guided walkthrough on a file or on a synthetic melting run
pub fn run(input: Option<PathBuf>, fast: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = config::load(config_path.as_deref())?;
    let mut session = AnalysisSession::new(config.analysis);

    let source = match &input {
        Some(path) => {
            session
                .load_csv_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            path.display().to_string()
        }
        None => {
            info!("No input given, generating a synthetic melting run");
            let rows = to_rows(&melting_trace(&MeltingTrace::default()));
            session
                .load_rows(&rows)
                .context("Failed to load synthetic melting run")?;
            "synthetic melting run".to_string()
        }
    };

    println!("Walkthrough on {}", source);
    println!();

    let outcome = if fast {
        walk(&mut session, Walkthrough::new(config.walkthrough, InstantPacer::default()))?
    } else {
        walk(&mut session, Walkthrough::new(config.walkthrough, ThreadPacer))?
    };

    if let WalkthroughOutcome::Cancelled { at_step } = outcome {
        println!("Stopped before step {}", at_step);
    }

    println!();
    let report = AnalysisReport::from_session(source, &session)?;

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

fn walk<P: Pacer>(
    session: &mut AnalysisSession,
    mut walkthrough: Walkthrough<P>,
) -> Result<WalkthroughOutcome> {
    let total = Step::ALL.len();
    let outcome = walkthrough.run(session, |event| print_step(event, total))?;
    Ok(outcome)
}

fn print_step(event: &StepEvent, total: usize) {
    println!("[{}/{}] {}", event.step.number(), total, event.message);
    if let Some((from, to)) = event.highlight {
        println!("       highlight {:.2} .. {:.2} °C", from, to);
    }
}

//! # thermotangent CLI
//!
//! Command-line front end for tangent-intersection analysis of thermal
//! analysis runs.
//!
//! ## Usage
//!
//! ```bash
//! # Tangents at the derivative points nearest 610 °C and 632 °C
//! thermotangent analyze run.csv --first 610 --second 632
//!
//! # Same, zoomed to the transition region, as JSON
//! thermotangent analyze run.csv --first 610 --second 632 --zoom 590 670 --json
//!
//! # Export curve and derivative
//! thermotangent derive run.csv -o curves/
//!
//! # Guided walkthrough on a synthetic run
//! thermotangent demo --fast
//!
//! # Check a file before analysing it
//! thermotangent validate run.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}

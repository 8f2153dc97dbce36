use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod analyze;
mod config;
mod demo;
mod derive;
mod validate;

/// thermotangent - Transition temperatures from thermal analysis runs
#[derive(Parser)]
#[command(name = "thermotangent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build two tangents and report where they cross
    Analyze {
        /// Input CSV file (time, temperature, signal)
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Temperature of the baseline tangent's derivative point
        #[arg(long, value_name = "T")]
        first: f64,

        /// Temperature of the transition tangent's derivative point
        #[arg(long, value_name = "T")]
        second: f64,

        /// Zoom both charts to this temperature range before drawing
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        zoom: Option<Vec<f64>>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the main and derivative curves as CSV
    Derive {
        /// Input CSV file (time, temperature, signal)
        #[arg(value_name = "CSV")]
        input: PathBuf,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Run the guided two-tangent walkthrough
    Demo {
        /// Input CSV file (a synthetic melting run when omitted)
        #[arg(value_name = "CSV")]
        input: Option<PathBuf>,

        /// Skip the pauses between steps
        #[arg(long)]
        fast: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Check an input file and report dropped rows
    Validate {
        /// Input CSV file (time, temperature, signal)
        #[arg(value_name = "CSV")]
        file: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            input,
            first,
            second,
            zoom,
            config,
            json,
        } => analyze::run(input, first, second, zoom, config, json),
        Commands::Derive {
            input,
            output,
            config,
        } => derive::run(input, output, config),
        Commands::Demo {
            input,
            fast,
            config,
        } => demo::run(input, fast, config),
        Commands::Validate { file, config } => validate::run(file, config),
    }
}

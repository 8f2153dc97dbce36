//! TOML configuration lookup for the command line.
//!
//! An explicit `--config FILE` wins. Otherwise `thermotangent.toml` in the
//! working directory is used when present, and built-in defaults when not:
//!
//! ```toml
//! # thermotangent.toml
//! [analysis]
//! tangent_span_percent = 0.2
//!
//! [walkthrough]
//! step_delay_ms = 1000
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use thermotangent::config::Config;

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "thermotangent.toml";

/// Resolve which config file to read, if any.
fn locate(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Load settings from `explicit` or the working directory.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let dir = std::env::current_dir().context("Failed to read working directory")?;
    load_from(explicit, &dir)
}

fn load_from(explicit: Option<&Path>, dir: &Path) -> Result<Config> {
    match locate(explicit, dir) {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            Config::from_file(&path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

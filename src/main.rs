// Trains the iris classifier on the bundled dataset and prints the species
// predicted for the built-in test sample.
//
// Diagnostics go to stderr and are filtered with RUST_LOG (default: info);
// stdout carries the model summary, one line per training batch and the
// predicted class.
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use iris_nn::PipelineConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PipelineConfig::default();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    iris_nn::run(&config, &mut out)
        .with_context(|| format!("iris pipeline failed for '{}'", config.data_path.display()))?;
    out.flush()?;
    Ok(())
}

//! Build the output pages from the Markdown sources

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::BuildConfig;
use crate::content;
use crate::error::Result;
use crate::generator::Generator;

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Number of pages written
    pub documents: usize,
    /// Output directory
    pub output_dir: PathBuf,
    /// Wall time of the build
    pub duration: Duration,
}

/// Render every source into the output directory.
///
/// Configuration problems and unreadable input directories are reported
/// before anything is written; afterwards the first failing document
/// aborts the batch.
pub fn run(config: &BuildConfig) -> Result<BuildSummary> {
    let start = Instant::now();

    config.validate()?;

    let sources = content::discover(&config.input_dir, &config.output_dir)?;
    tracing::info!(
        "Found {} source(s) in {:?}",
        sources.len(),
        config.input_dir
    );

    let generator = Generator::new(config)?;
    let documents = generator.generate(&sources)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} page(s) with layout {} in {:.2}s",
        documents,
        config.layout,
        duration.as_secs_f64()
    );

    Ok(BuildSummary {
        documents,
        output_dir: config.output_dir.clone(),
        duration,
    })
}

//! Suite execution
//!
//! Validates the whole suite up front, then writes each sample run and the
//! period grid under one output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ConfigError, SuiteConfig};
use crate::analysis::{GridError, PeriodGrid};
use crate::sampling::{draw_samples, LineSink, SampleSummary, SamplingError};

/// Errors that can occur while running a suite
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Invalid suite: {0}")]
    Config(#[from] ConfigError),

    #[error("Run '{run}' failed: {source}")]
    Sampling {
        run: String,
        #[source]
        source: SamplingError,
    },

    #[error("Period grid failed: {0}")]
    Grid(#[from] GridError),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of one sample run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub name: String,
    pub generator: String,
    pub output: PathBuf,
    pub summary: SampleSummary,
}

/// Outcome of a whole suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub runs: Vec<RunReport>,
    pub grid: Option<PeriodGrid>,
    pub grid_output: Option<PathBuf>,
}

/// Run every sample batch and the period grid, writing under `out_dir`
///
/// Nothing is written unless the whole suite validates.
pub fn run_suite(config: &SuiteConfig, out_dir: &Path) -> Result<SuiteReport, SuiteError> {
    config.validate()?;
    fs::create_dir_all(out_dir).map_err(|source| SuiteError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut runs = Vec::with_capacity(config.sample_runs.len());
    for run in &config.sample_runs {
        let mut generator = run
            .generator
            .build()
            .map_err(|source| ConfigError::Generator {
                run: run.name.clone(),
                source,
            })?;

        let output = out_dir.join(&run.output);
        let mut sink = LineSink::create(&output).map_err(|source| SuiteError::Io {
            path: output.clone(),
            source,
        })?;
        let summary = draw_samples(generator.as_mut(), run.samples, &mut sink).map_err(
            |source| SuiteError::Sampling {
                run: run.name.clone(),
                source,
            },
        )?;

        tracing::info!(
            run = %run.name,
            generator = %run.generator,
            samples = summary.count,
            output = %output.display(),
            fingerprint = %summary.fingerprint,
            "sample run complete"
        );
        runs.push(RunReport {
            name: run.name.clone(),
            generator: run.generator.to_string(),
            output,
            summary,
        });
    }

    let (grid, grid_output) = match &config.period_grid {
        Some(grid_run) => {
            tracing::info!(
                width = grid_run.grid.width.bits(),
                seed = grid_run.grid.seed,
                shift_a = grid_run.grid.shift_a,
                max_steps = grid_run.grid.max_steps,
                "sweeping period grid"
            );
            let grid = PeriodGrid::sweep(&grid_run.grid)?;
            let output = out_dir.join(&grid_run.output);
            fs::write(&output, grid.to_string()).map_err(|source| SuiteError::Io {
                path: output.clone(),
                source,
            })?;
            (Some(grid), Some(output))
        }
        None => (None, None),
    };

    Ok(SuiteReport {
        runs,
        grid,
        grid_output,
    })
}

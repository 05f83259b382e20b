//! Test suite configuration
//!
//! A suite is a list of sample runs (generator + sample count + output file)
//! plus an optional period grid. Suites are plain JSON so parameter sets can
//! be versioned next to the analysis that consumes them.
//!
//! # Example
//! ```json
//! {
//!   "sample_runs": [
//!     {
//!       "name": "minstd",
//!       "generator": { "type": "lcg", "seed": 1234, "multiplier": 16807, "increment": 0, "modulus": 2147483647 },
//!       "samples": 100000,
//!       "output": "minstd.txt"
//!     },
//!     {
//!       "name": "xs16",
//!       "generator": { "type": "xorshift", "width": 16, "seed": 123, "shifts": { "a": 11, "b": 1, "c": 7 } },
//!       "samples": 100000,
//!       "output": "xs16.txt"
//!     }
//!   ],
//!   "period_grid": null
//! }
//! ```

mod runner;

pub use runner::{run_suite, RunReport, SuiteError, SuiteReport};

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{GridError, PeriodGridSpec};
use crate::rng::{
    GeneratorError, LcgParams, RandomSource, RegisterWidth, ShiftTriple, Xorshift16, Xorshift32,
    Xorshift64,
};

/// Errors in a suite definition
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Run '{run}': {source}")]
    Generator {
        run: String,
        #[source]
        source: GeneratorError,
    },

    #[error("Run '{0}' requests zero samples")]
    ZeroSamples(String),

    #[error("Duplicate run name '{0}'")]
    DuplicateRunName(String),

    #[error("Output path {0:?} used by more than one run")]
    DuplicateOutput(PathBuf),

    #[error("Invalid period grid: {0}")]
    Grid(#[from] GridError),

    #[error("Invalid suite JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read suite {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Generator family and parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeneratorSpec {
    Lcg(LcgParams),
    Xorshift {
        width: RegisterWidth,
        seed: u64,
        shifts: ShiftTriple,
    },
}

impl GeneratorSpec {
    /// Validate and construct the generator behind the uniform sampling contract
    pub fn build(&self) -> Result<Box<dyn RandomSource>, GeneratorError> {
        let generator: Box<dyn RandomSource> = match *self {
            GeneratorSpec::Lcg(params) => Box::new(params.build()?),
            GeneratorSpec::Xorshift {
                width,
                seed,
                shifts,
            } => match width {
                RegisterWidth::W16 => Box::new(Xorshift16::from_u64_seed(seed, shifts)?),
                RegisterWidth::W32 => Box::new(Xorshift32::from_u64_seed(seed, shifts)?),
                RegisterWidth::W64 => Box::new(Xorshift64::from_u64_seed(seed, shifts)?),
            },
        };
        Ok(generator)
    }
}

impl fmt::Display for GeneratorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorSpec::Lcg(p) => write!(
                f,
                "LCG(seed={}, a={}, c={}, m={})",
                p.seed, p.multiplier, p.increment, p.modulus
            ),
            GeneratorSpec::Xorshift {
                width,
                seed,
                shifts,
            } => write!(
                f,
                "Xorshift{}(seed={}, a={}, b={}, c={})",
                width.bits(),
                seed,
                shifts.a,
                shifts.b,
                shifts.c
            ),
        }
    }
}

/// One batch of samples written to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRunSpec {
    pub name: String,
    pub generator: GeneratorSpec,
    pub samples: u64,
    /// Relative paths resolve against the suite's output directory
    pub output: PathBuf,
}

/// Period grid and the file its rows are written to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodGridRun {
    pub grid: PeriodGridSpec,
    pub output: PathBuf,
}

/// Complete suite definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub sample_runs: Vec<SampleRunSpec>,
    #[serde(default)]
    pub period_grid: Option<PeriodGridRun>,
}

impl SuiteConfig {
    /// The classic empirical-testing suite
    ///
    /// Four LCGs (a small textbook generator, a byte generator, RANDU and
    /// MINSTD) and two 16-bit xorshifts, 100000 samples each into `1.txt` to
    /// `6.txt`, plus the 15×15 period grid into `period.txt`.
    pub fn reference() -> Self {
        const SAMPLES: u64 = 100_000;
        let xorshift16 = |b| GeneratorSpec::Xorshift {
            width: RegisterWidth::W16,
            seed: 123,
            shifts: ShiftTriple::new(11, b, 7),
        };
        let runs = [
            ("lcg_6075", GeneratorSpec::Lcg(LcgParams::textbook_6075())),
            ("lcg_256", GeneratorSpec::Lcg(LcgParams::byte_256())),
            ("randu", GeneratorSpec::Lcg(LcgParams::randu())),
            ("minstd", GeneratorSpec::Lcg(LcgParams::minstd())),
            ("xorshift16_11_1_7", xorshift16(1)),
            ("xorshift16_11_4_7", xorshift16(4)),
        ];

        Self {
            sample_runs: runs
                .into_iter()
                .enumerate()
                .map(|(i, (name, generator))| SampleRunSpec {
                    name: name.to_string(),
                    generator,
                    samples: SAMPLES,
                    output: PathBuf::from(format!("{}.txt", i + 1)),
                })
                .collect(),
            period_grid: Some(PeriodGridRun {
                grid: PeriodGridSpec::reference(),
                output: PathBuf::from("period.txt"),
            }),
        }
    }

    /// Parse and validate a suite from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SuiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a suite file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every generator, count, name and output before anything runs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        let mut outputs = HashSet::new();

        for run in &self.sample_runs {
            if !names.insert(run.name.as_str()) {
                return Err(ConfigError::DuplicateRunName(run.name.clone()));
            }
            if !outputs.insert(normalized_output(&run.output)) {
                return Err(ConfigError::DuplicateOutput(run.output.clone()));
            }
            if run.samples == 0 {
                return Err(ConfigError::ZeroSamples(run.name.clone()));
            }
            run.generator
                .build()
                .map_err(|source| ConfigError::Generator {
                    run: run.name.clone(),
                    source,
                })?;
        }

        if let Some(grid_run) = &self.period_grid {
            if !outputs.insert(normalized_output(&grid_run.output)) {
                return Err(ConfigError::DuplicateOutput(grid_run.output.clone()));
            }
            grid_run.grid.validate()?;
        }
        Ok(())
    }
}

/// Lexical form of an output path, so `1.txt`, `./1.txt` and `sub/../1.txt`
/// compare equal
fn normalized_output(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(parts.last(), Some(Component::Normal(_))) => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.into_iter().collect()
}

//! PRNG Testbench Core
//!
//! Deterministic pseudo-random generators and the plumbing to feed them into
//! empirical statistical testing.
//!
//! # Architecture
//!
//! - **rng**: generator families (LCG, width-generic xorshift) and the
//!   uniform sampling contract
//! - **analysis**: period probe and shift-grid period sweeps
//! - **sampling**: sample driver, sinks and stream fingerprints
//! - **suite**: JSON-configured batches of sample runs and period grids
//!
//! # Critical Invariants
//!
//! 1. Every generator owns its state; same parameters → same sequence
//! 2. LCG registers always satisfy `0 <= r < m`
//! 3. Xorshift registers never reach zero (zero seeds are rejected)
//! 4. Invalid parameters fail at construction, never mid-stream

// Module declarations
pub mod analysis;
pub mod rng;
pub mod sampling;
pub mod suite;

// Re-exports for convenience
pub use analysis::{
    measure_period, measure_period_bounded, GridError, PeriodCell, PeriodError, PeriodGrid,
    PeriodGridSpec,
};
pub use rng::{
    GeneratorError, Lcg, LcgParams, RandomSource, RawGenerator, RegisterWidth, ShiftTriple,
    Xorshift, Xorshift16, Xorshift32, Xorshift64, XorshiftWord,
};
pub use sampling::{draw_samples, LineSink, SampleSink, SampleSummary, SamplingError};
pub use suite::{
    run_suite, ConfigError, GeneratorSpec, PeriodGridRun, RunReport, SampleRunSpec, SuiteConfig,
    SuiteError, SuiteReport,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn prng_testbench_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::generators::PyLcg>()?;
    m.add_class::<ffi::generators::PyXorshift16>()?;
    m.add_class::<ffi::generators::PyXorshift32>()?;
    m.add_class::<ffi::generators::PyXorshift64>()?;
    m.add_function(wrap_pyfunction!(ffi::generators::measure_period, m)?)?;
    Ok(())
}

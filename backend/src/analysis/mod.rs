//! Period analysis
//!
//! - **period**: single-generator period probe (bounded and unbounded)
//! - **grid**: sweeps of xorshift periods over ranges of shift pairs

pub mod grid;
pub mod period;

pub use grid::{GridError, PeriodCell, PeriodGrid, PeriodGridSpec};
pub use period::{measure_period, measure_period_bounded, PeriodError};

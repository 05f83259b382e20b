//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the generators and the period probe to Python,
//! where the statistical tests usually run.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: generators, raw/normalized draws, bounded probe
//! 2. **Simple types**: integers, floats and lists of floats only
//! 3. **Validate inputs**: construction errors become `ValueError`
//! 4. **No unbounded loops**: the period probe always carries a step bound

pub mod generators;

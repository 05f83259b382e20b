//! PyO3 wrappers for the generator families
//!
//! # Example (from Python)
//!
//! ```python
//! from prng_testbench_core import Lcg, Xorshift16, measure_period
//!
//! lcg = Lcg(1234, 16807, 0, 2**31 - 1)
//! samples = lcg.sample(100_000)
//!
//! xs = Xorshift16(123, 11, 1, 7)
//! print(xs.next_raw())
//! print(measure_period(16, 123, 11, 1, 7))  # 65535
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::analysis::measure_period_bounded;
use crate::rng::{
    GeneratorError, Lcg, RandomSource, RegisterWidth, ShiftTriple, Xorshift, Xorshift16,
    Xorshift32, Xorshift64, XorshiftWord,
};

fn generator_err(err: GeneratorError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for [`Lcg`]
#[pyclass(name = "Lcg")]
pub struct PyLcg {
    inner: Lcg,
}

#[pymethods]
impl PyLcg {
    #[new]
    fn new(seed: u64, multiplier: u64, increment: u64, modulus: u64) -> PyResult<Self> {
        let inner = Lcg::new(seed, multiplier, increment, modulus).map_err(generator_err)?;
        Ok(Self { inner })
    }

    fn next_raw(&mut self) -> u64 {
        self.inner.step()
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.next_f64()
    }

    /// Draw `n` normalized samples as a list
    fn sample(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.inner.next_f64()).collect()
    }

    #[getter]
    fn state(&self) -> u64 {
        self.inner.state()
    }
}

macro_rules! py_xorshift {
    ($py_ty:ident, $rust_ty:ty, $word:ty, $name:literal) => {
        /// Python wrapper for a fixed-width xorshift generator
        #[pyclass(name = $name)]
        pub struct $py_ty {
            inner: $rust_ty,
        }

        #[pymethods]
        impl $py_ty {
            #[new]
            fn new(seed: $word, a: u32, b: u32, c: u32) -> PyResult<Self> {
                let inner =
                    <$rust_ty>::new(seed, ShiftTriple::new(a, b, c)).map_err(generator_err)?;
                Ok(Self { inner })
            }

            fn next_raw(&mut self) -> $word {
                self.inner.step()
            }

            /// Closed-interval draw `[0.0, 1.0]`
            fn next_f64(&mut self) -> f64 {
                self.inner.next_f64()
            }

            /// Half-open draw `[0.0, 1.0)`
            fn next_f64_half_open(&mut self) -> f64 {
                self.inner.next_f64_half_open()
            }

            fn sample(&mut self, n: usize) -> Vec<f64> {
                (0..n).map(|_| self.inner.next_f64()).collect()
            }

            #[getter]
            fn state(&self) -> $word {
                self.inner.state()
            }
        }
    };
}

py_xorshift!(PyXorshift16, Xorshift16, u16, "Xorshift16");
py_xorshift!(PyXorshift32, Xorshift32, u32, "Xorshift32");
py_xorshift!(PyXorshift64, Xorshift64, u64, "Xorshift64");

fn probe<W: XorshiftWord>(seed: u64, shifts: ShiftTriple, max_steps: u64) -> PyResult<u64> {
    let mut generator = Xorshift::<W>::from_u64_seed(seed, shifts).map_err(generator_err)?;
    measure_period_bounded(&mut generator, max_steps)
        .map_err(|err| PyRuntimeError::new_err(err.to_string()))
}

/// Measure the period of a xorshift generator of the given width
///
/// Raises `ValueError` for invalid parameters and `RuntimeError` when the
/// period exceeds `max_steps`.
#[pyfunction]
#[pyo3(signature = (width, seed, a, b, c, max_steps = 4_294_967_296))]
pub fn measure_period(
    py: Python<'_>,
    width: u32,
    seed: u64,
    a: u32,
    b: u32,
    c: u32,
    max_steps: u64,
) -> PyResult<u64> {
    let width = RegisterWidth::try_from(width).map_err(generator_err)?;
    let shifts = ShiftTriple::new(a, b, c);
    py.allow_threads(|| match width {
        RegisterWidth::W16 => probe::<u16>(seed, shifts, max_steps),
        RegisterWidth::W32 => probe::<u32>(seed, shifts, max_steps),
        RegisterWidth::W64 => probe::<u64>(seed, shifts, max_steps),
    })
}

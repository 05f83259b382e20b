//! Linear congruential generator
//!
//! # Algorithm
//!
//! `r' = (a * r + c) mod m`
//!
//! The product `a * r` can exceed 64 bits long before the reduction, so the
//! step is evaluated in `u128`. With every parameter below 2^64 the widened
//! expression `a*r + c` stays below 2^128, so no intermediate ever wraps.

use super::{GeneratorError, RandomSource, RawGenerator};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// Construction parameters for an [`Lcg`]
///
/// # Example
/// ```
/// use prng_testbench_core::LcgParams;
///
/// let params = LcgParams::minstd();
/// assert_eq!(params.modulus, 2_147_483_647);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcgParams {
    pub seed: u64,
    pub multiplier: u64,
    pub increment: u64,
    pub modulus: u64,
}

impl LcgParams {
    pub fn new(seed: u64, multiplier: u64, increment: u64, modulus: u64) -> Self {
        Self {
            seed,
            multiplier,
            increment,
            modulus,
        }
    }

    /// Small textbook generator: `(20r + 120) mod 6075`
    pub fn textbook_6075() -> Self {
        Self::new(1234, 20, 120, 6075)
    }

    /// Full-period byte generator: `(137r + 187) mod 256`
    pub fn byte_256() -> Self {
        Self::new(1234, 137, 187, 256)
    }

    /// IBM RANDU: `65539r mod 2^31`, infamous for its planar spectral structure
    pub fn randu() -> Self {
        Self::new(123_456_789, 65_539, 0, 1 << 31)
    }

    /// Park-Miller minimal standard: `16807r mod (2^31 - 1)`
    pub fn minstd() -> Self {
        Self::new(1234, 16_807, 0, (1 << 31) - 1)
    }

    /// Validate and build the generator
    pub fn build(&self) -> Result<Lcg, GeneratorError> {
        Lcg::new(self.seed, self.multiplier, self.increment, self.modulus)
    }
}

/// Linear congruential generator with a 64-bit register
///
/// # Example
/// ```
/// use prng_testbench_core::{Lcg, RandomSource, RawGenerator};
///
/// let mut lcg = Lcg::new(1234, 20, 120, 6075).unwrap();
/// assert_eq!(lcg.next_raw(), 500);
/// assert!(lcg.next_f64() < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    /// Current register, always `< modulus`
    state: u64,
    multiplier: u64,
    increment: u64,
    modulus: NonZeroU64,
}

impl Lcg {
    /// Create a generator
    ///
    /// The seed is reduced modulo `m`, so the register satisfies `r < m`
    /// from the first step on.
    ///
    /// # Errors
    /// [`GeneratorError::ZeroModulus`] if `modulus == 0`
    pub fn new(
        seed: u64,
        multiplier: u64,
        increment: u64,
        modulus: u64,
    ) -> Result<Self, GeneratorError> {
        let modulus = NonZeroU64::new(modulus).ok_or(GeneratorError::ZeroModulus)?;
        Ok(Self {
            state: seed % modulus.get(),
            multiplier,
            increment,
            modulus,
        })
    }

    /// Advance one step and return the new register value
    pub fn step(&mut self) -> u64 {
        let m = u128::from(self.modulus.get());
        let next = (u128::from(self.multiplier) * u128::from(self.state)
            + u128::from(self.increment))
            % m;
        // next < m <= u64::MAX
        self.state = next as u64;
        self.state
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    pub fn modulus(&self) -> u64 {
        self.modulus.get()
    }

    /// Parameters that rebuild this generator from its current register
    pub fn params(&self) -> LcgParams {
        LcgParams::new(self.state, self.multiplier, self.increment, self.modulus.get())
    }
}

/// Largest double strictly below 1.0
const LARGEST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

impl RandomSource for Lcg {
    /// `r' / m`, in `[0.0, 1.0)`
    ///
    /// Exact for moduli up to 2^53. Above that, `m - 1` and `m` can round to
    /// the same double, so the quotient is clamped to the largest double
    /// below 1.0.
    fn next_f64(&mut self) -> f64 {
        let x = self.step() as f64 / self.modulus.get() as f64;
        x.min(LARGEST_BELOW_ONE)
    }
}

impl RawGenerator for Lcg {
    type Word = u64;

    fn next_raw(&mut self) -> u64 {
        self.step()
    }

    fn current(&self) -> u64 {
        self.state
    }
}

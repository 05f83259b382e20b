//! Pseudo-random generator families
//!
//! Two integer-recurrence families live here:
//! - **lcg**: linear congruential generators, `r' = (a*r + c) mod m`
//! - **xorshift**: width-generic xorshift over `u16`/`u32`/`u64` registers
//!
//! Both expose the same pull-based contract ([`RandomSource`]) so a sampling
//! driver can treat them uniformly, and the raw integer contract
//! ([`RawGenerator`]) so the period probe can detect exact repetition.
//!
//! # Determinism
//!
//! Every generator owns its register exclusively. Same parameters → same
//! sequence, on every platform.

mod lcg;
mod xorshift;

pub use lcg::{Lcg, LcgParams};
pub use xorshift::{
    RegisterWidth, ShiftTriple, Xorshift, Xorshift16, Xorshift32, Xorshift64, XorshiftWord,
};

use std::fmt::Debug;
use thiserror::Error;

/// Errors raised when a generator is constructed with unusable parameters
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("LCG modulus must be positive (got m=0)")]
    ZeroModulus,

    #[error("Xorshift{width} seed must be nonzero (zero is a fixed point of the transform)")]
    ZeroSeed { width: u32 },

    #[error("Unsupported register width {width}: expected 16, 32 or 64")]
    UnsupportedWidth { width: u32 },

    #[error("Xorshift{width} seed {seed} does not fit in {width} bits")]
    SeedOutOfRange { seed: u64, width: u32 },

    #[error("Xorshift{width} shift {name}={value} out of range: expected 1..{width}")]
    ShiftOutOfRange {
        name: &'static str,
        value: u32,
        width: u32,
    },
}

/// Produces normalized doubles on demand
///
/// Each call advances the generator by exactly one step. The sequence is
/// infinite and cannot be rewound; construct a new generator to restart.
pub trait RandomSource {
    /// Advance one step and return the register mapped onto the unit interval
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Exposes the undivided integer register
pub trait RawGenerator {
    type Word: Copy + Eq + Debug;

    /// Advance one step and return the new register value
    fn next_raw(&mut self) -> Self::Word;

    /// Current register value, without advancing
    fn current(&self) -> Self::Word;
}

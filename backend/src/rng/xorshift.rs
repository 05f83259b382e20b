//! Width-generic xorshift generator
//!
//! Marsaglia's xorshift family over a fixed-width unsigned register.
//!
//! # Algorithm
//!
//! ```text
//! x ^= x << a
//! x ^= x >> b
//! x ^= x << c
//! ```
//!
//! All arithmetic wraps at the register width; bits shifted past the top or
//! bottom are discarded. That truncation is the whole mechanism, not an
//! overflow to guard against.
//!
//! # Period
//!
//! Each `x ^= x << k` (and `>>`) with `0 < k < W` is invertible, so the
//! composed step is a bijection that fixes zero. A nonzero seed therefore
//! cycles through nonzero values only, with a period dividing into the
//! `2^W - 1` nonzero states. Full-period triples reach exactly `2^W - 1`.

use super::{GeneratorError, RandomSource, RawGenerator};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

mod private {
    pub trait Sealed {}
}

/// Fixed-width unsigned register usable by [`Xorshift`]
///
/// Implemented for `u16`, `u32` and `u64`.
pub trait XorshiftWord: private::Sealed + Copy + Eq + Hash + Debug {
    const BITS: u32;
    const ZERO: Self;
    const MAX: Self;

    /// Left shift discarding bits past the width; `n >= BITS` yields zero
    fn shl(self, n: u32) -> Self;

    /// Right shift discarding low bits; `n >= BITS` yields zero
    fn shr(self, n: u32) -> Self;

    fn xor(self, other: Self) -> Self;

    fn to_u64(self) -> u64;

    fn to_f64(self) -> f64;

    fn from_u64(value: u64) -> Option<Self>;

    /// Map onto `[0.0, 1.0)` using at most 53 significant bits
    fn to_unit_half_open(self) -> f64 {
        let dropped = Self::BITS.saturating_sub(53);
        (self.to_u64() >> dropped) as f64 / 2f64.powi((Self::BITS - dropped) as i32)
    }
}

macro_rules! impl_xorshift_word {
    ($($t:ty),*) => {
        $(
            impl private::Sealed for $t {}

            impl XorshiftWord for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn shl(self, n: u32) -> Self {
                    self.checked_shl(n).unwrap_or(0)
                }

                #[inline]
                fn shr(self, n: u32) -> Self {
                    self.checked_shr(n).unwrap_or(0)
                }

                #[inline]
                fn xor(self, other: Self) -> Self {
                    self ^ other
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    u64::from(self)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_u64(value: u64) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_xorshift_word!(u16, u32, u64);

/// Register widths supported when the width is chosen at runtime
///
/// Serialized as the bit count (`16`, `32` or `64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RegisterWidth {
    W16,
    W32,
    W64,
}

impl RegisterWidth {
    pub fn bits(self) -> u32 {
        match self {
            RegisterWidth::W16 => 16,
            RegisterWidth::W32 => 32,
            RegisterWidth::W64 => 64,
        }
    }

    /// Check a seed is nonzero and fits in this width
    pub fn validate_seed(self, seed: u64) -> Result<(), GeneratorError> {
        let width = self.bits();
        if width < 64 && seed >> width != 0 {
            return Err(GeneratorError::SeedOutOfRange { seed, width });
        }
        if seed == 0 {
            return Err(GeneratorError::ZeroSeed { width });
        }
        Ok(())
    }
}

impl TryFrom<u32> for RegisterWidth {
    type Error = GeneratorError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(RegisterWidth::W16),
            32 => Ok(RegisterWidth::W32),
            64 => Ok(RegisterWidth::W64),
            width => Err(GeneratorError::UnsupportedWidth { width }),
        }
    }
}

impl From<RegisterWidth> for u32 {
    fn from(width: RegisterWidth) -> Self {
        width.bits()
    }
}

/// The three shift amounts `(a, b, c)` of a xorshift step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftTriple {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl ShiftTriple {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// Check every shift lies in `1..width`
    ///
    /// A zero shift is rejected along with shifts `>= width`: `x ^= x << 0`
    /// clears the register and the generator collapses to zero.
    pub fn validate(&self, width: u32) -> Result<(), GeneratorError> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if value == 0 || value >= width {
                return Err(GeneratorError::ShiftOutOfRange { name, value, width });
            }
        }
        Ok(())
    }
}

/// Xorshift generator over a `W`-bit register
///
/// # Output interval
///
/// [`RandomSource::next_f64`] divides the register by `W::MAX`, which maps
/// onto the CLOSED interval `[0.0, 1.0]`: a register equal to `W::MAX`
/// yields exactly `1.0`. This matches the reference sample dumps. Use
/// [`Xorshift::next_f64_half_open`] for the conventional `[0.0, 1.0)`.
///
/// # Example
/// ```
/// use prng_testbench_core::{ShiftTriple, Xorshift16};
///
/// let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 1, 7)).unwrap();
/// assert_eq!(xs.step(), 38726);
/// assert_eq!(xs.step(), 34405);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift<W: XorshiftWord> {
    /// Current register, never zero
    state: W,
    shifts: ShiftTriple,
}

pub type Xorshift16 = Xorshift<u16>;
pub type Xorshift32 = Xorshift<u32>;
pub type Xorshift64 = Xorshift<u64>;

impl<W: XorshiftWord> Xorshift<W> {
    /// Create a generator
    ///
    /// # Errors
    /// - [`GeneratorError::ZeroSeed`] if `seed == 0`
    /// - [`GeneratorError::ShiftOutOfRange`] if any shift is outside `1..W`
    pub fn new(seed: W, shifts: ShiftTriple) -> Result<Self, GeneratorError> {
        if seed == W::ZERO {
            return Err(GeneratorError::ZeroSeed { width: W::BITS });
        }
        shifts.validate(W::BITS)?;
        Ok(Self {
            state: seed,
            shifts,
        })
    }

    /// Create a generator from a seed given as `u64`
    ///
    /// # Errors
    /// As [`Xorshift::new`], plus [`GeneratorError::SeedOutOfRange`] if the
    /// seed does not fit in `W`
    pub fn from_u64_seed(seed: u64, shifts: ShiftTriple) -> Result<Self, GeneratorError> {
        let seed = W::from_u64(seed).ok_or(GeneratorError::SeedOutOfRange {
            seed,
            width: W::BITS,
        })?;
        Self::new(seed, shifts)
    }

    /// Advance one step and return the new register value
    #[inline]
    pub fn step(&mut self) -> W {
        let ShiftTriple { a, b, c } = self.shifts;
        let mut x = self.state;
        x = x.xor(x.shl(a));
        x = x.xor(x.shr(b));
        x = x.xor(x.shl(c));
        self.state = x;
        x
    }

    /// Advance one step and map the register onto `[0.0, 1.0)`
    pub fn next_f64_half_open(&mut self) -> f64 {
        self.step().to_unit_half_open()
    }

    pub fn state(&self) -> W {
        self.state
    }

    pub fn shifts(&self) -> ShiftTriple {
        self.shifts
    }

    pub fn width(&self) -> u32 {
        W::BITS
    }
}

impl<W: XorshiftWord> RandomSource for Xorshift<W> {
    /// `x' / W::MAX`, in `[0.0, 1.0]` (closed)
    fn next_f64(&mut self) -> f64 {
        self.step().to_f64() / W::MAX.to_f64()
    }
}

impl<W: XorshiftWord> RawGenerator for Xorshift<W> {
    type Word = W;

    fn next_raw(&mut self) -> W {
        self.step()
    }

    fn current(&self) -> W {
        self.state
    }
}

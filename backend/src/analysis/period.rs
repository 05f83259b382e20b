//! Period probe
//!
//! Measures a generator's cycle length empirically: record the first stepped
//! value, then count steps until it comes back.
//!
//! # Termination
//!
//! The count only terminates if the first value lies on a cycle. That holds
//! for any validated xorshift generator (the step is a bijection on nonzero
//! states), but not for arbitrary recurrences: an LCG whose multiplier
//! shares a factor with its modulus can fall into a shorter cycle that never
//! revisits its first output. Use [`measure_period_bounded`] whenever the
//! parameters are not known to be bijective.

use crate::rng::RawGenerator;
use thiserror::Error;

/// Errors from a bounded period measurement
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Period exceeds bound: first value did not recur within {bound} steps")]
    ExceedsBound { bound: u64 },
}

/// Count steps until the first stepped value recurs
///
/// The returned count is the number of steps strictly after the first
/// one, i.e. the cycle length.
///
/// Caller obligation: the generator's transform must be a bijection on the
/// reachable states, otherwise this loops forever. Every [`Xorshift`] built
/// through its validating constructor satisfies this.
///
/// [`Xorshift`]: crate::rng::Xorshift
///
/// # Example
/// ```
/// use prng_testbench_core::{measure_period, ShiftTriple, Xorshift16};
///
/// let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 4, 7)).unwrap();
/// assert_eq!(measure_period(&mut xs), 186);
/// ```
pub fn measure_period<G: RawGenerator>(generator: &mut G) -> u64 {
    let first = generator.next_raw();
    let mut steps = 1;
    while generator.next_raw() != first {
        steps += 1;
    }
    tracing::debug!(period = steps, "period measured");
    steps
}

/// Count steps until the first stepped value recurs, giving up after `max_steps`
///
/// # Errors
/// [`PeriodError::ExceedsBound`] if the first value has not recurred after
/// `max_steps` steps (this includes `max_steps == 0`)
///
/// # Example
/// ```
/// use prng_testbench_core::{measure_period_bounded, PeriodError, ShiftTriple, Xorshift16};
///
/// let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 1, 7)).unwrap();
/// assert_eq!(
///     measure_period_bounded(&mut xs, 1000),
///     Err(PeriodError::ExceedsBound { bound: 1000 })
/// );
/// ```
pub fn measure_period_bounded<G: RawGenerator>(
    generator: &mut G,
    max_steps: u64,
) -> Result<u64, PeriodError> {
    let first = generator.next_raw();
    for steps in 1..=max_steps {
        if generator.next_raw() == first {
            tracing::debug!(period = steps, "period measured");
            return Ok(steps);
        }
    }
    tracing::warn!(bound = max_steps, first = ?first, "period exceeds bound");
    Err(PeriodError::ExceedsBound { bound: max_steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Lcg, ShiftTriple, Xorshift16};

    #[test]
    fn test_full_period_xorshift16() {
        let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 1, 7)).unwrap();
        assert_eq!(measure_period(&mut xs), 65_535);
    }

    #[test]
    fn test_bounded_matches_unbounded() {
        let mut a = Xorshift16::new(123, ShiftTriple::new(11, 4, 7)).unwrap();
        let mut b = a.clone();
        assert_eq!(measure_period_bounded(&mut a, 65_536), Ok(measure_period(&mut b)));
    }

    #[test]
    fn test_bound_equal_to_period_succeeds() {
        let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 4, 7)).unwrap();
        assert_eq!(measure_period_bounded(&mut xs, 186), Ok(186));
    }

    #[test]
    fn test_zero_bound_always_exceeded() {
        let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 4, 7)).unwrap();
        assert_eq!(
            measure_period_bounded(&mut xs, 0),
            Err(PeriodError::ExceedsBound { bound: 0 })
        );
    }

    #[test]
    fn test_lcg_full_period() {
        // c odd, a-1 divisible by 4 (and by 2, the only prime of 256): full period
        let mut lcg = Lcg::new(1234, 137, 187, 256).unwrap();
        assert_eq!(measure_period_bounded(&mut lcg, 1_000), Ok(256));
    }

    #[test]
    fn test_lcg_tail_never_recurring_is_reported() {
        // r' = 2r mod 8 collapses to zero and never revisits its first output
        let mut lcg = Lcg::new(1, 2, 0, 8).unwrap();
        assert_eq!(
            measure_period_bounded(&mut lcg, 100),
            Err(PeriodError::ExceedsBound { bound: 100 })
        );
    }
}

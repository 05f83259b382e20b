//! Xorshift Generator Tests
//!
//! Critical invariants tested:
//! - Determinism: identical parameters produce identical sequences
//! - Zero avoidance: a nonzero seed never reaches the zero fixed point
//! - Output range: normalized samples lie in the closed unit interval
//! - Validation: zero seeds and out-of-range shifts fail at construction

use prng_testbench_core::{
    GeneratorError, RandomSource, RawGenerator, ShiftTriple, Xorshift, Xorshift16, Xorshift32,
    Xorshift64, XorshiftWord,
};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn xs16(seed: u16, a: u32, b: u32, c: u32) -> Xorshift16 {
    Xorshift16::new(seed, ShiftTriple::new(a, b, c)).unwrap()
}

/// Step a generator `n` times, collecting the registers
fn take<W: XorshiftWord>(generator: &mut Xorshift<W>, n: usize) -> Vec<W> {
    (0..n).map(|_| generator.step()).collect()
}

// ============================================================================
// Known Sequences
// ============================================================================

#[test]
fn test_xorshift16_first_values() {
    let mut xs = xs16(123, 11, 1, 7);
    assert_eq!(take(&mut xs, 3), vec![38_726, 34_405, 21_207]);

    let mut xs = xs16(123, 11, 4, 7);
    assert_eq!(take(&mut xs, 3), vec![11_260, 26_307, 61_103]);
}

#[test]
fn test_xorshift16_two_instances_agree() {
    let mut first = xs16(123, 11, 1, 7);
    let mut second = xs16(123, 11, 1, 7);
    assert_eq!(take(&mut first, 2), take(&mut second, 2));
}

#[test]
fn test_sample_is_register_over_max() {
    let mut xs = xs16(123, 11, 1, 7);
    assert_eq!(xs.next_f64(), 38_726.0 / 65_535.0);
}

#[test]
fn test_raw_contract_matches_step() {
    let mut by_step = xs16(123, 11, 4, 7);
    let mut by_raw = by_step.clone();
    for _ in 0..100 {
        assert_eq!(by_step.step(), by_raw.next_raw());
        assert_eq!(by_step.state(), by_raw.current());
    }
}

#[test]
fn test_width_reported() {
    assert_eq!(xs16(1, 11, 1, 7).width(), 16);
    let xs = Xorshift64::new(1, ShiftTriple::new(13, 7, 17)).unwrap();
    assert_eq!(xs.width(), 64);
    assert_eq!(xs.shifts(), ShiftTriple::new(13, 7, 17));
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_zero_seed_is_configuration_error() {
    let err = Xorshift16::new(0, ShiftTriple::new(11, 1, 7)).unwrap_err();
    assert_eq!(err, GeneratorError::ZeroSeed { width: 16 });
}

#[test]
fn test_shift_out_of_range_names_offender() {
    let err = Xorshift32::new(1, ShiftTriple::new(13, 17, 32)).unwrap_err();
    assert_eq!(
        err,
        GeneratorError::ShiftOutOfRange {
            name: "c",
            value: 32,
            width: 32
        }
    );
    assert_eq!(
        err.to_string(),
        "Xorshift32 shift c=32 out of range: expected 1..32"
    );
}

#[test]
fn test_u64_seed_must_fit_width() {
    let shifts = ShiftTriple::new(13, 17, 5);
    assert!(Xorshift32::from_u64_seed(u64::from(u32::MAX), shifts).is_ok());
    assert_eq!(
        Xorshift32::from_u64_seed(1 << 32, shifts).unwrap_err(),
        GeneratorError::SeedOutOfRange {
            seed: 1 << 32,
            width: 32
        }
    );
}

// ============================================================================
// Output Interval
// ============================================================================

#[test]
fn test_samples_never_leave_closed_unit_interval() {
    let mut xs = xs16(123, 11, 1, 7);
    // One full period visits every nonzero register, including MAX
    let mut saw_one = false;
    for _ in 0..65_535 {
        let x = xs.next_f64();
        assert!((0.0..=1.0).contains(&x), "sample {} outside [0, 1]", x);
        saw_one |= x == 1.0;
    }
    assert!(saw_one, "full period should hit the register maximum");
}

#[test]
fn test_half_open_samples_below_one() {
    let mut xs = xs16(123, 11, 1, 7);
    for _ in 0..65_535 {
        let x = xs.next_f64_half_open();
        assert!((0.0..1.0).contains(&x), "sample {} outside [0, 1)", x);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_nonzero_seed_never_reaches_zero_16(
        seed in 1..=u16::MAX,
        a in 1u32..16,
        b in 1u32..16,
        c in 1u32..16,
    ) {
        let mut xs = Xorshift16::new(seed, ShiftTriple::new(a, b, c)).unwrap();
        for _ in 0..1_000 {
            prop_assert_ne!(xs.step(), 0);
        }
    }

    #[test]
    fn prop_nonzero_seed_never_reaches_zero_64(
        seed in 1..=u64::MAX,
        a in 1u32..64,
        b in 1u32..64,
        c in 1u32..64,
    ) {
        let mut xs = Xorshift64::new(seed, ShiftTriple::new(a, b, c)).unwrap();
        for _ in 0..1_000 {
            prop_assert_ne!(xs.step(), 0);
        }
    }

    #[test]
    fn prop_identical_parameters_identical_sequences(
        seed in 1..=u32::MAX,
        a in 1u32..32,
        b in 1u32..32,
        c in 1u32..32,
    ) {
        let shifts = ShiftTriple::new(a, b, c);
        let mut first = Xorshift32::new(seed, shifts).unwrap();
        let mut second = Xorshift32::new(seed, shifts).unwrap();
        prop_assert_eq!(take(&mut first, 64), take(&mut second, 64));
    }

    #[test]
    fn prop_samples_in_closed_unit_interval(
        seed in 1..=u64::MAX,
        a in 1u32..64,
        b in 1u32..64,
        c in 1u32..64,
    ) {
        let mut xs = Xorshift64::new(seed, ShiftTriple::new(a, b, c)).unwrap();
        for _ in 0..256 {
            let x = xs.next_f64();
            prop_assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn prop_out_of_range_shift_rejected(
        seed in 1..=u16::MAX,
        bad in prop_oneof![Just(0u32), 16u32..200],
    ) {
        let result = Xorshift16::new(seed, ShiftTriple::new(11, bad, 7));
        let is_shift_error = matches!(result, Err(GeneratorError::ShiftOutOfRange { name: "b", .. }));
        prop_assert!(is_shift_error);
    }
}

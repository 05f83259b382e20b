//! Sampling Driver Tests
//!
//! Covers the pull-based contract end to end: heterogeneous generators
//! behind one interface, exact sample counts, the line-per-sample text
//! format and reproducibility fingerprints.

use std::fs;

use prng_testbench_core::sampling::SampleStats;
use prng_testbench_core::{
    draw_samples, Lcg, LcgParams, LineSink, RandomSource, ShiftTriple, Xorshift16, Xorshift64,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn mixed_generators() -> Vec<Box<dyn RandomSource>> {
    vec![
        Box::new(LcgParams::textbook_6075().build().unwrap()),
        Box::new(LcgParams::minstd().build().unwrap()),
        Box::new(Xorshift16::new(123, ShiftTriple::new(11, 1, 7)).unwrap()),
        Box::new(Xorshift64::new(88_172_645_463_325_252, ShiftTriple::new(13, 7, 17)).unwrap()),
    ]
}

// ============================================================================
// Driver
// ============================================================================

#[test]
fn test_draws_exact_count_from_every_family() {
    for mut generator in mixed_generators() {
        let mut samples: Vec<f64> = Vec::new();
        let summary = draw_samples(generator.as_mut(), 1_000, &mut samples).unwrap();
        assert_eq!(summary.count, 1_000);
        assert_eq!(samples.len(), 1_000);
        assert!(samples.iter().all(|x| (0.0..=1.0).contains(x)));
        assert_eq!(summary.min, samples.iter().copied().reduce(f64::min));
        assert_eq!(summary.max, samples.iter().copied().reduce(f64::max));
    }
}

#[test]
fn test_driver_matches_manual_pulls() {
    let mut driven = Lcg::new(1234, 20, 120, 6075).unwrap();
    let mut manual = driven.clone();

    let mut samples: Vec<f64> = Vec::new();
    draw_samples(&mut driven, 50, &mut samples).unwrap();
    let expected: Vec<f64> = (0..50).map(|_| manual.next_f64()).collect();
    assert_eq!(samples, expected);
}

#[test]
fn test_uniform_mean_is_near_half() {
    let mut minstd = LcgParams::minstd().build().unwrap();
    let mut samples: Vec<f64> = Vec::new();
    let summary = draw_samples(&mut minstd, 100_000, &mut samples).unwrap();
    let mean = summary.mean.unwrap();
    assert!((mean - 0.5).abs() < 0.01, "mean {} too far from 0.5", mean);
}

// ============================================================================
// Fingerprints
// ============================================================================

#[test]
fn test_fingerprint_reproducible() {
    let run = || {
        let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 4, 7)).unwrap();
        let mut samples: Vec<f64> = Vec::new();
        draw_samples(&mut xs, 10_000, &mut samples).unwrap().fingerprint
    };
    assert_eq!(run(), run());
    assert_eq!(run().len(), 64);
}

#[test]
fn test_fingerprint_distinguishes_parameters() {
    let fingerprint = |b: u32| {
        let mut xs = Xorshift16::new(123, ShiftTriple::new(11, b, 7)).unwrap();
        let mut samples: Vec<f64> = Vec::new();
        draw_samples(&mut xs, 100, &mut samples).unwrap().fingerprint
    };
    assert_ne!(fingerprint(1), fingerprint(4));
}

#[test]
fn test_fingerprint_matches_incremental_stats() {
    let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 1, 7)).unwrap();
    let mut samples: Vec<f64> = Vec::new();
    let summary = draw_samples(&mut xs, 500, &mut samples).unwrap();

    let mut stats = SampleStats::new();
    for value in &samples {
        stats.record(*value);
    }
    assert_eq!(stats.summary(), summary);
}

// ============================================================================
// Text Output
// ============================================================================

#[test]
fn test_file_sink_writes_one_line_per_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lcg.txt");

    let mut lcg = LcgParams::textbook_6075().build().unwrap();
    let mut sink = LineSink::create(&path).unwrap();
    draw_samples(&mut lcg, 100_000, &mut sink).unwrap();
    assert_eq!(sink.lines(), 100_000);
    drop(sink);

    let text = fs::read_to_string(&path).unwrap();
    let values: Vec<f64> = text.lines().map(|line| line.parse().unwrap()).collect();
    assert_eq!(values.len(), 100_000);
    assert_eq!(values[0], 500.0 / 6075.0);
    assert!(values.iter().all(|x| (0.0..1.0).contains(x)));
}

#[test]
fn test_file_sink_parses_back_to_identical_fingerprint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xs.txt");

    let mut xs = Xorshift16::new(123, ShiftTriple::new(11, 1, 7)).unwrap();
    let mut sink = LineSink::create(&path).unwrap();
    let written = draw_samples(&mut xs, 2_000, &mut sink).unwrap();
    drop(sink);

    let mut stats = SampleStats::new();
    for line in fs::read_to_string(&path).unwrap().lines() {
        stats.record(line.parse().unwrap());
    }
    assert_eq!(stats.summary().fingerprint, written.fingerprint);
}

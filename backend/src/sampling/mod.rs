//! Sampling driver
//!
//! Pulls normalized doubles from any [`RandomSource`] into a [`SampleSink`]
//! and summarises the stream. The summary carries a SHA-256 fingerprint of
//! the samples, so two runs can be checked for bit-exact reproducibility
//! without keeping or diffing the output files.

mod sink;

pub use sink::{LineSink, SampleSink};

use std::io;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::rng::RandomSource;

/// Errors that can occur while drawing samples
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("Sample sink failed after {written} samples: {source}")]
    Sink {
        written: u64,
        #[source]
        source: io::Error,
    },
}

/// Statistics over a drawn sample stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: u64,
    /// `None` when no samples were drawn
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Hex SHA-256 over the little-endian bytes of every sample, in order
    pub fingerprint: String,
}

/// Running accumulator behind [`SampleSummary`]
#[derive(Debug, Clone)]
pub struct SampleStats {
    count: u64,
    min: f64,
    max: f64,
    sum: f64,
    hasher: Sha256,
}

impl SampleStats {
    pub fn new() -> Self {
        Self {
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            hasher: Sha256::new(),
        }
    }

    pub fn record(&mut self, value: f64) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.hasher.update(value.to_le_bytes());
    }

    pub fn summary(&self) -> SampleSummary {
        let observed = self.count > 0;
        SampleSummary {
            count: self.count,
            min: observed.then_some(self.min),
            max: observed.then_some(self.max),
            mean: observed.then(|| self.sum / self.count as f64),
            fingerprint: format!("{:x}", self.hasher.clone().finalize()),
        }
    }
}

impl Default for SampleStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw exactly `count` samples from `source` into `sink`
///
/// The sink is finished (flushed) after the last sample.
///
/// # Errors
/// [`SamplingError::Sink`] if the sink rejects a sample or fails to flush
///
/// # Example
/// ```
/// use prng_testbench_core::sampling::draw_samples;
/// use prng_testbench_core::Lcg;
///
/// let mut lcg = Lcg::new(1234, 20, 120, 6075).unwrap();
/// let mut samples: Vec<f64> = Vec::new();
/// let summary = draw_samples(&mut lcg, 3, &mut samples).unwrap();
///
/// assert_eq!(summary.count, 3);
/// assert_eq!(samples[0], 500.0 / 6075.0);
/// ```
pub fn draw_samples<S: SampleSink + ?Sized>(
    source: &mut dyn RandomSource,
    count: u64,
    sink: &mut S,
) -> Result<SampleSummary, SamplingError> {
    let mut stats = SampleStats::new();
    for written in 0..count {
        let value = source.next_f64();
        sink.accept(value)
            .map_err(|err| SamplingError::Sink {
                written,
                source: err,
            })?;
        stats.record(value);
    }
    sink.finish().map_err(|err| SamplingError::Sink {
        written: count,
        source: err,
    })?;

    let summary = stats.summary();
    tracing::debug!(
        count = summary.count,
        fingerprint = %summary.fingerprint,
        "samples drawn"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink {
        accepted: u64,
        fail_after: u64,
    }

    impl SampleSink for FailingSink {
        fn accept(&mut self, _value: f64) -> io::Result<()> {
            if self.accepted == self.fail_after {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.accepted += 1;
            Ok(())
        }
    }

    struct Constant(f64);

    impl RandomSource for Constant {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_sink_failure_reports_position() {
        let mut sink = FailingSink {
            accepted: 0,
            fail_after: 5,
        };
        let err = draw_samples(&mut Constant(0.5), 10, &mut sink).unwrap_err();
        match err {
            SamplingError::Sink { written, .. } => assert_eq!(written, 5),
        }
    }

    #[test]
    fn test_empty_stream_summary() {
        let mut samples: Vec<f64> = Vec::new();
        let summary = draw_samples(&mut Constant(0.5), 0, &mut samples).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.min, None);
        assert_eq!(summary.mean, None);
        assert!(samples.is_empty());
        // SHA-256 of the empty input
        assert_eq!(
            summary.fingerprint,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_summary_statistics() {
        let mut stats = SampleStats::new();
        for value in [0.25, 0.75, 0.5] {
            stats.record(value);
        }
        let summary = stats.summary();
        assert_eq!(summary.min, Some(0.25));
        assert_eq!(summary.max, Some(0.75));
        assert_eq!(summary.mean, Some(0.5));
    }
}

//! Sample sinks
//!
//! Destinations for normalized samples. The text format is one decimal value
//! per line, printed with Rust's shortest round-trip `f64` formatting so that
//! parsing a line back yields the exact sample.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Accepts a stream of samples
pub trait SampleSink {
    fn accept(&mut self, value: f64) -> io::Result<()>;

    /// Flush buffered output once the stream ends
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn accept(&mut self, value: f64) -> io::Result<()> {
        (**self).accept(value)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// In-memory buffer
impl SampleSink for Vec<f64> {
    fn accept(&mut self, value: f64) -> io::Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Writes one sample per line
///
/// # Example
/// ```
/// use prng_testbench_core::sampling::{LineSink, SampleSink};
///
/// let mut sink = LineSink::new(Vec::new());
/// sink.accept(0.5).unwrap();
/// sink.accept(1.0).unwrap();
/// assert_eq!(sink.into_inner(), b"0.5\n1\n");
/// ```
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
    lines: u64,
}

impl LineSink<BufWriter<File>> {
    /// Create (or truncate) a file and write samples into it
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Lines written so far
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SampleSink for LineSink<W> {
    fn accept(&mut self, value: f64) -> io::Result<()> {
        writeln!(self.writer, "{}", value)?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

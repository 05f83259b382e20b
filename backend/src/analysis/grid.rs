//! Period grid sweep
//!
//! Measures xorshift periods across a grid of `(b, c)` shift pairs for a
//! fixed seed and first shift `a`. The reference sweep is the 16-bit grid
//! over `b, c ∈ 1..=15` with seed 123 and `a = 11`.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::period::{measure_period_bounded, PeriodError};
use crate::rng::{GeneratorError, RegisterWidth, ShiftTriple, Xorshift, XorshiftWord};

/// Errors raised before a sweep starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Empty {axis} shift range {start}..={end}")]
    EmptyRange {
        axis: &'static str,
        start: u32,
        end: u32,
    },

    #[error("Invalid grid generator: {0}")]
    Generator(#[from] GeneratorError),
}

/// Parameters of a period sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodGridSpec {
    pub width: RegisterWidth,
    pub seed: u64,
    pub shift_a: u32,
    pub b_range: RangeInclusive<u32>,
    pub c_range: RangeInclusive<u32>,
    /// Steps allowed per cell before it is reported as exceeding the bound
    pub max_steps: u64,
}

impl PeriodGridSpec {
    /// The 15×15 16-bit sweep: seed 123, `a = 11`, `b, c ∈ 1..=15`
    pub fn reference() -> Self {
        Self {
            width: RegisterWidth::W16,
            seed: 123,
            shift_a: 11,
            b_range: 1..=15,
            c_range: 1..=15,
            max_steps: 1 << 16,
        }
    }

    /// Check ranges, seed and every shift before any measurement runs
    pub fn validate(&self) -> Result<(), GridError> {
        for (axis, range) in [("b", &self.b_range), ("c", &self.c_range)] {
            if range.is_empty() {
                return Err(GridError::EmptyRange {
                    axis,
                    start: *range.start(),
                    end: *range.end(),
                });
            }
        }
        self.width.validate_seed(self.seed)?;

        // Ranges are contiguous, so checking both corners covers every cell
        let bits = self.width.bits();
        ShiftTriple::new(self.shift_a, *self.b_range.start(), *self.c_range.start())
            .validate(bits)?;
        ShiftTriple::new(self.shift_a, *self.b_range.end(), *self.c_range.end())
            .validate(bits)?;
        Ok(())
    }
}

/// Outcome of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodCell {
    Period(u64),
    ExceedsBound { bound: u64 },
}

impl PeriodCell {
    pub fn period(&self) -> Option<u64> {
        match self {
            PeriodCell::Period(period) => Some(*period),
            PeriodCell::ExceedsBound { .. } => None,
        }
    }
}

impl fmt::Display for PeriodCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodCell::Period(period) => write!(f, "{}", period),
            PeriodCell::ExceedsBound { bound } => write!(f, ">{}", bound),
        }
    }
}

/// Measured periods, one row per `b`, one column per `c`
///
/// # Example
/// ```
/// use prng_testbench_core::analysis::{PeriodGrid, PeriodGridSpec};
///
/// let mut spec = PeriodGridSpec::reference();
/// spec.b_range = 4..=4;
/// spec.c_range = 7..=7;
///
/// let grid = PeriodGrid::sweep(&spec).unwrap();
/// assert_eq!(grid.get(4, 7).and_then(|cell| cell.period()), Some(186));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodGrid {
    spec: PeriodGridSpec,
    rows: Vec<Vec<PeriodCell>>,
}

impl PeriodGrid {
    /// Measure every cell of the grid
    ///
    /// # Errors
    /// [`GridError`] if the spec is invalid; nothing is measured in that case
    pub fn sweep(spec: &PeriodGridSpec) -> Result<Self, GridError> {
        spec.validate()?;
        let rows = match spec.width {
            RegisterWidth::W16 => sweep_rows::<u16>(spec)?,
            RegisterWidth::W32 => sweep_rows::<u32>(spec)?,
            RegisterWidth::W64 => sweep_rows::<u64>(spec)?,
        };

        let exceeded = rows
            .iter()
            .flatten()
            .filter(|cell| cell.period().is_none())
            .count();
        tracing::info!(
            width = spec.width.bits(),
            cells = rows.len() * rows.first().map_or(0, Vec::len),
            exceeded,
            "period grid complete"
        );

        Ok(Self {
            spec: spec.clone(),
            rows,
        })
    }

    pub fn spec(&self) -> &PeriodGridSpec {
        &self.spec
    }

    pub fn rows(&self) -> &[Vec<PeriodCell>] {
        &self.rows
    }

    /// Cell for shift pair `(b, c)`, if it lies inside the swept ranges
    pub fn get(&self, b: u32, c: u32) -> Option<PeriodCell> {
        if !self.spec.b_range.contains(&b) || !self.spec.c_range.contains(&c) {
            return None;
        }
        let row = (b - self.spec.b_range.start()) as usize;
        let col = (c - self.spec.c_range.start()) as usize;
        self.rows.get(row)?.get(col).copied()
    }

    /// Longest measured period and the `(b, c)` pair that produced it
    pub fn longest(&self) -> Option<(u32, u32, u64)> {
        let mut best: Option<(u32, u32, u64)> = None;
        for (b, row) in self.spec.b_range.clone().zip(&self.rows) {
            for (c, cell) in self.spec.c_range.clone().zip(row) {
                if let Some(period) = cell.period() {
                    if best.map_or(true, |(_, _, longest)| period > longest) {
                        best = Some((b, c, period));
                    }
                }
            }
        }
        best
    }
}

impl fmt::Display for PeriodGrid {
    /// One line per `b`, each cell followed by a space
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn sweep_rows<W: XorshiftWord>(spec: &PeriodGridSpec) -> Result<Vec<Vec<PeriodCell>>, GridError> {
    let mut rows = Vec::with_capacity(spec.b_range.clone().count());
    for b in spec.b_range.clone() {
        let mut row = Vec::with_capacity(spec.c_range.clone().count());
        for c in spec.c_range.clone() {
            let shifts = ShiftTriple::new(spec.shift_a, b, c);
            let mut generator = Xorshift::<W>::from_u64_seed(spec.seed, shifts)?;
            let cell = match measure_period_bounded(&mut generator, spec.max_steps) {
                Ok(period) => PeriodCell::Period(period),
                Err(PeriodError::ExceedsBound { bound }) => PeriodCell::ExceedsBound { bound },
            };
            row.push(cell);
        }
        tracing::debug!(b, row = ?row, "grid row measured");
        rows.push(row);
    }
    Ok(rows)
}

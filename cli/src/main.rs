//! PRNG testbench command-line entry point
//!
//! Produces sample dumps and period grids for empirical testing. See
//! [`args::USAGE`] for the available commands.

mod args;
mod logging;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use prng_testbench_core::{
    draw_samples, run_suite, GeneratorSpec, LineSink, PeriodGrid, PeriodGridSpec, SuiteConfig,
};

use args::{parse_args, Command, USAGE};

fn main() -> Result<()> {
    logging::init_logger()?;

    let command = parse_args(std::env::args().skip(1).collect()).map_err(|err| {
        eprintln!("{}", USAGE);
        err
    })?;

    match command {
        Command::Run { config, out_dir } => run(config.as_deref(), &out_dir),
        Command::Sample {
            generator,
            count,
            output,
        } => sample(&generator, count, output.as_deref()),
        Command::Period { spec } => period(&spec),
        Command::ReferenceConfig => {
            println!("{}", SuiteConfig::reference().to_json_pretty()?);
            Ok(())
        }
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn run(config: Option<&Path>, out_dir: &Path) -> Result<()> {
    let suite = match config {
        Some(path) => SuiteConfig::load(path)?,
        None => {
            tracing::info!("no --config given, running the reference suite");
            SuiteConfig::reference()
        }
    };
    tracing::info!(
        runs = suite.sample_runs.len(),
        period_grid = suite.period_grid.is_some(),
        out_dir = %out_dir.display(),
        "starting suite"
    );

    let report = run_suite(&suite, out_dir)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("Failed to write report")?;
    writeln!(stdout)?;
    Ok(())
}

fn sample(generator: &GeneratorSpec, count: u64, output: Option<&Path>) -> Result<()> {
    let mut source = generator
        .build()
        .with_context(|| format!("Invalid generator {}", generator))?;
    tracing::info!(%generator, count, "drawing samples");

    let summary = match output {
        Some(path) => {
            let mut sink = LineSink::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            draw_samples(source.as_mut(), count, &mut sink)?
        }
        None => {
            let mut sink = LineSink::new(io::BufWriter::new(io::stdout().lock()));
            draw_samples(source.as_mut(), count, &mut sink)?
        }
    };

    tracing::info!(
        count = summary.count,
        mean = ?summary.mean,
        fingerprint = %summary.fingerprint,
        "samples written"
    );
    Ok(())
}

fn period(spec: &PeriodGridSpec) -> Result<()> {
    tracing::info!(
        width = spec.width.bits(),
        seed = spec.seed,
        shift_a = spec.shift_a,
        max_steps = spec.max_steps,
        "sweeping period grid"
    );
    let grid = PeriodGrid::sweep(spec)?;
    if let Some((b, c, longest)) = grid.longest() {
        tracing::info!(b, c, period = longest, "longest period");
    }
    print!("{}", grid);
    io::stdout().flush()?;
    Ok(())
}

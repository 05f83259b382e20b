//! Command-line argument parsing

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use prng_testbench_core::{
    GeneratorSpec, LcgParams, PeriodGridSpec, RegisterWidth, ShiftTriple,
};

pub const USAGE: &str = "\
Usage:
  prng-testbench run [--config <suite.json>] [--out-dir <dir>]
  prng-testbench sample (--lcg SEED A C M | --xorshift WIDTH SEED A B C) [--count N] [--output <path>]
  prng-testbench period [--width W] [--seed S] [--shift-a A] [--b-max B] [--c-max C] [--max-steps N]
  prng-testbench reference-config

Logging goes to stderr and honours RUST_LOG (default: info).";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a whole suite (the reference suite when no config is given)
    Run {
        config: Option<PathBuf>,
        out_dir: PathBuf,
    },
    /// Draw samples from one generator
    Sample {
        generator: GeneratorSpec,
        count: u64,
        output: Option<PathBuf>,
    },
    /// Print a period grid
    Period { spec: PeriodGridSpec },
    /// Print the reference suite as JSON
    ReferenceConfig,
    Help,
}

/// Cursor over the raw arguments
struct Args {
    args: Vec<String>,
    pos: usize,
}

impl Args {
    fn next_arg(&mut self) -> Option<&str> {
        let arg = self.args.get(self.pos)?;
        self.pos += 1;
        Some(arg.as_str())
    }

    /// Value following a flag, parsed
    fn value<T>(&mut self, flag: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = self
            .next_arg()
            .with_context(|| format!("{} expects a value", flag))?
            .to_string();
        raw.parse()
            .with_context(|| format!("{} got invalid value '{}'", flag, raw))
    }
}

pub fn parse_args(args: Vec<String>) -> Result<Command> {
    let mut args = Args { args, pos: 0 };
    let command = match args.next_arg() {
        None | Some("help" | "--help" | "-h") => return Ok(Command::Help),
        Some(command) => command.to_string(),
    };

    match command.as_str() {
        "run" => parse_run(&mut args),
        "sample" => parse_sample(&mut args),
        "period" => parse_period(&mut args),
        "reference-config" => match args.next_arg() {
            None => Ok(Command::ReferenceConfig),
            Some(other) => bail!("Unknown argument for reference-config: {}", other),
        },
        other => bail!("Unknown command: {}", other),
    }
}

fn parse_run(args: &mut Args) -> Result<Command> {
    let mut config = None;
    let mut out_dir = PathBuf::from("build");

    while let Some(flag) = args.next_arg() {
        match flag {
            "--config" => config = Some(args.value::<PathBuf>("--config")?),
            "--out-dir" => out_dir = args.value("--out-dir")?,
            other => bail!("Unknown argument for run: {}", other),
        }
    }
    Ok(Command::Run { config, out_dir })
}

fn parse_sample(args: &mut Args) -> Result<Command> {
    let mut generator = None;
    let mut count = 100_000;
    let mut output = None;

    while let Some(flag) = args.next_arg() {
        match flag {
            "--lcg" => {
                generator = Some(GeneratorSpec::Lcg(LcgParams::new(
                    args.value("--lcg SEED")?,
                    args.value("--lcg A")?,
                    args.value("--lcg C")?,
                    args.value("--lcg M")?,
                )));
            }
            "--xorshift" => {
                let bits: u32 = args.value("--xorshift WIDTH")?;
                let width = RegisterWidth::try_from(bits)?;
                let seed = args.value("--xorshift SEED")?;
                let shifts = ShiftTriple::new(
                    args.value("--xorshift A")?,
                    args.value("--xorshift B")?,
                    args.value("--xorshift C")?,
                );
                generator = Some(GeneratorSpec::Xorshift {
                    width,
                    seed,
                    shifts,
                });
            }
            "--count" => count = args.value("--count")?,
            "--output" => output = Some(args.value::<PathBuf>("--output")?),
            other => bail!("Unknown argument for sample: {}", other),
        }
    }

    let generator = generator.context("sample needs --lcg or --xorshift")?;
    if count == 0 {
        bail!("--count must be at least 1");
    }
    Ok(Command::Sample {
        generator,
        count,
        output,
    })
}

fn parse_period(args: &mut Args) -> Result<Command> {
    let mut spec = PeriodGridSpec::reference();
    let mut b_max = *spec.b_range.end();
    let mut c_max = *spec.c_range.end();

    while let Some(flag) = args.next_arg() {
        match flag {
            "--width" => {
                let bits: u32 = args.value("--width")?;
                spec.width = RegisterWidth::try_from(bits)?;
            }
            "--seed" => spec.seed = args.value("--seed")?,
            "--shift-a" => spec.shift_a = args.value("--shift-a")?,
            "--b-max" => b_max = args.value("--b-max")?,
            "--c-max" => c_max = args.value("--c-max")?,
            "--max-steps" => spec.max_steps = args.value("--max-steps")?,
            other => bail!("Unknown argument for period: {}", other),
        }
    }
    spec.b_range = 1..=b_max;
    spec.c_range = 1..=c_max;
    Ok(Command::Period { spec })
}

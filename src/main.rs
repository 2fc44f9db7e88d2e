// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use iching_oracle::casting::{CastingMethod, CoinMethod, LineTally, SeededMethod};
use iching_oracle::config::{MethodKind, OracleConfig};
use iching_oracle::hexagram::{LinePosition, LineValue};
use iching_oracle::knowledge::KnowledgeBase;
use iching_oracle::oracle::Oracle;
use iching_oracle::report::{self, ReportOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "oracle", about = "I-Ching hexagram casting and lookup")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "ORACLE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a hexagram and save or print the reading
    Cast {
        /// Casting method (defaults to the configured one)
        #[arg(short, long)]
        method: Option<MethodKind>,

        /// Enquirer polarity for the seeded method: 0 male, 1 female
        #[arg(
            short,
            long,
            default_value_t = 0,
            value_parser = clap::value_parser!(u8).range(0..=1)
        )]
        gender: u8,

        /// Fixed random seed, for a reproducible reading
        #[arg(short, long)]
        seed: Option<u64>,

        /// Background of the question
        #[arg(short, long, default_value = "")]
        background: String,

        /// The question itself
        #[arg(short, long, default_value = "")]
        question: String,

        /// Show binary codes and the arithmetic of the cast
        #[arg(long)]
        full: bool,

        /// Print the reading instead of saving it
        #[arg(long)]
        stdout: bool,
    },

    /// Show one hexagram by name, with its derived figures
    Lookup {
        name: String,
    },

    /// Show a primary hexagram changing at one line into another
    Change {
        primary: String,

        /// Changing line, 1 (bottom) to 6 (top)
        line: u8,

        resulting: String,
    },

    /// Toss many lines and report outcome frequencies
    Tally {
        #[arg(short, long, default_value_t = 10_000)]
        trials: u64,

        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_oracle(config: &OracleConfig) -> Result<Oracle> {
    let knowledge = KnowledgeBase::load(&config.data.hexagrams, &config.data.pairings)
        .context("failed to load the hexagram tables")?;
    Ok(Oracle::new(knowledge))
}

fn casting_method(kind: MethodKind, gender: u8, config: &OracleConfig) -> Box<dyn CastingMethod> {
    match kind {
        MethodKind::Coins => Box::new(CoinMethod),
        MethodKind::Seeded => Box::new(
            SeededMethod::new(LineValue::from_bit(gender)).with_max_moving(config.cast.max_moving),
        ),
    }
}

fn save_reading(dir: &Path, lines: &[String]) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y_%m_%d_%H_%M_%S");
    let path = dir.join(format!("question_{}.txt", stamp));
    std::fs::write(&path, lines.join("\n"))
        .with_context(|| format!("failed to save reading to {}", path.display()))?;
    Ok(path)
}

#[allow(clippy::too_many_arguments)]
fn cast(
    config: &OracleConfig,
    method: Option<MethodKind>,
    gender: u8,
    seed: Option<u64>,
    background: &str,
    question: &str,
    full: bool,
    stdout: bool,
) -> Result<()> {
    let oracle = load_oracle(config)?;
    let method = casting_method(method.unwrap_or(config.cast.method), gender, config);
    let mut rng = rng_from(seed);

    let mut options = config.output.report_options();
    if full {
        options.simplified = false;
    }

    let reading = oracle
        .divine(method.as_ref(), &mut rng)
        .map_err(|err| {
            if err.is_defensive() {
                tracing::error!(%err, method = method.name(), "internal check failed");
            }
            err
        })
        .context("divination failed")?;

    let mut lines = report::load_prompts(&config.data.prompts);
    lines.extend(report::question_header(background, question));
    lines.extend(report::render_reading(&reading, options));

    if stdout {
        println!("{}", lines.join("\n"));
    } else {
        let path = save_reading(&config.output.dir, &lines)?;
        println!("占卜结果已保存：{}", path.display());
    }
    Ok(())
}

fn lookup(config: &OracleConfig, name: &str, options: ReportOptions) -> Result<()> {
    let oracle = load_oracle(config)?;
    match oracle.study(name)? {
        Ok(study) => println!("{}", report::render_single(&study, options).join("\n")),
        Err(miss) => bail!("{}", miss),
    }
    Ok(())
}

fn change(
    config: &OracleConfig,
    primary: &str,
    line: u8,
    resulting: &str,
    options: ReportOptions,
) -> Result<()> {
    let Some(line) = LinePosition::try_new(line) else {
        bail!("changing line must be between 1 and 6, got {}", line);
    };
    let oracle = load_oracle(config)?;
    match oracle.compare(primary, line, resulting)? {
        Ok(comparison) => println!("{}", report::render_change(&comparison, options).join("\n")),
        Err(miss) => bail!("{}", miss),
    }
    Ok(())
}

fn tally(trials: u64, seed: Option<u64>) -> Result<()> {
    let mut rng = rng_from(seed);
    let tally = LineTally::run(trials, &mut rng)?;
    println!("{:>5} {:>10} {:>9} {:>9}", "total", "count", "observed", "expected");
    for (outcome, count) in tally.iter() {
        println!(
            "{:>5} {:>10} {:>9.4} {:>9.4}",
            outcome.total(),
            count,
            tally.frequency(outcome),
            outcome.probability()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = OracleConfig::resolve(cli.config.as_deref())?;
    let options = config.output.report_options();

    match cli.command {
        Commands::Cast {
            method,
            gender,
            seed,
            background,
            question,
            full,
            stdout,
        } => cast(
            &config,
            method,
            gender,
            seed,
            &background,
            &question,
            full,
            stdout,
        ),
        Commands::Lookup { name } => lookup(&config, &name, options),
        Commands::Change {
            primary,
            line,
            resulting,
        } => change(&config, &primary, line, &resulting, options),
        Commands::Tally { trials, seed } => tally(trials, seed),
    }
}

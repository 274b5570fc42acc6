// crates/strassen-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, Rng as _, SeedableRng};
use strassen_core::{
    io::{read_pair_auto, read_report_auto, write_pair_auto, write_report_auto, MatrixPair},
    Matrix, Method,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Largest dimension the serving boundary accepts by default.
const DEFAULT_MAX_DIM: u32 = 16;

#[derive(Parser, Debug)]
#[command(
    name = "strassen-cli",
    about = "Strassen matrix multiplication with a step trace",
    long_about = "Strassen matrix multiplication with a step trace.\n\nUse this tool to generate input pairs, multiply them with a traced method, and replay recorded traces.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Multiply the two matrices of a pair file and emit a report.
    Multiply {
        /// Input pair (`matrix_a`, `matrix_b`, optional `method`) as JSON/CBOR
        #[arg(long)]
        input: PathBuf,

        /// Method name; overrides the one stored in the pair file
        #[arg(long)]
        method: Option<String>,

        /// Output path for the report (JSON/CBOR); prints JSON to stdout if omitted
        #[arg(long)]
        out: Option<PathBuf>,

        /// Reject inputs larger than this dimension
        #[arg(long, default_value_t = DEFAULT_MAX_DIM, value_parser = clap::value_parser!(u32).range(1..))]
        max_dim: u32,

        /// Leave the step lines out of the emitted report (`operations_count` is kept)
        #[arg(long, default_value_t = false)]
        quiet_steps: bool,
    },

    /// Generate a deterministic random pair of n×n matrices.
    Random {
        /// Dimension n (>0); Strassen needs a power of two
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        n: u32,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Entries are drawn from [-range, range]
        #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(i64).range(0..))]
        range: i64,

        /// Output path for the pair (JSON/CBOR)
        #[arg(long, default_value = "pair.json")]
        out: PathBuf,
    },

    /// Check that a report's trace describes a well-formed recursion.
    Replay {
        /// Report produced by `multiply` (JSON/CBOR)
        #[arg(long)]
        report: PathBuf,
    },

    /// List supported multiplication methods.
    Methods,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Multiply {
            input,
            method,
            out,
            max_dim,
            quiet_steps,
        } => multiply(input, method, out, max_dim, quiet_steps),

        Cmd::Random {
            n,
            seed,
            range,
            out,
        } => random(n, seed, range, out),

        Cmd::Replay { report } => replay(report),

        Cmd::Methods => {
            for m in Method::ALL {
                println!("{m}\t{}", m.multiplier().complexity());
            }
            Ok(())
        }
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn multiply(
    input: PathBuf,
    method: Option<String>,
    out: Option<PathBuf>,
    max_dim: u32,
    quiet_steps: bool,
) -> Result<()> {
    let pair = read_pair_auto(&input)
        .with_context(|| format!("reading matrix pair from {}", input.display()))?;
    let method = method.unwrap_or(pair.method);

    let n = pair.matrix_a.dim().max(pair.matrix_b.dim());
    if n > max_dim as usize {
        bail!("matrix too large: {n}x{n} exceeds the {max_dim}x{max_dim} limit");
    }

    info!(input=%input.display(), %method, n, "multiplying");
    let mut report = strassen_core::run(&pair.matrix_a, &pair.matrix_b, &method)
        .with_context(|| format!("multiplying with method {method:?}"))?;
    if quiet_steps {
        report.clear_steps();
    }
    let operations = report.operations_count.unwrap_or(report.steps.len());

    match out {
        Some(path) => {
            write_report_auto(&path, &report)
                .with_context(|| format!("writing report to {}", path.display()))?;
            println!(
                "Multiplied {n}x{n} with {} in {:.3} ms ({operations} steps) → {}",
                report.method,
                report.execution_time,
                path.display()
            );
        }
        None => {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn random(n: u32, seed: u64, range: i64, out: PathBuf) -> Result<()> {
    let n = n as usize;
    if !n.is_power_of_two() {
        warn!(n, "dimension is not a power of two; strassen will reject this pair");
    }

    info!(n, seed, range, "generating random pair");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut draw = || -> Result<Matrix> {
        let data = (0..n * n).map(|_| rng.random_range(-range..=range)).collect();
        Matrix::from_flat(n, data).context("building random matrix")
    };
    let pair = MatrixPair::new(draw()?, draw()?);

    write_pair_auto(&out, &pair).with_context(|| format!("writing pair to {}", out.display()))?;
    println!("Generated {n}x{n} pair (seed {seed}) → {}", out.display());
    Ok(())
}

fn replay(report: PathBuf) -> Result<()> {
    let rep = read_report_auto(&report)
        .with_context(|| format!("reading report from {}", report.display()))?;

    if rep.steps.is_empty() {
        bail!(
            "{} carries no step lines (written with --quiet-steps?); nothing to replay",
            report.display()
        );
    }

    info!(report=%report.display(), steps = rep.steps.len(), "replaying trace");
    let shape = strassen_scheduler::replay_lines(&rep.steps).context("trace replay failed")?;

    if shape.n != rep.result_matrix.dim() {
        bail!(
            "trace describes a {0}x{0} run but the result is {1}x{1}",
            shape.n,
            rep.result_matrix.dim()
        );
    }
    if let Some(count) = rep.operations_count {
        if count != rep.steps.len() {
            bail!(
                "report counts {count} operations but carries {} step lines",
                rep.steps.len()
            );
        }
    }

    println!(
        "OK: {n}x{n} run, depth {d}, {div} divisions, {bc} base cases, {cb} combines",
        n = shape.n,
        d = shape.depth,
        div = shape.divisions,
        bc = shape.base_cases,
        cb = shape.combines
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tmp_path(name: &str, ext: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("strassen_cli_{name}_{nanos}.{ext}"));
        p
    }

    #[test]
    fn quiet_steps_flag_parses() {
        let cli = Cli::try_parse_from([
            "strassen-cli",
            "multiply",
            "--input",
            "pair.json",
            "--quiet-steps",
        ])
        .unwrap();
        assert!(matches!(
            cli.cmd,
            Cmd::Multiply {
                quiet_steps: true,
                max_dim: DEFAULT_MAX_DIM,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["strassen-cli", "multiply", "--input", "pair.json"]).unwrap();
        assert!(matches!(cli.cmd, Cmd::Multiply { quiet_steps: false, .. }));
    }

    #[test]
    fn quiet_report_keeps_counts_and_is_not_replayable() {
        let input = tmp_path("pair", "json");
        let out = tmp_path("report", "json");
        let pair = MatrixPair::new(Matrix::identity(2), Matrix::identity(2));
        write_pair_auto(&input, &pair).unwrap();

        multiply(input.clone(), None, Some(out.clone()), DEFAULT_MAX_DIM, true).unwrap();
        let rep = read_report_auto(&out).unwrap();
        assert!(rep.steps.is_empty());
        assert_eq!(rep.operations_count, Some(12));
        assert_eq!(rep.result_matrix, Matrix::identity(2));

        let err = replay(out.clone()).unwrap_err();
        assert!(err.to_string().contains("no step lines"));

        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn full_report_replays() {
        let input = tmp_path("pair_full", "json");
        let out = tmp_path("report_full", "cbor");
        let a = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
        write_pair_auto(&input, &MatrixPair::new(a.clone(), a)).unwrap();

        multiply(input.clone(), None, Some(out.clone()), DEFAULT_MAX_DIM, false).unwrap();
        replay(out.clone()).unwrap();

        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn oversized_input_is_rejected() {
        let input = tmp_path("pair_big", "json");
        write_pair_auto(&input, &MatrixPair::new(Matrix::identity(4), Matrix::identity(4))).unwrap();
        let err = multiply(input.clone(), None, None, 2, false).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
        let _ = std::fs::remove_file(input);
    }
}

//! kernel-replay — re-evaluate every observation in a log and report any
//! outcome the current kernels no longer reproduce. Exits 1 on drift.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bench_kernels::Reading;
use bench_runtime::logging::{init_logging, DEFAULT_LOG_LEVEL};
use bench_runtime::replay::replay_log;

#[derive(Parser)]
#[command(name = "kernel-replay", version)]
#[command(about = "Replay an observation log against the current kernels")]
struct Cli {
    /// Observation log written by `kernel-run --record`
    log: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", env = "BENCH_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let report = replay_log(&cli.log)
        .with_context(|| format!("failed to replay {}", cli.log.display()))?;

    for m in &report.mismatches {
        let inputs: Vec<String> = m.inputs.iter().map(Reading::to_string).collect();
        println!(
            "[DRIFT] #{} {} ({}): recorded={:?} replayed={:?}",
            m.sequence,
            m.kernel,
            inputs.join(" "),
            m.recorded,
            m.replayed
        );
    }
    println!(
        "Replayed {} observations: {} mismatches",
        report.replayed,
        report.mismatches.len()
    );

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

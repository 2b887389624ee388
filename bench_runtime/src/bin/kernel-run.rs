//! kernel-run — the per-benchmark program.
//!
//! Reads one line of inputs from stdin, evaluates the named kernel and
//! prints `Result: <value>`. An arithmetic fault prints nothing and exits
//! 136, the status the compiled program dies with.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use bench_kernels::{lookup, Semantics, KERNELS};
use bench_runtime::harness::run_program;
use bench_runtime::logging::{init_logging, DEFAULT_LOG_LEVEL};
use bench_runtime::observation::Observation;
use bench_runtime::session::RecordingSession;

#[derive(Parser)]
#[command(name = "kernel-run", version)]
#[command(about = "Evaluate one benchmark kernel on a line of stdin")]
struct Cli {
    /// Kernel name (`ranzero-neq`) or benchmark path (`Ran/ranzero/NEq`)
    #[arg(required_unless_present = "list")]
    kernel: Option<String>,

    /// Variable typing of the kernel body (truncating, float)
    #[arg(long, env = "BENCH_SEMANTICS", default_value = "truncating")]
    semantics: Semantics,

    /// Append the run to this observation log
    #[arg(long, value_name = "LOG")]
    record: Option<PathBuf>,

    /// List the available kernels and exit
    #[arg(long)]
    list: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", env = "BENCH_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if cli.list {
        for k in KERNELS.iter() {
            println!("{:<12} {:<24} {}", k.name, k.qualified_path(), k.params.join(" "));
        }
        return Ok(());
    }

    let key = cli.kernel.as_deref().context("no kernel given")?;
    let spec = lookup(key)?;

    let run = run_program(spec, cli.semantics, io::stdin().lock(), io::stdout().lock())?;

    if let Some(path) = &cli.record {
        let mut session = RecordingSession::open(path, cli.semantics)
            .with_context(|| format!("failed to open observation log {}", path.display()))?;
        let stored = session.append(&Observation {
            sequence: 0,
            kernel: spec.id,
            semantics: cli.semantics,
            inputs: run.inputs.clone(),
            outcome: run.outcome,
        })?;
        info!(sequence = stored.sequence, log = %path.display(), "recorded observation");
    }

    if run.output.status != 0 {
        std::process::exit(run.output.status);
    }
    Ok(())
}

//! kernel-sweep — evaluate kernels over integer grids and print the
//! canonical hash of the report.
//!
//! Without bounds every kernel is swept over the golden grid. `--baseline`
//! compares against an exported report and exits 1 on any drift.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use bench_kernels::hashing::canonical_hash;
use bench_kernels::sweep::{golden_radius, run_sweep, SweepPlan};
use bench_kernels::{lookup, KernelSpec, Reading, Semantics, KERNELS};
use bench_runtime::drift::{compare_reports, verify_determinism, DriftReport};
use bench_runtime::logging::{init_logging, DEFAULT_LOG_LEVEL};
use bench_runtime::report_codec::{export_report_to_file, import_report_from_file, report_hash};

#[derive(Parser)]
#[command(name = "kernel-sweep", version)]
#[command(about = "Sweep benchmark kernels over integer grids")]
struct Cli {
    /// Kernel to sweep; repeat for several (default: all)
    #[arg(long = "kernel", value_name = "KERNEL")]
    kernels: Vec<String>,

    /// Lower grid bound for every parameter (default: golden grid)
    #[arg(long, allow_hyphen_values = true, requires = "upper")]
    lower: Option<i32>,

    /// Upper grid bound for every parameter
    #[arg(long, allow_hyphen_values = true, requires = "lower")]
    upper: Option<i32>,

    /// Variable typing of the kernel bodies (truncating, float)
    #[arg(long, env = "BENCH_SEMANTICS", default_value = "truncating")]
    semantics: Semantics,

    /// Export the report as JSON
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Compare against an exported report; exit 1 on drift
    #[arg(long, value_name = "PATH")]
    baseline: Option<PathBuf>,

    /// Sweep twice and require identical hashes
    #[arg(long)]
    verify: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", env = "BENCH_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl Cli {
    fn plans(&self) -> Result<Vec<SweepPlan>> {
        let specs: Vec<&KernelSpec> = if self.kernels.is_empty() {
            KERNELS.iter().collect()
        } else {
            self.kernels
                .iter()
                .map(|k| lookup(k))
                .collect::<Result<_, _>>()?
        };
        Ok(specs
            .into_iter()
            .map(|spec| match (self.lower, self.upper) {
                (Some(lower), Some(upper)) => SweepPlan::new(spec.id, lower, upper),
                _ => {
                    let r = golden_radius(spec.arity());
                    SweepPlan::new(spec.id, -r, r)
                }
            })
            .collect())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let plans = cli.plans()?;
    let points: u64 = plans.iter().map(SweepPlan::len).sum();
    info!(kernels = plans.len(), points, semantics = %cli.semantics, "sweeping");

    if cli.verify {
        verify_determinism(&plans, cli.semantics)?;
    }

    let report = run_sweep(&plans, cli.semantics)?;
    let hash = canonical_hash(&report);
    info!(samples = report.sample_count(), %hash, "sweep finished");
    println!("{hash}");

    if let Some(path) = &cli.output {
        export_report_to_file(&report, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), file_hash = %report_hash(&report)?, "report exported");
    }

    if let Some(path) = &cli.baseline {
        let baseline = import_report_from_file(path)
            .with_context(|| format!("failed to load baseline {}", path.display()))?;
        let drift = compare_reports(&baseline, &report);
        print_drift(&drift);
        if drift.has_drift() {
            bail!("sweep drifted from baseline {}", path.display());
        }
    }
    Ok(())
}

fn inputs(readings: &[Reading]) -> String {
    readings.iter().map(Reading::to_string).collect::<Vec<_>>().join(" ")
}

fn print_drift(drift: &DriftReport) {
    if drift.baseline_semantics != drift.current_semantics {
        println!(
            "[DRIFT] semantics: baseline={} current={}",
            drift.baseline_semantics, drift.current_semantics
        );
    }
    for c in &drift.changed {
        println!(
            "[DRIFT] {} ({}): baseline={:?} current={:?}",
            c.kernel,
            inputs(&c.inputs),
            c.baseline,
            c.current
        );
    }
    for m in &drift.missing {
        println!("[MISSING] {} ({})", m.kernel, inputs(&m.inputs));
    }
    for a in &drift.added {
        println!("[ADDED] {} ({})", a.kernel, inputs(&a.inputs));
    }
    println!(
        "Compared {} samples: {} changed, {} missing, {} added",
        drift.compared,
        drift.changed.len(),
        drift.missing.len(),
        drift.added.len()
    );
}

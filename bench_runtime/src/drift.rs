//! Drift detection — determinism verification and report comparison.
//!
//! Samples are matched by kernel name and inputs, never by position, so a
//! report over a wider grid can be compared against a narrower baseline.

use std::collections::HashMap;

use bench_kernels::hashing::canonical_hash;
use bench_kernels::sweep::{run_sweep, SweepPlan, SweepReport};
use bench_kernels::{KernelError, Outcome, Reading, Semantics};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DriftError {
    #[error(
        "DETERMINISM FAILURE: two sweeps produced different hashes.\n\
         Run 1: {first}\n\
         Run 2: {second}"
    )]
    Nondeterministic { first: String, second: String },

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Run the same sweep twice and require identical canonical hashes.
/// Returns the hash.
pub fn verify_determinism(plans: &[SweepPlan], semantics: Semantics) -> Result<String, DriftError> {
    let first = canonical_hash(&run_sweep(plans, semantics)?);
    let second = canonical_hash(&run_sweep(plans, semantics)?);
    if first != second {
        return Err(DriftError::Nondeterministic { first, second });
    }
    info!(hash = %first, "determinism verified");
    Ok(first)
}

/// One sample whose outcome differs between baseline and current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedSample {
    pub kernel: String,
    pub inputs: Vec<Reading>,
    pub baseline: Outcome,
    pub current: Outcome,
}

/// A sample present on only one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleKey {
    pub kernel: String,
    pub inputs: Vec<Reading>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftReport {
    pub baseline_hash: String,
    pub current_hash: String,
    pub baseline_semantics: Semantics,
    pub current_semantics: Semantics,
    pub compared: usize,
    pub changed: Vec<ChangedSample>,
    pub missing: Vec<SampleKey>,
    pub added: Vec<SampleKey>,
}

impl DriftReport {
    pub fn has_drift(&self) -> bool {
        self.baseline_semantics != self.current_semantics
            || !self.changed.is_empty()
            || !self.missing.is_empty()
            || !self.added.is_empty()
    }
}

/// Hashable identity of an input reading.
fn reading_key(r: &Reading) -> (bool, u64) {
    match *r {
        Reading::Int(v) => (false, u64::from(v as u32)),
        Reading::Real(v) => (true, v.to_bits()),
    }
}

type Key<'a> = (&'a str, Vec<(bool, u64)>);
type Index<'a> = HashMap<Key<'a>, &'a Outcome>;

fn sample_key<'a>(kernel: &'a str, inputs: &[Reading]) -> Key<'a> {
    (kernel, inputs.iter().map(reading_key).collect())
}

fn index(report: &SweepReport) -> Index<'_> {
    report
        .sweeps
        .iter()
        .flat_map(|sweep| {
            sweep
                .samples
                .iter()
                .map(move |s| (sample_key(&sweep.kernel, &s.inputs), &s.outcome))
        })
        .collect()
}

/// Structured sample-by-sample comparison, in report order.
pub fn compare_reports(baseline: &SweepReport, current: &SweepReport) -> DriftReport {
    let base_index = index(baseline);
    let cur_index = index(current);

    let mut compared = 0;
    let mut changed = Vec::new();
    let mut missing = Vec::new();
    for sweep in &baseline.sweeps {
        for sample in &sweep.samples {
            match cur_index.get(&sample_key(&sweep.kernel, &sample.inputs)) {
                Some(&now) => {
                    compared += 1;
                    if *now != sample.outcome {
                        changed.push(ChangedSample {
                            kernel: sweep.kernel.clone(),
                            inputs: sample.inputs.clone(),
                            baseline: sample.outcome,
                            current: *now,
                        });
                    }
                }
                None => missing.push(SampleKey {
                    kernel: sweep.kernel.clone(),
                    inputs: sample.inputs.clone(),
                }),
            }
        }
    }

    let added: Vec<SampleKey> = current
        .sweeps
        .iter()
        .flat_map(|sweep| sweep.samples.iter().map(move |s| (sweep, s)))
        .filter(|(sweep, s)| !base_index.contains_key(&sample_key(&sweep.kernel, &s.inputs)))
        .map(|(sweep, s)| SampleKey {
            kernel: sweep.kernel.clone(),
            inputs: s.inputs.clone(),
        })
        .collect();

    let report = DriftReport {
        baseline_hash: canonical_hash(baseline),
        current_hash: canonical_hash(current),
        baseline_semantics: baseline.semantics,
        current_semantics: current.semantics,
        compared,
        changed,
        missing,
        added,
    };
    if report.has_drift() {
        warn!(
            changed = report.changed.len(),
            missing = report.missing.len(),
            added = report.added.len(),
            "sweep drift detected"
        );
    }
    report
}

//! Benchmark Kernels v1 — Sweeps
//!
//! Evaluates kernels over rectangular integer grids. A sweep report is the
//! unit that gets hashed, exported and compared for drift.

use serde::{Deserialize, Serialize};

use crate::domain::{Outcome, Reading, Semantics};
use crate::error::KernelError;
use crate::registry::{evaluate, spec, KernelId, KERNELS};
use crate::KERNEL_VERSION;

/// The grid `[lower, upper]^arity` of one kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub kernel: KernelId,
    pub lower: i32,
    pub upper: i32,
}

impl SweepPlan {
    pub fn new(kernel: KernelId, lower: i32, upper: i32) -> Self {
        Self { kernel, lower, upper }
    }

    /// Number of grid points. Empty when `lower > upper`.
    pub fn len(&self) -> u64 {
        let side = if self.lower > self.upper {
            0
        } else {
            (i64::from(self.upper) - i64::from(self.lower) + 1) as u64
        };
        let arity = spec(self.kernel).arity() as u32;
        side.saturating_pow(arity)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grid points in lexicographic order, first parameter outermost.
    /// Yielded one at a time; the grid is never materialised.
    pub fn points(&self) -> GridPoints {
        let first = (self.lower <= self.upper)
            .then(|| vec![self.lower; spec(self.kernel).arity()]);
        GridPoints {
            lower: self.lower,
            upper: self.upper,
            next: first,
        }
    }
}

/// Odometer over the grid of a [`SweepPlan`].
#[derive(Debug, Clone)]
pub struct GridPoints {
    lower: i32,
    upper: i32,
    next: Option<Vec<i32>>,
}

impl Iterator for GridPoints {
    type Item = Vec<i32>;

    fn next(&mut self) -> Option<Vec<i32>> {
        let point = self.next.take()?;
        let mut successor = point.clone();
        for digit in successor.iter_mut().rev() {
            if *digit < self.upper {
                *digit += 1;
                self.next = Some(successor);
                return Some(point);
            }
            *digit = self.lower;
        }
        // every digit rolled over
        Some(point)
    }
}

/// One evaluated grid point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sample {
    pub inputs: Vec<Reading>,
    pub outcome: Outcome,
}

/// All samples of one kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KernelSweep {
    /// Kernel name, e.g. `bessj1`.
    pub kernel: String,
    /// Qualified benchmark path, e.g. `Bess/bessj1/NEq/newV`.
    pub path: String,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepReport {
    pub kernel_version: u32,
    pub semantics: Semantics,
    pub sweeps: Vec<KernelSweep>,
}

impl SweepReport {
    pub fn sample_count(&self) -> usize {
        self.sweeps.iter().map(|s| s.samples.len()).sum()
    }
}

/// Grid values as kernel inputs: ints under truncation, reals under float.
pub fn grid_reading(v: i32, semantics: Semantics) -> Reading {
    match semantics {
        Semantics::Truncating => Reading::Int(v),
        Semantics::Float => Reading::Real(f64::from(v)),
    }
}

pub fn run_plan(plan: &SweepPlan, semantics: Semantics) -> Result<KernelSweep, KernelError> {
    let spec = spec(plan.kernel);
    let samples = plan
        .points()
        .map(|point| {
            let inputs: Vec<Reading> =
                point.into_iter().map(|v| grid_reading(v, semantics)).collect();
            let outcome = evaluate(plan.kernel, semantics, &inputs)?;
            Ok(Sample { inputs, outcome })
        })
        .collect::<Result<Vec<_>, KernelError>>()?;

    Ok(KernelSweep {
        kernel: spec.name.to_string(),
        path: spec.qualified_path(),
        samples,
    })
}

/// Run every plan, in order, under one semantics.
pub fn run_sweep(plans: &[SweepPlan], semantics: Semantics) -> Result<SweepReport, KernelError> {
    let sweeps = plans
        .iter()
        .map(|plan| run_plan(plan, semantics))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SweepReport {
        kernel_version: KERNEL_VERSION,
        semantics,
        sweeps,
    })
}

/// Half-width of the golden grid for a kernel of the given arity.
pub fn golden_radius(arity: usize) -> i32 {
    match arity {
        1 => 20,
        2 => 6,
        _ => 4,
    }
}

/// The frozen grid behind `tests/golden/expected_hash.txt`: every kernel in
/// registry order, centred on zero.
pub fn golden_plans() -> Vec<SweepPlan> {
    KERNELS
        .iter()
        .map(|k| {
            let r = golden_radius(k.arity());
            SweepPlan::new(k.id, -r, r)
        })
        .collect()
}

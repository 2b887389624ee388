//! Replay orchestrator — re-evaluate every logged observation.
//!
//! Delegates all evaluation to the frozen kernels. No cached outcomes:
//! each observation is evaluated from its recorded inputs and semantics
//! and compared with the recorded outcome.

use std::path::Path;

use bench_kernels::registry::spec;
use bench_kernels::{evaluate, KernelError, Outcome, Reading};
use thiserror::Error;
use tracing::{info, warn};

use crate::observation::Observation;
use crate::observation_store::{ObservationStore, StoreError};
use crate::session::{load_observations, SessionError};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to load observation log: {0}")]
    Load(#[from] SessionError),

    #[error("observation {sequence} cannot be replayed: {source}")]
    Kernel {
        sequence: u64,
        #[source]
        source: KernelError,
    },
}

impl From<StoreError> for ReplayError {
    fn from(err: StoreError) -> Self {
        ReplayError::Load(SessionError::Store(err))
    }
}

/// A logged outcome that the current kernels no longer reproduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub sequence: u64,
    pub kernel: &'static str,
    pub inputs: Vec<Reading>,
    pub recorded: Outcome,
    pub replayed: Outcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub replayed: usize,
    pub mismatches: Vec<Mismatch>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

pub fn replay_observations(observations: &[Observation]) -> Result<ReplayReport, ReplayError> {
    let mut report = ReplayReport::default();
    for obs in observations {
        let replayed = evaluate(obs.kernel, obs.semantics, &obs.inputs).map_err(|source| {
            ReplayError::Kernel {
                sequence: obs.sequence,
                source,
            }
        })?;
        report.replayed += 1;
        if replayed != obs.outcome {
            let kernel = spec(obs.kernel).name;
            warn!(sequence = obs.sequence, kernel, recorded = ?obs.outcome, ?replayed, "replay drift");
            report.mismatches.push(Mismatch {
                sequence: obs.sequence,
                kernel,
                inputs: obs.inputs.clone(),
                recorded: obs.outcome,
                replayed,
            });
        }
    }
    info!(
        replayed = report.replayed,
        mismatches = report.mismatches.len(),
        "replay finished"
    );
    Ok(report)
}

/// Load the log at `path` and replay it.
pub fn replay_log(path: &Path) -> Result<ReplayReport, ReplayError> {
    let store = ObservationStore::open(path)?;
    let observations = load_observations(&store)?;
    replay_observations(&observations)
}

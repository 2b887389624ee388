//! A recorded kernel invocation.

use bench_kernels::{KernelId, Outcome, Reading, Semantics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Position in the log, starting at 1.
    pub sequence: u64,
    pub kernel: KernelId,
    pub semantics: Semantics,
    pub inputs: Vec<Reading>,
    pub outcome: Outcome,
}

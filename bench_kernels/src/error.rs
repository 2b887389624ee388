//! Benchmark Kernels v1 — Errors
//!
//! Caller mistakes only. Arithmetic faults are outcomes, see `arithmetic::Fault`.

use thiserror::Error;

use crate::domain::{Reading, Semantics};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("unknown kernel {0:?}")]
    UnknownKernel(String),

    #[error("unknown semantics {0:?} (expected truncating or float)")]
    UnknownSemantics(String),

    #[error("kernel {kernel} takes {expected} inputs, got {found}")]
    Arity {
        kernel: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("kernel {kernel}: input {param} = {reading} is not valid under {semantics} semantics")]
    InputKind {
        kernel: &'static str,
        param: &'static str,
        reading: Reading,
        semantics: Semantics,
    },
}

#![forbid(unsafe_code)]
#![deny(unused_assignments)]

/// Kernel v1 — Immutable. Behavioral changes require KERNEL_VERSION 2 and a
/// new golden hash.
pub const KERNEL_VERSION: u32 = 1;

pub mod arithmetic;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod kernels;
pub mod program;
pub mod registry;
pub mod sweep;
pub mod hashing;

pub use arithmetic::{Fault, Scalar};
pub use domain::{Outcome, Reading, Semantics};
pub use error::KernelError;
pub use registry::{evaluate, lookup, KernelId, KernelSpec, KERNELS};
pub use sweep::{run_sweep, SweepPlan, SweepReport};

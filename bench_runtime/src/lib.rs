#![forbid(unsafe_code)]

//! Benchmark Kernels v1 — Runtime
//!
//! Wraps the frozen kernels with the stdin harness, an observation log,
//! replay, report codec and drift detection.
//!
//! No kernel logic lives here — every evaluation is delegated to
//! `bench_kernels::evaluate`.

pub mod proto_types;
pub mod proto_bridge;
pub mod observation;
pub mod observation_store;
pub mod harness;
pub mod session;
pub mod replay;
pub mod report_codec;
pub mod drift;
pub mod logging;

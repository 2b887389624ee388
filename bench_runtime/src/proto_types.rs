//! Hand-written protobuf types for the observation log.
//!
//! Uses prost derive macros for encode/decode without prost-build.
//! Field numbers are part of the on-disk format; never renumber.

use prost::Message;

// ── Observation ────────────────────────────────────────────────

/// One kernel invocation as stored in the log.
#[derive(Clone, PartialEq, Message)]
pub struct ProtoObservation {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    /// Kernel name as accepted by `bench_kernels::lookup`.
    #[prost(string, tag = "2")]
    pub kernel: String,
    #[prost(enumeration = "ProtoSemantics", tag = "3")]
    pub semantics: i32,
    #[prost(message, repeated, tag = "4")]
    pub inputs: Vec<ProtoReading>,
    #[prost(message, optional, tag = "5")]
    pub outcome: Option<ProtoOutcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ProtoSemantics {
    Truncating = 0,
    Float = 1,
}

// ── Reading ────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoReading {
    #[prost(oneof = "ReadingKind", tags = "1, 2")]
    pub kind: Option<ReadingKind>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum ReadingKind {
    #[prost(sint32, tag = "1")]
    Int(i32),
    #[prost(double, tag = "2")]
    Real(f64),
}

// ── Outcome ────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoOutcome {
    #[prost(oneof = "OutcomeKind", tags = "1, 2, 3")]
    pub kind: Option<OutcomeKind>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum OutcomeKind {
    #[prost(message, tag = "1")]
    Value(ProtoReading),
    #[prost(message, tag = "2")]
    DomainError(ProtoReading),
    #[prost(message, tag = "3")]
    Fault(ProtoFault),
}

#[derive(Clone, PartialEq, Message)]
pub struct ProtoFault {
    #[prost(enumeration = "FaultCode", tag = "1")]
    pub code: i32,
    /// Only meaningful for `NoConvergence`.
    #[prost(uint32, tag = "2")]
    pub iterations: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum FaultCode {
    Unspecified = 0,
    DivisionByZero = 1,
    DivisionOverflow = 2,
    NoConvergence = 3,
}

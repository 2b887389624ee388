//! Proto ↔ kernel conversion bridge.
//!
//! Converts between the protobuf wire types (proto_types.rs) and the
//! kernel's observation types. Decoding is strict: a frame that names an
//! unknown kernel or carries an empty oneof is rejected, never defaulted.

use bench_kernels::{lookup, Fault, KernelError, Outcome, Reading, Semantics};
use bench_kernels::registry::spec;
use thiserror::Error;

use crate::observation::Observation;
use crate::proto_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("observation {sequence}: missing {field}")]
    MissingField { sequence: u64, field: &'static str },

    #[error("observation {sequence}: unknown {field} value {value}")]
    UnknownEnum {
        sequence: u64,
        field: &'static str,
        value: i32,
    },

    #[error("observation {sequence}: {source}")]
    Kernel {
        sequence: u64,
        #[source]
        source: KernelError,
    },
}

// ── Kernel → proto ─────────────────────────────────────────────

pub fn observation_to_proto(observation: &Observation) -> ProtoObservation {
    ProtoObservation {
        sequence: observation.sequence,
        kernel: spec(observation.kernel).name.to_string(),
        semantics: semantics_to_proto(observation.semantics) as i32,
        inputs: observation.inputs.iter().map(reading_to_proto).collect(),
        outcome: Some(outcome_to_proto(&observation.outcome)),
    }
}

fn semantics_to_proto(semantics: Semantics) -> ProtoSemantics {
    match semantics {
        Semantics::Truncating => ProtoSemantics::Truncating,
        Semantics::Float => ProtoSemantics::Float,
    }
}

fn reading_to_proto(reading: &Reading) -> ProtoReading {
    let kind = match *reading {
        Reading::Int(v) => ReadingKind::Int(v),
        Reading::Real(v) => ReadingKind::Real(v),
    };
    ProtoReading { kind: Some(kind) }
}

fn outcome_to_proto(outcome: &Outcome) -> ProtoOutcome {
    let kind = match outcome {
        Outcome::Value(r) => OutcomeKind::Value(reading_to_proto(r)),
        Outcome::DomainError { sentinel } => OutcomeKind::DomainError(reading_to_proto(sentinel)),
        Outcome::Fault(fault) => OutcomeKind::Fault(fault_to_proto(fault)),
    };
    ProtoOutcome { kind: Some(kind) }
}

fn fault_to_proto(fault: &Fault) -> ProtoFault {
    let (code, iterations) = match *fault {
        Fault::DivisionByZero => (FaultCode::DivisionByZero, 0),
        Fault::DivisionOverflow => (FaultCode::DivisionOverflow, 0),
        Fault::NoConvergence { iterations } => (FaultCode::NoConvergence, iterations),
    };
    ProtoFault {
        code: code as i32,
        iterations,
    }
}

// ── Proto → kernel ─────────────────────────────────────────────

pub fn proto_to_observation(proto: &ProtoObservation) -> Result<Observation, BridgeError> {
    let sequence = proto.sequence;
    let kernel = lookup(&proto.kernel)
        .map_err(|source| BridgeError::Kernel { sequence, source })?
        .id;

    let semantics = match ProtoSemantics::try_from(proto.semantics) {
        Ok(ProtoSemantics::Truncating) => Semantics::Truncating,
        Ok(ProtoSemantics::Float) => Semantics::Float,
        Err(_) => {
            return Err(BridgeError::UnknownEnum {
                sequence,
                field: "semantics",
                value: proto.semantics,
            })
        }
    };

    let inputs = proto
        .inputs
        .iter()
        .map(|r| proto_to_reading(sequence, r))
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = proto
        .outcome
        .as_ref()
        .and_then(|o| o.kind.as_ref())
        .ok_or(BridgeError::MissingField { sequence, field: "outcome" })?;
    let outcome = match outcome {
        OutcomeKind::Value(r) => Outcome::Value(proto_to_reading(sequence, r)?),
        OutcomeKind::DomainError(r) => Outcome::DomainError {
            sentinel: proto_to_reading(sequence, r)?,
        },
        OutcomeKind::Fault(f) => Outcome::Fault(proto_to_fault(sequence, f)?),
    };

    Ok(Observation {
        sequence,
        kernel,
        semantics,
        inputs,
        outcome,
    })
}

fn proto_to_reading(sequence: u64, proto: &ProtoReading) -> Result<Reading, BridgeError> {
    match proto.kind {
        Some(ReadingKind::Int(v)) => Ok(Reading::Int(v)),
        Some(ReadingKind::Real(v)) => Ok(Reading::Real(v)),
        None => Err(BridgeError::MissingField { sequence, field: "reading" }),
    }
}

fn proto_to_fault(sequence: u64, proto: &ProtoFault) -> Result<Fault, BridgeError> {
    match FaultCode::try_from(proto.code) {
        Ok(FaultCode::DivisionByZero) => Ok(Fault::DivisionByZero),
        Ok(FaultCode::DivisionOverflow) => Ok(Fault::DivisionOverflow),
        Ok(FaultCode::NoConvergence) => Ok(Fault::NoConvergence {
            iterations: proto.iterations,
        }),
        Ok(FaultCode::Unspecified) | Err(_) => Err(BridgeError::UnknownEnum {
            sequence,
            field: "fault code",
            value: proto.code,
        }),
    }
}

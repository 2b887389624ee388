//! Benchmark Kernels v1 — Canonical Hashing
//!
//! Deterministic canonical serialization + SHA-256 hashing of sweep reports.
//! Produces byte-identical output across platforms.
//!
//! Rules:
//!   - Field order: kernel_version, semantics, sweeps
//!   - Each sweep: kernel, path, samples; each sample: inputs, outcome
//!   - Int readings are JSON numbers
//!   - Real readings are `"0x"` + 16 lowercase hex digits of the IEEE bits
//!   - Outcomes: `{"value":r}`, `{"domain_error":r}` or `{"fault":"<code>"}`
//!   - UTF-8 JSON, no whitespace, no JSON float

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::{Outcome, Reading};
use crate::sweep::SweepReport;

/// Canonical serialization of a report to UTF-8 JSON bytes.
pub fn canonical_serialize(report: &SweepReport) -> Vec<u8> {
    let value = build_canonical_value(report);
    // A Value built from strings, integers and maps always serializes.
    serde_json::to_vec(&value).expect("canonical_serialize: JSON serialization failed")
}

/// SHA-256 of the canonical serialization. Lowercase hex string.
pub fn canonical_hash(report: &SweepReport) -> String {
    hex_digest(&canonical_serialize(report))
}

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}

pub fn canonical_reading(reading: &Reading) -> Value {
    match reading {
        Reading::Int(v) => Value::Number((*v).into()),
        Reading::Real(v) => Value::String(format!("0x{:016x}", v.to_bits())),
    }
}

pub fn canonical_outcome(outcome: &Outcome) -> Value {
    let mut map = Map::new();
    match outcome {
        Outcome::Value(r) => {
            map.insert("value".to_string(), canonical_reading(r));
        }
        Outcome::DomainError { sentinel } => {
            map.insert("domain_error".to_string(), canonical_reading(sentinel));
        }
        Outcome::Fault(fault) => {
            map.insert("fault".to_string(), Value::String(fault.code().to_string()));
        }
    }
    Value::Object(map)
}

/// Build the canonical serde_json::Value in strict field order.
/// serde_json::Map keeps insertion order (`preserve_order`).
fn build_canonical_value(report: &SweepReport) -> Value {
    let sweeps = report
        .sweeps
        .iter()
        .map(|sweep| {
            let samples = sweep
                .samples
                .iter()
                .map(|sample| {
                    let mut s = Map::new();
                    s.insert(
                        "inputs".to_string(),
                        Value::Array(sample.inputs.iter().map(canonical_reading).collect()),
                    );
                    s.insert("outcome".to_string(), canonical_outcome(&sample.outcome));
                    Value::Object(s)
                })
                .collect();

            let mut k = Map::new();
            k.insert("kernel".to_string(), Value::String(sweep.kernel.clone()));
            k.insert("path".to_string(), Value::String(sweep.path.clone()));
            k.insert("samples".to_string(), Value::Array(samples));
            Value::Object(k)
        })
        .collect();

    // kernel_version first: it is part of the report identity.
    let mut root = Map::new();
    root.insert(
        "kernel_version".to_string(),
        Value::Number(report.kernel_version.into()),
    );
    root.insert(
        "semantics".to_string(),
        Value::String(report.semantics.as_str().to_string()),
    );
    root.insert("sweeps".to_string(), Value::Array(sweeps));
    Value::Object(root)
}

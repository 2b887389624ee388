//! Report Codec — strict SweepReport encoder/decoder.
//!
//! Pure codec layer. No timestamps, no envelope.
//!
//! - `encode_report`:  SweepReport → serde JSON string
//! - `decode_report`:  JSON string → SweepReport (strict, no defaults)
//! - `restore_report`: decode + consistency validation
//! - `export_report_to_file` / `import_report_from_file`: file I/O
//! - `report_hash`:    SHA-256 of the serde JSON (lowercase hex)

use std::fs;
use std::io;
use std::path::Path;

use bench_kernels::hashing::hex_digest;
use bench_kernels::sweep::SweepReport;
use bench_kernels::{lookup, KERNEL_VERSION};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Well-formed JSON describing a report these kernels could not have produced.
    #[error("inconsistent report: {0}")]
    Inconsistent(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Encoder / decoder
// ---------------------------------------------------------------------------

pub fn encode_report(report: &SweepReport) -> Result<String, CodecError> {
    serde_json::to_string(report).map_err(CodecError::Serialization)
}

/// Strict: `deny_unknown_fields` on every report type, missing fields fail.
/// No consistency checks; use `restore_report` for untrusted input.
pub fn decode_report(json: &str) -> Result<SweepReport, CodecError> {
    serde_json::from_str(json).map_err(CodecError::Deserialization)
}

/// Decode and check the report against the kernel registry.
pub fn restore_report(json: &str) -> Result<SweepReport, CodecError> {
    let report = decode_report(json)?;
    validate_report(&report)?;
    Ok(report)
}

fn validate_report(report: &SweepReport) -> Result<(), CodecError> {
    if report.kernel_version != KERNEL_VERSION {
        return Err(CodecError::Inconsistent(format!(
            "kernel_version {} (expected {})",
            report.kernel_version, KERNEL_VERSION
        )));
    }
    for sweep in &report.sweeps {
        let spec = lookup(&sweep.kernel).map_err(|e| CodecError::Inconsistent(e.to_string()))?;
        if sweep.path != spec.qualified_path() {
            return Err(CodecError::Inconsistent(format!(
                "kernel {} has path {} (expected {})",
                sweep.kernel,
                sweep.path,
                spec.qualified_path()
            )));
        }
        if let Some(bad) = sweep.samples.iter().find(|s| s.inputs.len() != spec.arity()) {
            return Err(CodecError::Inconsistent(format!(
                "kernel {} sample with {} inputs (arity {})",
                sweep.kernel,
                bad.inputs.len(),
                spec.arity()
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Creates parent directories if needed. Byte-for-byte identical across
/// identical reports.
pub fn export_report_to_file(report: &SweepReport, path: &Path) -> Result<(), CodecError> {
    let json = encode_report(report)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json.as_bytes())?;
    Ok(())
}

pub fn import_report_from_file(path: &Path) -> Result<SweepReport, CodecError> {
    let content = fs::read_to_string(path)?;
    restore_report(&content)
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// SHA-256 of the serde JSON encoding.
///
/// NOTE: not the canonical hash from `bench_kernels::hashing`, which has
/// its own field layout. This one guards exported files against edits.
pub fn report_hash(report: &SweepReport) -> Result<String, CodecError> {
    let json = encode_report(report)?;
    Ok(hex_digest(&Sha256::digest(json.as_bytes())))
}

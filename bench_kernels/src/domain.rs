//! Benchmark Kernels v1 — Core Domain Types
//!
//! Pure data. Kernel bodies live in `kernels`, dispatch in `registry`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arithmetic::{Fault, Scalar};
use crate::error::KernelError;

// ── Semantics ──────────────────────────────────────────────────────

/// How the variables of a kernel body are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semantics {
    /// 32-bit `int` everywhere, as compiled.
    #[default]
    Truncating,
    /// Every variable widened to `f64`.
    Float,
}

impl Semantics {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semantics::Truncating => "truncating",
            Semantics::Float => "float",
        }
    }
}

impl fmt::Display for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semantics {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "truncating" => Ok(Semantics::Truncating),
            "float" => Ok(Semantics::Float),
            other => Err(KernelError::UnknownSemantics(other.to_string())),
        }
    }
}

// ── Readings ───────────────────────────────────────────────────────

/// One scalar flowing into or out of a kernel.
///
/// Reals compare by bit pattern: a NaN reading equals itself, and `0.0`
/// differs from `-0.0`. Serialized reals carry their raw bits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Int(i32),
    Real(#[serde(with = "real_bits")] f64),
}

impl PartialEq for Reading {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Reading::Int(a), Reading::Int(b)) => a == b,
            (Reading::Real(a), Reading::Real(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Reading {}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Int(v) => write!(f, "{v}"),
            Reading::Real(v) => write!(f, "{v}"),
        }
    }
}

mod real_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(v.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        u64::deserialize(d).map(f64::from_bits)
    }
}

// ── Outcomes ───────────────────────────────────────────────────────

/// Result of a kernel body before it is erased to a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation<T> {
    Value(T),
    /// The kernel's own early-return branch for out-of-domain input.
    DomainError { sentinel: T },
}

/// Observable outcome of one kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Value(Reading),
    DomainError { sentinel: Reading },
    Fault(Fault),
}

impl Outcome {
    pub fn from_evaluation<T: Scalar>(result: Result<Evaluation<T>, Fault>) -> Self {
        match result {
            Ok(Evaluation::Value(v)) => Outcome::Value(v.reading()),
            Ok(Evaluation::DomainError { sentinel }) => Outcome::DomainError {
                sentinel: sentinel.reading(),
            },
            Err(fault) => Outcome::Fault(fault),
        }
    }

    /// What the benchmark program prints after `Result: `.
    /// Sentinels are printed like any other value; faults print nothing.
    pub fn printed(&self) -> Option<Reading> {
        match self {
            Outcome::Value(r) => Some(*r),
            Outcome::DomainError { sentinel } => Some(*sentinel),
            Outcome::Fault(_) => None,
        }
    }

    pub fn fault(&self) -> Option<Fault> {
        match self {
            Outcome::Fault(f) => Some(*f),
            _ => None,
        }
    }
}

// ── Benchmark identity ─────────────────────────────────────────────

/// Top-level directory of a benchmark pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Bess,
    Ell,
    Ran,
    Caldat,
    Gam,
    Power,
}

impl Family {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Family::Bess => "Bess",
            Family::Ell => "Ell",
            Family::Ran => "Ran",
            Family::Caldat => "caldat",
            Family::Gam => "gam",
            Family::Power => "power",
        }
    }
}

/// Whether the old and new versions of a pair are behaviorally equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairClass {
    Eq,
    NEq,
}

impl PairClass {
    pub fn dir_name(&self) -> &'static str {
        match self {
            PairClass::Eq => "Eq",
            PairClass::NEq => "NEq",
        }
    }
}

/// Which side of the pair this repository carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    Old,
    New,
}

impl Version {
    pub fn tag(&self) -> &'static str {
        match self {
            Version::Old => "oldV",
            Version::New => "newV",
        }
    }
}

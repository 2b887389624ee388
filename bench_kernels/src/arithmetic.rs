//! Benchmark Kernels v1 — Arithmetic Model
//!
//! The benchmark programs declare every variable as a 32-bit `int`, including
//! the ones that hold fractional constants. Each kernel body is written once,
//! generic over [`Scalar`]:
//!
//!   - `i32` reproduces the compiled programs bit for bit
//!     (wrapping `int` arithmetic, truncating assignment, faulting division)
//!   - `f64` is the widened reading, every variable a `double`
//!
//! Conversion rules for `i32`:
//!   - constant initializers are folded by the compiler and saturate
//!     (`int BIG = 3.0e37;` is `i32::MAX`)
//!   - runtime `double -> int` assignment truncates toward zero; NaN or an
//!     out-of-range value yields `i32::MIN` (`cvttsd2si`)
//!   - integer division by zero and `i32::MIN / -1` are faults (SIGFPE)

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Reading, Semantics};

/// Exclusive bounds of the doubles that convert to `i32` without overflow.
const INT_LOWER_EXCLUSIVE: f64 = -2_147_483_649.0;
const INT_UPPER_EXCLUSIVE: f64 = 2_147_483_648.0;

// ---------------------------------------------------------------------------
// Faults
// ---------------------------------------------------------------------------

/// Arithmetic fault raised inside a kernel body.
///
/// Faults are part of a kernel's observable outcome: the compiled program
/// dies with SIGFPE where the Rust kernel returns one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("integer division overflow (i32::MIN / -1)")]
    DivisionOverflow,
    #[error("no convergence after {iterations} iterations")]
    NoConvergence { iterations: u32 },
}

impl Fault {
    /// Stable snake_case name, used in canonical serialization.
    pub fn code(&self) -> &'static str {
        match self {
            Fault::DivisionByZero => "division_by_zero",
            Fault::DivisionOverflow => "division_overflow",
            Fault::NoConvergence { .. } => "no_convergence",
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Runtime `double -> int` assignment.
pub fn truncate_runtime(v: f64) -> i32 {
    if v > INT_LOWER_EXCLUSIVE && v < INT_UPPER_EXCLUSIVE {
        v as i32
    } else {
        // NaN lands here as well: both comparisons are false.
        i32::MIN
    }
}

/// Compile-time folding of a constant initializer. Saturates, like `as`.
pub fn fold_literal(v: f64) -> i32 {
    v as i32
}

/// `int / int`, truncating toward zero.
pub fn checked_quot(a: i32, b: i32) -> Result<i32, Fault> {
    if b == 0 {
        return Err(Fault::DivisionByZero);
    }
    a.checked_div(b).ok_or(Fault::DivisionOverflow)
}

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// A variable of a kernel body.
///
/// Operations named after arithmetic (`plus`, `times`, ...) are the
/// `int op int` operators of the source. Mixed expressions promote through
/// [`Scalar::real`] and come back through [`Scalar::from_real`].
pub trait Scalar: Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display {
    const SEMANTICS: Semantics;

    /// Value of a constant initializer such as `int EPS = 1e-14;`.
    fn literal(v: f64) -> Self;
    /// Assignment of a runtime `double` expression.
    fn from_real(v: f64) -> Self;
    fn from_int(v: i32) -> Self;
    /// Promotion to `double`.
    fn real(self) -> f64;

    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn over(self, rhs: Self) -> Result<Self, Fault>;
    fn negate(self) -> Self;

    fn reading(self) -> Reading;
    /// Accepts a reading as a kernel input; `None` if it cannot be one.
    fn from_reading(reading: Reading) -> Option<Self>;

    /// `++v`
    fn incremented(self) -> Self {
        self.plus(Self::from_int(1))
    }

    /// `--v`
    fn decremented(self) -> Self {
        self.minus(Self::from_int(1))
    }
}

impl Scalar for i32 {
    const SEMANTICS: Semantics = Semantics::Truncating;

    fn literal(v: f64) -> Self {
        fold_literal(v)
    }

    fn from_real(v: f64) -> Self {
        truncate_runtime(v)
    }

    fn from_int(v: i32) -> Self {
        v
    }

    fn real(self) -> f64 {
        f64::from(self)
    }

    fn plus(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    fn minus(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    fn times(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    fn over(self, rhs: Self) -> Result<Self, Fault> {
        checked_quot(self, rhs)
    }

    fn negate(self) -> Self {
        self.wrapping_neg()
    }

    fn reading(self) -> Reading {
        Reading::Int(self)
    }

    fn from_reading(reading: Reading) -> Option<Self> {
        match reading {
            Reading::Int(v) => Some(v),
            Reading::Real(_) => None,
        }
    }
}

impl Scalar for f64 {
    const SEMANTICS: Semantics = Semantics::Float;

    fn literal(v: f64) -> Self {
        v
    }

    fn from_real(v: f64) -> Self {
        v
    }

    fn from_int(v: i32) -> Self {
        f64::from(v)
    }

    fn real(self) -> f64 {
        self
    }

    fn plus(self, rhs: Self) -> Self {
        self + rhs
    }

    fn minus(self, rhs: Self) -> Self {
        self - rhs
    }

    fn times(self, rhs: Self) -> Self {
        self * rhs
    }

    fn over(self, rhs: Self) -> Result<Self, Fault> {
        Ok(self / rhs)
    }

    fn negate(self) -> Self {
        -self
    }

    fn reading(self) -> Reading {
        Reading::Real(self)
    }

    fn from_reading(reading: Reading) -> Option<Self> {
        match reading {
            Reading::Int(v) => Some(f64::from(v)),
            Reading::Real(v) => Some(v),
        }
    }
}

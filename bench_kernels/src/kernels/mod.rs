//! Kernel bodies, one module per benchmark family.
//!
//! Every kernel is `fn(inputs..) -> Result<Evaluation<T>, Fault>` generic over
//! [`Scalar`](crate::arithmetic::Scalar). Expressions keep the operand order
//! and grouping of the compiled programs, so the `f64` results round the same
//! way and the `i32` results truncate at the same points.

pub mod bessel;
pub mod branch;
pub mod calendar;
pub mod elliptic;
pub mod gamma;
pub mod power;
pub mod random;

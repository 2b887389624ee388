//! Benchmark Kernels v1 — Registry and Dispatcher
//!
//! One static descriptor per benchmark program, and the single entry point
//! that checks an input tuple and evaluates a kernel under a semantics.

use serde::{Deserialize, Serialize};

use crate::arithmetic::Scalar;
use crate::domain::{Family, Outcome, PairClass, Reading, Semantics, Version};
use crate::error::KernelError;
use crate::kernels::{bessel, calendar, elliptic, gamma, power, random};

use crate::domain::Family as F;
use crate::domain::PairClass as C;
use crate::domain::Version as V;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelId {
    Bessj1,
    Probks,
    Bessi1,
    Rc,
    Plgndr,
    Ran,
    RanzeroEq,
    RanzeroNeq,
    Gammln,
    Julday,
    Betacf,
    Gcf,
    Ei,
    Erfcc,
    Expint,
    Power,
}

/// Static description of one benchmark program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelSpec {
    pub id: KernelId,
    /// Command-line name, e.g. `ranzero-neq`.
    pub name: &'static str,
    pub family: Family,
    /// Directory of the pair under its family, e.g. `ranzero`.
    pub routine: &'static str,
    pub class: PairClass,
    pub version: Version,
    /// Parameter names in input order.
    pub params: &'static [&'static str],
}

impl KernelSpec {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Benchmark pair path, e.g. `Ran/ranzero/NEq`.
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.family.dir_name(),
            self.routine,
            self.class.dir_name()
        )
    }

    /// Pair path plus the version carried here, e.g. `Ran/ranzero/NEq/newV`.
    pub fn qualified_path(&self) -> String {
        format!("{}/{}", self.path(), self.version.tag())
    }
}

const fn kernel(
    id: KernelId,
    name: &'static str,
    family: Family,
    routine: &'static str,
    class: PairClass,
    version: Version,
    params: &'static [&'static str],
) -> KernelSpec {
    KernelSpec {
        id,
        name,
        family,
        routine,
        class,
        version,
        params,
    }
}

/// Every kernel, in canonical order.
pub static KERNELS: [KernelSpec; 16] = [
    kernel(KernelId::Bessj1, "bessj1", F::Bess, "bessj1", C::NEq, V::New, &["x"]),
    kernel(KernelId::Probks, "probks", F::Bess, "probks", C::NEq, V::Old, &["alam"]),
    kernel(KernelId::Bessi1, "bessi1", F::Bess, "bessi1", C::Eq, V::New, &["x"]),
    kernel(KernelId::Rc, "rc", F::Ell, "rc", C::NEq, V::Old, &["x", "y"]),
    kernel(KernelId::Plgndr, "plgndr", F::Ell, "plgndr", C::NEq, V::New, &["l", "m", "x"]),
    kernel(KernelId::Ran, "ran", F::Ran, "ran", C::NEq, V::New, &["idum"]),
    kernel(KernelId::RanzeroEq, "ranzero-eq", F::Ran, "ranzero", C::Eq, V::New, &["idum"]),
    kernel(KernelId::RanzeroNeq, "ranzero-neq", F::Ran, "ranzero", C::NEq, V::New, &["idum"]),
    kernel(KernelId::Gammln, "gammln", F::Ran, "gammln", C::NEq, V::Old, &["xx"]),
    kernel(KernelId::Julday, "julday", F::Caldat, "julday", C::NEq, V::New, &["mm", "id", "iyyy"]),
    kernel(KernelId::Betacf, "betacf", F::Gam, "betacf", C::Eq, V::New, &["a", "b", "x"]),
    kernel(KernelId::Gcf, "gcf", F::Gam, "gcf", C::Eq, V::New, &["a", "x", "gln"]),
    kernel(KernelId::Ei, "ei", F::Gam, "ei", C::NEq, V::New, &["x"]),
    kernel(KernelId::Erfcc, "erfcc", F::Gam, "erfcc", C::NEq, V::New, &["x"]),
    kernel(KernelId::Expint, "expint", F::Gam, "expint", C::NEq, V::New, &["n", "x"]),
    kernel(KernelId::Power, "power", F::Power, "test", C::Eq, V::New, &["x", "y"]),
];

pub fn spec(id: KernelId) -> &'static KernelSpec {
    // KERNELS is laid out in KernelId declaration order.
    &KERNELS[id as usize]
}

/// Find a kernel by name (`ranzero-neq`), pair path (`Ran/ranzero/NEq`) or
/// qualified path (`Ran/ranzero/NEq/newV`).
pub fn lookup(key: &str) -> Result<&'static KernelSpec, KernelError> {
    KERNELS
        .iter()
        .find(|k| k.name == key || k.path() == key || k.qualified_path() == key)
        .ok_or_else(|| KernelError::UnknownKernel(key.to_string()))
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Evaluate kernel *id* on *inputs* under *semantics*.
///
/// Arity and input kind are checked here; everything that happens inside
/// the kernel body, faults included, is reported through the [`Outcome`].
pub fn evaluate(
    id: KernelId,
    semantics: Semantics,
    inputs: &[Reading],
) -> Result<Outcome, KernelError> {
    let spec = spec(id);
    if inputs.len() != spec.arity() {
        return Err(KernelError::Arity {
            kernel: spec.name,
            expected: spec.arity(),
            found: inputs.len(),
        });
    }

    let outcome = match semantics {
        Semantics::Truncating => dispatch(id, &convert::<i32>(spec, inputs)?),
        Semantics::Float => dispatch(id, &convert::<f64>(spec, inputs)?),
    };
    Ok(outcome)
}

fn convert<T: Scalar>(spec: &KernelSpec, inputs: &[Reading]) -> Result<Vec<T>, KernelError> {
    inputs
        .iter()
        .zip(spec.params)
        .map(|(reading, param)| {
            T::from_reading(*reading).ok_or_else(|| KernelError::InputKind {
                kernel: spec.name,
                param: *param,
                reading: *reading,
                semantics: T::SEMANTICS,
            })
        })
        .collect()
}

/// `a` has exactly `spec(id).arity()` elements.
fn dispatch<T: Scalar>(id: KernelId, a: &[T]) -> Outcome {
    let result = match id {
        KernelId::Bessj1 => bessel::bessj1(a[0]),
        KernelId::Probks => bessel::probks(a[0]),
        KernelId::Bessi1 => bessel::bessi1(a[0]),
        KernelId::Rc => elliptic::rc(a[0], a[1]),
        KernelId::Plgndr => elliptic::plgndr(a[0], a[1], a[2]),
        KernelId::Ran => random::ran(a[0]),
        KernelId::RanzeroEq => random::ranzero_eq(a[0]),
        KernelId::RanzeroNeq => random::ranzero_neq(a[0]),
        KernelId::Gammln => random::gammln(a[0]),
        KernelId::Julday => calendar::julday(a[0], a[1], a[2]),
        KernelId::Betacf => gamma::betacf(a[0], a[1], a[2]),
        KernelId::Gcf => gamma::gcf(a[0], a[1], a[2]),
        KernelId::Ei => gamma::ei(a[0]),
        KernelId::Erfcc => gamma::erfcc(a[0]),
        KernelId::Expint => gamma::expint(a[0], a[1]),
        KernelId::Power => power::power(a[0], a[1]),
    };
    Outcome::from_evaluation(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::Fault;

    #[test]
    fn test_table_order_matches_ids() {
        for (i, k) in KERNELS.iter().enumerate() {
            assert_eq!(k.id as usize, i, "{}", k.name);
        }
    }

    #[test]
    fn test_lookup_by_name_and_path() {
        assert_eq!(lookup("ranzero-neq").unwrap().id, KernelId::RanzeroNeq);
        assert_eq!(lookup("Ran/ranzero/Eq").unwrap().id, KernelId::RanzeroEq);
        assert_eq!(lookup("Bess/probks/NEq/oldV").unwrap().id, KernelId::Probks);
        assert_eq!(lookup("power/test/Eq").unwrap().id, KernelId::Power);
        assert_eq!(
            lookup("Bess/probks/NEq/newV"),
            Err(KernelError::UnknownKernel("Bess/probks/NEq/newV".into()))
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(spec(KernelId::Julday).path(), "caldat/julday/NEq");
        assert_eq!(spec(KernelId::Gammln).qualified_path(), "Ran/gammln/NEq/oldV");
    }

    #[test]
    fn test_evaluate_checks_arity() {
        let err = evaluate(KernelId::Power, Semantics::Truncating, &[Reading::Int(3)]);
        assert_eq!(
            err,
            Err(KernelError::Arity { kernel: "power", expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_evaluate_checks_input_kind() {
        let err = evaluate(KernelId::Ei, Semantics::Truncating, &[Reading::Real(1.5)]);
        assert!(matches!(err, Err(KernelError::InputKind { param: "x", .. })));
        // Float accepts ints by widening
        let ok = evaluate(KernelId::Power, Semantics::Float, &[Reading::Int(3), Reading::Int(9)]);
        assert_eq!(ok, Ok(Outcome::Value(Reading::Real(3.0))));
    }

    #[test]
    fn test_evaluate_outcomes() {
        let t = Semantics::Truncating;
        assert_eq!(
            evaluate(KernelId::Power, t, &[Reading::Int(3), Reading::Int(10)]),
            Ok(Outcome::Value(Reading::Int(13)))
        );
        assert_eq!(
            evaluate(KernelId::Rc, t, &[Reading::Int(-1), Reading::Int(1)]),
            Ok(Outcome::DomainError { sentinel: Reading::Int(-10000) })
        );
        assert_eq!(
            evaluate(KernelId::Rc, t, &[Reading::Int(1), Reading::Int(1)]),
            Ok(Outcome::Fault(Fault::DivisionByZero))
        );
    }
}

//! Fixtures recorded from the compiled benchmark programs.
//!
//! Each fixture is one run: kernel name, the integers fed on stdin, the line
//! printed (empty if the program died) and the exit status. Float fixtures
//! come from builds with every `int` widened to `double` and keep only the
//! printed value.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Reading, Semantics};
use crate::error::KernelError;
use crate::program::{render, ProgramOutput};
use crate::registry::{evaluate, lookup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub kernel: String,
    pub inputs: Vec<i32>,
    pub stdout: String,
    pub status: i32,
}

impl Fixture {
    pub fn expected(&self) -> ProgramOutput {
        ProgramOutput {
            stdout: (!self.stdout.is_empty()).then(|| self.stdout.clone()),
            status: self.status,
        }
    }
}

/// Relative error allowed between a float run and the widened program.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatFixture {
    pub kernel: String,
    pub inputs: Vec<f64>,
    /// The `%.17g` text after `Result: `, e.g. `0.5`, `-nan` or `inf`.
    pub result: String,
}

impl FloatFixture {
    pub fn expected(&self) -> Option<f64> {
        self.result.parse().ok()
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

pub fn load_fixtures(path: &Path) -> Result<Vec<Fixture>, FixtureError> {
    load_json(path)
}

pub fn load_float_fixtures(path: &Path) -> Result<Vec<FloatFixture>, FixtureError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FixtureError> {
    let data = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| FixtureError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Re-run a fixture through the truncating kernels.
pub fn replay_fixture(fixture: &Fixture) -> Result<ProgramOutput, FixtureError> {
    let spec = lookup(&fixture.kernel)?;
    let inputs: Vec<Reading> = fixture.inputs.iter().copied().map(Reading::Int).collect();
    let outcome = evaluate(spec.id, Semantics::Truncating, &inputs)?;
    Ok(render(&outcome))
}

/// Re-run a float fixture; `None` when the kernel faulted instead of printing.
pub fn replay_float_fixture(fixture: &FloatFixture) -> Result<Option<f64>, FixtureError> {
    let spec = lookup(&fixture.kernel)?;
    let inputs: Vec<Reading> = fixture.inputs.iter().copied().map(Reading::Real).collect();
    let outcome = evaluate(spec.id, Semantics::Float, &inputs)?;
    Ok(outcome.printed().map(|reading| match reading {
        Reading::Real(v) => v,
        Reading::Int(v) => f64::from(v),
    }))
}

/// Equal within [`FLOAT_TOLERANCE`]; NaN agrees only with NaN, whatever its sign.
pub fn float_agrees(expected: f64, actual: f64) -> bool {
    if expected.is_nan() || actual.is_nan() {
        return expected.is_nan() && actual.is_nan();
    }
    if expected.is_infinite() || actual.is_infinite() {
        return expected == actual;
    }
    expected == actual
        || (expected - actual).abs() <= FLOAT_TOLERANCE * expected.abs().max(actual.abs())
}

//! I/O harness — what each benchmark program does around its kernel.
//!
//! Read one line of whitespace-separated scalars, evaluate, print
//! `Result: <value>`. The arity is strict: a missing, surplus or
//! unparsable token is an error rather than a silently defaulted input.

use std::io::{self, BufRead, Write};

use bench_kernels::program::{render, ProgramOutput};
use bench_kernels::{evaluate, KernelError, KernelSpec, Outcome, Reading, Semantics};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("invalid input for {kernel}: {reason}")]
    InvalidInput {
        kernel: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Everything observable about one program run.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessRun {
    pub inputs: Vec<Reading>,
    pub outcome: Outcome,
    pub output: ProgramOutput,
}

/// Parse one input line into the kernel's input tuple.
///
/// Under truncating semantics every token must be a 32-bit integer; under
/// float semantics any `f64` literal is accepted.
pub fn parse_inputs(
    spec: &KernelSpec,
    semantics: Semantics,
    line: &str,
) -> Result<Vec<Reading>, HarnessError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != spec.arity() {
        return Err(HarnessError::InvalidInput {
            kernel: spec.name,
            reason: format!(
                "expected {} value(s) ({}), got {}",
                spec.arity(),
                spec.params.join(" "),
                tokens.len()
            ),
        });
    }

    tokens
        .iter()
        .zip(spec.params)
        .map(|(token, param)| {
            let parsed = match semantics {
                Semantics::Truncating => token.parse::<i32>().ok().map(Reading::Int),
                Semantics::Float => token.parse::<f64>().ok().map(Reading::Real),
            };
            parsed.ok_or_else(|| HarnessError::InvalidInput {
                kernel: spec.name,
                reason: format!("{param} = {token:?} is not a valid {semantics} input"),
            })
        })
        .collect()
}

/// Read one line; a closed stdin reads as an empty line.
pub fn read_line<R: BufRead>(mut input: R) -> Result<String, HarnessError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Run a benchmark program: read its inputs, evaluate, write its stdout.
pub fn run_program<R: BufRead, W: Write>(
    spec: &KernelSpec,
    semantics: Semantics,
    input: R,
    mut out: W,
) -> Result<HarnessRun, HarnessError> {
    let line = read_line(input)?;
    let inputs = parse_inputs(spec, semantics, &line)?;
    let outcome = evaluate(spec.id, semantics, &inputs)?;
    debug!(kernel = spec.name, %semantics, ?inputs, ?outcome, "evaluated");

    let output = render(&outcome);
    match (&output.stdout, outcome.fault()) {
        (Some(line), _) => {
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        (None, Some(fault)) => warn!(kernel = spec.name, %fault, "arithmetic fault"),
        (None, None) => {}
    }

    Ok(HarnessRun {
        inputs,
        outcome,
        output,
    })
}

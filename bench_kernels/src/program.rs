//! What a benchmark program does with an outcome: one stdout line and an
//! exit status.

use crate::domain::Outcome;

/// Exit status of a program killed by SIGFPE, as a shell reports it.
pub const FAULT_EXIT_STATUS: i32 = 128 + 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOutput {
    /// The line printed to stdout, without its newline. `None` when the
    /// program died before printing.
    pub stdout: Option<String>,
    pub status: i32,
}

pub fn render(outcome: &Outcome) -> ProgramOutput {
    match outcome.printed() {
        Some(reading) => ProgramOutput {
            stdout: Some(format!("Result: {reading}")),
            status: 0,
        },
        None => ProgramOutput {
            stdout: None,
            status: FAULT_EXIT_STATUS,
        },
    }
}

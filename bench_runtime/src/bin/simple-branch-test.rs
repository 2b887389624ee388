//! simple-branch-test — reads `x` from argv like C `atoi`, prints the
//! branch taken and exits with the result.
//!
//! Only `argv[1]` is read and the rest are ignored, so the binary takes no
//! flags of its own: `-h` reads as 0 like any other junk. Logging is set
//! through `RUST_LOG`.

use clap::Parser;
use tracing::debug;

use bench_kernels::kernels::branch::{atoi, simple_branch};
use bench_runtime::logging::{init_logging, DEFAULT_LOG_LEVEL};

#[derive(Parser)]
#[command(name = "simple-branch-test")]
#[command(about = "Branch on an integer argument and exit with the result")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Input value first; parsed like C `atoi`, so junk reads as 0
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    argv: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(DEFAULT_LOG_LEVEL);

    let x = cli.argv.first().map(|arg| atoi(arg)).unwrap_or(0);
    let outcome = simple_branch(x);
    debug!(x, band = ?outcome.band, result = outcome.result, ignored = cli.argv.len().saturating_sub(1), "branch");

    println!("{outcome}");
    std::process::exit(outcome.result);
}

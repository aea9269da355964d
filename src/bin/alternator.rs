//! Prints `routine` and `main` in strict alternation, ten times each.
//!
//! Command-line arguments are ignored. On any fatal error a single
//! `<operation> : <description>` line goes to stderr and the process exits
//! with status 1.

use alternator::cli::{ExitCode, write_diagnostic};
use alternator::{Alternator, AlternatorConfig, StdoutSink};
use std::io;

fn main() {
    let alternator = Alternator::new(AlternatorConfig::default());
    if let Err(err) = alternator.run(&StdoutSink::new()) {
        // stderr is the last channel; a failed write there has nowhere to go.
        let _ = write_diagnostic(io::stderr().lock(), &err);
        std::process::exit(err.exit_code());
    }
    std::process::exit(ExitCode::SUCCESS);
}

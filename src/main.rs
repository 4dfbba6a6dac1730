//! expedientes CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. Failures exit with
//! a non-zero status.

use expedientes::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

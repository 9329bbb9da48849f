//! schooldir CLI entry point
//!
//! Parsing, logging setup and dispatch all live in `cli::run`. This file
//! only prints the error and sets the exit status.

use schooldir::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

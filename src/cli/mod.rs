//! Command-line interface for schooldir
//!
//! - list: fetch the school list and print it, optionally filtered
//! - add: validate a new school and submit it
//! - validate: validate a new school without submitting

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, SchoolArgs};
pub use commands::{add, list, resolve_config, run, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, success_envelope, write_error, write_response};

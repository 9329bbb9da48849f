//! JSON output for the CLI
//!
//! - One JSON object per line on stdout
//! - `{"status":"ok","data":..}` or `{"status":"error","code":..,"message":..}`
//! - UTF-8 only

use std::io::{self, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Success envelope
pub fn success_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope; validation details appear under `errors`
pub fn error_envelope(err: &CliError) -> Value {
    let mut response = serde_json::json!({
        "status": "error",
        "code": err.code_str(),
        "message": err.message()
    });
    if let (Some(details), Some(obj)) = (err.details(), response.as_object_mut()) {
        obj.insert("errors".to_string(), details.clone());
    }
    response
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&success_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(err: &CliError) -> CliResult<()> {
    write_line(&error_envelope(err))
}

fn write_line(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

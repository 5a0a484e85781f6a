//! Command handlers for the `lp` CLI.
//!
//! Each command takes already-parsed arguments and returns a
//! [`CliError`] on failure; printing the error and choosing the exit code
//! is left to `main`.

use std::io;

use lp_eval::{EvalError, Interpreter, Value};

mod lex;
mod run;

pub use lex::{format_tokens, lex_file};
pub use run::{eval_source, run_file};

/// Failure of a driver command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{message}")]
    Read {
        message: String,
        #[source]
        source: io::Error,
    },
    #[error("error in '{origin}': {source}")]
    Eval {
        origin: String,
        #[source]
        source: EvalError,
    },
}

/// Read a source file, mapping I/O failures to readable messages.
pub fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| {
        let message = match source.kind() {
            io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
            _ => format!("error reading '{path}': {source}"),
        };
        CliError::Read { message, source }
    })
}

/// Line printed for a program's final value.
pub fn format_result(value: &Value) -> String {
    format!("=> {value}")
}

fn execute(interpreter: &Interpreter, origin: &str, source: &str) -> Result<Option<Value>, CliError> {
    interpreter.run(source).map_err(|source| CliError::Eval {
        origin: origin.to_string(),
        source,
    })
}

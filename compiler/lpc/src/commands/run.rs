//! `lp run` and `lp eval`.

use lp_eval::{Interpreter, Value};

use super::{execute, read_file, CliError};

/// Run the program in the file at `path`.
#[tracing::instrument(level = "debug", skip(interpreter))]
pub fn run_file(interpreter: &Interpreter, path: &str) -> Result<Option<Value>, CliError> {
    let source = read_file(path)?;
    execute(interpreter, path, &source)
}

/// Run program text given directly.
pub fn eval_source(interpreter: &Interpreter, source: &str) -> Result<Option<Value>, CliError> {
    execute(interpreter, "<eval>", source)
}

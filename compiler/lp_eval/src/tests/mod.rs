//! Whole-program tests.
//!
//! Each test runs source text through a fresh [`Interpreter`] with a
//! buffer print handler and checks the emitted lines and the result.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

mod function_tests;

use crate::{buffer_handler, EvalResult, Interpreter, SharedPrintHandler, Value};

/// An interpreter that prints into a buffer, and that buffer.
pub(crate) fn capturing() -> (Interpreter, SharedPrintHandler) {
    let output = buffer_handler();
    let interpreter = Interpreter::builder().print_handler(output.clone()).build();
    (interpreter, output)
}

/// Run `source`, returning its result and the printed lines.
pub(crate) fn run(source: &str) -> (EvalResult<Option<Value>>, Vec<String>) {
    let (interpreter, output) = capturing();
    let result = interpreter.run(source);
    (result, output.lines())
}

/// Run `source`, which must succeed, and return the printed lines.
pub(crate) fn output_of(source: &str) -> Vec<String> {
    let (result, lines) = run(source);
    if let Err(err) = result {
        panic!("program failed: {err}\n---\n{source}");
    }
    lines
}

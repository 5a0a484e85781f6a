#![deny(clippy::arithmetic_side_effects)]
//! Evaluator for languageplay.
//!
//! Source text is tokenized by `lp_lexer` and evaluated straight off the
//! token stream by an [`Interpreter`]; nothing is parsed ahead of time.
//!
//! # Architecture
//!
//! - [`Environment`]: one flat, copy-on-write binding scope per frame, plus
//!   handles to the operand stack and macro table shared by every scope of
//!   an execution.
//! - [`Builtin`]: the closed set of handlers, bound by name like any other
//!   value so dispatch is a lookup plus a `match`.
//! - [`Interpreter`]: the core loop and the builtin handlers. Configured
//!   through [`InterpreterBuilder`] (print sink, foreign backends, nesting
//!   limit).
//! - [`add_values`]: the `+` operator.
//!
//! # Example
//!
//! ```
//! use lp_eval::{buffer_handler, Interpreter};
//!
//! let output = buffer_handler();
//! let interpreter = Interpreter::builder().print_handler(output.clone()).build();
//! interpreter.run("x = {1 + 1}; print x").unwrap();
//! assert_eq!(output.lines(), vec!["2"]);
//! ```

mod builtins;
mod environment;
pub mod errors;
mod foreign;
mod interpreter;
mod operators;
mod print_handler;
mod stack;
mod value;

pub use builtins::Builtin;
pub use environment::{Binding, Environment, LocalScope, Macro, MacroTable, Operand, OperandStack};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use foreign::{ForeignExecutor, ForeignRegistry};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_DEPTH};
pub use operators::add_values;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::{FunctionValue, Name, Value};

/// Run `source` with a default interpreter (stdout, no foreign backends).
pub fn run(source: &str) -> EvalResult<Option<Value>> {
    Interpreter::new().run(source)
}

#[cfg(test)]
mod tests;

//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::{Interpreter, DEFAULT_MAX_DEPTH};
use crate::foreign::{ForeignExecutor, ForeignRegistry};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Defaults: print to stdout, no foreign backends, a nesting limit of
/// [`DEFAULT_MAX_DEPTH`].
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    foreign: ForeignRegistry,
    max_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            foreign: ForeignRegistry::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Send `print` output to `handler`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Register a backend for `foreign <language> ...`.
    #[must_use]
    pub fn foreign(mut self, language: impl Into<String>, executor: impl ForeignExecutor + 'static) -> Self {
        self.foreign.register(language, executor);
        self
    }

    /// Maximum nesting of blocks, macro expansions, and calls.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            foreign: self.foreign,
            max_depth: self.max_depth,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

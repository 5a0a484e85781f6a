//! Backends for `foreign <language> <source>`.
//!
//! The evaluator does not interpret foreign source at all. It looks the
//! language tag up in a [`ForeignRegistry`] and hands the executor the
//! source text together with the current environment, which the executor
//! may read or bind into.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::environment::Environment;
use crate::errors::{unsupported_foreign, EvalResult};

/// Executes source text written in some other language.
pub trait ForeignExecutor {
    /// Run `source` with `env` as the side-effect target.
    fn execute(&self, source: &str, env: &mut Environment) -> EvalResult<()>;
}

impl<F> ForeignExecutor for F
where
    F: Fn(&str, &mut Environment) -> EvalResult<()>,
{
    fn execute(&self, source: &str, env: &mut Environment) -> EvalResult<()> {
        self(source, env)
    }
}

/// Language tag to executor mapping.
#[derive(Default)]
pub struct ForeignRegistry {
    executors: FxHashMap<String, Box<dyn ForeignExecutor>>,
}

impl ForeignRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `executor` for `language`, replacing any previous one.
    pub fn register(&mut self, language: impl Into<String>, executor: impl ForeignExecutor + 'static) {
        self.executors.insert(language.into(), Box::new(executor));
    }

    /// Run `source` with the executor registered for `language`.
    pub fn execute(&self, language: &str, source: &str, env: &mut Environment) -> EvalResult<()> {
        match self.executors.get(language) {
            Some(executor) => executor.execute(source, env),
            None => Err(unsupported_foreign(language)),
        }
    }
}

impl fmt::Debug for ForeignRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut languages: Vec<&str> = self.executors.keys().map(String::as_str).collect();
        languages.sort_unstable();
        f.debug_struct("ForeignRegistry")
            .field("languages", &languages)
            .finish()
    }
}

#[cfg(test)]
mod tests;

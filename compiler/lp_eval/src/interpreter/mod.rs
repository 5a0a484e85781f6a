//! Tree-walking evaluator.
//!
//! There is no AST. Evaluation reads the token stream directly through a
//! [`TokenCursor`]: each step extracts the next value span, resolves it,
//! and then either invokes it as a handler or pushes it onto the shared
//! operand stack. Handlers are prefix operators; each decides how much of
//! the stream it consumes after itself (`=` and `+` additionally look
//! back at the operand stack for their left side).
//!
//! # Resolution
//!
//! A span resolves as follows:
//!
//! 1. A quoted span is text, delimiters included.
//! 2. A bracket block is evaluated in a child scope; its result (if any)
//!    is the value.
//! 3. A name in the macro table expands. Raw source is re-evaluated on
//!    every reference unless it is a quoted string; a call argument is
//!    used as is.
//! 4. A name bound in the environment yields its binding. Builtins and
//!    functions become handlers.
//! 5. An integer literal becomes an integer.
//! 6. Anything else is an unbound operand whose value is its own text.
//!    That is only an error once a concrete value is demanded.
//!
//! # Handler modules
//!
//! - `operator_handlers`: `=`, `+`
//! - `definitions`: `define`, `def`
//! - `function_call`: `call` and direct invocation of function values
//! - `control`: `if`/`elif`/`else`, `for`
//! - `output`: `print`, `foreign`

mod builder;
mod control;
mod definitions;
mod function_call;
mod macro_guard;
mod operator_handlers;
mod output;

use std::rc::Rc;

pub use builder::InterpreterBuilder;

use lp_lexer::{Delimiter, TokenCursor, TokenSlice};

use crate::builtins::Builtin;
use crate::environment::{Binding, Environment, Macro, Operand};
use crate::errors::{
    dangling_clause, depth_exceeded, malformed, operand_stack_not_empty, unbound_name,
    unexpected_end, EvalResult,
};
use crate::foreign::ForeignRegistry;
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;
use crate::value::{FunctionValue, Name, Value};

/// Maximum nesting of blocks, macro expansions, and calls.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Something the core loop invokes instead of pushing.
#[derive(Clone, Debug)]
pub(crate) enum Handler {
    Builtin(Builtin),
    User(Name, Rc<FunctionValue>),
}

/// Outcome of resolving one span.
#[derive(Debug)]
pub(crate) enum Resolved {
    Handler(Handler),
    Operand(Operand),
    /// A block or macro that produced no value.
    Nothing,
}

/// The evaluator.
///
/// Holds configuration only; all per-run state lives in the
/// [`Environment`], so one interpreter can run any number of programs.
pub struct Interpreter {
    print_handler: SharedPrintHandler,
    foreign: ForeignRegistry,
    max_depth: usize,
}

impl Interpreter {
    /// An interpreter printing to stdout with no foreign backends.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Run `source` in a fresh environment.
    pub fn run(&self, source: &str) -> EvalResult<Option<Value>> {
        let mut env = Environment::with_builtins();
        self.run_in(source, &mut env)
    }

    /// Run `source` in `env`, using its operand stack and macro table as
    /// they are.
    ///
    /// Operands and macros the caller seeded (or an earlier run left)
    /// are visible to the program. Call
    /// [`Environment::reset_execution_state`] first for an independent
    /// execution.
    pub fn run_in(&self, source: &str, env: &mut Environment) -> EvalResult<Option<Value>> {
        self.execute(&TokenSlice::from_source(source), env)
    }

    /// Evaluate `tokens` as a top-level program.
    ///
    /// Returns the program's final value, if it left one. Fails if more
    /// than one operand is left over, or if the final operand is a name
    /// that never resolved. On failure the operand stack is cleared.
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
    pub fn execute(&self, tokens: &TokenSlice, env: &mut Environment) -> EvalResult<Option<Value>> {
        let result = self
            .eval_tokens(tokens, env)
            .and_then(|last| finish(last, env));
        if let Err(err) = &result {
            tracing::debug!(%err, "execution failed");
            env.operands().borrow_mut().clear();
        }
        result
    }

    /// The core loop over one token window.
    ///
    /// Returns the operand this window left on top of the stack, if it
    /// pushed any.
    pub(crate) fn eval_tokens(
        &self,
        tokens: &TokenSlice,
        env: &mut Environment,
    ) -> EvalResult<Option<Operand>> {
        if env.depth() > self.max_depth {
            return Err(depth_exceeded(self.max_depth));
        }
        let base = env.operands().borrow().len();
        let mut cursor = tokens.cursor();
        while let Some(span) = cursor.next_value()? {
            match self.resolve(&span, env)? {
                Resolved::Handler(handler) => self.invoke(handler, &mut cursor, env)?,
                Resolved::Operand(operand) => env.push_operand(operand),
                Resolved::Nothing => {}
            }
        }
        let height = env.operands().borrow().len();
        Ok(if height > base { env.pop_operand() } else { None })
    }

    /// Evaluate `tokens` in a child scope of `env`.
    pub(crate) fn eval_scoped(&self, tokens: &TokenSlice, env: &Environment) -> EvalResult<Option<Operand>> {
        let mut scope = env.child();
        ensure_sufficient_stack(|| self.eval_tokens(tokens, &mut scope))
    }

    /// Resolve one value span.
    pub(crate) fn resolve(&self, span: &TokenSlice, env: &Environment) -> EvalResult<Resolved> {
        if let Some(delimiter) = Delimiter::opening_at(span, 0) {
            if delimiter.is_quote() {
                return Ok(Resolved::Operand(Operand::unnamed(Value::text(span.text()))));
            }
            let body = span.shrink(delimiter.width(), delimiter.width());
            return Ok(self
                .eval_scoped(&body, env)?
                .map_or(Resolved::Nothing, Resolved::Operand));
        }

        let text = span.text();
        let expansion = env.macros().borrow().get(text);
        if let Some(entry) = expansion {
            return self.expand_macro(Name::from(text), entry, env);
        }

        Ok(match env.lookup(text) {
            Some(Binding::Builtin(builtin)) => Resolved::Handler(Handler::Builtin(builtin)),
            Some(Binding::Value(value)) => named(Name::from(text), value),
            None => Resolved::Operand(match Value::parse_int(text) {
                Some(int) => Operand::unnamed(int),
                None => Operand::unbound(Name::from(text)),
            }),
        })
    }

    fn expand_macro(&self, name: Name, entry: Macro, env: &Environment) -> EvalResult<Resolved> {
        tracing::trace!(%name, "expanding macro");
        let source = match entry {
            Macro::Value(value) => return Ok(named(name, value)),
            Macro::Source(source) => source,
        };
        if Delimiter::opening_at(&source, 0).is_some_and(Delimiter::is_quote) {
            return Ok(named(name, Value::text(source.text())));
        }
        // An expansion to an unbound word stands for that word, so `=`
        // assigns to it rather than to the macro.
        Ok(match self.eval_scoped(&source, env)? {
            Some(operand @ Operand { bound: false, .. }) => Resolved::Operand(operand),
            Some(operand) => named(name, operand.value),
            None => Resolved::Nothing,
        })
    }

    fn invoke(&self, handler: Handler, cursor: &mut TokenCursor, env: &mut Environment) -> EvalResult<()> {
        let builtin = match handler {
            Handler::Builtin(builtin) => builtin,
            Handler::User(name, function) => return self.call_function(&name, &function, cursor, env),
        };
        tracing::trace!(builtin = builtin.name(), "dispatch");
        match builtin {
            Builtin::Define => definitions::eval_define(cursor, env),
            Builtin::Def => definitions::eval_def(cursor, env),
            Builtin::Call => self.eval_call(cursor, env),
            Builtin::Print => self.eval_print(cursor, env),
            Builtin::Assign => self.eval_assign(cursor, env),
            Builtin::Plus => self.eval_plus(cursor, env),
            Builtin::If => self.eval_if(cursor, env),
            Builtin::Elif | Builtin::Else => Err(dangling_clause(builtin.name())),
            Builtin::For => self.eval_for(cursor, env),
            Builtin::Foreign => self.eval_foreign(cursor, env),
            Builtin::Separator => Ok(()),
        }
    }

    /// Read and resolve the next span where a value is required.
    ///
    /// Function handlers become function values; a block that produced
    /// nothing becomes [`Value::Unset`].
    pub(crate) fn next_operand(
        &self,
        cursor: &mut TokenCursor,
        env: &Environment,
        construct: &'static str,
    ) -> EvalResult<Operand> {
        let span = next_span(cursor, construct, "a value")?;
        self.operand_of(&span, env, construct)
    }

    pub(crate) fn operand_of(
        &self,
        span: &TokenSlice,
        env: &Environment,
        construct: &'static str,
    ) -> EvalResult<Operand> {
        match self.resolve(span, env)? {
            Resolved::Operand(operand) => Ok(operand),
            Resolved::Handler(Handler::User(name, function)) => {
                Ok(Operand::named(name, Value::Function(function)))
            }
            Resolved::Handler(Handler::Builtin(builtin)) => {
                Err(malformed(construct, "a value", builtin.name()))
            }
            Resolved::Nothing => Ok(Operand::unnamed(Value::Unset)),
        }
    }

    /// Like [`Self::operand_of`], but an unresolved name is an error.
    pub(crate) fn bound_value_of(
        &self,
        span: &TokenSlice,
        env: &Environment,
        construct: &'static str,
    ) -> EvalResult<Value> {
        let operand = self.operand_of(span, env, construct)?;
        if operand.bound {
            Ok(operand.value)
        } else {
            Err(unbound_name(&operand.value.to_string()))
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound name: functions become handlers, everything else an operand.
fn named(name: Name, value: Value) -> Resolved {
    match value {
        Value::Function(function) => Resolved::Handler(Handler::User(name, function)),
        value => Resolved::Operand(Operand::named(name, value.coerce_integer())),
    }
}

/// Check the top-level invariants and produce the program's value.
///
/// When the program itself pushed nothing, a seeded operand still on the
/// stack is the value.
fn finish(last: Option<Operand>, env: &Environment) -> EvalResult<Option<Value>> {
    let last = last.or_else(|| env.pop_operand());
    let remaining = {
        let stack = env.operands().borrow();
        (!stack.is_empty()).then(|| stack.describe())
    };
    if let Some(remaining) = remaining {
        return Err(operand_stack_not_empty(remaining));
    }
    match last {
        Some(Operand { bound: false, value, .. }) => Err(unbound_name(&value.to_string())),
        Some(operand) => Ok(Some(operand.value)),
        None => Ok(None),
    }
}

/// Extract the next value span, failing at end of input.
pub(crate) fn next_span(
    cursor: &mut TokenCursor,
    construct: &'static str,
    expected: &'static str,
) -> EvalResult<TokenSlice> {
    cursor
        .next_value()?
        .ok_or_else(|| unexpected_end(construct, expected))
}

/// The contents of a bracket block span, or `None` if `span` is not one.
pub(crate) fn bracket_contents(span: &TokenSlice) -> Option<TokenSlice> {
    match Delimiter::opening_at(span, 0)? {
        delimiter @ (Delimiter::Paren | Delimiter::Bracket | Delimiter::Brace) => {
            Some(span.shrink(delimiter.width(), delimiter.width()))
        }
        _ => None,
    }
}

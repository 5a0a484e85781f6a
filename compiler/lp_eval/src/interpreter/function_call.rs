//! Function invocation.
//!
//! Arguments are passed through the macro table, not the environment:
//! while the body runs, every reference to a parameter name anywhere
//! below the call expands to the argument. [`MacroBindings`] puts the
//! previous entries back on every exit path.

use std::rc::Rc;

use lp_lexer::TokenCursor;
use smallvec::SmallVec;

use super::macro_guard::MacroBindings;
use super::{next_span, Handler, Interpreter, Resolved};
use crate::builtins::Builtin;
use crate::environment::{Environment, Macro, Operand};
use crate::errors::{function_not_found, not_callable, EvalResult};
use crate::value::{FunctionValue, Name, Value};

impl Interpreter {
    /// `call name args...`
    pub(super) fn eval_call(&self, cursor: &mut TokenCursor, env: &Environment) -> EvalResult<()> {
        let construct = Builtin::Call.name();
        let target = next_span(cursor, construct, "a function name")?;
        match self.resolve(&target, env)? {
            Resolved::Handler(Handler::User(name, function)) => {
                self.call_function(&name, &function, cursor, env)
            }
            Resolved::Handler(Handler::Builtin(builtin)) => {
                Err(not_callable(builtin.name(), "a builtin"))
            }
            Resolved::Operand(Operand { bound: false, .. }) => {
                Err(function_not_found(target.text()))
            }
            Resolved::Operand(operand) => Err(not_callable(
                target.text(),
                &format!("{} `{}`", operand.value.type_name(), operand.value),
            )),
            Resolved::Nothing => Err(not_callable(target.text(), "nothing")),
        }
    }

    /// Invoke `function`, reading one argument per parameter from
    /// `cursor`. The body's result, if any, is pushed unnamed.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %name))]
    pub(super) fn call_function(
        &self,
        name: &Name,
        function: &Rc<FunctionValue>,
        cursor: &mut TokenCursor,
        env: &Environment,
    ) -> EvalResult<()> {
        let construct = Builtin::Call.name();

        // All arguments are read in the caller's context before any
        // parameter is bound.
        let mut args: SmallVec<[Value; 4]> = SmallVec::with_capacity(function.params.len());
        for _ in &function.params {
            args.push(self.next_operand(cursor, env, construct)?.value);
        }

        let mut bindings = MacroBindings::new(env.macros().clone());
        for (param, arg) in function.params.iter().zip(args) {
            bindings.bind(Rc::clone(param), Macro::Value(arg));
        }
        let result = self.eval_scoped(&function.body, env)?;
        drop(bindings);

        if let Some(operand) = result {
            env.push_operand(Operand {
                name: None,
                ..operand
            });
        }
        Ok(())
    }
}

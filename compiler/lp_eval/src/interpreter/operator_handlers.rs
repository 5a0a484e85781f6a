//! `=` and `+`: the two handlers that take their left side from the
//! operand stack.

use lp_lexer::TokenCursor;

use super::Interpreter;
use crate::builtins::Builtin;
use crate::environment::{Environment, Operand};
use crate::errors::{empty_operand_stack, invalid_assign_target, EvalResult};
use crate::operators::add_values;

impl Interpreter {
    /// `name = value`
    ///
    /// The target is whatever the core loop pushed last; only its name
    /// matters. The binding goes into the current scope.
    pub(super) fn eval_assign(&self, cursor: &mut TokenCursor, env: &mut Environment) -> EvalResult<()> {
        let operator = Builtin::Assign.name();
        let target = env
            .pop_operand()
            .ok_or_else(|| empty_operand_stack(operator))?;
        let Some(name) = target.name else {
            return Err(invalid_assign_target(operator, &target.value.to_string()));
        };
        let value = self.next_operand(cursor, env, operator)?.value;
        tracing::trace!(%name, %value, "assign");
        env.define(name, value);
        Ok(())
    }

    /// `left + right`; the sum is pushed back unnamed so chains like
    /// `a + b + c` fold left to right.
    pub(super) fn eval_plus(&self, cursor: &mut TokenCursor, env: &mut Environment) -> EvalResult<()> {
        let operator = Builtin::Plus.name();
        let left = env
            .pop_operand()
            .ok_or_else(|| empty_operand_stack(operator))?;
        let right = self.next_operand(cursor, env, operator)?;
        let sum = add_values(&left.value, &right.value)?;
        env.push_operand(Operand::unnamed(sum));
        Ok(())
    }
}

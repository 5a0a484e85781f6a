//! `define` and `def`.
//!
//! Neither evaluates anything: `define` stores a raw span in the macro
//! table, `def` stores a function value in the current scope.

use std::rc::Rc;

use lp_lexer::{is_trivia, is_word_char, TokenCursor, TokenSlice};
use smallvec::SmallVec;

use super::{bracket_contents, next_span};
use crate::builtins::Builtin;
use crate::environment::{Environment, Macro};
use crate::errors::{malformed, EvalResult};
use crate::value::{FunctionValue, Name, Value};

/// `define name <span>`
pub(super) fn eval_define(cursor: &mut TokenCursor, env: &Environment) -> EvalResult<()> {
    let construct = Builtin::Define.name();
    let name = definition_name(cursor, construct)?;
    let body = next_span(cursor, construct, "a macro body")?;
    tracing::trace!(%name, %body, "define macro");
    env.macros().borrow_mut().insert(name, Macro::Source(body));
    Ok(())
}

/// `def name(params){body}`
pub(super) fn eval_def(cursor: &mut TokenCursor, env: &mut Environment) -> EvalResult<()> {
    let construct = Builtin::Def.name();
    let name = definition_name(cursor, construct)?;

    let header = next_span(cursor, construct, "a parameter list")?;
    let params = parse_params(&header, construct)?;

    let body_span = next_span(cursor, construct, "a body block")?;
    let body = match bracket_contents(&body_span) {
        Some(body) => body,
        None => return Err(malformed(construct, "a body block", body_span.text())),
    };

    tracing::trace!(%name, params = params.len(), "define function");
    let function = FunctionValue {
        name: Rc::clone(&name),
        params,
        body,
    };
    env.define(name, Value::Function(Rc::new(function)));
    Ok(())
}

fn definition_name(cursor: &mut TokenCursor, construct: &'static str) -> EvalResult<Name> {
    let span = next_span(cursor, construct, "a name")?;
    if span.is_single_word() {
        Ok(Name::from(span.text()))
    } else {
        Err(malformed(construct, "a name", span.text()))
    }
}

/// Parameter names from `(a b)` or `[a, b]`. Layout and `,` separate
/// names; nothing else may appear.
fn parse_params(header: &TokenSlice, construct: &'static str) -> EvalResult<SmallVec<[Name; 4]>> {
    let expected = "a parameter list";
    let contents = bracket_contents(header).ok_or_else(|| malformed(construct, expected, header.text()))?;
    let mut params = SmallVec::new();
    for text in contents.texts() {
        if is_trivia(text) || text == "," {
            continue;
        }
        if !text.chars().all(is_word_char) {
            return Err(malformed(construct, expected, header.text()));
        }
        params.push(Name::from(text));
    }
    Ok(params)
}

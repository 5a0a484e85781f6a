//! `if`/`elif`/`else` and `for`.
//!
//! An `if` chain is read in full before any condition is evaluated, so
//! untaken branches are skipped without being evaluated or re-read.

use lp_lexer::{Delimiter, TokenCursor, TokenSlice};
use smallvec::SmallVec;

use super::{next_span, Interpreter, Resolved};
use crate::builtins::Builtin;
use crate::environment::{Environment, Macro, Operand};
use crate::errors::{destructure_mismatch, expected_keyword, malformed, not_iterable, EvalResult};
use crate::value::{Name, Value};

/// One arm of an `if` chain. `condition` is `None` for `else`.
struct Clause {
    condition: Option<TokenSlice>,
    body: TokenSlice,
}

/// One element produced by a `for` iterable.
enum LoopItem {
    Value(Value),
    /// A nested `(..)`/`[..]` list, kept unevaluated for destructuring.
    List(TokenSlice),
}

impl LoopItem {
    fn into_value(self) -> Value {
        match self {
            LoopItem::Value(value) => value,
            LoopItem::List(span) => Value::text(span.text()),
        }
    }
}

impl Interpreter {
    /// `if (cond){body} [elif (cond){body}]* [else {body}]`
    ///
    /// Runs the first arm whose condition is truthy and pushes its
    /// result, if any.
    pub(super) fn eval_if(&self, cursor: &mut TokenCursor, env: &Environment) -> EvalResult<()> {
        let construct = Builtin::If.name();
        for clause in read_if_chain(cursor)? {
            let taken = match &clause.condition {
                Some(condition) => self.bound_value_of(condition, env, construct)?.is_truthy(),
                None => true,
            };
            if taken {
                if let Some(result) = self.eval_body(&clause.body, env, construct)? {
                    env.push_operand(result);
                }
                break;
            }
        }
        Ok(())
    }

    /// `for name[, name...] in <iterable>{body}`
    ///
    /// The iterable is resolved once, on entry. Each element runs the
    /// body in a fresh child scope holding the loop variables; body
    /// results are discarded.
    pub(super) fn eval_for(&self, cursor: &mut TokenCursor, env: &Environment) -> EvalResult<()> {
        let construct = Builtin::For.name();
        let names = read_loop_names(cursor)?;
        let iterable = next_span(cursor, construct, "an iterable")?;
        let body = next_span(cursor, construct, "a body")?;

        let items = self.loop_items(&iterable, env)?;
        tracing::trace!(items = items.len(), "for");
        for item in items {
            let mut scope = env.child();
            self.bind_loop_item(&names, item, env, &mut scope)?;
            self.eval_body(&body, &scope, construct)?;
        }
        Ok(())
    }

    fn eval_body(
        &self,
        body: &TokenSlice,
        env: &Environment,
        construct: &'static str,
    ) -> EvalResult<Option<Operand>> {
        match self.resolve(body, env)? {
            Resolved::Operand(operand) => Ok(Some(operand)),
            Resolved::Nothing => Ok(None),
            Resolved::Handler(_) => {
                Err(malformed(construct, "a body block", body.text()))
            }
        }
    }

    fn loop_items(&self, iterable: &TokenSlice, env: &Environment) -> EvalResult<Vec<LoopItem>> {
        let construct = Builtin::For.name();
        if let Some(contents) = list_contents(iterable) {
            return self.list_items(&contents, env);
        }

        // A macro holding a list literal iterates the literal instead of
        // evaluating it.
        if iterable.is_single_word() {
            let entry = env.macros().borrow().get(iterable.text());
            if let Some(Macro::Source(source)) = entry {
                if let Some(contents) = list_contents(&source) {
                    return self.list_items(&contents, env);
                }
            }
        }

        let value = self.bound_value_of(iterable, env, construct)?;
        match &value {
            Value::Int(count) => Ok((0..*count).map(|n| LoopItem::Value(Value::Int(n))).collect()),
            Value::Text(text) => {
                if let Some((delimiter, content)) = value.quoted() {
                    return Ok(content
                        .chars()
                        .map(|c| {
                            let quoted = format!("{}{c}{}", delimiter.open(), delimiter.close());
                            LoopItem::Value(Value::text(quoted))
                        })
                        .collect());
                }
                match parse_list(text) {
                    Some(contents) => self.list_items(&contents, env),
                    None => Err(not_iterable(construct, &describe(&value))),
                }
            }
            Value::Function(_) | Value::Unset => Err(not_iterable(construct, &describe(&value))),
        }
    }

    /// Elements of a list body: one extracted value each, `,` skipped.
    /// Nested lists stay unevaluated.
    fn list_items(&self, contents: &TokenSlice, env: &Environment) -> EvalResult<Vec<LoopItem>> {
        let construct = Builtin::For.name();
        let mut items = Vec::new();
        let mut cursor = contents.cursor();
        while let Some(span) = cursor.next_value()? {
            if span.text() == "," {
                continue;
            }
            if list_contents(&span).is_some() {
                items.push(LoopItem::List(span));
            } else {
                items.push(LoopItem::Value(self.operand_of(&span, env, construct)?.value));
            }
        }
        Ok(items)
    }

    fn bind_loop_item(
        &self,
        names: &[Name],
        item: LoopItem,
        env: &Environment,
        scope: &mut Environment,
    ) -> EvalResult<()> {
        if let [name] = names {
            scope.define(Name::clone(name), item.into_value());
            return Ok(());
        }

        let contents = match &item {
            LoopItem::List(span) => list_contents(span),
            LoopItem::Value(Value::Text(text)) => parse_list(text),
            LoopItem::Value(_) => None,
        };
        let Some(contents) = contents else {
            return Err(destructure_mismatch(names.len(), &describe(&item.into_value())));
        };
        let parts = self.list_items(&contents, env)?;
        if parts.len() != names.len() {
            return Err(destructure_mismatch(
                names.len(),
                &format!("a list of {} items", parts.len()),
            ));
        }
        for (name, part) in names.iter().zip(parts) {
            scope.define(Name::clone(name), part.into_value());
        }
        Ok(())
    }
}

/// Read `if (cond){body}` plus any `elif`/`else` arms that follow.
fn read_if_chain(cursor: &mut TokenCursor) -> EvalResult<SmallVec<[Clause; 4]>> {
    let mut clauses = SmallVec::new();
    clauses.push(read_clause(cursor, Builtin::If)?);
    loop {
        let next = cursor.peek();
        let keyword = if next == Some(Builtin::Elif.name()) {
            Builtin::Elif
        } else if next == Some(Builtin::Else.name()) {
            Builtin::Else
        } else {
            break;
        };
        cursor.next_token();
        clauses.push(read_clause(cursor, keyword)?);
        if keyword == Builtin::Else {
            break;
        }
    }
    Ok(clauses)
}

fn read_clause(cursor: &mut TokenCursor, keyword: Builtin) -> EvalResult<Clause> {
    let construct = keyword.name();
    let condition = match keyword {
        Builtin::Else => None,
        _ => Some(next_span(cursor, construct, "a condition")?),
    };
    let body = next_span(cursor, construct, "a body")?;
    Ok(Clause { condition, body })
}

/// Loop variable names, up to and including `in`.
fn read_loop_names(cursor: &mut TokenCursor) -> EvalResult<SmallVec<[Name; 2]>> {
    let construct = Builtin::For.name();
    let mut names = SmallVec::new();
    loop {
        let Some(token) = cursor.next_token() else {
            return Err(expected_keyword(construct, "in", "end of input"));
        };
        match token.text() {
            "in" if names.is_empty() => return Err(malformed(construct, "a loop variable", "in")),
            "in" => return Ok(names),
            "," => {}
            text if token.is_single_word() => names.push(Name::from(text)),
            text => return Err(expected_keyword(construct, "in", &format!("`{text}`"))),
        }
    }
}

/// Contents of a `(..)` or `[..]` span.
fn list_contents(span: &TokenSlice) -> Option<TokenSlice> {
    match Delimiter::opening_at(span, 0)? {
        delimiter @ (Delimiter::Paren | Delimiter::Bracket) => {
            Some(span.shrink(delimiter.width(), delimiter.width()))
        }
        _ => None,
    }
}

/// Contents of `text` if it is exactly one list literal.
fn parse_list(text: &str) -> Option<TokenSlice> {
    let source = TokenSlice::from_source(text);
    let mut cursor = source.cursor();
    let span = cursor.next_value().ok()??;
    cursor.skip_trivia();
    if cursor.is_exhausted() {
        list_contents(&span)
    } else {
        None
    }
}

fn describe(value: &Value) -> String {
    format!("{} `{value}`", value.type_name())
}

//! `print` and `foreign`: the two handlers with effects outside the
//! evaluator.

use lp_lexer::{Delimiter, TokenCursor, TokenSlice};

use super::{bracket_contents, next_span, Interpreter};
use crate::builtins::Builtin;
use crate::environment::Environment;
use crate::errors::{malformed, unexpected_end, EvalResult};

impl Interpreter {
    /// `print value`: one line to the print handler. Quoted strings lose
    /// one layer of quotes.
    pub(super) fn eval_print(&self, cursor: &mut TokenCursor, env: &Environment) -> EvalResult<()> {
        let value = self.next_operand(cursor, env, Builtin::Print.name())?.value;
        self.print_handler.println(&value.print_form());
        Ok(())
    }

    /// `foreign <language> <span>`: hand the span's contents to the
    /// executor registered for `language`.
    pub(super) fn eval_foreign(&self, cursor: &mut TokenCursor, env: &mut Environment) -> EvalResult<()> {
        let construct = Builtin::Foreign.name();
        let tag = cursor
            .next_token()
            .ok_or_else(|| unexpected_end(construct, "a language tag"))?;
        if !tag.is_single_word() {
            return Err(malformed(construct, "a language tag", tag.text()));
        }
        let span = next_span(cursor, construct, "foreign source")?;
        let source = foreign_source(&span);
        tracing::debug!(language = tag.text(), bytes = source.len(), "foreign");
        self.foreign.execute(tag.text(), &source, env)
    }
}

/// The text inside a quoted or bracketed span, or the span itself.
fn foreign_source(span: &TokenSlice) -> String {
    if let Some((_, content)) = Delimiter::split_quoted(span.text()) {
        return content.to_string();
    }
    match bracket_contents(span) {
        Some(contents) => contents.text().to_string(),
        None => span.text().to_string(),
    }
}

//! Runtime values.
//!
//! The language is dynamically and weakly typed: a value is an integer, a
//! text span, a user function, or unset. Text that came from a quoted
//! span keeps its delimiters (`'hi'` is stored with both quotes) so that
//! concatenation and printing can tell quoted strings from bare words.

use std::fmt;
use std::rc::Rc;

use lp_lexer::{Delimiter, TokenSlice};
use smallvec::SmallVec;

/// A bound name. Shared, immutable.
pub type Name = Rc<str>;

/// A user function: parameter names and an unevaluated body.
#[derive(Debug)]
pub struct FunctionValue {
    pub name: Name,
    pub params: SmallVec<[Name; 4]>,
    /// Body tokens, without the surrounding braces.
    pub body: TokenSlice,
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Text(Rc<str>),
    Function(Rc<FunctionValue>),
    Unset,
}

impl Value {
    /// Create a text value.
    pub fn text(text: impl Into<Rc<str>>) -> Self {
        Value::Text(text.into())
    }

    /// Integer if `text` parses fully as one, otherwise `None`.
    pub fn parse_int(text: &str) -> Option<Value> {
        text.parse::<i64>().ok().map(Value::Int)
    }

    /// Turn unquoted integer-literal text into an integer.
    #[must_use]
    pub fn coerce_integer(self) -> Value {
        if let Value::Text(text) = &self {
            if let Some(int) = Value::parse_int(text) {
                return int;
            }
        }
        self
    }

    /// For quoted text, the delimiter and contents.
    pub fn quoted(&self) -> Option<(Delimiter, &str)> {
        match self {
            Value::Text(text) => Delimiter::split_quoted(text),
            _ => None,
        }
    }

    /// Truthiness used by `if`/`elif`.
    ///
    /// Integers are true when non-zero, text when its (unquoted) content is
    /// non-empty, functions always, unset never.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Text(text) => match Delimiter::split_quoted(text) {
                Some((_, content)) => !content.is_empty(),
                None => !text.is_empty(),
            },
            Value::Function(_) => true,
            Value::Unset => false,
        }
    }

    /// Human-readable type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Text(text) if Delimiter::split_quoted(text).is_some() => "string",
            Value::Text(_) => "text",
            Value::Function(_) => "function",
            Value::Unset => "unset",
        }
    }

    /// Text emitted by `print`: quoted strings lose one layer of
    /// delimiters, everything else prints as displayed.
    pub fn print_form(&self) -> String {
        match self.quoted() {
            Some((_, content)) => content.to_string(),
            None => self.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Unset, Value::Unset) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Text(text) => f.write_str(text),
            Value::Function(func) => write!(f, "<function {}({})>", func.name, func.params.join(" ")),
            Value::Unset => f.write_str("unset"),
        }
    }
}

#[cfg(test)]
mod tests;

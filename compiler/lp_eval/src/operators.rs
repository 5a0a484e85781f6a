//! The `+` operator.
//!
//! The value set is fixed, so dispatch is a direct `match` on the operand
//! pair rather than anything extensible.

use crate::builtins::Builtin;
use crate::errors::{integer_overflow, invalid_operands, EvalResult};
use crate::value::Value;

/// Add two values.
///
/// - integer + integer: checked addition.
/// - quoted + quoted: one merged string. The left closer and the right
///   opener are dropped, and the result is wrapped in the left operand's
///   delimiter.
/// - any other text + text: plain concatenation.
///
/// Everything else (mixed integer/text, functions, unset) is an error.
pub fn add_values(left: &Value, right: &Value) -> EvalResult<Value> {
    let operator = Builtin::Plus.name();
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a
            .checked_add(*b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(operator)),
        (Value::Text(a), Value::Text(b)) => Ok(Value::text(concat_text(left, right, a, b))),
        _ => Err(invalid_operands(operator, left.type_name(), right.type_name())),
    }
}

fn concat_text(left: &Value, right: &Value, a: &str, b: &str) -> String {
    match (left.quoted(), right.quoted()) {
        (Some((delimiter, left_content)), Some((_, right_content))) => {
            [delimiter.open(), left_content, right_content, delimiter.close()].concat()
        }
        _ => [a, b].concat(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use crate::errors::ErrorCategory;
    use pretty_assertions::assert_eq;

    #[test]
    fn integers_add() {
        assert_eq!(add_values(&Value::Int(2), &Value::Int(3)).unwrap(), Value::Int(5));
        assert_eq!(add_values(&Value::Int(-2), &Value::Int(2)).unwrap(), Value::Int(0));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let err = add_values(&Value::Int(i64::MAX), &Value::Int(1)).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Runtime);
        assert_eq!(err.to_string(), "integer overflow in `+`");
    }

    #[test]
    fn quoted_strings_merge_without_doubled_quotes() {
        let sum = add_values(&Value::text("'testing '"), &Value::text("'testing further'")).unwrap();
        assert_eq!(sum, Value::text("'testing testing further'"));
    }

    #[test]
    fn merged_string_keeps_left_delimiter() {
        let sum = add_values(&Value::text("\"a\""), &Value::text("'b'")).unwrap();
        assert_eq!(sum, Value::text("\"ab\""));
    }

    #[test]
    fn bare_text_concatenates() {
        let sum = add_values(&Value::text("foo"), &Value::text("bar")).unwrap();
        assert_eq!(sum, Value::text("foobar"));
    }

    #[test]
    fn mixed_types_are_rejected() {
        let err = add_values(&Value::Int(1), &Value::text("'x'")).unwrap_err();
        assert_eq!(err.to_string(), "cannot apply `+` to integer and string");
        let err = add_values(&Value::Unset, &Value::Int(1)).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Runtime);
    }
}

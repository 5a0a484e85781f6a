use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parse_int_requires_full_span() {
    assert_eq!(Value::parse_int("42"), Some(Value::Int(42)));
    assert_eq!(Value::parse_int("007"), Some(Value::Int(7)));
    assert_eq!(Value::parse_int("42abc"), None);
    assert_eq!(Value::parse_int("'10'"), None);
    assert_eq!(Value::parse_int(""), None);
}

#[test]
fn coerce_integer_only_touches_unquoted_text() {
    assert_eq!(Value::text("12").coerce_integer(), Value::Int(12));
    assert_eq!(Value::text("'12'").coerce_integer(), Value::text("'12'"));
    assert_eq!(Value::text("x").coerce_integer(), Value::text("x"));
    assert_eq!(Value::Unset.coerce_integer(), Value::Unset);
}

#[test]
fn truthiness() {
    assert!(!Value::Int(0).is_truthy());
    assert!(Value::Int(-3).is_truthy());
    assert!(!Value::text("''").is_truthy());
    assert!(Value::text("'a'").is_truthy());
    assert!(Value::text("word").is_truthy());
    assert!(!Value::Unset.is_truthy());
}

#[test]
fn print_form_strips_one_layer_of_quotes() {
    assert_eq!(Value::text("'hi there'").print_form(), "hi there");
    assert_eq!(Value::text("\"'nested'\"").print_form(), "'nested'");
    assert_eq!(Value::text("'''block'''").print_form(), "block");
    assert_eq!(Value::text("bare").print_form(), "bare");
    assert_eq!(Value::Int(5).print_form(), "5");
}

#[test]
fn type_names() {
    assert_eq!(Value::Int(1).type_name(), "integer");
    assert_eq!(Value::text("'s'").type_name(), "string");
    assert_eq!(Value::text("s").type_name(), "text");
    assert_eq!(Value::Unset.type_name(), "unset");
}

#[test]
fn functions_compare_by_identity() {
    let body = TokenSlice::from_source("print x");
    let make = || {
        Rc::new(FunctionValue {
            name: Rc::from("f"),
            params: SmallVec::from_vec(vec![Rc::from("x")]),
            body: body.clone(),
        })
    };
    let a = make();
    let b = make();
    assert_eq!(Value::Function(Rc::clone(&a)), Value::Function(Rc::clone(&a)));
    assert_ne!(Value::Function(a), Value::Function(Rc::clone(&b)));
    assert_eq!(Value::Function(b).to_string(), "<function f(x)>");
}

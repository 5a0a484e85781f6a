use pretty_assertions::assert_eq;

use super::{output_of, run};
use crate::{ErrorCategory, EvalErrorKind, Value, DEFAULT_MAX_DEPTH};

#[test]
fn call_binds_arguments_in_order() {
    let source = "def add(x y){print {x + y}}\ncall add 2 3";
    assert_eq!(output_of(source), vec!["5"]);
}

#[test]
fn call_with_string_arguments() {
    let source = "\
def test_function(thing1 thing2){print {thing1 + thing2}}
call test_function 'I love you so much ' ':D!'
print 'and you even more ;)'";
    assert_eq!(
        output_of(source),
        vec!["I love you so much :D!", "and you even more ;)"]
    );
}

#[test]
fn repeated_calls_see_fresh_arguments() {
    let source = "def add(x y){print {x + y}}\ncall add 2 3\ncall add 10 20";
    assert_eq!(output_of(source), vec!["5", "30"]);
}

#[test]
fn parameters_do_not_clobber_caller_variables() {
    let source = "x = 100\ndef show(x){print x}\ncall show 1\nprint x";
    assert_eq!(output_of(source), vec!["1", "100"]);
}

#[test]
fn parameters_do_not_outlive_the_call() {
    let source = "def show(p){print p}\ncall show 1\nprint p";
    assert_eq!(output_of(source), vec!["1", "p"]);
}

#[test]
fn parameters_are_visible_in_nested_calls() {
    // Dynamic scoping: `inner` never declares `outer_arg` but sees it.
    let source = "\
def inner(){print outer_arg}
def outer(outer_arg){call inner}
call outer 'seen'";
    assert_eq!(output_of(source), vec!["seen"]);
}

#[test]
fn nested_calls_with_same_parameter_name_restore_correctly() {
    let source = "\
def inner(x){print x}
def outer(x){call inner {x + 1}\nprint x}
call outer 1";
    assert_eq!(output_of(source), vec!["2", "1"]);
}

#[test]
fn arguments_are_evaluated_in_the_caller() {
    let source = "def show(a b){print a\nprint b}\nx = 4\ncall show {x + 1} x";
    assert_eq!(output_of(source), vec!["5", "4"]);
}

#[test]
fn parameter_list_accepts_commas_and_brackets() {
    let source = "def pair[a, b]{print {a + b}}\ncall pair 'x' 'y'";
    assert_eq!(output_of(source), vec!["xy"]);
}

#[test]
fn body_result_becomes_call_value() {
    let source = "def inc(n){n + 1}\ny = {call inc 41}\nprint y";
    assert_eq!(output_of(source), vec!["42"]);
}

#[test]
fn call_result_at_top_level_is_program_value() {
    let (result, _) = run("def two(){2}\ncall two");
    assert_eq!(result.unwrap(), Some(Value::Int(2)));
}

#[test]
fn function_name_invokes_directly() {
    let source = "def add(x y){print {x + y}}\nadd 4 5";
    assert_eq!(output_of(source), vec!["9"]);
}

#[test]
fn functions_are_first_class_values() {
    let source = "def hello(){print 'hello'}\ngreet = hello\ncall greet";
    assert_eq!(output_of(source), vec!["hello"]);
}

#[test]
fn function_passed_as_argument_can_be_called() {
    let source = "\
def twice(f){call f\ncall f}
def ping(){print 'ping'}
call twice ping";
    assert_eq!(output_of(source), vec!["ping", "ping"]);
}

#[test]
fn unbounded_recursion_hits_the_depth_limit() {
    let (result, _) = run("def forever(){call forever}\ncall forever");
    assert_eq!(
        result.unwrap_err().kind,
        EvalErrorKind::DepthExceeded {
            limit: DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn definitions_are_scoped_to_their_block() {
    let source = "{def f(){print 'inside'}\ncall f}\ncall f";
    let (result, lines) = run(source);
    assert_eq!(lines, vec!["inside"]);
    assert_eq!(result.unwrap_err().category(), ErrorCategory::NotFound);
}

#[test]
fn calling_an_unbound_name_is_not_found() {
    let (result, _) = run("call nowhere 1");
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert_eq!(err.to_string(), "function `nowhere` not found");
}

#[test]
fn calling_a_value_is_not_callable() {
    let (result, _) = run("x = 5\ncall x");
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotCallable);
    assert_eq!(
        err.to_string(),
        "`x` is bound to integer `5`, which is not callable"
    );
}

#[test]
fn calling_a_builtin_is_not_callable() {
    let (result, _) = run("call print 1");
    assert_eq!(result.unwrap_err().category(), ErrorCategory::NotCallable);
}

#[test]
fn missing_argument_is_a_syntax_error() {
    let (result, _) = run("def add(x y){x + y}\ncall add 1");
    let err = result.unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnexpectedEnd {
            construct: "call",
            expected: "a value",
        }
    );
}

#[test]
fn failing_body_still_restores_parameters() {
    let (interpreter, output) = super::capturing();
    let mut env = crate::Environment::with_builtins();
    let result = interpreter.run_in("def bad(x){print x\ncall nowhere}\ncall bad 1", &mut env);
    assert!(result.is_err());
    assert!(env.macros().borrow().get("x").is_none());
    assert_eq!(output.lines(), vec!["1"]);
}

#[test]
fn malformed_parameter_list() {
    let (result, _) = run("def f(a + b){a}");
    assert_eq!(result.unwrap_err().category(), ErrorCategory::Syntax);
    let (result, _) = run("def f 'a' {a}");
    assert_eq!(result.unwrap_err().category(), ErrorCategory::Syntax);
    let (result, _) = run("def f(a) 'body'");
    assert_eq!(result.unwrap_err().category(), ErrorCategory::Syntax);
}

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::rc::Rc;

use super::*;
use crate::errors::{foreign_failed, ErrorCategory};
use crate::value::Value;
use pretty_assertions::assert_eq;

#[test]
fn unknown_language_is_unsupported() {
    let registry = ForeignRegistry::new();
    let mut env = Environment::with_builtins();
    let err = registry.execute("cobol", "DISPLAY 1", &mut env).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::UnsupportedForeign);
    assert_eq!(err.to_string(), "unsupported foreign language `cobol`");
}

#[test]
fn closure_executor_binds_into_environment() {
    let mut registry = ForeignRegistry::new();
    registry.register("echo", |source: &str, env: &mut Environment| -> EvalResult<()> {
        env.define(Rc::from("echoed"), Value::text(source));
        Ok(())
    });

    let mut env = Environment::with_builtins();
    registry.execute("echo", "x = 1", &mut env).unwrap();
    assert_eq!(
        env.lookup("echoed"),
        Some(crate::environment::Binding::Value(Value::text("x = 1")))
    );
}

#[test]
fn executor_errors_propagate() {
    let mut registry = ForeignRegistry::new();
    registry.register("fail", |_: &str, _: &mut Environment| -> EvalResult<()> {
        Err(foreign_failed("fail", "boom"))
    });
    let mut env = Environment::new();
    let err = registry.execute("fail", "", &mut env).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Runtime);
    assert_eq!(err.to_string(), "foreign `fail` code failed: boom");
}

#[test]
fn debug_lists_languages_sorted() {
    let mut registry = ForeignRegistry::new();
    registry.register("zsh", |_: &str, _: &mut Environment| -> EvalResult<()> { Ok(()) });
    registry.register("awk", |_: &str, _: &mut Environment| -> EvalResult<()> { Ok(()) });
    assert_eq!(
        format!("{registry:?}"),
        r#"ForeignRegistry { languages: ["awk", "zsh"] }"#
    );
}

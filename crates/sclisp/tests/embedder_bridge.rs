//! Embedder-bridge round-trips: registering a native function and calling it
//! from Lisp, and reading/writing scope bindings from the host side.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use sclisp::Interpreter;

#[test]
fn registered_function_is_callable_from_lisp() {
    let mut interp = Interpreter::with_default_host();
    interp.register_user_func(
        "add-ints",
        Some(Rc::new(|api| {
            let a = api.arg_integer(0)?;
            let b = api.arg_integer(1)?;
            api.return_integer(a + b);
            Ok(())
        })),
    );
    interp.eval_source("(add-ints 3 4)");
    assert_eq!(interp.repr(), "7");
}

#[test]
fn registered_function_coerces_string_and_real_arguments() {
    let mut interp = Interpreter::with_default_host();
    interp.register_user_func(
        "describe",
        Some(Rc::new(|api| {
            let s = api.arg_string(0)?;
            let r = api.arg_real(1)?;
            api.return_string(format!("{s}:{r}"));
            Ok(())
        })),
    );
    interp.eval_source(r#"(describe "n" 3)"#);
    assert_eq!(interp.repr(), "\"n:3\"");
}

#[test]
fn unregistering_a_function_hides_it() {
    let mut interp = Interpreter::with_default_host();
    interp.register_user_func("noop", Some(Rc::new(|api| {
        api.return_integer(1);
        Ok(())
    })));
    interp.register_user_func("noop", None);
    let code = interp.eval_source("(noop)");
    assert_eq!(code, sclisp::ErrorCode::BadArg.as_code());
}

#[test]
fn scope_api_round_trips_integer_real_and_string() {
    let mut interp = Interpreter::with_default_host();
    {
        let mut scope = interp.scope_api();
        scope.set_integer("count", 42);
        scope.set_real("pi", 3.5);
        scope.set_string("name", "sclisp");
    }
    interp.eval_source("count");
    assert_eq!(interp.repr(), "42");
    interp.eval_source("pi");
    assert_eq!(interp.repr(), "3.5");
    interp.eval_source("name");
    assert_eq!(interp.repr(), "\"sclisp\"");

    let mut scope = interp.scope_api();
    assert_eq!(scope.get_integer("count").unwrap(), 42);
    assert!((scope.get_real("pi").unwrap() - 3.5).abs() < f64::EPSILON);
    assert_eq!(scope.get_string("name").unwrap(), "sclisp");
}

#[test]
fn scope_api_sees_bindings_written_from_lisp() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(set total (+ 10 20))");
    let mut scope = interp.scope_api();
    assert_eq!(scope.get_integer("total").unwrap(), 30);
}

//! The boundary tests from §8: token overflow, `prompt` without `getchar`,
//! `(car nil)`, `(cdr nil)`, unbound symbol.

use pretty_assertions::assert_eq;
use sclisp::{ErrorCode, Interpreter, NoIoHost};

#[test]
fn token_of_128_bytes_overflows() {
    let mut interp = Interpreter::with_default_host();
    let long = "a".repeat(128);
    let code = interp.eval_source(&long);
    assert_eq!(code, ErrorCode::Overflow.as_code());
}

#[test]
fn token_of_127_bytes_is_accepted() {
    let mut interp = Interpreter::with_default_host();
    let ok = "a".repeat(127);
    interp.eval_source(&format!("(set {ok} 1)"));
    let code = interp.eval_source(&ok);
    assert_eq!(code, ErrorCode::Ok.as_code());
    assert_eq!(interp.repr(), "1");
}

#[test]
fn prompt_without_getchar_is_unsupported() {
    let mut interp = Interpreter::new(Box::new(NoIoHost));
    let code = interp.eval_source("(prompt)");
    assert_eq!(code, ErrorCode::Unsupported.as_code());
}

#[test]
fn car_of_nil_is_nil() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(car nil)");
    assert_eq!(interp.repr(), "nil");
}

#[test]
fn cdr_of_nil_is_nil() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(cdr nil)");
    assert_eq!(interp.repr(), "nil");
}

#[test]
fn unbound_symbol_is_err() {
    let mut interp = Interpreter::with_default_host();
    let code = interp.eval_source("this-is-not-bound");
    assert_eq!(code, ErrorCode::Err.as_code());
}

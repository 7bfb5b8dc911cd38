//! The ten end-to-end scenarios, one test per row.

use pretty_assertions::assert_eq;
use sclisp::Interpreter;

#[test]
fn row_1_simple_addition() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(+ 1 2 3)");
    assert_eq!(interp.repr(), "6");
}

#[test]
fn row_2_mixed_real_arithmetic() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(* (+ 3 5) (- 3 4 5 6 (/ 1 7.0)))");
    assert_eq!(interp.repr(), "-97.142857");
}

#[test]
fn row_3_recursive_map_via_set_sugar() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(set (map l f) (cond ((nil? l) nil) (#t (cons (f (car l)) (map (cdr l) f)))))");
    interp.eval_source("(map (list 1.0 2 3.0) (lambda (x) (+ x 100)))");
    assert_eq!(interp.repr(), "(101.0 102 103.0)");
}

#[test]
fn row_4_quote_special_form() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(quote (a b c))");
    assert_eq!(interp.repr(), "(a b c)");
}

#[test]
fn row_5_quote_sugar() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("'(1 2 3)");
    assert_eq!(interp.repr(), "(1 2 3)");
}

#[test]
fn row_6_cond_picks_first_true_branch() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source(r#"(cond ((== 1 2) "a") ((== 2 2) "b") (#t "c"))"#);
    assert_eq!(interp.repr(), "\"b\"");
}

#[test]
fn row_7_typeof_real() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(typeof 3.5)");
    assert_eq!(interp.repr(), "\"real\"");
}

#[test]
fn row_8_cons_builds_dotted_pair() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(cons 1 (cons 2 3))");
    assert_eq!(interp.repr(), "(1 2 . 3)");
}

#[test]
fn row_9_reverse_proper_list() {
    let mut interp = Interpreter::with_default_host();
    interp.eval_source("(reverse (list 1 2 3))");
    assert_eq!(interp.repr(), "(3 2 1)");
}

#[test]
fn row_10_division_by_zero_is_bad_arg() {
    let mut interp = Interpreter::with_default_host();
    let code = interp.eval_source("(/ 1 0)");
    assert_eq!(code, sclisp::ErrorCode::BadArg.as_code());
    assert_eq!(interp.repr(), "nil");
}

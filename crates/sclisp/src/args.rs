//! Argument-list helpers shared by the builtin library.
//!
//! Every helper here that can fail releases whatever it has already evaluated
//! before returning an error — the "on any intermediate error during a
//! multi-step construction, all partially-built references are released
//! before returning" resource-discipline rule (§5).

use crate::error::{SclispError, SclispResult};
use crate::interpreter::Interpreter;
use crate::value::{Ref, Value};

/// Flattens a proper-list cons chain of *unevaluated* expression cells into a
/// `Vec` of those cells, without evaluating or touching refcounts — these are
/// borrowed positions inside a list the caller still owns.
pub fn expr_items(interp: &Interpreter, list: Ref) -> Vec<Ref> {
    let mut items = Vec::new();
    let mut cursor = list;
    while let Some(id) = cursor {
        match interp.heap.get(id) {
            Value::Cell(car, cdr) => {
                items.push(*car);
                cursor = *cdr;
            }
            _ => {
                // improper tail: the non-cell atom is the final "argument" position
                items.push(cursor);
                break;
            }
        }
    }
    items
}

/// Evaluates each expression cell in `list`, left to right, returning the
/// owned result references. On error, every already-evaluated reference is
/// released before propagating.
pub fn eval_each(interp: &mut Interpreter, list: Ref) -> SclispResult<Vec<Ref>> {
    let exprs = expr_items(interp, list);
    let mut results = Vec::with_capacity(exprs.len());
    for expr in exprs {
        match interp.eval(expr) {
            Ok(value) => results.push(value),
            Err(err) => {
                release_all(interp, results);
                return Err(err);
            }
        }
    }
    Ok(results)
}

/// Releases every reference in `values`.
pub fn release_all(interp: &mut Interpreter, values: Vec<Ref>) {
    for value in values {
        if let Some(id) = value {
            interp.heap.dec_ref(id);
        }
    }
}

/// Checks that `values` has exactly `n` elements, releasing them all and
/// returning `SCLISP_BADARG` if not.
pub fn expect_exact(interp: &mut Interpreter, values: Vec<Ref>, n: usize, what: &str) -> SclispResult<Vec<Ref>> {
    if values.len() == n {
        Ok(values)
    } else {
        let got = values.len();
        release_all(interp, values);
        Err(SclispError::bad_arg(format!("{what} requires exactly {n} argument(s), got {got}")))
    }
}

/// Checks that `values` has at most `n` elements, releasing them all and
/// returning `SCLISP_BADARG` if not.
pub fn expect_at_most(interp: &mut Interpreter, values: Vec<Ref>, n: usize, what: &str) -> SclispResult<Vec<Ref>> {
    if values.len() <= n {
        Ok(values)
    } else {
        let got = values.len();
        release_all(interp, values);
        Err(SclispError::bad_arg(format!("{what} takes at most {n} argument(s), got {got}")))
    }
}

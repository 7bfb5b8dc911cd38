//! Control and assignment builtins (§4.5 "Control", "Assignment"): `quote`,
//! `cond`, `and`, `or`, `lambda`, `set`.
//!
//! These all receive the raw, unevaluated argument cdr and decide for
//! themselves whether and how to evaluate it — there is no separate "special
//! form" dispatch category (§9).

use crate::args;
use crate::error::{SclispError, SclispResult};
use crate::interpreter::Interpreter;
use crate::value::{Ref, Value, is_truthy};

pub fn quote(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let items = args::expr_items(interp, cdr);
    if items.len() != 1 {
        return Err(SclispError::bad_arg("quote requires exactly one argument"));
    }
    let expr = items[0];
    if let Some(id) = expr {
        interp.heap.inc_ref(id);
    }
    Ok(expr)
}

pub fn cond(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    for clause in args::expr_items(interp, cdr) {
        let parts = args::expr_items(interp, clause);
        if parts.len() != 2 {
            return Err(SclispError::bad_arg("cond clause must be (test consequent)"));
        }
        let (test, consequent) = (parts[0], parts[1]);
        let test_value = interp.eval(test)?;
        let truthy = is_truthy(test_value.map(|id| interp.heap.get(id)));
        if let Some(id) = test_value {
            interp.heap.dec_ref(id);
        }
        if truthy {
            return interp.eval(consequent);
        }
    }
    Ok(None)
}

pub fn and(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let mut last: Ref = None;
    for expr in args::expr_items(interp, cdr) {
        let value = interp.eval(expr)?;
        let truthy = is_truthy(value.map(|id| interp.heap.get(id)));
        if let Some(id) = last {
            interp.heap.dec_ref(id);
        }
        if !truthy {
            return Ok(value);
        }
        last = value;
    }
    Ok(last)
}

pub fn or(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    for expr in args::expr_items(interp, cdr) {
        let value = interp.eval(expr)?;
        let truthy = is_truthy(value.map(|id| interp.heap.get(id)));
        if truthy {
            return Ok(value);
        }
        if let Some(id) = value {
            interp.heap.dec_ref(id);
        }
    }
    Ok(None)
}

pub fn lambda(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let Some(id) = cdr else {
        return Err(SclispError::bad_arg("lambda requires a parameter list and a body"));
    };
    let (params, body) = match interp.heap.get(id) {
        Value::Cell(p, b) => (*p, *b),
        _ => return Err(SclispError::bad_arg("lambda requires a parameter list and a body")),
    };
    if let Some(p) = params {
        interp.heap.inc_ref(p);
    }
    if let Some(b) = body {
        interp.heap.inc_ref(b);
    }
    Ok(Some(interp.heap.allocate(Value::Function { params, body })))
}

/// `(set name value)` or `(set (name p1 p2 ...) expr1 expr2 ...)` — the
/// latter is sugar for `(set name (lambda (p1 p2 ...) expr1 expr2 ...))`.
pub fn set(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let Some(cell_id) = cdr else {
        return Err(SclispError::bad_arg("set requires a target and a value"));
    };
    let (target, rest) = match interp.heap.get(cell_id) {
        Value::Cell(t, r) => (*t, *r),
        _ => return Err(SclispError::bad_arg("set requires a target and a value")),
    };
    let Some(target_id) = target else {
        return Err(SclispError::bad_arg("set target must be a symbol or a parameter list"));
    };

    match interp.heap.get(target_id).clone() {
        Value::Symbol(name) => {
            let items = args::expr_items(interp, rest);
            if items.len() != 1 {
                return Err(SclispError::bad_arg("set requires exactly one value expression"));
            }
            let value = interp.eval(items[0])?;
            if let Some(id) = value {
                interp.heap.inc_ref(id);
            }
            interp.scope.set(&mut interp.heap, &name, value);
            Ok(value)
        }
        Value::Cell(name_ref, params) => {
            let Some(name_id) = name_ref else {
                return Err(SclispError::bad_arg("set lambda-sugar requires a named target"));
            };
            let name = match interp.heap.get(name_id) {
                Value::Symbol(s) => s.clone(),
                _ => return Err(SclispError::bad_arg("set lambda-sugar target must be a symbol")),
            };
            if let Some(p) = params {
                interp.heap.inc_ref(p);
            }
            if let Some(b) = rest {
                interp.heap.inc_ref(b);
            }
            let func = interp.heap.allocate(Value::Function { params, body: rest });
            interp.scope.set(&mut interp.heap, &name, Some(func));
            interp.heap.inc_ref(func);
            Ok(Some(func))
        }
        _ => Err(SclispError::bad_arg("set target must be a symbol or a parameter list")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NoIoHost;
    use crate::printer::repr;
    use crate::reader::read_first;

    fn eval_str(interp: &mut Interpreter, src: &str) -> Ref {
        let expr = read_first(src, &mut interp.heap).unwrap();
        interp.eval(expr).unwrap()
    }

    #[test]
    fn quote_returns_unevaluated() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(quote (a b c))"), &interp.heap), "(a b c)");
        assert_eq!(repr(eval_str(&mut interp, "'(1 2 3)"), &interp.heap), "(1 2 3)");
    }

    #[test]
    fn and_or_short_circuit() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(and 1 0 (car (quote ())))"), &interp.heap), "0");
        assert_eq!(repr(eval_str(&mut interp, "(or 0 nil 5)"), &interp.heap), "5");
    }

    #[test]
    fn set_lambda_sugar_defines_recursive_map() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        eval_str(
            &mut interp,
            "(set (map l f) (cond ((nil? l) nil) (#t (cons (f (car l)) (map (cdr l) f)))))",
        );
        let v = eval_str(&mut interp, "(map (list 1.0 2 3.0) (lambda (x) (+ x 100)))");
        assert_eq!(repr(v, &interp.heap), "(101.0 102 103.0)");
    }
}

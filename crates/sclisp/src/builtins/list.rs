//! List-primitive builtins (§4.5 "List primitives"): `car`, `cdr`, `cons`,
//! `list`, `reverse`, `eval`.

use crate::args;
use crate::error::{SclispError, SclispResult};
use crate::interpreter::Interpreter;
use crate::value::{Ref, Value};

pub fn car(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_exact(interp, args, 1, "car")?;
    Ok(match args[0] {
        Some(id) => match interp.heap.get(id) {
            Value::Cell(car, _) => {
                let car = *car;
                if let Some(c) = car {
                    interp.heap.inc_ref(c);
                }
                interp.heap.dec_ref(id);
                car
            }
            // "car of a non-cell returns the object itself" (§4.5).
            _ => Some(id),
        },
        None => None,
    })
}

pub fn cdr(interp: &mut Interpreter, cdr_arg: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr_arg)?;
    let args = args::expect_exact(interp, args, 1, "cdr")?;
    Ok(match args[0] {
        Some(id) => match interp.heap.get(id) {
            Value::Cell(_, cdr) => {
                let cdr = *cdr;
                if let Some(c) = cdr {
                    interp.heap.inc_ref(c);
                }
                interp.heap.dec_ref(id);
                cdr
            }
            // "cdr of a non-cell returns nil" (§4.5).
            _ => {
                interp.heap.dec_ref(id);
                None
            }
        },
        None => None,
    })
}

pub fn cons(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    if args.is_empty() || args.len() > 2 {
        let got = args.len();
        args::release_all(interp, args);
        return Err(SclispError::bad_arg(format!("cons takes 1 or 2 arguments, got {got}")));
    }
    let car = args[0];
    let tail = args.get(1).copied().unwrap_or(None);
    Ok(Some(interp.heap.allocate(Value::Cell(car, tail))))
}

pub fn list(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let mut result: Ref = None;
    for &value in args.iter().rev() {
        result = Some(interp.heap.allocate(Value::Cell(value, result)));
    }
    Ok(result)
}

pub fn reverse(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_exact(interp, args, 1, "reverse")?;
    Ok(reverse_value(interp, args[0]))
}

/// `reverse(nil) = nil`; `reverse(car . cdr) = append_one(reverse(cdr), car)`;
/// a non-cell atom reverses to itself. This single recursive definition
/// produces both the ordinary list case and the dotted-pair case `(a . b) ->
/// (b . a)` from §4.5 without special-casing either.
fn reverse_value(interp: &mut Interpreter, value: Ref) -> Ref {
    let Some(id) = value else { return None };
    let cell = match interp.heap.get(id) {
        Value::Cell(car, cdr) => Some((*car, *cdr)),
        _ => None,
    };
    let Some((car, cdr)) = cell else { return value };
    if let Some(c) = car {
        interp.heap.inc_ref(c);
    }
    if let Some(c) = cdr {
        interp.heap.inc_ref(c);
    }
    interp.heap.dec_ref(id);
    let rest = reverse_value(interp, cdr);
    append_one(interp, rest, car)
}

/// Appends a single already-owned reference `x` to the end of `structure`.
fn append_one(interp: &mut Interpreter, structure: Ref, x: Ref) -> Ref {
    let Some(id) = structure else {
        return Some(interp.heap.allocate(Value::Cell(x, None)));
    };
    let cell = match interp.heap.get(id) {
        Value::Cell(car, cdr) => Some((*car, *cdr)),
        _ => None,
    };
    match cell {
        Some((car, cdr)) => {
            if let Some(c) = car {
                interp.heap.inc_ref(c);
            }
            interp.heap.dec_ref(id);
            let new_cdr = append_one(interp, cdr, x);
            Some(interp.heap.allocate(Value::Cell(car, new_cdr)))
        }
        None => Some(interp.heap.allocate(Value::Cell(structure, x))),
    }
}

pub fn eval_builtin(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_exact(interp, args, 1, "eval")?;
    let value = args[0];
    let result = interp.eval(value);
    if let Some(id) = value {
        interp.heap.dec_ref(id);
    }
    result
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
    fn car_cdr_of_nil_is_nil() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(car nil)"), &interp.heap), "nil");
        assert_eq!(repr(eval_str(&mut interp, "(cdr nil)"), &interp.heap), "nil");
    }

    #[test]
    fn cons_defaults_second_to_nil() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(cons 1 2)"), &interp.heap), "(1 . 2)");
        assert_eq!(repr(eval_str(&mut interp, "(cons 1 (cons 2 3))"), &interp.heap), "(1 2 . 3)");
    }

    #[test]
    fn reverse_proper_list() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(reverse (list 1 2 3))"), &interp.heap), "(3 2 1)");
    }

    #[test]
    fn reverse_dotted_pair_swaps() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(reverse (cons 1 2))"), &interp.heap), "(2 . 1)");
    }
}

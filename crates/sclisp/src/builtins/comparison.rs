//! Comparison builtins (§4.5 "Comparison"): `<`, `<=`, `>`, `>=`, `==`.

use std::cmp::Ordering;

use crate::args;
use crate::error::SclispResult;
use crate::heap::Heap;
use crate::interpreter::Interpreter;
use crate::printer;
use crate::value::{Ref, Value};

use super::arithmetic::num_of;

fn bool_ref(interp: &mut Interpreter, value: bool) -> Ref {
    Some(if value {
        interp.heap.canonical_true()
    } else {
        interp.heap.canonical_false()
    })
}

fn is_string(heap: &Heap, r: Ref) -> bool {
    matches!(r.map(|id| heap.get(id)), Some(Value::Str(_)))
}

fn string_of(heap: &Heap, r: Ref) -> String {
    match r.map(|id| heap.get(id)) {
        Some(Value::Str(s)) => s.clone(),
        _ => printer::repr(r, heap),
    }
}

/// Promotion ladder: integer -> real -> string. If either side is a string,
/// the other side is rendered through the printer and compared lexically.
fn compare_values(heap: &Heap, lhs: Ref, rhs: Ref) -> SclispResult<Ordering> {
    match (is_string(heap, lhs), is_string(heap, rhs)) {
        (true, true) => Ok(string_of(heap, lhs).cmp(&string_of(heap, rhs))),
        (true, false) => Ok(string_of(heap, lhs).cmp(&printer::repr(rhs, heap))),
        (false, true) => Ok(printer::repr(lhs, heap).cmp(&string_of(heap, rhs))),
        (false, false) => {
            let l = num_of(heap, lhs)?;
            let r = num_of(heap, rhs)?;
            Ok(l.as_f64().partial_cmp(&r.as_f64()).unwrap_or(Ordering::Equal))
        }
    }
}

fn dispatch(
    interp: &mut Interpreter,
    cdr: Ref,
    name: &str,
    is_eq: bool,
    test: impl Fn(Ordering) -> bool,
) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_exact(interp, args, 2, name)?;
    let (lhs, rhs) = (args[0], args[1]);

    // `==` on two static singletons compares by identity rather than value (§9).
    if is_eq {
        if let (Some(l), Some(r)) = (lhs, rhs) {
            if interp.heap.is_static(l) && interp.heap.is_static(r) {
                let result = l == r;
                args::release_all(interp, args);
                return Ok(bool_ref(interp, result));
            }
        }
    }

    let ordering = compare_values(&interp.heap, lhs, rhs);
    args::release_all(interp, args);
    Ok(bool_ref(interp, test(ordering?)))
}

pub fn lt(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    dispatch(interp, cdr, "<", false, |o| o == Ordering::Less)
}

pub fn le(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    dispatch(interp, cdr, "<=", false, |o| o != Ordering::Greater)
}

pub fn gt(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    dispatch(interp, cdr, ">", false, |o| o == Ordering::Greater)
}

pub fn ge(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    dispatch(interp, cdr, ">=", false, |o| o != Ordering::Less)
}

pub fn eq(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    dispatch(interp, cdr, "==", true, |o| o == Ordering::Equal)
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
    fn string_comparison_renders_the_other_side() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        let v = eval_str(&mut interp, r#"(== "3" 3)"#);
        assert_eq!(repr(v, &interp.heap), "1");
    }

    #[test]
    fn cond_picks_first_true_branch() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        let v = eval_str(&mut interp, r#"(cond ((== 1 2) "a") ((== 2 2) "b") (#t "c"))"#);
        assert_eq!(repr(v, &interp.heap), "\"b\"");
    }
}

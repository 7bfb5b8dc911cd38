//! Predicate and type-introspection builtins (§4.5 "Predicates", "Type
//! introspection"): `true?`, `false?`, `atom?`, `cell?`, `nil?`, `typeof`.

use crate::args;
use crate::interpreter::Interpreter;
use crate::value::{Ref, Value, is_truthy};
use crate::value::{
    TYPE_NAME_BUILTIN, TYPE_NAME_CELL, TYPE_NAME_FUNCTION, TYPE_NAME_INTEGER, TYPE_NAME_NIL, TYPE_NAME_REAL,
    TYPE_NAME_STRING, TYPE_NAME_SYMBOL,
};
use crate::error::SclispResult;

fn bool_ref(interp: &mut Interpreter, value: bool) -> Ref {
    Some(if value {
        interp.heap.canonical_true()
    } else {
        interp.heap.canonical_false()
    })
}

fn unary(interp: &mut Interpreter, cdr: Ref, name: &str, test: impl FnOnce(&Interpreter, Ref) -> bool) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_exact(interp, args, 1, name)?;
    let value = args[0];
    let result = test(interp, value);
    if let Some(id) = value {
        interp.heap.dec_ref(id);
    }
    Ok(bool_ref(interp, result))
}

pub fn true_p(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    unary(interp, cdr, "true?", |interp, v| is_truthy(v.map(|id| interp.heap.get(id))))
}

pub fn false_p(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    unary(interp, cdr, "false?", |interp, v| !is_truthy(v.map(|id| interp.heap.get(id))))
}

pub fn atom_p(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    unary(interp, cdr, "atom?", |interp, v| !matches!(v.map(|id| interp.heap.get(id)), Some(Value::Cell(..))))
}

pub fn cell_p(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    unary(interp, cdr, "cell?", |interp, v| matches!(v.map(|id| interp.heap.get(id)), Some(Value::Cell(..))))
}

pub fn nil_p(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    unary(interp, cdr, "nil?", |_interp, v| v.is_none())
}

pub fn typeof_(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_exact(interp, args, 1, "typeof")?;
    let value = args[0];
    let (slot, name) = match value {
        None => (0, TYPE_NAME_NIL),
        Some(id) => match interp.heap.get(id) {
            Value::Integer(_) => (1, TYPE_NAME_INTEGER),
            Value::Real(_) => (2, TYPE_NAME_REAL),
            Value::Str(_) => (3, TYPE_NAME_STRING),
            Value::Symbol(_) => (4, TYPE_NAME_SYMBOL),
            Value::Function { .. } => (5, TYPE_NAME_FUNCTION),
            Value::Builtin(_) => (6, TYPE_NAME_BUILTIN),
            Value::Cell(..) => (7, TYPE_NAME_CELL),
        },
    };
    if let Some(id) = value {
        interp.heap.dec_ref(id);
    }
    Ok(Some(interp.heap.type_name_singleton(slot, name)))
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
    fn typeof_reports_every_variant() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(typeof 3.5)"), &interp.heap), "\"real\"");
        assert_eq!(repr(eval_str(&mut interp, "(typeof 3)"), &interp.heap), "\"integer\"");
        assert_eq!(repr(eval_str(&mut interp, "(typeof nil)"), &interp.heap), "\"nil\"");
        assert_eq!(repr(eval_str(&mut interp, "(typeof (quote a))"), &interp.heap), "\"symbol\"");
    }

    #[test]
    fn predicates_match_truthiness() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(nil? nil)"), &interp.heap), "1");
        assert_eq!(repr(eval_str(&mut interp, "(nil? 0)"), &interp.heap), "0");
        assert_eq!(repr(eval_str(&mut interp, "(atom? (quote a))"), &interp.heap), "1");
        assert_eq!(repr(eval_str(&mut interp, "(cell? (cons 1 2))"), &interp.heap), "1");
    }
}

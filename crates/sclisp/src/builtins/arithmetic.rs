//! Arithmetic builtins (§4.5 "Arithmetic"): `+`, `-`, `*`, `/`, `mod`.
//!
//! All five fold left over evaluated arguments, promoting the accumulator to
//! real the moment a real operand is seen and staying real from then on.

use crate::args;
use crate::error::{SclispError, SclispResult};
use crate::heap::Heap;
use crate::interpreter::Interpreter;
use crate::value::{Ref, Value};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    pub(crate) fn as_f64(self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(n) => n as f64,
            Self::Real(f) => f,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Int(n) => Value::Integer(n),
            Self::Real(f) => Value::Real(f),
        }
    }
}

/// `nil` reads as integer zero (§4.5); anything non-numeric is `BADARG`.
pub(crate) fn num_of(heap: &Heap, r: Ref) -> SclispResult<Num> {
    match r {
        None => Ok(Num::Int(0)),
        Some(id) => match heap.get(id) {
            Value::Integer(n) => Ok(Num::Int(*n)),
            Value::Real(f) => Ok(Num::Real(*f)),
            _ => Err(SclispError::bad_arg("expected a number")),
        },
    }
}

fn is_zero(n: Num) -> bool {
    match n {
        Num::Int(0) => true,
        Num::Int(_) => false,
        Num::Real(f) => f == 0.0,
    }
}

fn promote(a: Num, b: Num, int_op: impl Fn(i64, i64) -> i64, real_op: impl Fn(f64, f64) -> f64) -> Num {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(int_op(x, y)),
        _ => Num::Real(real_op(a.as_f64(), b.as_f64())),
    }
}

/// Shared fold: `empty` is the zero-argument result, `unary_from_zero` makes
/// `op(0, x)` the one-argument result instead of `x` itself (unary `-`'s
/// negation case — every other operator's one-argument result is the bare
/// operand).
fn fold(
    interp: &mut Interpreter,
    cdr: Ref,
    empty: Num,
    unary_from_zero: bool,
    op: impl Fn(Num, Num) -> SclispResult<Num>,
) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let mut nums = Vec::with_capacity(args.len());
    for &value in &args {
        match num_of(&interp.heap, value) {
            Ok(n) => nums.push(n),
            Err(err) => {
                args::release_all(interp, args);
                return Err(err);
            }
        }
    }
    args::release_all(interp, args);

    let result = if nums.is_empty() {
        empty
    } else if nums.len() == 1 {
        if unary_from_zero { op(Num::Int(0), nums[0])? } else { nums[0] }
    } else {
        let mut acc = nums[0];
        for &n in &nums[1..] {
            acc = op(acc, n)?;
        }
        acc
    };
    Ok(Some(interp.heap.allocate(result.into_value())))
}

pub fn add(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    fold(interp, cdr, Num::Int(0), false, |a, b| Ok(promote(a, b, i64::wrapping_add, |x, y| x + y)))
}

pub fn sub(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    fold(interp, cdr, Num::Int(0), true, |a, b| Ok(promote(a, b, i64::wrapping_sub, |x, y| x - y)))
}

pub fn mul(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    fold(interp, cdr, Num::Int(1), false, |a, b| Ok(promote(a, b, i64::wrapping_mul, |x, y| x * y)))
}

pub fn div(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    fold(interp, cdr, Num::Int(0), false, |a, b| {
        if is_zero(b) {
            return Err(SclispError::bad_arg("division by zero"));
        }
        Ok(promote(a, b, i64::wrapping_div, |x, y| x / y))
    })
}

pub fn rem(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    fold(interp, cdr, Num::Int(0), false, |a, b| {
        if is_zero(b) {
            return Err(SclispError::bad_arg("division by zero"));
        }
        match (a, b) {
            (Num::Int(x), Num::Int(y)) => Ok(Num::Int(x.wrapping_rem(y))),
            _ => real_mod(a.as_f64(), b.as_f64()),
        }
    })
}

/// Real `mod` depends on the platform's floating-point modulo, toggled by the
/// `float-mod` build feature (SPEC_FULL.md §10.3).
#[cfg(feature = "float-mod")]
fn real_mod(a: f64, b: f64) -> SclispResult<Num> {
    Ok(Num::Real(a % b))
}

#[cfg(not(feature = "float-mod"))]
fn real_mod(_a: f64, _b: f64) -> SclispResult<Num> {
    Err(SclispError::unsupported("real mod requires the float-mod build feature"))
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
    fn promotes_to_real_on_contact() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        let v = eval_str(&mut interp, "(* (+ 3 5) (- 3 4 5 6 (/ 1 7.0)))");
        assert_eq!(repr(v, &interp.heap), "-97.142857");
    }

    #[test]
    fn zero_arg_defaults() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(+)"), &interp.heap), "0");
        assert_eq!(repr(eval_str(&mut interp, "(*)"), &interp.heap), "1");
    }

    #[test]
    fn unary_minus_negates() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        assert_eq!(repr(eval_str(&mut interp, "(- 5)"), &interp.heap), "-5");
    }

    #[test]
    fn division_by_zero_is_bad_arg() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        let expr = read_first("(/ 1 0)", &mut interp.heap).unwrap();
        let err = interp.eval(expr).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::BadArg);
    }
}

//! The builtin library (§4.5): installed into the root scope at init.
//!
//! Each category — arithmetic, comparison, list primitives, control and
//! assignment, predicates and type introspection, I/O — gets its own
//! submodule. [`dispatch`] is the single entry point `eval_cell` calls for
//! every `Value::Builtin` head, whether it's one of the fixed [`CoreOp`]s or
//! a function a host registered through `register_user_func`.

mod arithmetic;
mod comparison;
mod control;
mod io;
mod list;
mod predicates;

use crate::args;
use crate::error::SclispResult;
use crate::function_api::FunctionApi;
use crate::interpreter::Interpreter;
use crate::value::{Builtin, CoreOp, NativeFn, Ref, Value};

/// Dispatches a builtin atom's call with its raw, unevaluated argument cdr.
pub fn dispatch(interp: &mut Interpreter, builtin: Builtin, cdr: Ref) -> SclispResult<Ref> {
    match builtin {
        Builtin::Core(op) => dispatch_core(interp, op, cdr),
        Builtin::Host { func, .. } => dispatch_host(interp, &func, cdr),
    }
}

fn dispatch_core(interp: &mut Interpreter, op: CoreOp, cdr: Ref) -> SclispResult<Ref> {
    match op {
        CoreOp::Add => arithmetic::add(interp, cdr),
        CoreOp::Sub => arithmetic::sub(interp, cdr),
        CoreOp::Mul => arithmetic::mul(interp, cdr),
        CoreOp::Div => arithmetic::div(interp, cdr),
        CoreOp::Mod => arithmetic::rem(interp, cdr),
        CoreOp::Lt => comparison::lt(interp, cdr),
        CoreOp::Le => comparison::le(interp, cdr),
        CoreOp::Gt => comparison::gt(interp, cdr),
        CoreOp::Ge => comparison::ge(interp, cdr),
        CoreOp::Eq => comparison::eq(interp, cdr),
        CoreOp::Car => list::car(interp, cdr),
        CoreOp::Cdr => list::cdr(interp, cdr),
        CoreOp::Cons => list::cons(interp, cdr),
        CoreOp::List => list::list(interp, cdr),
        CoreOp::Reverse => list::reverse(interp, cdr),
        CoreOp::Eval => list::eval_builtin(interp, cdr),
        CoreOp::Quote => control::quote(interp, cdr),
        CoreOp::Cond => control::cond(interp, cdr),
        CoreOp::And => control::and(interp, cdr),
        CoreOp::Or => control::or(interp, cdr),
        CoreOp::Lambda => control::lambda(interp, cdr),
        CoreOp::Set => control::set(interp, cdr),
        CoreOp::TrueP => predicates::true_p(interp, cdr),
        CoreOp::FalseP => predicates::false_p(interp, cdr),
        CoreOp::AtomP => predicates::atom_p(interp, cdr),
        CoreOp::CellP => predicates::cell_p(interp, cdr),
        CoreOp::NilP => predicates::nil_p(interp, cdr),
        CoreOp::TypeOf => predicates::typeof_(interp, cdr),
        CoreOp::Println => io::println(interp, cdr),
        CoreOp::Prompt => io::prompt(interp, cdr),
    }
}

/// Evaluates the call's arguments once, hands them to the host's closure
/// through a [`FunctionApi`], then releases whatever the closure didn't
/// consume and whatever return value an error path left behind.
fn dispatch_host(interp: &mut Interpreter, func: &NativeFn, cdr: Ref) -> SclispResult<Ref> {
    let evaluated = args::eval_each(interp, cdr)?;
    let mut api = FunctionApi::new(interp, evaluated);
    let outcome = func(&mut api);
    let (remaining, return_value) = api.into_parts();
    args::release_all(interp, remaining);
    match outcome {
        Ok(()) => Ok(return_value),
        Err(err) => {
            if let Some(id) = return_value {
                interp.heap.dec_ref(id);
            }
            Err(err)
        }
    }
}

/// Installs every [`CoreOp`] under its Lisp-visible name, plus the `#t`/`#f`
/// named constants, into the root scope (§4.5).
pub fn install_builtins(interp: &mut Interpreter) {
    const CORE_OPS: &[(&str, CoreOp)] = &[
        ("+", CoreOp::Add),
        ("-", CoreOp::Sub),
        ("*", CoreOp::Mul),
        ("/", CoreOp::Div),
        ("mod", CoreOp::Mod),
        ("<", CoreOp::Lt),
        ("<=", CoreOp::Le),
        (">", CoreOp::Gt),
        (">=", CoreOp::Ge),
        ("==", CoreOp::Eq),
        ("car", CoreOp::Car),
        ("cdr", CoreOp::Cdr),
        ("cons", CoreOp::Cons),
        ("list", CoreOp::List),
        ("reverse", CoreOp::Reverse),
        ("eval", CoreOp::Eval),
        ("quote", CoreOp::Quote),
        ("cond", CoreOp::Cond),
        ("and", CoreOp::And),
        ("or", CoreOp::Or),
        ("lambda", CoreOp::Lambda),
        ("set", CoreOp::Set),
        ("true?", CoreOp::TrueP),
        ("false?", CoreOp::FalseP),
        ("atom?", CoreOp::AtomP),
        ("cell?", CoreOp::CellP),
        ("nil?", CoreOp::NilP),
        ("typeof", CoreOp::TypeOf),
        ("println", CoreOp::Println),
        ("prompt", CoreOp::Prompt),
    ];
    for &(name, op) in CORE_OPS {
        let id = interp.heap.allocate(Value::Builtin(Builtin::Core(op)));
        interp.scope.set(&mut interp.heap, name, Some(id));
    }

    let t = interp.heap.canonical_true();
    interp.scope.set(&mut interp.heap, "#t", Some(t));
    let f = interp.heap.canonical_false();
    interp.scope.set(&mut interp.heap, "#f", Some(f));
}

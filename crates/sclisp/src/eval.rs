//! The tree-walking evaluator (§4.4).

use crate::args::expr_items;
use crate::builtins;
use crate::error::SclispError;
use crate::error::SclispResult;
use crate::interpreter::Interpreter;
use crate::value::{Ref, Value};

impl Interpreter {
    /// `eval(expr) -> object`, per §4.4's four cases.
    pub fn eval(&mut self, expr: Ref) -> SclispResult<Ref> {
        let Some(id) = expr else {
            // case 1: the empty reference evaluates to itself.
            return Ok(None);
        };
        match self.heap.get(id).clone() {
            // case 3: a symbol resolves through the scope chain.
            Value::Symbol(name) => self.scope.query(&self.heap, &name).map_err(|_| {
                SclispError::err("scope query failed")
            }),
            // case 4: the head is evaluated and dispatched.
            Value::Cell(car, cdr) => self.eval_cell(car, cdr),
            // case 2: every other atom evaluates to itself (a new reference).
            _ => {
                self.heap.inc_ref(id);
                Ok(Some(id))
            }
        }
    }

    fn eval_cell(&mut self, car: Ref, cdr: Ref) -> SclispResult<Ref> {
        let head = self.eval(car)?;
        let Some(head_id) = head else {
            return Err(SclispError::bad_arg("atomic operator is not executable"));
        };
        let head_value = self.heap.get(head_id).clone();
        let result = match head_value {
            Value::Function { params, body } => self.apply_function(params, cdr, body),
            Value::Builtin(b) => builtins::dispatch(self, b, cdr),
            Value::Cell(..) => Err(SclispError::bad_arg("non-atomic operator is not executable")),
            _ => Err(SclispError::bad_arg("atomic operator is not executable")),
        };
        // Keep the head reference alive for the whole dispatch (a Function's
        // params/body are owned by the head object itself) and release it
        // only once the call has returned.
        self.heap.dec_ref(head_id);
        result
    }

    /// Pushes a new frame and pair-wise binds each parameter symbol to the
    /// **evaluated** value of the corresponding argument expression,
    /// evaluated in the caller's current scope. Stops at the end of either
    /// list — excess on either side is silently ignored (§4.3, §9 "Scope
    /// arity mismatches": the specified behavior, not the aspirational one).
    fn enter_with(&mut self, params: Ref, args: Ref) -> SclispResult<()> {
        let param_items = expr_items(self, params);
        let arg_items = expr_items(self, args);
        self.scope.push_empty();
        let n = param_items.len().min(arg_items.len());
        for (param, arg_expr) in param_items.into_iter().take(n).zip(arg_items.into_iter().take(n)) {
            let Some(pid) = param else { continue };
            let name = match self.heap.get(pid) {
                Value::Symbol(s) => s.clone(),
                _ => continue,
            };
            match self.eval(arg_expr) {
                Ok(value) => self.scope.bind_in_new_frame(&name, value),
                Err(err) => {
                    self.scope.pop(&mut self.heap);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// `apply_function(params, arg_cells, body)` (§4.4).
    pub fn apply_function(&mut self, params: Ref, arg_cells: Ref, body: Ref) -> SclispResult<Ref> {
        self.enter_with(params, arg_cells)?;
        let body_items = expr_items(self, body);
        let mut result: Ref = None;
        for expr in body_items {
            match self.eval(expr) {
                Ok(value) => {
                    if let Some(old) = result.take() {
                        self.heap.dec_ref(old);
                    }
                    result = value;
                }
                Err(err) => {
                    if let Some(old) = result.take() {
                        self.heap.dec_ref(old);
                    }
                    self.scope.pop(&mut self.heap);
                    return Err(err);
                }
            }
        }
        self.scope.pop(&mut self.heap);
        Ok(result)
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
    fn self_evaluating_atoms() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        let v = eval_str(&mut interp, "42");
        assert_eq!(repr(v, &interp.heap), "42");
    }

    #[test]
    fn unbound_symbol_is_err() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        let expr = read_first("not-bound", &mut interp.heap).unwrap();
        let err = interp.eval(expr).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Err);
    }

    #[test]
    fn scope_shadowing() {
        let mut interp = Interpreter::new(Box::new(NoIoHost));
        eval_str(&mut interp, "(set x 1)");
        eval_str(&mut interp, "(set (f) (set x 2))");
        let result = eval_str(&mut interp, "(f)");
        assert_eq!(repr(result, &interp.heap), "2");
        let outer = eval_str(&mut interp, "x");
        assert_eq!(repr(outer, &interp.heap), "1");
    }
}

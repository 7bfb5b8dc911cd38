//! The Function API (§4.7): passed into each native callback invocation to
//! fetch coerced, already-evaluated positional arguments and set a typed
//! return value.

use crate::coerce::{coerce_to_integer, coerce_to_real, coerce_to_string};
use crate::error::{SclispError, SclispResult};
use crate::interpreter::Interpreter;
use crate::value::Ref;

/// Owns the evaluated argument references for one native-callback
/// invocation and the return value the callback sets. Dropping it without
/// having consumed the arguments would leak references, so [`FunctionApi`]
/// always releases whatever remains of `args` when the call completes
/// (see `builtins::dispatch_host`).
pub struct FunctionApi<'a> {
    interp: &'a mut Interpreter,
    args: Vec<Ref>,
    return_value: Ref,
}

impl<'a> FunctionApi<'a> {
    pub(crate) fn new(interp: &'a mut Interpreter, args: Vec<Ref>) -> Self {
        Self {
            interp,
            args,
            return_value: None,
        }
    }

    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    fn arg_at(&self, i: usize) -> SclispResult<Ref> {
        let value = *self
            .args
            .get(i)
            .ok_or_else(|| SclispError::bad_arg(format!("missing argument {i}")))?;
        // "`nil` argument to a user callback is rejected" (§4.7, §9 open question).
        if value.is_none() {
            return Err(SclispError::err(format!("argument {i} is nil")));
        }
        Ok(value)
    }

    /// Evaluate-and-coerce the `i`-th positional argument to an integer.
    pub fn arg_integer(&mut self, i: usize) -> SclispResult<i64> {
        let value = self.arg_at(i)?;
        coerce_to_integer(&self.interp.heap, value)
    }

    /// Evaluate-and-coerce the `i`-th positional argument to a real.
    pub fn arg_real(&mut self, i: usize) -> SclispResult<f64> {
        let value = self.arg_at(i)?;
        coerce_to_real(&self.interp.heap, value)
    }

    /// Evaluate-and-coerce the `i`-th positional argument to a string.
    pub fn arg_string(&mut self, i: usize) -> SclispResult<String> {
        let value = self.arg_at(i)?;
        coerce_to_string(&self.interp.heap, value)
    }

    fn set_return(&mut self, value: crate::value::Value) {
        if let Some(old) = self.return_value.take() {
            self.interp.heap.dec_ref(old);
        }
        self.return_value = Some(self.interp.heap.allocate(value));
    }

    pub fn return_integer(&mut self, v: i64) {
        self.set_return(crate::value::Value::Integer(v));
    }

    pub fn return_real(&mut self, v: f64) {
        self.set_return(crate::value::Value::Real(v));
    }

    pub fn return_string(&mut self, v: impl Into<String>) {
        self.set_return(crate::value::Value::Str(v.into()));
    }

    /// Sets the return value to `nil`, releasing any previous return value.
    pub fn return_nil(&mut self) {
        if let Some(old) = self.return_value.take() {
            self.interp.heap.dec_ref(old);
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Ref>, Ref) {
        (self.args, self.return_value)
    }
}

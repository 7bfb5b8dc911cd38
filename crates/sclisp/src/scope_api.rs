//! The Scope API (§4.7): exposed outside evaluation so a host can read and
//! write named bindings between `eval` calls.

use crate::coerce::{coerce_to_integer, coerce_to_real, coerce_to_string};
use crate::error::SclispResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// A short-lived handle into an interpreter's scope chain.
pub struct ScopeApi<'a> {
    interp: &'a mut Interpreter,
}

impl<'a> ScopeApi<'a> {
    pub(crate) fn new(interp: &'a mut Interpreter) -> Self {
        Self { interp }
    }

    /// Consults the scope chain innermost-to-root and coerces the bound
    /// value to an integer.
    pub fn get_integer(&mut self, symbol: &str) -> SclispResult<i64> {
        let value = self.interp.scope.query(&self.interp.heap, symbol)?;
        let result = coerce_to_integer(&self.interp.heap, value);
        if let Some(id) = value {
            self.interp.heap.dec_ref(id);
        }
        result
    }

    pub fn get_real(&mut self, symbol: &str) -> SclispResult<f64> {
        let value = self.interp.scope.query(&self.interp.heap, symbol)?;
        let result = coerce_to_real(&self.interp.heap, value);
        if let Some(id) = value {
            self.interp.heap.dec_ref(id);
        }
        result
    }

    pub fn get_string(&mut self, symbol: &str) -> SclispResult<String> {
        let value = self.interp.scope.query(&self.interp.heap, symbol)?;
        let result = coerce_to_string(&self.interp.heap, value);
        if let Some(id) = value {
            self.interp.heap.dec_ref(id);
        }
        result
    }

    /// Creates a new integer atom and binds `symbol` to it in the innermost
    /// frame.
    pub fn set_integer(&mut self, symbol: &str, value: i64) {
        let id = Some(self.interp.heap.allocate(Value::Integer(value)));
        self.interp.scope.set(&mut self.interp.heap, symbol, id);
    }

    pub fn set_real(&mut self, symbol: &str, value: f64) {
        let id = Some(self.interp.heap.allocate(Value::Real(value)));
        self.interp.scope.set(&mut self.interp.heap, symbol, id);
    }

    pub fn set_string(&mut self, symbol: &str, value: impl Into<String>) {
        let id = Some(self.interp.heap.allocate(Value::Str(value.into())));
        self.interp.scope.set(&mut self.interp.heap, symbol, id);
    }
}

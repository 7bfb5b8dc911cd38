//! Shared coercion rules for the embedder bridge (§4.7): both the Function API
//! (`arg_integer`/`arg_real`/`arg_string`) and the Scope API
//! (`get_integer`/`get_real`/`get_string`) apply the same table once the
//! Function API's blanket "nil argument is rejected" check has passed.
//!
//! > `nil` → 0 / 0.0 / error; integer ↔ real widen; string → integer (first
//! > via integer scan, then real scan); string → real symmetrically;
//! > anything → string via the printer.

use crate::error::SclispError;
use crate::heap::Heap;
use crate::printer;
use crate::value::{Ref, Value};

pub fn coerce_to_integer(heap: &Heap, r: Ref) -> Result<i64, SclispError> {
    match r {
        None => Ok(0),
        Some(id) => match heap.get(id) {
            Value::Integer(n) => Ok(*n),
            #[allow(clippy::cast_possible_truncation)]
            Value::Real(f) => Ok(*f as i64),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .or_else(|_| s.trim().parse::<f64>().map(|f| f as i64))
                .map_err(|_| SclispError::bad_arg("string does not scan as an integer")),
            _ => Err(SclispError::bad_arg("value cannot be coerced to an integer")),
        },
    }
}

pub fn coerce_to_real(heap: &Heap, r: Ref) -> Result<f64, SclispError> {
    match r {
        None => Ok(0.0),
        Some(id) => match heap.get(id) {
            Value::Integer(n) => Ok(*n as f64),
            Value::Real(f) => Ok(*f),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| SclispError::bad_arg("string does not scan as a real")),
            _ => Err(SclispError::bad_arg("value cannot be coerced to a real")),
        },
    }
}

pub fn coerce_to_string(heap: &Heap, r: Ref) -> Result<String, SclispError> {
    match r {
        None => Err(SclispError::err("nil cannot be coerced to a string")),
        Some(id) => match heap.get(id) {
            Value::Str(s) => Ok(s.clone()),
            _ => Ok(printer::repr(r, heap)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_coerces_to_numeric_zero() {
        let heap = Heap::new();
        assert_eq!(coerce_to_integer(&heap, None).unwrap(), 0);
        assert!((coerce_to_real(&heap, None).unwrap() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nil_coerces_to_string_is_an_error() {
        let heap = Heap::new();
        assert!(coerce_to_string(&heap, None).is_err());
    }

    #[test]
    fn string_scans_as_integer_then_real() {
        let mut heap = Heap::new();
        let s = Some(heap.allocate(Value::Str("42".to_owned())));
        assert_eq!(coerce_to_integer(&heap, s).unwrap(), 42);
        let s = Some(heap.allocate(Value::Str("3.5".to_owned())));
        assert_eq!(coerce_to_integer(&heap, s).unwrap(), 3);
    }

    #[test]
    fn anything_coerces_to_string_via_printer() {
        let mut heap = Heap::new();
        let n = Some(heap.allocate(Value::Integer(7)));
        assert_eq!(coerce_to_string(&heap, n).unwrap(), "7");
    }
}

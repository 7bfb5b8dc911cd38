//! The canonical renderer (§4.6): used both for `repr` display and as the
//! string-coercion fallback elsewhere in the crate (comparison, `typeof`
//! formatting helpers, the Function API's "anything -> string" coercion).

use crate::heap::Heap;
use crate::value::{Ref, Value};

/// Design minimum from §4.6: output longer than this is silently truncated.
pub const MAX_REPR_LEN: usize = 1023;

/// Renders `r` to its canonical textual form, truncated to [`MAX_REPR_LEN`]
/// bytes at a character boundary.
#[must_use]
pub fn repr(r: Ref, heap: &Heap) -> String {
    let mut out = String::new();
    write_value(r, heap, &mut out);
    truncate_to_budget(out)
}

fn truncate_to_budget(mut s: String) -> String {
    if s.len() <= MAX_REPR_LEN {
        return s;
    }
    let mut end = MAX_REPR_LEN;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
    s
}

fn write_value(r: Ref, heap: &Heap, out: &mut String) {
    let Some(id) = r else {
        out.push_str("nil");
        return;
    };
    match heap.get(id) {
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Real(f) => out.push_str(&format_real(*f)),
        Value::Str(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::Symbol(s) => out.push_str(s),
        Value::Function { .. } => out.push_str("<func>"),
        Value::Builtin(_) => out.push_str("<builtin>"),
        Value::Cell(car, cdr) => write_cell(*car, *cdr, heap, out),
    }
}

fn write_cell(car: Ref, cdr: Ref, heap: &Heap, out: &mut String) {
    out.push('(');
    write_value(car, heap, out);
    let mut rest = cdr;
    loop {
        match rest {
            None => break,
            Some(id) => match heap.get(id) {
                Value::Cell(next_car, next_cdr) => {
                    out.push(' ');
                    write_value(*next_car, heap, out);
                    rest = *next_cdr;
                }
                _ => {
                    out.push_str(" . ");
                    write_value(rest, heap, out);
                    break;
                }
            },
        }
    }
    out.push(')');
}

/// Fixed-point with six fractional digits, trailing zeros trimmed but never
/// stripping the digit immediately right of the decimal point: `3.0` stays
/// `3.0`, `3.140000` becomes `3.14`.
#[must_use]
pub fn format_real(f: f64) -> String {
    let fixed = format!("{f:.6}");
    let Some(dot) = fixed.find('.') else {
        return fixed;
    };
    let mut end = fixed.len();
    while end > dot + 2 && fixed.as_bytes()[end - 1] == b'0' {
        end -= 1;
    }
    fixed[..end].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros_but_keeps_one_digit() {
        assert_eq!(format_real(3.0), "3.0");
        assert_eq!(format_real(3.14), "3.14");
        assert_eq!(format_real(-97.142_857_142_857), "-97.142857");
    }

    #[test]
    fn nil_renders_as_literal() {
        let heap = Heap::new();
        assert_eq!(repr(None, &heap), "nil");
    }

    #[test]
    fn improper_cell_renders_with_dot() {
        let mut heap = Heap::new();
        let a = Some(heap.allocate(Value::Integer(1)));
        let b = Some(heap.allocate(Value::Integer(2)));
        let c = Some(heap.allocate(Value::Integer(3)));
        let inner = Some(heap.allocate(Value::Cell(b, c)));
        let outer = Some(heap.allocate(Value::Cell(a, inner)));
        assert_eq!(repr(outer, &heap), "(1 2 . 3)");
    }
}

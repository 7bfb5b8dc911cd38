//! I/O builtins (§4.5 "I/O"): `println`, `prompt`.

use crate::args;
use crate::error::{SclispError, SclispResult};
use crate::host::Stream;
use crate::interpreter::Interpreter;
use crate::value::{Ref, Value};

pub fn println(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_exact(interp, args, 1, "println")?;
    let value = args[0];
    let text = match value.map(|id| interp.heap.get(id)) {
        Some(Value::Str(s)) => s.clone(),
        _ => {
            if let Some(id) = value {
                interp.heap.dec_ref(id);
            }
            return Err(SclispError::unsupported("println requires a string argument"));
        }
    };
    if let Some(id) = value {
        interp.heap.dec_ref(id);
    }
    interp.host_mut().print(Stream::Stdout, &text);
    interp.host_mut().print(Stream::Stdout, "\n");
    Ok(None)
}

/// Optionally writes a prompt string, then reads one line via `getchar`,
/// growing a buffer geometrically (`Vec::push`'s doubling amortizes this for
/// free) until `\n` or EOF.
pub fn prompt(interp: &mut Interpreter, cdr: Ref) -> SclispResult<Ref> {
    let args = args::eval_each(interp, cdr)?;
    let args = args::expect_at_most(interp, args, 1, "prompt")?;

    if let Some(value) = args.first().copied() {
        let text = match value.map(|id| interp.heap.get(id)) {
            Some(Value::Str(s)) => s.clone(),
            _ => {
                if let Some(id) = value {
                    interp.heap.dec_ref(id);
                }
                return Err(SclispError::unsupported("prompt's argument must be a string"));
            }
        };
        if let Some(id) = value {
            interp.heap.dec_ref(id);
        }
        interp.host_mut().print(Stream::Stdout, &text);
    }

    if !interp.host_mut().supports_getchar() {
        return Err(SclispError::unsupported("prompt requires a getchar callback"));
    }

    let mut buf = Vec::new();
    loop {
        match interp.host_mut().getchar() {
            Some(b'\n') | None => break,
            Some(b) => buf.push(b),
        }
    }
    let line = String::from_utf8_lossy(&buf).into_owned();
    Ok(Some(interp.heap.allocate(Value::Str(line))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CollectingHost;
    use crate::printer::repr;
    use crate::reader::read_first;

    fn eval_str(interp: &mut Interpreter, src: &str) -> crate::error::SclispResult<Ref> {
        let expr = read_first(src, &mut interp.heap).unwrap();
        interp.eval(expr)
    }

    #[test]
    fn println_requires_a_string() {
        let mut interp = Interpreter::new(Box::new(CollectingHost::default()));
        let err = eval_str(&mut interp, "(println 5)").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Unsupported);
    }

    #[test]
    fn println_writes_to_stdout() {
        let mut interp = Interpreter::new(Box::new(CollectingHost::default()));
        let v = eval_str(&mut interp, r#"(println "hi")"#).unwrap();
        assert_eq!(repr(v, &interp.heap), "nil");
    }

    #[test]
    fn prompt_without_getchar_is_unsupported() {
        let mut interp = Interpreter::new(Box::new(crate::host::NoIoHost));
        let err = eval_str(&mut interp, "(prompt)").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Unsupported);
    }
}

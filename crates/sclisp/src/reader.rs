//! Consumes the token stream and builds an object tree (§4.2).
//!
//! ```text
//! expr := atom | '(' expr* ')' | QUOTE expr
//! atom := INTEGER | REAL | STRING | SYMBOL | NIL
//! ```

use crate::error::{SclispError, SclispResult};
use crate::heap::Heap;
use crate::lexer::{Token, tokenize};
use crate::value::{Ref, Value};

/// Parses only the first complete expression out of `source`; any trailing
/// tokens are silently discarded (§4.7's de-facto trailing-comment mechanism).
///
/// # Errors
/// `SCLISP_OVERFLOW` from the lexer, or `SCLISP_BADARG` for unbalanced
/// parens / an empty source with no expression to read.
pub fn read_first(source: &str, heap: &mut Heap) -> SclispResult<Ref> {
    let tokens = tokenize(source)?;
    let mut pos = 0;
    let value = read_expr(&tokens, &mut pos, heap)?;
    Ok(value)
}

fn read_expr(tokens: &[Token], pos: &mut usize, heap: &mut Heap) -> SclispResult<Ref> {
    let Some(token) = tokens.get(*pos) else {
        return Err(SclispError::bad_arg("unexpected end of input"));
    };
    *pos += 1;
    match token {
        Token::Nil => Ok(None),
        Token::Integer(n) => Ok(Some(heap.allocate(Value::Integer(*n)))),
        Token::Real(r) => Ok(Some(heap.allocate(Value::Real(*r)))),
        Token::Str(s) => Ok(Some(heap.allocate(Value::Str(s.clone())))),
        Token::Symbol(s) => Ok(Some(heap.allocate(Value::Symbol(s.clone())))),
        Token::Quote => {
            let inner = read_expr(tokens, pos, heap)?;
            let quote_sym = heap.allocate(Value::Symbol("quote".to_owned()));
            let inner_cell = heap.allocate(Value::Cell(inner, None));
            Ok(Some(heap.allocate(Value::Cell(Some(quote_sym), Some(inner_cell)))))
        }
        Token::RParen => Err(SclispError::bad_arg("unbalanced right parenthesis")),
        Token::LParen => read_list(tokens, pos, heap),
    }
}

/// Reads expressions until a matching `)`, building a right-nested cons chain.
fn read_list(tokens: &[Token], pos: &mut usize, heap: &mut Heap) -> SclispResult<Ref> {
    let mut items = Vec::new();
    loop {
        match tokens.get(*pos) {
            None => return Err(SclispError::bad_arg("unterminated list")),
            Some(Token::RParen) => {
                *pos += 1;
                break;
            }
            Some(_) => items.push(read_expr(tokens, pos, heap)?),
        }
    }
    let mut tail: Ref = None;
    for item in items.into_iter().rev() {
        tail = Some(heap.allocate(Value::Cell(item, tail)));
    }
    Ok(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repr_of(r: Ref, heap: &Heap) -> String {
        crate::printer::repr(r, heap)
    }

    #[test]
    fn reads_proper_list() {
        let mut heap = Heap::new();
        let v = read_first("(1 2 3)", &mut heap).unwrap();
        assert_eq!(repr_of(v, &heap), "(1 2 3)");
    }

    #[test]
    fn reads_quote_sugar() {
        let mut heap = Heap::new();
        let v = read_first("'(1 2 3)", &mut heap).unwrap();
        assert_eq!(repr_of(v, &heap), "(quote (1 2 3))");
    }

    #[test]
    fn bare_atom_at_top_level() {
        let mut heap = Heap::new();
        let v = read_first("42", &mut heap).unwrap();
        assert_eq!(repr_of(v, &heap), "42");
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let mut heap = Heap::new();
        let v = read_first("1 2 3", &mut heap).unwrap();
        assert_eq!(repr_of(v, &heap), "1");
    }

    #[test]
    fn unbalanced_rparen_is_bad_arg() {
        let mut heap = Heap::new();
        let err = read_first(")", &mut heap).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::BadArg);
    }

    #[test]
    fn unterminated_list_is_bad_arg() {
        let mut heap = Heap::new();
        let err = read_first("(1 2", &mut heap).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::BadArg);
    }
}

//! The tagged object model (§3).
//!
//! `Object` and `Atom` are naturally a pair of sum types in the spec, and are
//! implemented as such here: [`Value`] is the enum with one variant per
//! payload shape. The empty reference ("nil") is not itself a `Value` variant
//! — it is the absence of a [`HeapId`], represented throughout the crate as
//! `Ref = Option<HeapId>` rather than as a sentinel heap entry.

use std::rc::Rc;

use crate::error::SclispResult;
use crate::function_api::FunctionApi;
use crate::heap::HeapId;

/// A reference to an object: `None` is the empty reference (`nil`), `Some(id)`
/// points at a live heap entry.
pub type Ref = Option<HeapId>;

/// A native function registered by the host through the embedder bridge.
///
/// The spec's callback table entry carries a function pointer, an opaque user
/// pointer, and an optional destructor invoked when the builtin atom is torn
/// down. A `Rc<dyn Fn>` closure captures the user's state directly and runs
/// its own `Drop` when the last reference disappears, so there is no separate
/// destructor field to thread through by hand.
pub type NativeFn = Rc<dyn Fn(&mut FunctionApi<'_>) -> SclispResult<()>>;

/// One of the operators built into the root scope at init (§4.5).
///
/// These are dispatched by the evaluator exactly like a host-registered
/// builtin: the callback receives the raw, unevaluated argument cdr and
/// decides for itself whether and how to evaluate it. There is no separate
/// "special form" category (§9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Car,
    Cdr,
    Cons,
    List,
    Reverse,
    Eval,
    Quote,
    Cond,
    And,
    Or,
    Lambda,
    Set,
    TrueP,
    FalseP,
    AtomP,
    CellP,
    NilP,
    TypeOf,
    Println,
    Prompt,
}

/// A callable atom: either one of the fixed core operators or a function the
/// host registered through `register_user_func`.
#[derive(Clone)]
pub enum Builtin {
    Core(CoreOp),
    Host { name: Rc<str>, func: NativeFn },
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core(op) => write!(f, "Builtin::Core({op:?})"),
            Self::Host { name, .. } => write!(f, "Builtin::Host({name:?})"),
        }
    }
}

/// The universal heap-allocated value.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Str(String),
    Symbol(String),
    /// `(car . cdr)`. Proper lists are right-nested cells terminated by `nil`.
    Cell(Ref, Ref),
    /// A Lisp-defined callable: a parameter list object and a body list object.
    Function { params: Ref, body: Ref },
    Builtin(Builtin),
}

/// The eight names `typeof` and the printer's type vocabulary use (§4.5, §4.6).
pub const TYPE_NAME_NIL: &str = "nil";
pub const TYPE_NAME_INTEGER: &str = "integer";
pub const TYPE_NAME_REAL: &str = "real";
pub const TYPE_NAME_STRING: &str = "string";
pub const TYPE_NAME_SYMBOL: &str = "symbol";
pub const TYPE_NAME_FUNCTION: &str = "function";
pub const TYPE_NAME_BUILTIN: &str = "builtin";
pub const TYPE_NAME_CELL: &str = "cell";

impl Value {
    /// Heap references this value owns, for `Heap::dec_ref`'s child-release walk.
    pub(crate) fn child_ids(&self) -> Vec<HeapId> {
        match self {
            Self::Integer(_) | Self::Real(_) | Self::Str(_) | Self::Symbol(_) | Self::Builtin(_) => Vec::new(),
            Self::Cell(car, cdr) => [*car, *cdr].into_iter().flatten().collect(),
            Self::Function { params, body } => [*params, *body].into_iter().flatten().collect(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => TYPE_NAME_INTEGER,
            Self::Real(_) => TYPE_NAME_REAL,
            Self::Str(_) => TYPE_NAME_STRING,
            Self::Symbol(_) => TYPE_NAME_SYMBOL,
            Self::Function { .. } => TYPE_NAME_FUNCTION,
            Self::Builtin(_) => TYPE_NAME_BUILTIN,
            Self::Cell(..) => TYPE_NAME_CELL,
        }
    }

    #[must_use]
    pub fn as_cell(&self) -> Option<(Ref, Ref)> {
        match self {
            Self::Cell(car, cdr) => Some((*car, *cdr)),
            _ => None,
        }
    }
}

/// Truthiness (§8, invariant "Truthiness"): `nil`, integer `0`, and real `0.0`
/// are false; every other reference (including an empty string or symbol) is
/// true.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None => false,
        Some(Value::Integer(0)) => false,
        Some(Value::Real(r)) if *r == 0.0 => false,
        Some(_) => true,
    }
}

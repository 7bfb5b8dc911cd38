//! The error alphabet the interpreter surfaces across its public entry points.
//!
//! Every fallible operation inside the crate returns `Result<T, SclispError>` and
//! propagates with `?`. This is the idiomatic stand-in for the "check a flag between
//! sub-steps" propagation policy of a C-shaped embeddable interpreter: the observable
//! behavior (short-circuit to the nearest top-level `eval`, code and message
//! retrievable afterward) is the same, only the mechanism changed.

use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

/// The stable, small integer error alphabet.
///
/// Values match the specified codes exactly so that a host embedding the
/// interpreter through a C ABI can rely on the numeric values never moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum ErrorCode {
    /// No error.
    #[strum(serialize = "SCLISP_OK")]
    Ok,
    /// Generic failure: bad parse, bad scope lookup.
    #[strum(serialize = "SCLISP_ERR")]
    Err,
    /// Host allocator returned a null pointer.
    #[strum(serialize = "SCLISP_NOMEM")]
    NoMem,
    /// Wrong argument count, wrong type, or divide by zero.
    #[strum(serialize = "SCLISP_BADARG")]
    BadArg,
    /// Operation requires a callback or build feature the host didn't provide.
    #[strum(serialize = "SCLISP_UNSUPPORTED")]
    Unsupported,
    /// A lexer token buffer exceeded its fixed maximum length.
    #[strum(serialize = "SCLISP_OVERFLOW")]
    Overflow,
    /// An internal invariant was violated.
    #[strum(serialize = "SCLISP_BUG")]
    Bug,
}

impl ErrorCode {
    /// The stable integer code, as specified in the external interface.
    #[must_use]
    pub fn as_code(self) -> i64 {
        match self {
            Self::Ok => 0,
            Self::Err => 1,
            Self::NoMem => 2,
            Self::BadArg => 3,
            Self::Unsupported => 4,
            Self::Overflow => 5,
            Self::Bug => 0x00BA_DB01,
        }
    }

    /// The static human-readable name for this code (entry point `errstr`).
    #[must_use]
    pub fn errstr(self) -> &'static str {
        self.into()
    }
}

/// An error produced anywhere inside the interpreter, carrying a code and an
/// optional descriptive message.
///
/// The message is `None` for codes whose static name is descriptive enough on its
/// own (e.g. `NoMem`); most `Err`/`BadArg`/`Unsupported` cases carry a short,
/// specific explanation, matching the "optional static message" design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SclispError {
    pub code: ErrorCode,
    pub message: Option<String>,
}

impl SclispError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn bare(code: ErrorCode) -> Self {
        Self { code, message: None }
    }

    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Err, message)
    }

    #[must_use]
    pub fn bad_arg(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadArg, message)
    }

    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unsupported, message)
    }

    #[must_use]
    pub fn no_mem() -> Self {
        Self::bare(ErrorCode::NoMem)
    }

    #[must_use]
    pub fn bug(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Bug, message)
    }

    /// The message a subsequent `errmsg` call would report, falling back to the
    /// code's static name when no dynamic message was recorded.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_else(|| self.code.errstr())
    }
}

impl fmt::Display for SclispError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {msg}", self.code.errstr()),
            None => write!(f, "{}", self.code.errstr()),
        }
    }
}

impl std::error::Error for SclispError {}

pub type SclispResult<T> = Result<T, SclispError>;

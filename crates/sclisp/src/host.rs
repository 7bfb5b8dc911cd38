//! The host callback table (§2, §6), translated into a Rust trait.
//!
//! The spec's table is four function pointers plus an opaque user pointer:
//! `alloc`/`zalloc`/`free` (mandatory, with `zalloc` optional and shimmed from
//! `alloc` when absent), `print` (mandatory), and `getchar` (optional,
//! required only for `prompt`). The allocation-facing half translates
//! awkwardly into Rust: handing a host a raw pointer to free is exactly the
//! pattern Rust's ownership model exists to avoid, and the arena in
//! [`crate::heap`] is already backed by a `Vec` that the host has no business
//! reaching into. [`crate::heap::Heap`] allocates directly from the process
//! allocator instead (an OOM there aborts the process the way any other Rust
//! program's would; `SCLISP_NOMEM` is reserved in [`crate::error::ErrorCode`]
//! for the taxonomy in §7 but has no live caller — there is no host-budget
//! mechanism to surface it from).
//!
//! What remains of the table — `print`, `getchar` — is the genuinely
//! observable, stateful half, which stays as trait methods with the same
//! mandatory/optional split the spec specifies: Rust's type system enforces
//! "mandatory" at compile time instead of `init` checking for a null pointer
//! and returning `BADARG`.

/// Stream identifiers for the print callback (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout = 1,
    Stderr = 2,
}

/// The callbacks a host program supplies to an interpreter instance.
pub trait Host {
    /// Writes `text` to the given stream. Mandatory.
    fn print(&mut self, stream: Stream, text: &str);

    /// Reads one byte of interactive input, or `None` on EOF. Optional —
    /// the default means "no `getchar` callback supplied", and `prompt`
    /// reports `SCLISP_UNSUPPORTED` when this returns `None` on the first call.
    fn getchar(&mut self) -> Option<u8> {
        None
    }

    /// `true` if this host supports `getchar` at all (some hosts may want to
    /// expose partial support without overriding `getchar` itself).
    fn supports_getchar(&self) -> bool {
        false
    }
}

/// The default host: wraps the platform's standard library, as described for
/// a table the embedder doesn't customize.
#[derive(Debug, Default)]
pub struct StdHost {
    stdin_buf: Vec<u8>,
    stdin_pos: usize,
}

impl StdHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for StdHost {
    fn print(&mut self, stream: Stream, text: &str) {
        use std::io::Write as _;
        match stream {
            Stream::Stdout => {
                print!("{text}");
                let _ = std::io::stdout().flush();
            }
            Stream::Stderr => {
                eprint!("{text}");
            }
        }
    }

    fn getchar(&mut self) -> Option<u8> {
        use std::io::Read as _;
        if self.stdin_pos >= self.stdin_buf.len() {
            self.stdin_buf.clear();
            self.stdin_pos = 0;
            let mut byte = [0u8; 1];
            match std::io::stdin().read(&mut byte) {
                Ok(0) | Err(_) => return None,
                Ok(_) => return Some(byte[0]),
            }
        }
        let b = self.stdin_buf[self.stdin_pos];
        self.stdin_pos += 1;
        Some(b)
    }

    fn supports_getchar(&self) -> bool {
        true
    }
}

/// A host with no interactive input and no print sink, useful for embedding
/// contexts that only care about the return value of `eval`.
#[derive(Debug, Default)]
pub struct NoIoHost;

impl Host for NoIoHost {
    fn print(&mut self, _stream: Stream, _text: &str) {}
}

/// A host that collects everything written to stdout into a `String`, for
/// tests that want to assert on printed output.
#[derive(Debug, Default)]
pub struct CollectingHost {
    pub stdout: String,
    pub stderr: String,
}

impl Host for CollectingHost {
    fn print(&mut self, stream: Stream, text: &str) {
        match stream {
            Stream::Stdout => self.stdout.push_str(text),
            Stream::Stderr => self.stderr.push_str(text),
        }
    }
}

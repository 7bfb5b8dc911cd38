//! The interpreter instance and the embedder bridge's top-level entry points
//! (§3 "Interpreter instance", §4.7 "Top-level eval", §6 "Public entry points").

use std::rc::Rc;

use crate::builtins::install_builtins;
use crate::error::{ErrorCode, SclispError};
use crate::heap::Heap;
use crate::host::Host;
use crate::reader::read_first;
use crate::scope::Scope;
use crate::scope_api::ScopeApi;
use crate::value::{Builtin, NativeFn, Ref, Value};
use crate::{printer, version};

/// The callback table, current scope, last-result reference, and last-error
/// state (§3). `init`/`destroy` in the spec map to `Interpreter::new` and
/// `Drop`: the last-result and every scope frame are released unconditionally
/// when the instance goes out of scope.
pub struct Interpreter {
    pub(crate) heap: Heap,
    pub(crate) scope: Scope,
    host: Box<dyn Host>,
    last_result: Ref,
    last_error: Option<SclispError>,
}

impl Interpreter {
    /// `init`: constructs an instance and installs the builtin library into
    /// the root scope.
    #[must_use]
    pub fn new(host: Box<dyn Host>) -> Self {
        let mut interp = Self {
            heap: Heap::new(),
            scope: Scope::new(),
            host,
            last_result: None,
            last_error: None,
        };
        install_builtins(&mut interp);
        interp
    }

    /// Convenience constructor for the default, standard-library-backed host.
    #[must_use]
    pub fn with_default_host() -> Self {
        Self::new(Box::new(crate::host::StdHost::new()))
    }

    pub(crate) fn host_mut(&mut self) -> &mut dyn Host {
        &mut *self.host
    }

    /// Entry point 3: parses and evaluates the first complete expression in
    /// `source`, discarding any trailing tokens. Clears the previous error,
    /// releases the previous last-result, and stores the new one.
    ///
    /// Returns the resulting error code; `errmsg` retrieves the message.
    pub fn eval_source(&mut self, source: &str) -> i64 {
        self.last_error = None;
        let outcome = match read_first(source, &mut self.heap) {
            Ok(expr) => {
                let result = self.eval(expr);
                // `eval` borrows `expr` — it returns a fresh/bumped reference
                // of its own and never consumes the parsed tree, so the root
                // cell (and everything it owns) has to be released here.
                if let Some(id) = expr {
                    self.heap.dec_ref(id);
                }
                result
            }
            Err(err) => Err(err),
        };
        match outcome {
            Ok(value) => {
                if let Some(old) = self.last_result {
                    self.heap.dec_ref(old);
                }
                self.last_result = value;
                ErrorCode::Ok.as_code()
            }
            Err(err) => {
                let code = err.code.as_code();
                self.last_error = Some(err);
                if let Some(old) = self.last_result {
                    self.heap.dec_ref(old);
                }
                self.last_result = None;
                code
            }
        }
    }

    /// Entry point 4: the static human string for an error code.
    #[must_use]
    pub fn errstr(code: ErrorCode) -> &'static str {
        code.errstr()
    }

    /// Entry point 5: the last error message, if any.
    #[must_use]
    pub fn errmsg(&self) -> Option<&str> {
        self.last_error.as_ref().map(SclispError::message)
    }

    /// Entry point 8: prints the last result via the print callback, followed
    /// by a newline.
    pub fn print_repr(&mut self) {
        let text = printer::repr(self.last_result, &self.heap);
        self.host_mut().print(crate::host::Stream::Stdout, &text);
        self.host_mut().print(crate::host::Stream::Stdout, "\n");
    }

    /// The stringified last result, without printing it.
    #[must_use]
    pub fn repr(&self) -> String {
        printer::repr(self.last_result, &self.heap)
    }

    #[must_use]
    pub fn last_result(&self) -> Ref {
        self.last_result
    }

    /// Diagnostic: the number of live (non-freed) heap entries. Used by tests
    /// to check §8's refcount-correctness invariant — allocation count
    /// equals free count once every reachable reference has been released.
    #[must_use]
    pub fn live_object_count(&self) -> usize {
        self.heap.live_count()
    }

    /// Entry point 6: registers a native function under `name`. Passing
    /// `None` rebinds `name` to `nil` in the current (innermost) frame,
    /// equivalent to hiding a builtin of that name.
    pub fn register_user_func(&mut self, name: &str, func: Option<NativeFn>) {
        let value = func.map(|func| {
            self.heap.allocate(Value::Builtin(Builtin::Host {
                name: Rc::from(name),
                func,
            }))
        });
        self.scope.set(&mut self.heap, name, value);
    }

    /// Entry point 7: the scope API table, for reading/writing named bindings
    /// from outside evaluation.
    #[must_use]
    pub fn scope_api(&mut self) -> ScopeApi<'_> {
        ScopeApi::new(self)
    }

    /// Version symbols (§6): the textual and packed-integer version.
    #[must_use]
    pub fn version_string() -> &'static str {
        version::VERSION_STR
    }

    #[must_use]
    pub fn version_packed() -> u32 {
        version::VERSION_PACKED
    }
}

impl Drop for Interpreter {
    /// `destroy`: releases the last-result, then unwinds the scope chain
    /// root-ward (§3 "Interpreter" lifecycle, §5 "Interpreter teardown").
    fn drop(&mut self) {
        if let Some(id) = self.last_result.take() {
            self.heap.dec_ref(id);
        }
        self.scope.clear(&mut self.heap);
    }
}

//! The scope chain (§4.3): a stack of frames, each an association list of
//! `(symbol -> object)`. Only the innermost frame is ever mutated.
//!
//! The spec describes frames as a singly-linked, parent-pointed chain. Because
//! function application is dynamically scoped (§9 "Function call protocol") —
//! a call's new frame always chains onto the *caller's current* frame, never
//! onto the frame captured at the function's definition site — a single
//! global stack is equivalent to, and simpler than, a graph of
//! independently-shared frame objects: "root-ward" is just "earlier in the
//! stack".

use crate::error::{SclispError, SclispResult};
use crate::heap::Heap;
use crate::value::Ref;

struct Binding {
    name: String,
    value: Ref,
}

struct Frame {
    bindings: Vec<Binding>,
}

/// The interpreter's scope stack. `frames[0]` is the root frame installed at
/// init; `frames.last()` is the innermost, currently-mutable frame.
pub struct Scope {
    frames: Vec<Frame>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame { bindings: Vec::new() }],
        }
    }

    /// Walks the chain innermost-to-root, returning the first binding found.
    /// The caller receives a bumped reference it owns.
    pub fn query(&self, heap: &Heap, symbol: &str) -> SclispResult<Ref> {
        for frame in self.frames.iter().rev() {
            for binding in frame.bindings.iter().rev() {
                if binding.name == symbol {
                    if let Some(id) = binding.value {
                        heap.inc_ref(id);
                    }
                    return Ok(binding.value);
                }
            }
        }
        Err(SclispError::err("scope query failed"))
    }

    /// Binds `symbol` in the innermost frame. If it already exists there, the
    /// old value is released and replaced; otherwise a new binding is
    /// prepended. `value` must already be a reference the scope is taking
    /// ownership of.
    pub fn set(&mut self, heap: &mut Heap, symbol: &str, value: Ref) {
        let frame = self.frames.last_mut().expect("Scope: frame stack is never empty");
        if let Some(binding) = frame.bindings.iter_mut().find(|b| b.name == symbol) {
            if let Some(old) = binding.value {
                heap.dec_ref(old);
            }
            binding.value = value;
            return;
        }
        frame.bindings.push(Binding {
            name: symbol.to_owned(),
            value,
        });
    }

    /// Pushes a new innermost frame with no bindings.
    pub fn push_empty(&mut self) {
        self.frames.push(Frame { bindings: Vec::new() });
    }

    /// Binds `name` to `value` (taking ownership of the reference) in the
    /// frame most recently pushed with `push_empty`.
    pub fn bind_in_new_frame(&mut self, name: &str, value: Ref) {
        self.frames
            .last_mut()
            .expect("Scope: frame stack is never empty")
            .bindings
            .push(Binding {
                name: name.to_owned(),
                value,
            });
    }

    /// Discards the innermost frame, releasing every binding it owns.
    ///
    /// # Panics
    /// Panics if called with only the root frame remaining.
    pub fn pop(&mut self, heap: &mut Heap) {
        let frame = self.frames.pop().expect("Scope::pop: cannot pop the root frame");
        for binding in frame.bindings {
            if let Some(id) = binding.value {
                heap.dec_ref(id);
            }
        }
    }

    /// Releases every frame, root included. Used by interpreter teardown.
    pub fn clear(&mut self, heap: &mut Heap) {
        while self.frames.len() > 1 {
            self.pop(heap);
        }
        let root = self.frames.pop().expect("Scope: frame stack is never empty");
        for binding in root.bindings {
            if let Some(id) = binding.value {
                heap.dec_ref(id);
            }
        }
        self.frames.push(Frame { bindings: Vec::new() });
    }
}

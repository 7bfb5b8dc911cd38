//! Reference-counted arena that backs every heap-allocated object.
//!
//! The spec describes ownership in pointer-refcount terms, but an arena plus
//! index is an explicitly sanctioned alternative: object identities become
//! indices into a vector and the count of outstanding handles replaces a
//! pointer-embedded refcount. `HeapId` is the index; `Heap` is the arena.
//!
//! Uses a free list to reuse slots from freed values, so long-running loops
//! that repeatedly allocate and release objects don't grow memory unboundedly.
//! When a value is freed via `dec_ref`, its slot is pushed onto the free list;
//! new allocations pop from the free list before appending.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::value::Value;

/// An index into the heap's arena. Cheap to copy, compare, and hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapId(usize);

impl HeapId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

struct HeapEntry {
    refcount: AtomicUsize,
    value: Value,
}

/// Arena of reference-counted [`Value`]s.
///
/// `entries[i]` is `Some` for live slots and `None` once a slot has been freed
/// and is waiting in `free_list` for reuse.
pub struct Heap {
    entries: Vec<Option<HeapEntry>>,
    free_list: Vec<HeapId>,
    /// Lazily allocated canonical `true`/`false` singletons (§3: "Static objects").
    /// Cached so that repeated evaluation of `#t`/`#f` doesn't keep allocating.
    true_id: Option<HeapId>,
    false_id: Option<HeapId>,
    /// Cached type-name string singletons, one per variant, lazily allocated.
    type_name_ids: [Option<HeapId>; TYPE_NAME_COUNT],
}

const TYPE_NAME_COUNT: usize = 8;

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            true_id: None,
            false_id: None,
            type_name_ids: [None; TYPE_NAME_COUNT],
        }
    }

    /// Allocates `value` with an initial refcount of 1, reusing a freed slot
    /// if one is available.
    pub fn allocate(&mut self, value: Value) -> HeapId {
        let entry = HeapEntry {
            refcount: AtomicUsize::new(1),
            value,
        };
        if let Some(id) = self.free_list.pop() {
            self.entries[id.index()] = Some(entry);
            id
        } else {
            let id = HeapId(self.entries.len());
            self.entries.push(Some(entry));
            id
        }
    }

    /// Increments the reference count for an existing heap entry.
    ///
    /// # Panics
    /// Panics if `id` is invalid or the slot has already been freed.
    pub fn inc_ref(&self, id: HeapId) {
        let entry = self.entries[id.index()].as_ref().expect("Heap::inc_ref: object already freed");
        entry.refcount.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrements the reference count, tearing the value down (and releasing
    /// any child references it owns) once the count reaches zero.
    ///
    /// # Panics
    /// Panics if `id` is invalid or the slot has already been freed.
    pub fn dec_ref(&mut self, id: HeapId) {
        let entry = self.entries[id.index()].as_ref().expect("Heap::dec_ref: object already freed");
        let count = entry.refcount.load(Ordering::Relaxed);
        if count > 1 {
            entry.refcount.store(count - 1, Ordering::Relaxed);
            return;
        }
        let entry = self.entries[id.index()].take().expect("Heap::dec_ref: object already freed");
        self.free_list.push(id);
        for child in entry.value.child_ids() {
            self.dec_ref(child);
        }
    }

    /// # Panics
    /// Panics if `id` is invalid or the slot has already been freed.
    #[must_use]
    pub fn get(&self, id: HeapId) -> &Value {
        &self.entries[id.index()].as_ref().expect("Heap::get: object already freed").value
    }

    /// Current reference count for a live slot. Used by the `ref-count-return`
    /// test feature to assert §8's refcount-correctness invariant.
    #[cfg(any(test, feature = "ref-count-return"))]
    #[must_use]
    pub fn refcount(&self, id: HeapId) -> usize {
        self.entries[id.index()]
            .as_ref()
            .expect("Heap::refcount: object already freed")
            .refcount
            .load(Ordering::Relaxed)
    }

    /// Number of live (non-freed) entries. Used by tests to check that
    /// allocation count equals free count after interpreter teardown.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Returns the canonical `true` singleton, allocating it on first use and
    /// keeping an extra reference so it is never freed by `dec_ref`.
    pub fn canonical_true(&mut self) -> HeapId {
        if let Some(id) = self.true_id {
            self.inc_ref(id);
            return id;
        }
        let id = self.allocate(Value::Integer(1));
        self.true_id = Some(id);
        self.inc_ref(id);
        id
    }

    /// Returns the canonical `false` singleton, allocating it on first use.
    pub fn canonical_false(&mut self) -> HeapId {
        if let Some(id) = self.false_id {
            self.inc_ref(id);
            return id;
        }
        let id = self.allocate(Value::Integer(0));
        self.false_id = Some(id);
        self.inc_ref(id);
        id
    }

    /// Returns a static type-name string, allocating it on first use.
    pub fn type_name_singleton(&mut self, slot: usize, text: &'static str) -> HeapId {
        if let Some(id) = self.type_name_ids[slot] {
            self.inc_ref(id);
            return id;
        }
        let id = self.allocate(Value::Str(text.to_owned()));
        self.type_name_ids[slot] = Some(id);
        self.inc_ref(id);
        id
    }

    /// `true` if the given reference is either canonical singleton.
    #[must_use]
    pub fn is_static(&self, id: HeapId) -> bool {
        Some(id) == self.true_id || Some(id) == self.false_id || self.type_name_ids.contains(&Some(id))
    }
}

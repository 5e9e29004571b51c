#![forbid(unsafe_code)]

//! Deduplicating string cache with atomic insert-if-absent.
//!
//! # Design
//!
//! [`Interner`] is a clone-able handle around shared storage: cloning a
//! handle yields a second view of the **same** cache, which is how the
//! cache is injected into the components that share it. The canonical
//! representative for a string is an `Arc<str>`; every `intern` of an
//! equal string returns a clone of that same allocation, so callers can
//! compare representatives by pointer (`Arc::ptr_eq`) and deduplicate
//! storage.
//!
//! # Performance
//!
//! | Operation | Complexity                       |
//! |-----------|----------------------------------|
//! | `intern`  | O(1) expected (one lock, one hash lookup) |
//! | hit       | no allocation                    |
//! | miss      | one `Arc<str>` allocation        |
//!
//! Dropping the last handle frees the cache and, once callers drop their
//! representatives, the strings themselves — nothing is leaked for the
//! life of the process.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::trace;

/// A scoped, thread-safe cache mapping each distinct string to one shared
/// canonical `Arc<str>`.
///
/// # Invariants
///
/// 1. `intern` is idempotent: equal inputs yield pointer-identical
///    representatives for the lifetime of the cache.
/// 2. Insert-if-absent is atomic; two threads racing to intern the same
///    new string both receive the single representative that won.
#[derive(Clone, Default)]
pub struct Interner {
    inner: Arc<Mutex<HashSet<Arc<str>, ahash::RandomState>>>,
}

impl std::fmt::Debug for Interner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}

impl Interner {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashSet::with_capacity_and_hasher(
                capacity,
                ahash::RandomState::new(),
            ))),
        }
    }

    /// Return the canonical representative for `s`, admitting it first if
    /// no equal string has been interned yet.
    ///
    /// ```
    /// use obset_intern::Interner;
    /// use std::sync::Arc;
    ///
    /// let interner = Interner::new();
    /// let a = interner.intern("canonical");
    /// let b = interner.intern(&"canonical".to_string());
    /// assert!(Arc::ptr_eq(&a, &b));
    /// ```
    pub fn intern(&self, s: &str) -> Arc<str> {
        let mut strings = self.inner.lock().expect("intern cache lock poisoned");
        if let Some(existing) = strings.get(s) {
            return Arc::clone(existing);
        }
        let canonical: Arc<str> = Arc::from(s);
        strings.insert(Arc::clone(&canonical));
        trace!(len = strings.len(), "admitted new canonical string");
        canonical
    }

    /// Whether an equal string has already been interned.
    pub fn contains(&self, s: &str) -> bool {
        self.inner
            .lock()
            .expect("intern cache lock poisoned")
            .contains(s)
    }

    /// Number of distinct strings currently cached.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("intern cache lock poisoned").len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached representative.
    ///
    /// Representatives already handed out stay valid; the next `intern` of
    /// the same text simply mints a fresh canonical allocation.
    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("intern cache lock poisoned")
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let interner = Interner::new();
        let a = interner.intern("alpha");
        let b = interner.intern("alpha");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn distinct_strings_get_distinct_representatives() {
        let interner = Interner::new();
        let a = interner.intern("alpha");
        let b = interner.intern("beta");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn clones_share_one_cache() {
        let interner = Interner::new();
        let view = interner.clone();
        let a = interner.intern("shared");
        let b = view.intern("shared");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn separate_interners_are_isolated() {
        let first = Interner::new();
        let second = Interner::new();
        let a = first.intern("same text");
        let b = second.intern("same text");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn contains_and_len() {
        let interner = Interner::new();
        assert!(interner.is_empty());
        assert!(!interner.contains("x"));

        interner.intern("x");
        assert!(interner.contains("x"));
        assert!(!interner.contains("y"));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn clear_resets_but_old_representatives_survive() {
        let interner = Interner::new();
        let before = interner.intern("text");
        interner.clear();
        assert!(interner.is_empty());
        assert_eq!(&*before, "text");

        let after = interner.intern("text");
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn empty_string_is_internable() {
        let interner = Interner::new();
        let a = interner.intern("");
        let b = interner.intern("");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(&*a, "");
    }

    #[test]
    fn with_capacity_starts_empty() {
        let interner = Interner::with_capacity(64);
        assert!(interner.is_empty());
        interner.intern("a");
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn debug_format() {
        let interner = Interner::new();
        interner.intern("a");
        let dbg = format!("{interner:?}");
        assert!(dbg.contains("Interner"));
        assert!(dbg.contains("len"));
    }

    mod property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            /// len() equals the number of distinct inputs interned.
            #[test]
            fn len_counts_distinct(inputs in proptest::collection::vec(".{0,12}", 0..64)) {
                let interner = Interner::new();
                for s in &inputs {
                    interner.intern(s);
                }
                let distinct: std::collections::HashSet<&str> =
                    inputs.iter().map(String::as_str).collect();
                prop_assert_eq!(interner.len(), distinct.len());
            }

            /// Re-interning always returns the original representative.
            #[test]
            fn representatives_are_stable(inputs in proptest::collection::vec(".{0,12}", 1..32)) {
                let interner = Interner::new();
                let first: Vec<Arc<str>> = inputs.iter().map(|s| interner.intern(s)).collect();
                let second: Vec<Arc<str>> = inputs.iter().map(|s| interner.intern(s)).collect();
                for (a, b) in first.iter().zip(&second) {
                    prop_assert!(Arc::ptr_eq(a, b));
                }
            }

            /// The representative's text always equals the input.
            #[test]
            fn representative_preserves_text(s in ".{0,32}") {
                let interner = Interner::new();
                let canonical = interner.intern(&s);
                prop_assert_eq!(&*canonical, s.as_str());
            }
        }
    }
}

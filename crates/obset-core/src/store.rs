#![forbid(unsafe_code)]

//! Backing-store seam for [`ObservableSet`](crate::ObservableSet).
//!
//! The observable set does not commit to a concrete container. It takes
//! ownership of anything that can answer membership queries and perform
//! first-time-only insertion. Implementations are provided for the std
//! hash and ordered sets; callers with custom containers implement
//! [`ElementSet`] themselves.

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

/// Capability contract for the container behind an observable set:
/// unique-element membership plus insert.
///
/// `insert` must return `true` only when the element was not previously
/// present. The observable set relies on that to decide whether a
/// notification round fires at all.
pub trait ElementSet<E> {
    /// Insert `element`, returning whether it was newly added.
    fn insert(&mut self, element: E) -> bool;

    /// Whether `element` is currently present.
    fn contains(&self, element: &E) -> bool;

    /// Number of elements currently stored.
    fn len(&self) -> usize;

    /// Whether the store holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E, S> ElementSet<E> for HashSet<E, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, element: E) -> bool {
        HashSet::insert(self, element)
    }

    fn contains(&self, element: &E) -> bool {
        HashSet::contains(self, element)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<E: Ord> ElementSet<E> for BTreeSet<E> {
    fn insert(&mut self, element: E) -> bool {
        BTreeSet::insert(self, element)
    }

    fn contains(&self, element: &E) -> bool {
        BTreeSet::contains(self, element)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

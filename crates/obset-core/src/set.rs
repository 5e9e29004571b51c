#![forbid(unsafe_code)]

//! Observable set: insertion with synchronous, snapshot-isolated
//! change notification.
//!
//! # Design
//!
//! [`ObservableSet<E>`] owns two independently locked pieces of state: the
//! backing element store, and the registration list of observers. The
//! registration lock is held only to mutate the list or to copy it into a
//! snapshot at the start of a notification round; it is **never** held
//! while observer callbacks run. That single decision carries the whole
//! concurrency contract:
//!
//! 1. A callback removing its own registration succeeds and affects only
//!    future rounds.
//! 2. A registration change made on thread B while thread A is mid-round
//!    is invisible to A's in-flight snapshot but visible to the next round.
//! 3. A callback that hands its removal to a worker thread and blocks on
//!    completion cannot deadlock, because the blocked thread holds no lock.
//!
//! # Failure Modes
//!
//! - **Panicking callback**: propagates to the caller of [`add`] and aborts
//!    the remainder of that round. Neither internal lock is held at that
//!    point, so the set stays usable afterwards.
//! - **Hung callback**: stalls only the inserting thread. Registration and
//!    insertion from other threads proceed.
//!
//! [`add`]: ObservableSet::add

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::observer::SetObserver;
use crate::store::ElementSet;

type ObserverHandle<E> = Arc<dyn SetObserver<E>>;

/// A set-like container that notifies registered observers after each
/// genuine insertion.
///
/// # Invariants
///
/// 1. A notification round fires for an element iff its insertion returned
///    `true`; duplicate adds fire nothing.
/// 2. Within one round, observers run in registration order as of the
///    snapshot; registration changes made during the round never alter it.
/// 3. Registering the same handle twice yields two entries and two
///    callbacks per round.
///
/// # Reentrancy
///
/// No lock is held while callbacks run, so a callback may itself call
/// [`add`](Self::add) on the same set. The nested round runs inline;
/// ordering between a nested round and the remainder of the outer round is
/// implementation-defined.
pub struct ObservableSet<E> {
    /// Backing store, behind its own lock so concurrent inserts are safe.
    /// Held only for the insert or query itself, never across callbacks.
    elements: Mutex<Box<dyn ElementSet<E> + Send>>,
    /// Registration list. Guarded separately from `elements`; held only to
    /// mutate the list or copy the round snapshot.
    observers: Mutex<Vec<ObserverHandle<E>>>,
}

impl<E> std::fmt::Debug for ObservableSet<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableSet")
            .field("len", &self.len())
            .field("observer_count", &self.observer_count())
            .finish()
    }
}

impl<E> ObservableSet<E> {
    /// Wrap a caller-supplied backing store, taking ownership of it.
    #[must_use]
    pub fn new(store: impl ElementSet<E> + Send + 'static) -> Self {
        Self {
            elements: Mutex::new(Box::new(store)),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Observable set over a fresh hash set (ahash-backed).
    #[must_use]
    pub fn with_hash_set() -> Self
    where
        E: Eq + Hash + Send + 'static,
    {
        Self::new(HashSet::<E, ahash::RandomState>::default())
    }

    /// Observable set over a fresh ordered set.
    #[must_use]
    pub fn with_btree_set() -> Self
    where
        E: Ord + Send + 'static,
    {
        Self::new(BTreeSet::<E>::new())
    }

    /// Insert `element`, notifying observers iff it was newly added.
    ///
    /// Returns whether insertion occurred. On `true`, every observer
    /// registered at the start of the round is invoked in registration
    /// order, on the calling thread, before `add` returns. On `false`
    /// (duplicate), no round fires.
    pub fn add(&self, element: E) -> bool
    where
        E: Clone,
    {
        let inserted = {
            let mut elements = self.elements.lock().expect("element store lock poisoned");
            elements.insert(element.clone())
        };
        if inserted {
            self.notify_added(&element);
        }
        inserted
    }

    /// Insert every element of `elements` in iteration order.
    ///
    /// Returns `true` iff at least one element was newly inserted. Each
    /// genuine insertion triggers its own independent notification round;
    /// rounds are never batched.
    pub fn add_all<I>(&self, elements: I) -> bool
    where
        E: Clone,
        I: IntoIterator<Item = E>,
    {
        let mut inserted = false;
        for element in elements {
            inserted |= self.add(element);
        }
        inserted
    }

    /// Register an observer. No deduplication: registering the same handle
    /// twice yields two entries and two callbacks per round.
    pub fn add_observer(&self, observer: ObserverHandle<E>) {
        let mut observers = self.observers.lock().expect("observer list lock poisoned");
        observers.push(observer);
        trace!(observers = observers.len(), "observer registered");
    }

    /// Deregister the first entry matching `observer` by identity
    /// (`Arc::ptr_eq`). Returns whether an entry was removed; removing a
    /// never-registered handle returns `false` and leaves the list
    /// unchanged.
    ///
    /// Safe to call from inside a callback — including the removed
    /// observer's own — and from other threads while a round is in flight.
    /// The in-flight snapshot is unaffected either way.
    pub fn remove_observer(&self, observer: &ObserverHandle<E>) -> bool {
        let mut observers = self.observers.lock().expect("observer list lock poisoned");
        match observers.iter().position(|o| Arc::ptr_eq(o, observer)) {
            Some(index) => {
                observers.remove(index);
                trace!(observers = observers.len(), "observer deregistered");
                true
            }
            None => false,
        }
    }

    /// Whether `element` is currently present.
    pub fn contains(&self, element: &E) -> bool {
        self.elements
            .lock()
            .expect("element store lock poisoned")
            .contains(element)
    }

    /// Number of elements currently stored.
    pub fn len(&self) -> usize {
        self.elements
            .lock()
            .expect("element store lock poisoned")
            .len()
    }

    /// Whether the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of currently registered observer entries (duplicates count).
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .expect("observer list lock poisoned")
            .len()
    }

    /// Run one notification round for `element`.
    fn notify_added(&self, element: &E) {
        let snapshot: Vec<ObserverHandle<E>> = {
            let observers = self.observers.lock().expect("observer list lock poisoned");
            observers.clone()
        };
        trace!(observers = snapshot.len(), "notification round");
        // The lock is released before any callback runs. Callbacks may
        // register or deregister observers (themselves included) without
        // deadlocking; such calls cannot affect this snapshot.
        for observer in &snapshot {
            observer.added(self, element);
        }
    }
}

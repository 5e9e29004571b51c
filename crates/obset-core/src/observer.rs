#![forbid(unsafe_code)]

//! Observer contract and closure adapter.
//!
//! Observers are held as `Arc<dyn SetObserver<E>>`. The `Arc` is the
//! handle: registration stores a clone, and
//! [`remove_observer`](crate::ObservableSet::remove_observer) matches by
//! `Arc::ptr_eq`, so the same allocation registered twice counts as two
//! entries while two distinct allocations of an identical closure never
//! match each other.

use std::sync::Arc;

use crate::set::ObservableSet;

/// Callback invoked once per element genuinely inserted into an
/// [`ObservableSet`].
///
/// The callback runs synchronously on the thread that performed the
/// insertion, with **no internal lock held**. It may therefore call back
/// into the set — registering or deregistering observers (itself
/// included), or even inserting further elements — without deadlocking.
///
/// A panic inside `added` propagates to the caller of
/// [`add`](ObservableSet::add) and aborts the remainder of that
/// notification round.
pub trait SetObserver<E>: Send + Sync {
    /// Called after `element` was newly inserted into `set`.
    fn added(&self, set: &ObservableSet<E>, element: &E);
}

/// Adapter implementing [`SetObserver`] for a plain closure.
struct FnObserver<F>(F);

impl<E, F> SetObserver<E> for FnObserver<F>
where
    F: Fn(&ObservableSet<E>, &E) + Send + Sync,
{
    fn added(&self, set: &ObservableSet<E>, element: &E) {
        (self.0)(set, element);
    }
}

/// Wrap a closure into an observer handle.
///
/// The returned `Arc` doubles as the removal token: keep a clone if you
/// intend to call [`remove_observer`](ObservableSet::remove_observer)
/// later.
///
/// ```
/// use obset_core::{ObservableSet, observer_fn};
///
/// let set: ObservableSet<u32> = ObservableSet::with_hash_set();
/// let handle = observer_fn(|_set, element: &u32| {
///     println!("added {element}");
/// });
/// set.add_observer(handle.clone());
/// set.add(1);
/// assert!(set.remove_observer(&handle));
/// ```
pub fn observer_fn<E, F>(f: F) -> Arc<dyn SetObserver<E>>
where
    F: Fn(&ObservableSet<E>, &E) + Send + Sync + 'static,
    E: 'static,
{
    Arc::new(FnObserver(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn closure_adapter_invokes_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = Arc::clone(&hits);
        let observer = observer_fn(move |_set, _element: &u32| {
            hits_in.fetch_add(1, Ordering::SeqCst);
        });

        let set: ObservableSet<u32> = ObservableSet::with_hash_set();
        observer.added(&set, &5);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_allocations_are_distinct_handles() {
        let a = observer_fn(|_: &ObservableSet<u32>, _: &u32| {});
        let b = observer_fn(|_: &ObservableSet<u32>, _: &u32| {});
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &a.clone()));
    }
}

#![forbid(unsafe_code)]

//! Observable collections and scoped interning for concurrent Rust.
//!
//! This facade re-exports the public surface of the member crates:
//!
//! - [`ObservableSet`]: a set wrapper that notifies registered observers
//!   after each genuine insertion, from a snapshot taken under a lock that
//!   is released before any callback runs.
//! - [`Interner`]: an injected, clone-to-share string canonicalization
//!   cache with atomic insert-if-absent.
//!
//! # Example
//!
//! ```
//! use obset::{Interner, ObservableSet, observer_fn};
//! use std::sync::{Arc, Mutex};
//!
//! let names: ObservableSet<Arc<str>> = ObservableSet::with_hash_set();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let seen_in = Arc::clone(&seen);
//! let handle = observer_fn(move |_set, name: &Arc<str>| {
//!     seen_in.lock().unwrap().push(Arc::clone(name));
//! });
//! names.add_observer(handle.clone());
//!
//! let interner = Interner::new();
//! names.add(interner.intern("ada"));
//! names.add(interner.intern("ada")); // duplicate: no notification
//! names.add(interner.intern("grace"));
//!
//! assert_eq!(seen.lock().unwrap().len(), 2);
//! assert!(names.remove_observer(&handle));
//! ```

pub use obset_core::{ElementSet, ObservableSet, SetObserver, observer_fn};
pub use obset_intern::Interner;

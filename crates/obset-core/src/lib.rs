#![forbid(unsafe_code)]

//! Core: observable set, observer contract, and the backing-store seam.
//!
//! # Role in obset
//! `obset-core` owns the notification mechanism. [`ObservableSet`] wraps a
//! caller-supplied set-like container and broadcasts a synchronous
//! notification round to registered observers after each genuine insertion.
//!
//! # Primary responsibilities
//! - **ObservableSet**: add/add_all plus observer registration and removal.
//! - **SetObserver**: the callback contract invoked once per inserted element.
//! - **ElementSet**: the capability seam for the backing container.
//!
//! # The load-bearing design decision
//! The registration list is guarded by its own mutex, held only to mutate
//! the list or to copy it into a snapshot. The snapshot is iterated with
//! **no lock held**, so a callback may register or deregister observers —
//! including removing itself, and including doing so from another thread it
//! blocks on — without deadlocking, and without affecting the round already
//! in flight.

pub mod observer;
pub mod set;
pub mod store;

pub use observer::{SetObserver, observer_fn};
pub use set::ObservableSet;
pub use store::ElementSet;

#![forbid(unsafe_code)]

//! Scoped, thread-safe string interning.
//!
//! # Role in obset
//! `obset-intern` provides the canonicalization collaborator: a cache that
//! maps each distinct string to a single shared representative. It is an
//! explicitly-scoped object — construct one where you need it and drop it
//! when you are done — rather than process-global state, so tests and
//! independent subsystems get isolated caches for free.

pub mod interner;

pub use interner::Interner;

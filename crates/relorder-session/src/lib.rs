//! Host-facing adapter for relorder.
//!
//! A host test runner wires in two hooks: [`configure`] at startup, to
//! register the `after`/`before` marker kinds with its validation
//! subsystem, and [`reorder`] after collection, to replace its
//! execution order in place.

pub mod session;

pub use session::{configure, reorder, MarkerRegistrar};

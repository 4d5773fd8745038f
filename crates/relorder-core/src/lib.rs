//! Core data types for the relorder test-ordering engine.
//!
//! This crate defines the types shared between the ordering engine and
//! host adapters: test units, `after`/`before` relation markers, marker
//! specs for host-side registration, and the capability traits the
//! engine requires from a host-provided unit.
//!
//! This crate is intentionally free of I/O and of the ordering
//! algorithm itself.

pub mod marker;
pub mod unit;

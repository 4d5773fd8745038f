//! Ordering engine for relorder: resolves `after`/`before` marker
//! references to unit ids, builds the precedence graph, and produces a
//! cycle-checked, deterministic topological order.

pub mod error;
pub mod graph;
pub mod index;
pub mod resolver;

pub use error::OrderError;
pub use resolver::OrderResolver;

//! The resolution driver: ingest units, resolve marker references,
//! build the precedence graph, and emit the final ordered sequence.

use std::collections::BTreeSet;

use relorder_core::marker::RelationKind;
use relorder_core::unit::{Identifiable, MarkerSource};

use crate::error::OrderError;
use crate::graph::OrderGraph;
use crate::index::UnitIndex;

/// Owns one resolution pass over a collection of units.
///
/// All state is rebuilt by [`register`](Self::register), so a resolver
/// instance can be reused across test sessions in a long-lived host
/// without leaking stale entries between runs.
pub struct OrderResolver<U> {
    index: UnitIndex<U>,
}

impl<U: Identifiable + MarkerSource> OrderResolver<U> {
    pub fn new() -> Self {
        Self {
            index: UnitIndex::new(),
        }
    }

    /// Ingest the collected units, replacing any previously registered
    /// state. No validation happens here; bad references surface in
    /// [`resolve_order`](Self::resolve_order).
    pub fn register<I>(&mut self, units: I)
    where
        I: IntoIterator<Item = U>,
    {
        self.index = UnitIndex::new();
        for unit in units {
            self.index.insert(unit);
        }
        tracing::debug!("registered {} distinct unit ids", self.index.len());
    }

    /// Resolve a marker reference against the registered units. See
    /// [`UnitIndex::resolve`] for the two-tier lookup rules.
    pub fn resolve_reference(&self, reference: &str) -> Result<&str, OrderError> {
        self.index.resolve(reference)
    }

    /// References this unit must run after, deduplicated across all of
    /// its `after` markers.
    pub fn predecessor_refs(unit: &U) -> BTreeSet<&str> {
        relation_refs(std::slice::from_ref(unit), RelationKind::After)
    }

    /// References this unit must run before, deduplicated across all of
    /// its `before` markers.
    pub fn follower_refs(unit: &U) -> BTreeSet<&str> {
        relation_refs(std::slice::from_ref(unit), RelationKind::Before)
    }

    /// Resolve every marker reference, build the precedence graph, and
    /// return the registered units in execution order.
    ///
    /// The output is a permutation of the registered units: repeats of
    /// one id stay contiguous in their original relative order, and for
    /// every constraint `u -> v`, `u` precedes `v`.
    pub fn resolve_order(&mut self) -> Result<Vec<U>, OrderError> {
        let mut graph = OrderGraph::new();
        for id in self.index.ids() {
            graph.add_node(id);
        }

        for id in self.index.ids() {
            let node = graph.add_node(id);
            let bucket = self.index.units(id);

            for reference in relation_refs(bucket, RelationKind::After) {
                let predecessor = graph.add_node(self.index.resolve(reference)?);
                graph.add_edge(predecessor, node);
            }
            for reference in relation_refs(bucket, RelationKind::Before) {
                let follower = graph.add_node(self.index.resolve(reference)?);
                graph.add_edge(node, follower);
            }
        }

        let order = graph.topo_order()?;
        tracing::debug!(
            units = graph.node_count(),
            constraints = graph.edge_count(),
            "resolved execution order"
        );

        let ordered: Vec<U> = order
            .iter()
            .flat_map(|id| self.index.take_bucket(id))
            .collect();
        // The output must be a permutation of the registered units; a
        // shortfall means the buckets were already drained by an
        // earlier pass over this registration.
        if ordered.len() != self.index.unit_count() {
            return Err(OrderError::InternalInvariant {
                message: format!(
                    "output has {} units but {} were registered; \
                     register units before sorting again",
                    ordered.len(),
                    self.index.unit_count()
                ),
            });
        }
        Ok(ordered)
    }

    /// Register and sort in one call: one full resolution pass.
    pub fn resolve<I>(&mut self, units: I) -> Result<Vec<U>, OrderError>
    where
        I: IntoIterator<Item = U>,
    {
        self.register(units);
        self.resolve_order()
    }

    /// Give back the registered units in their original input order.
    ///
    /// Used by adapters to hand a collection back untouched after a
    /// failed pass.
    pub fn into_units(self) -> Vec<U> {
        self.index.into_units()
    }
}

impl<U: Identifiable + MarkerSource> Default for OrderResolver<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// Union of the argument strings across every marker of one kind on a
/// bucket of units, deduplicated and iterated in a fixed order.
fn relation_refs<U: MarkerSource>(units: &[U], kind: RelationKind) -> BTreeSet<&str> {
    units
        .iter()
        .flat_map(MarkerSource::markers)
        .filter(|marker| marker.kind == kind)
        .flat_map(|marker| marker.args.iter().map(String::as_str))
        .collect()
}

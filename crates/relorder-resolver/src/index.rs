//! Per-resolution index over the registered units: id buckets, the
//! name-to-ids map, and two-tier reference resolution.

use std::collections::HashMap;

use relorder_core::unit::Identifiable;

use crate::error::OrderError;

/// Lookup structures built once per resolution pass.
///
/// Units sharing an id (parametrized repeats) land in one bucket and
/// keep their original relative order; the bucket moves as a whole.
pub struct UnitIndex<U> {
    /// Distinct ids in first-seen order.
    ids: Vec<String>,
    buckets: HashMap<String, Vec<U>>,
    /// Display name to the distinct ids carrying it.
    names: HashMap<String, Vec<String>>,
    /// One id per inserted unit, repeats included, in input order.
    arrival: Vec<String>,
}

impl<U: Identifiable> UnitIndex<U> {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            buckets: HashMap::new(),
            names: HashMap::new(),
            arrival: Vec::new(),
        }
    }

    /// Append a unit to its id bucket and record its display name.
    /// No validation happens here.
    pub fn insert(&mut self, unit: U) {
        let id = unit.unit_id().to_string();
        let name = unit.display_name().to_string();

        let bucket = self.buckets.entry(id.clone()).or_default();
        if bucket.is_empty() {
            self.ids.push(id.clone());
        }
        // Every copy's name is indexed: parametrized repeats may carry
        // distinct display names for one shared id.
        let name_ids = self.names.entry(name).or_default();
        if !name_ids.contains(&id) {
            name_ids.push(id.clone());
        }
        bucket.push(unit);
        self.arrival.push(id);
    }

    /// Distinct registered ids in first-seen order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Number of registered units, repeats included.
    pub fn unit_count(&self) -> usize {
        self.arrival.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All units registered under an id, in registration order.
    pub fn units(&self, id: &str) -> &[U] {
        self.buckets.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Remove and return the bucket for an id.
    pub fn take_bucket(&mut self, id: &str) -> Vec<U> {
        self.buckets.remove(id).unwrap_or_default()
    }

    /// Consume the index and return every unit in its original input
    /// order, repeats interleaved exactly as registered.
    pub fn into_units(mut self) -> Vec<U> {
        let mut remaining: HashMap<String, std::vec::IntoIter<U>> = self
            .buckets
            .drain()
            .map(|(id, bucket)| (id, bucket.into_iter()))
            .collect();
        self.arrival
            .iter()
            .filter_map(|id| remaining.get_mut(id).and_then(Iterator::next))
            .collect()
    }

    /// Resolve a marker reference to the one registered id it names.
    ///
    /// Tries an exact display-name match first, then falls back to
    /// scanning all ids for a suffix match (references are usually bare
    /// names, but a qualified id fragment disambiguates name
    /// collisions across groups). Either path must produce exactly one
    /// candidate.
    pub fn resolve(&self, reference: &str) -> Result<&str, OrderError> {
        if let Some(candidates) = self.names.get(reference) {
            return match candidates.as_slice() {
                [id] => Ok(id),
                [] => Err(OrderError::InternalInvariant {
                    message: format!("name `{reference}` registered with no ids"),
                }),
                _ => Err(OrderError::AmbiguousReference {
                    reference: reference.to_string(),
                    candidates: candidates.clone(),
                }),
            };
        }

        let matches: Vec<&String> = self
            .ids
            .iter()
            .filter(|id| id.ends_with(reference))
            .collect();
        match matches.as_slice() {
            [id] => Ok(id),
            [] => Err(OrderError::UnresolvedReference {
                reference: reference.to_string(),
            }),
            _ => Err(OrderError::AmbiguousReference {
                reference: reference.to_string(),
                candidates: matches.into_iter().cloned().collect(),
            }),
        }
    }
}

impl<U: Identifiable> Default for UnitIndex<U> {
    fn default() -> Self {
        Self::new()
    }
}

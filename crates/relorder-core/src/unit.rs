use serde::{Deserialize, Serialize};

use crate::marker::RelationMarker;

/// Anything with a stable unique id and a short display name.
///
/// The id is unique for the run; the display name is not (two groups
/// may each contain a `test_login`).
pub trait Identifiable {
    fn unit_id(&self) -> &str;
    fn display_name(&self) -> &str;
}

/// Anything that exposes the relation markers attached to it.
pub trait MarkerSource {
    fn markers(&self) -> &[RelationMarker];
}

/// An owned test unit as handed over by a host adapter.
///
/// Hosts with richer item types can implement [`Identifiable`] and
/// [`MarkerSource`] directly instead of converting to this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUnit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub markers: Vec<RelationMarker>,
}

impl TestUnit {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            markers: Vec::new(),
        }
    }

    /// Attach an `after(refs...)` marker.
    pub fn after<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers.push(RelationMarker::after(refs));
        self
    }

    /// Attach a `before(refs...)` marker.
    pub fn before<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers.push(RelationMarker::before(refs));
        self
    }
}

impl Identifiable for TestUnit {
    fn unit_id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl MarkerSource for TestUnit {
    fn markers(&self) -> &[RelationMarker] {
        &self.markers
    }
}

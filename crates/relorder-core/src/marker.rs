use std::fmt;

use serde::{Deserialize, Serialize};

/// The direction of a precedence relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// The marked unit must run after every referenced unit.
    After,
    /// The marked unit must run before every referenced unit.
    Before,
}

impl RelationKind {
    /// Parse `"after"` or `"before"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "after" => Some(Self::After),
            "before" => Some(Self::Before),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::After => "after",
            Self::Before => "before",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A precedence annotation attached to a unit.
///
/// Each argument is a reference to another unit, either its full id or
/// a short/suffix name. Repeated arguments carry no extra meaning:
/// extraction collapses duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMarker {
    pub kind: RelationKind,
    #[serde(default)]
    pub args: Vec<String>,
}

impl RelationMarker {
    pub fn new<I, S>(kind: RelationKind, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `after(refs...)`: the marked unit runs after every referenced unit.
    pub fn after<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RelationKind::After, refs)
    }

    /// `before(refs...)`: the marked unit runs before every referenced unit.
    pub fn before<I, S>(refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RelationKind::Before, refs)
    }
}

impl fmt::Display for RelationMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.args.join(", "))
    }
}

/// A marker kind as registered with the host's marker-validation
/// subsystem: the kind plus a help line shown in the host's marker list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSpec {
    pub kind: RelationKind,
    pub help: String,
}

impl MarkerSpec {
    /// The two builtin relation markers.
    pub fn builtin() -> [MarkerSpec; 2] {
        [
            MarkerSpec {
                kind: RelationKind::After,
                help: "after(*refs): list of units that precede this unit".to_string(),
            },
            MarkerSpec {
                kind: RelationKind::Before,
                help: "before(*refs): list of units that follow this unit".to_string(),
            },
        ]
    }
}

impl fmt::Display for MarkerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip() {
        assert_eq!(RelationKind::parse("after"), Some(RelationKind::After));
        assert_eq!(RelationKind::parse("before"), Some(RelationKind::Before));
        assert_eq!(RelationKind::After.to_string(), "after");
        assert_eq!(RelationKind::Before.to_string(), "before");
    }

    #[test]
    fn kind_parse_unknown() {
        assert!(RelationKind::parse("between").is_none());
    }

    #[test]
    fn marker_display() {
        let m = RelationMarker::after(["setup", "tests/db.rs::migrate"]);
        assert_eq!(m.to_string(), "after(setup, tests/db.rs::migrate)");
    }

    #[test]
    fn builtin_specs() {
        let specs = MarkerSpec::builtin();
        assert_eq!(specs[0].kind, RelationKind::After);
        assert_eq!(specs[1].kind, RelationKind::Before);
        assert!(specs.iter().all(|s| s.help.contains("*refs")));
    }
}

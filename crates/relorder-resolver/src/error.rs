use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while resolving the execution order.
///
/// All variants are fatal configuration errors: there is no partial
/// ordering and no fallback to input order, since a silently wrong
/// sequence could mask real test dependencies.
#[derive(Debug, Error, Diagnostic)]
pub enum OrderError {
    /// A marker reference matches more than one registered unit.
    #[error("ambiguous reference `{reference}`; candidates: {}", .candidates.join(", "))]
    #[diagnostic(help("qualify the reference with more of the unit id to single out one candidate"))]
    AmbiguousReference {
        reference: String,
        candidates: Vec<String>,
    },

    /// A marker reference matches no registered unit by name or id suffix.
    #[error("no unit found for reference `{reference}`")]
    #[diagnostic(help("check the marker argument for typos; references match a display name or an id suffix"))]
    UnresolvedReference { reference: String },

    /// The precedence constraints form a cycle.
    #[error("precedence cycle detected; unsatisfiable constraints: {}", format_edges(.residual))]
    #[diagnostic(help("remove or reverse one of the listed after/before constraints"))]
    CycleDetected { residual: Vec<(String, String)> },

    /// A state that must be unreachable given well-formed input.
    #[error("internal invariant violated: {message}")]
    InternalInvariant { message: String },
}

fn format_edges(edges: &[(String, String)]) -> String {
    edges
        .iter()
        .map(|(from, to)| format!("{from} -> {to}"))
        .collect::<Vec<_>>()
        .join(", ")
}

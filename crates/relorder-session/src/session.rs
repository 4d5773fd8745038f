use relorder_core::marker::{MarkerSpec, RelationKind};
use relorder_core::unit::{Identifiable, MarkerSource};
use relorder_resolver::{OrderError, OrderResolver};

/// The narrow interface to a host's marker-validation subsystem.
pub trait MarkerRegistrar {
    fn register(&mut self, kind: RelationKind, help: &str);
}

/// Register the builtin `after` and `before` marker kinds with the
/// host. Call once at startup, before collection.
pub fn configure<R: MarkerRegistrar>(registrar: &mut R) {
    for spec in MarkerSpec::builtin() {
        registrar.register(spec.kind, &spec.help);
    }
}

/// Collection-modification hook: reorder the collected units in place
/// so that every `after`/`before` constraint is satisfied.
///
/// On error the collection is left in its original input order and the
/// error propagates; the host is expected to treat it as a hard
/// collection-time failure and run nothing.
pub fn reorder<U>(items: &mut Vec<U>) -> Result<(), OrderError>
where
    U: Identifiable + MarkerSource,
{
    let mut resolver = OrderResolver::new();
    resolver.register(std::mem::take(items));
    match resolver.resolve_order() {
        Ok(ordered) => {
            tracing::debug!("reordered {} units", ordered.len());
            *items = ordered;
            Ok(())
        }
        Err(err) => {
            tracing::warn!("order resolution failed: {err}");
            *items = resolver.into_units();
            Err(err)
        }
    }
}

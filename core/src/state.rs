use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::QueryError;
use crate::facade::QueryFacade;
use crate::graph::GraphStore;

/// A published store plus what is known about its load.
#[derive(Debug)]
pub struct GraphState {
    pub graph: Arc<GraphStore>,
    pub load_time: Duration,
    pub loaded_at: Instant,
    /// Number of publishes before and including this one.
    pub generation: u64,
}

/// Readiness barrier between the load phase and the query phase.
///
/// Holds nothing until [`publish`](Self::publish) swaps in a fully built
/// store. Readers take an `Arc` to the current store and never hold the
/// lock while querying.
#[derive(Debug, Default)]
pub struct SharedGraph {
    inner: RwLock<Option<Arc<GraphState>>>,
    generation: AtomicU64,
}

impl SharedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `graph` visible to all subsequent readers.
    pub fn publish(&self, graph: GraphStore, load_time: Duration) -> Arc<GraphState> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let state = Arc::new(GraphState {
            graph: Arc::new(graph),
            load_time,
            loaded_at: Instant::now(),
            generation,
        });
        info!(
            generation,
            persons = state.graph.person_count(),
            edges = state.graph.edge_count(),
            "graph published"
        );
        *self.write() = Some(Arc::clone(&state));
        state
    }

    /// Drop the published store; queries fail with `NotLoaded` until the
    /// next publish.
    pub fn reset(&self) {
        *self.write() = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    /// Snapshot of the current state, if any.
    pub fn state(&self) -> Option<Arc<GraphState>> {
        self.read().clone()
    }

    /// Facade over the current store.
    pub fn facade(&self) -> Result<QueryFacade, QueryError> {
        self.state()
            .map(|s| QueryFacade::new(Arc::clone(&s.graph)))
            .ok_or(QueryError::NotLoaded)
    }

    // A poisoned lock only means a writer panicked mid-swap; the Option it
    // guards is still either the old or the new Arc.
    fn read(&self) -> RwLockReadGuard<'_, Option<Arc<GraphState>>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Arc<GraphState>>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load;

    const PERSONS: &str = "1\tAlice\n2\tBob\n";

    #[test]
    fn test_not_loaded_before_publish() {
        let shared = SharedGraph::new();
        assert!(!shared.is_loaded());
        assert_eq!(shared.facade().unwrap_err(), QueryError::NotLoaded);
    }

    #[test]
    fn test_publish_then_query() {
        let shared = SharedGraph::new();
        let state = shared.publish(load(PERSONS, "1:2\n").unwrap(), Duration::ZERO);
        assert_eq!(state.generation, 1);
        let facade = shared.facade().unwrap();
        assert_eq!(facade.list_connections(1, None).unwrap().total_connections, 1);
    }

    #[test]
    fn test_failed_load_keeps_prior_store() {
        let shared = SharedGraph::new();
        shared.publish(load(PERSONS, "1:2\n").unwrap(), Duration::ZERO);

        assert!(load(PERSONS, "1:9\n").is_err());

        let facade = shared.facade().unwrap();
        assert_eq!(facade.graph().person_count(), 2);
        assert_eq!(shared.state().unwrap().generation, 1);
    }

    #[test]
    fn test_reset_and_reload() {
        let shared = SharedGraph::new();
        shared.publish(load(PERSONS, "1:2\n").unwrap(), Duration::ZERO);
        let before = shared.facade().unwrap();

        shared.reset();
        assert_eq!(shared.facade().unwrap_err(), QueryError::NotLoaded);

        let state = shared.publish(load(PERSONS, "1:2\n").unwrap(), Duration::ZERO);
        assert_eq!(state.generation, 2);
        let after = shared.facade().unwrap();
        assert_eq!(before.graph().ids(), after.graph().ids());
        assert_eq!(before.graph().neighbors_out(1), after.graph().neighbors_out(1));
    }

    #[test]
    fn test_reader_keeps_snapshot_across_reset() {
        let shared = SharedGraph::new();
        shared.publish(load(PERSONS, "1:2\n").unwrap(), Duration::ZERO);
        let facade = shared.facade().unwrap();
        shared.reset();
        assert_eq!(facade.lookup_person(1).unwrap().connections.len(), 1);
    }
}

//! social-graph-core: In-memory social graph query engine.
//!
//! Holds an immutable person table and directed connection lists, and
//! answers bounded reachability ("who is within N hops"), shortest path,
//! common connections and population-wide min/max connection counts.
//!
//! The graph is built once by the bulk loader, published through
//! [`SharedGraph`], and then queried concurrently through [`QueryFacade`].

mod aggregate;
mod error;
mod facade;
mod graph;
mod intersection;
mod load;
mod state;
mod traversal;

pub use aggregate::{connection_counts, min_max_connections, MinMax, PersonConnections};
pub use error::{Dataset, Error, LoadError, QueryError, Result};
pub use facade::{
    ConnectionList, PersonDetail, QueryFacade, DEFAULT_DEGREE, DEFAULT_MIN_MAX_DEGREE,
};
pub use graph::{GraphBuilder, GraphStore, PersonId, PersonRecord, TraversalDirection};
pub use intersection::{common_connections, CommonConnections};
pub use load::load;
pub use state::{GraphState, SharedGraph};
pub use traversal::{
    bfs_reachable, count_within_degree, parse_degree, reachable_within_degree, shortest_path,
    shortest_path_within, validate_degree, Reached, TraversalResult,
};

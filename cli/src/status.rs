use serde::Serialize;
use social_graph_core::SharedGraph;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub status: &'static str,
    pub person_count: usize,
    pub edge_count: usize,
    pub self_edge_count: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
    pub generation: u64,
}

/// `status`: what is currently published.
pub fn run(shared: &SharedGraph) -> Status {
    match shared.state() {
        Some(gs) => Status {
            status: "loaded",
            person_count: gs.graph.person_count(),
            edge_count: gs.graph.edge_count(),
            self_edge_count: gs.graph.self_edge_count(),
            memory_bytes: gs.graph.memory_usage(),
            load_time_ms: gs.load_time.as_secs_f64() * 1000.0,
            generation: gs.generation,
        },
        None => Status {
            status: "not_loaded",
            person_count: 0,
            edge_count: 0,
            self_edge_count: 0,
            memory_bytes: 0,
            load_time_ms: 0.0,
            generation: 0,
        },
    }
}

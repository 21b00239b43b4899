use serde::Serialize;
use social_graph_core::{
    bfs_reachable, validate_degree, ConnectionList, PersonId, QueryError, QueryFacade,
    DEFAULT_DEGREE,
};

use crate::util::degree_arg;

#[derive(Debug, Serialize)]
pub struct DistantPerson {
    pub id: PersonId,
    pub name: String,
    pub distance: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceList {
    pub connections: Vec<DistantPerson>,
    pub total_connections: usize,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Connections {
    Plain(ConnectionList),
    WithDistance(DistanceList),
}

/// `connections <id> [--degree N] [--distances]`
pub fn run(
    facade: &QueryFacade,
    id: PersonId,
    degree: Option<&str>,
    distances: bool,
) -> Result<Connections, QueryError> {
    let degree = degree_arg(degree)?;
    if !distances {
        return facade.list_connections(id, degree).map(Connections::Plain);
    }

    let graph = facade.graph();
    let degree = validate_degree(degree.unwrap_or(DEFAULT_DEGREE))?;
    let result = bfs_reachable(graph, id, degree)?;
    let connections: Vec<DistantPerson> = result
        .reached
        .iter()
        .filter_map(|r| {
            graph.name(r.id).map(|name| DistantPerson {
                id: r.id,
                name: name.to_string(),
                distance: r.distance,
            })
        })
        .collect();

    Ok(Connections::WithDistance(DistanceList {
        total_connections: connections.len(),
        connections,
    }))
}

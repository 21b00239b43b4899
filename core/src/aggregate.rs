//! Population-wide connection counts.
//!
//! One bounded BFS per person, fanned out across the rayon pool. Every
//! worker reads the same immutable store; results come back in ascending
//! id order and the extrema are picked sequentially from there.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::QueryError;
use crate::graph::{GraphStore, PersonId};
use crate::traversal::count_within_degree;

/// A person together with their connection count at some degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonConnections {
    pub id: PersonId,
    pub name: String,
    pub connections: usize,
}

/// Least and most connected people. Both `None` only for an empty store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinMax {
    pub min: Option<PersonConnections>,
    pub max: Option<PersonConnections>,
}

/// `(id, count)` for every person, ascending by id.
///
/// The first failing BFS aborts the whole fan-out.
pub fn connection_counts(
    graph: &GraphStore,
    degree: u32,
) -> Result<Vec<(PersonId, usize)>, QueryError> {
    graph
        .ids()
        .par_iter()
        .map(|&id| count_within_degree(graph, id, degree).map(|count| (id, count)))
        .collect()
}

/// Min and max connection counts at `degree`.
///
/// Ties go to the smallest id: a later person only replaces the current
/// extremum when strictly smaller (for min) or strictly larger (for max).
pub fn min_max_connections(graph: &GraphStore, degree: u32) -> Result<MinMax, QueryError> {
    let counts = connection_counts(graph, degree)?;

    let mut min: Option<(PersonId, usize)> = None;
    let mut max: Option<(PersonId, usize)> = None;
    for &(id, count) in &counts {
        if min.map_or(true, |(_, c)| count < c) {
            min = Some((id, count));
        }
        if max.map_or(true, |(_, c)| count > c) {
            max = Some((id, count));
        }
    }

    let entry = |(id, connections): (PersonId, usize)| PersonConnections {
        id,
        name: graph.name(id).unwrap_or_default().to_string(),
        connections,
    };

    Ok(MinMax {
        min: min.map(entry),
        max: max.map(entry),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::load::load;

    #[test]
    fn test_scenario_degree_one() {
        let g = load("1\tAlice\n2\tBob\n3\tCarol\n", "1:2\n2:3\n3:\n").unwrap();
        let mm = min_max_connections(&g, 1).unwrap();
        let min = mm.min.unwrap();
        let max = mm.max.unwrap();
        assert_eq!((min.id, min.name.as_str(), min.connections), (3, "Carol", 0));
        assert_eq!((max.id, max.name.as_str(), max.connections), (1, "Alice", 1));
    }

    #[test]
    fn test_scenario_degree_two() {
        let g = load("1\tAlice\n2\tBob\n3\tCarol\n", "1:2\n2:3\n3:\n").unwrap();
        let mm = min_max_connections(&g, 2).unwrap();
        assert_eq!(mm.min.unwrap().id, 3);
        let max = mm.max.unwrap();
        assert_eq!((max.id, max.connections), (1, 2));
    }

    #[test]
    fn test_first_wins_on_ties() {
        let mut b = GraphBuilder::new();
        for id in [40, 10, 30, 20] {
            b.add_person(id, format!("p{id}"));
        }
        let g = b.build().unwrap();
        let mm = min_max_connections(&g, 3).unwrap();
        assert_eq!(mm.min.unwrap().id, 10);
        assert_eq!(mm.max.unwrap().id, 10);
    }

    #[test]
    fn test_counts_ascending_by_id() {
        let mut b = GraphBuilder::new();
        for id in (0..200).rev() {
            b.add_person(id, format!("p{id}"));
            if id > 0 {
                b.add_connection(id, id - 1);
            }
        }
        let g = b.build().unwrap();
        let counts = connection_counts(&g, 5).unwrap();
        assert_eq!(counts.len(), 200);
        assert!(counts.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(counts[0], (0, 0));
        assert_eq!(counts[3], (3, 3));
        assert_eq!(counts[199], (199, 5));
    }

    #[test]
    fn test_empty_graph() {
        let g = GraphStore::empty();
        let mm = min_max_connections(&g, 2).unwrap();
        assert!(mm.min.is_none());
        assert!(mm.max.is_none());
        assert_eq!(
            serde_json::to_value(&mm).unwrap(),
            serde_json::json!({"min": null, "max": null})
        );
    }

    #[test]
    fn test_invalid_degree_aborts() {
        let g = load("1\tAlice\n", "").unwrap();
        assert!(matches!(
            min_max_connections(&g, 0),
            Err(QueryError::InvalidDegree(_))
        ));
    }
}

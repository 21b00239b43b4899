use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::QueryError;
use crate::graph::{GraphStore, PersonId, PersonRecord, TraversalDirection};

/// A person reached during a bounded BFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reached {
    pub id: PersonId,
    /// Minimum hop count from the origin.
    pub distance: u32,
}

/// Result of a bounded reachability search.
#[derive(Debug)]
pub struct TraversalResult {
    /// Reached people ascending by id, origin excluded.
    pub reached: Vec<Reached>,
    /// Distinct nodes touched, origin included.
    pub nodes_visited: usize,
}

impl TraversalResult {
    fn empty() -> Self {
        Self {
            reached: Vec::new(),
            nodes_visited: 0,
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.reached.iter().map(|r| r.id)
    }
}

/// Check a caller-supplied degree. Anything below 1 is rejected.
pub fn validate_degree(degree: i64) -> Result<u32, QueryError> {
    if degree < 1 {
        return Err(QueryError::InvalidDegree(degree.to_string()));
    }
    Ok(u32::try_from(degree).unwrap_or(u32::MAX))
}

/// Parse a degree as it arrives from a query string or command line.
pub fn parse_degree(raw: &str) -> Result<u32, QueryError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QueryError::InvalidDegree(raw.to_string()))
        .and_then(validate_degree)
}

/// Iterate neighbours according to a traversal direction.
///
/// Both slices are sorted, but `Both` yields outgoing then incoming, so
/// callers that need ascending order over the union merge them.
fn iter_neighbors(
    graph: &GraphStore,
    node: PersonId,
    dir: TraversalDirection,
) -> impl Iterator<Item = PersonId> + '_ {
    let (use_out, use_inc) = match dir {
        TraversalDirection::Outgoing => (true, false),
        TraversalDirection::Incoming => (false, true),
        TraversalDirection::Both => (true, true),
    };

    let out_iter = graph
        .neighbors_out(node)
        .iter()
        .copied()
        .filter(move |_| use_out);
    let in_iter = graph
        .neighbors_in(node)
        .iter()
        .copied()
        .filter(move |_| use_inc);

    MergeAscending::new(out_iter, in_iter)
}

/// Merge two ascending streams into one ascending stream, dropping
/// values present in both.
struct MergeAscending<A: Iterator<Item = PersonId>, B: Iterator<Item = PersonId>> {
    a: std::iter::Peekable<A>,
    b: std::iter::Peekable<B>,
}

impl<A: Iterator<Item = PersonId>, B: Iterator<Item = PersonId>> MergeAscending<A, B> {
    fn new(a: A, b: B) -> Self {
        Self {
            a: a.peekable(),
            b: b.peekable(),
        }
    }
}

impl<A: Iterator<Item = PersonId>, B: Iterator<Item = PersonId>> Iterator for MergeAscending<A, B> {
    type Item = PersonId;

    fn next(&mut self) -> Option<PersonId> {
        match (self.a.peek().copied(), self.b.peek().copied()) {
            (Some(x), Some(y)) if x == y => {
                self.b.next();
                self.a.next()
            }
            (Some(x), Some(y)) if x < y => self.a.next(),
            (Some(_), Some(_)) => self.b.next(),
            (Some(_), None) => self.a.next(),
            (None, _) => self.b.next(),
        }
    }
}

/// Bounded BFS over outgoing edges: everyone reachable from `start` within
/// `degree` hops.
///
/// Runs exactly `degree` frontier expansions (fewer if the frontier empties).
/// The origin is marked visited up front and filtered from every frontier,
/// so a cycle leading back to it is dropped rather than reported. Unknown
/// `start` yields an empty result.
pub fn bfs_reachable(
    graph: &GraphStore,
    start: PersonId,
    degree: u32,
) -> Result<TraversalResult, QueryError> {
    if degree < 1 {
        return Err(QueryError::InvalidDegree(degree.to_string()));
    }
    if !graph.contains(start) {
        return Ok(TraversalResult::empty());
    }

    let mut visited: HashSet<PersonId> = HashSet::new();
    let mut reached: Vec<Reached> = Vec::new();
    let mut frontier: Vec<PersonId> = vec![start];
    visited.insert(start);

    for depth in 1..=degree {
        let mut next_frontier = Vec::new();
        for &current in &frontier {
            for target in graph.neighbors_out(current).iter().copied() {
                if target == start {
                    continue;
                }
                if visited.insert(target) {
                    reached.push(Reached {
                        id: target,
                        distance: depth,
                    });
                    next_frontier.push(target);
                }
            }
        }
        if next_frontier.is_empty() {
            break;
        }
        frontier = next_frontier;
    }

    reached.sort_unstable_by_key(|r| r.id);
    Ok(TraversalResult {
        reached,
        nodes_visited: visited.len(),
    })
}

/// People reachable from `id` within `degree` hops, ascending by id.
pub fn reachable_within_degree(
    graph: &GraphStore,
    id: PersonId,
    degree: u32,
) -> Result<Vec<PersonRecord>, QueryError> {
    let result = bfs_reachable(graph, id, degree)?;
    Ok(records(graph, result.ids()))
}

/// `|reachable_within_degree(id, degree)|` without materialising names.
pub fn count_within_degree(
    graph: &GraphStore,
    id: PersonId,
    degree: u32,
) -> Result<usize, QueryError> {
    Ok(bfs_reachable(graph, id, degree)?.reached.len())
}

pub(crate) fn records(
    graph: &GraphStore,
    ids: impl IntoIterator<Item = PersonId>,
) -> Vec<PersonRecord> {
    ids.into_iter().filter_map(|id| graph.person(id)).collect()
}

/// Shortest path from `start` to `target` over forward edges, endpoints
/// included. Empty when no path exists or either id is unknown.
pub fn shortest_path(graph: &GraphStore, start: PersonId, target: PersonId) -> Vec<PersonRecord> {
    shortest_path_within(graph, start, target, u32::MAX, TraversalDirection::Outgoing)
}

/// Shortest path using BFS (unweighted), limited to `max_hops` edges.
///
/// `direction` controls which edges to follow: `Outgoing` for forward-only,
/// `Incoming` for reverse-only, `Both` for undirected.
///
/// Neighbours are expanded in ascending id order and each node keeps the
/// first parent that discovers it, so among equal-length paths the one with
/// the lexicographically smallest id sequence wins.
pub fn shortest_path_within(
    graph: &GraphStore,
    start: PersonId,
    target: PersonId,
    max_hops: u32,
    direction: TraversalDirection,
) -> Vec<PersonRecord> {
    if !graph.contains(start) || !graph.contains(target) {
        return Vec::new();
    }

    if start == target {
        return records(graph, [start]);
    }

    if max_hops == 0 {
        return Vec::new();
    }

    // node → parent; the start node is its own parent.
    let mut parents: HashMap<PersonId, PersonId> = HashMap::new();
    let mut queue: VecDeque<(PersonId, u32)> = VecDeque::new();

    parents.insert(start, start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_hops {
            continue;
        }

        for next in iter_neighbors(graph, current, direction) {
            if parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, current);

            if next == target {
                return records(graph, reconstruct_path(&parents, start, target));
            }

            queue.push_back((next, depth + 1));
        }
    }

    Vec::new()
}

fn reconstruct_path(
    parents: &HashMap<PersonId, PersonId>,
    start: PersonId,
    target: PersonId,
) -> Vec<PersonId> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        current = parents[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn build(n: PersonId, edges: impl IntoIterator<Item = (PersonId, PersonId)>) -> GraphStore {
        let mut b = GraphBuilder::new();
        for id in 0..n {
            b.add_person(id, format!("p{id}"));
        }
        for (from, to) in edges {
            b.add_connection(from, to);
        }
        b.build().unwrap()
    }

    fn make_chain(n: PersonId) -> GraphStore {
        build(n, (0..n - 1).map(|i| (i, i + 1)))
    }

    fn make_star(leaves: PersonId) -> GraphStore {
        build(leaves + 1, (1..=leaves).map(|i| (0, i)))
    }

    fn make_cycle(n: PersonId) -> GraphStore {
        build(n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    fn ids(records: &[PersonRecord]) -> Vec<PersonId> {
        records.iter().map(|r| r.id).collect()
    }

    // --- Reachability tests ---

    #[test]
    fn test_bfs_chain() {
        let g = make_chain(6);
        let result = bfs_reachable(&g, 0, 10).unwrap();
        assert_eq!(result.reached.len(), 5);
        let node5 = result.reached.iter().find(|r| r.id == 5).unwrap();
        assert_eq!(node5.distance, 5);
    }

    #[test]
    fn test_bfs_chain_depth_limited() {
        let g = make_chain(10);
        let result = bfs_reachable(&g, 0, 3).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(result.reached.iter().all(|r| r.distance <= 3));
    }

    #[test]
    fn test_bfs_forward_only() {
        let g = make_chain(5);
        let result = bfs_reachable(&g, 4, 10).unwrap();
        assert!(result.reached.is_empty());
        assert_eq!(result.nodes_visited, 1);
    }

    #[test]
    fn test_bfs_star() {
        let g = make_star(100);
        let result = bfs_reachable(&g, 0, 1).unwrap();
        assert_eq!(result.reached.len(), 100);
        assert!(result.reached.iter().all(|r| r.distance == 1));
    }

    #[test]
    fn test_bfs_cycle_excludes_origin() {
        let g = make_cycle(5);
        let result = bfs_reachable(&g, 0, 100).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_bfs_two_cycle_excludes_origin() {
        let g = build(2, [(0, 1), (1, 0)]);
        let reached = reachable_within_degree(&g, 0, 2).unwrap();
        assert_eq!(ids(&reached), vec![1]);
    }

    #[test]
    fn test_bfs_self_loop() {
        let g = build(1, [(0, 0)]);
        let result = bfs_reachable(&g, 0, 5).unwrap();
        assert!(result.reached.is_empty());
    }

    #[test]
    fn test_bfs_depth_zero_rejected() {
        let g = make_chain(5);
        assert_eq!(
            bfs_reachable(&g, 0, 0).unwrap_err(),
            QueryError::InvalidDegree("0".into())
        );
    }

    #[test]
    fn test_bfs_start_not_in_graph() {
        let g = make_chain(3);
        let result = bfs_reachable(&g, 999, 10).unwrap();
        assert!(result.reached.is_empty());
        assert_eq!(result.nodes_visited, 0);
    }

    #[test]
    fn test_bfs_minimum_distance_recorded() {
        // 0 -> 1 -> 2 -> 3 plus shortcut 0 -> 3
        let g = build(4, [(0, 1), (1, 2), (2, 3), (0, 3)]);
        let result = bfs_reachable(&g, 0, 3).unwrap();
        let node3 = result.reached.iter().find(|r| r.id == 3).unwrap();
        assert_eq!(node3.distance, 1);
    }

    #[test]
    fn test_reachable_sorted_by_id() {
        let g = build(10, [(0, 9), (0, 4), (9, 1), (4, 7)]);
        let reached = reachable_within_degree(&g, 0, 2).unwrap();
        assert_eq!(ids(&reached), vec![1, 4, 7, 9]);
        assert_eq!(reached[0].name, "p1");
    }

    #[test]
    fn test_count_within_degree() {
        let g = make_chain(6);
        assert_eq!(count_within_degree(&g, 0, 2).unwrap(), 2);
        assert_eq!(count_within_degree(&g, 5, 2).unwrap(), 0);
    }

    #[test]
    fn test_degree_validation() {
        assert_eq!(validate_degree(1), Ok(1));
        assert_eq!(validate_degree(i64::MAX), Ok(u32::MAX));
        assert_eq!(validate_degree(0), Err(QueryError::InvalidDegree("0".into())));
        assert_eq!(validate_degree(-3), Err(QueryError::InvalidDegree("-3".into())));
        assert_eq!(parse_degree(" 2 "), Ok(2));
        assert_eq!(parse_degree("two"), Err(QueryError::InvalidDegree("two".into())));
        assert_eq!(parse_degree("1.5"), Err(QueryError::InvalidDegree("1.5".into())));
    }

    // --- Shortest path tests ---

    #[test]
    fn test_shortest_path_chain() {
        let g = make_chain(6);
        let path = shortest_path(&g, 0, 5);
        assert_eq!(ids(&path), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(path[5].name, "p5");
    }

    #[test]
    fn test_shortest_path_self() {
        let g = make_chain(3);
        assert_eq!(ids(&shortest_path(&g, 1, 1)), vec![1]);
    }

    #[test]
    fn test_shortest_path_no_path() {
        let g = build(2, []);
        assert!(shortest_path(&g, 0, 1).is_empty());
    }

    #[test]
    fn test_shortest_path_forward_only() {
        let g = make_chain(4);
        assert!(shortest_path(&g, 3, 0).is_empty());
        let reverse = shortest_path_within(&g, 3, 0, u32::MAX, TraversalDirection::Incoming);
        assert_eq!(ids(&reverse), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_shortest_path_undirected() {
        // 0 -> 1 <- 2
        let g = build(3, [(0, 1), (2, 1)]);
        assert!(shortest_path(&g, 0, 2).is_empty());
        let path = shortest_path_within(&g, 0, 2, 10, TraversalDirection::Both);
        assert_eq!(ids(&path), vec![0, 1, 2]);
    }

    #[test]
    fn test_shortest_path_max_hops() {
        let g = make_chain(10);
        assert!(shortest_path_within(&g, 0, 9, 5, TraversalDirection::Outgoing).is_empty());
        assert_eq!(
            shortest_path_within(&g, 0, 9, 9, TraversalDirection::Outgoing).len(),
            10
        );
    }

    #[test]
    fn test_shortest_path_max_hops_zero() {
        let g = make_chain(3);
        assert!(shortest_path_within(&g, 0, 1, 0, TraversalDirection::Outgoing).is_empty());
    }

    #[test]
    fn test_shortest_path_cycle() {
        let g = make_cycle(5);
        assert_eq!(ids(&shortest_path(&g, 0, 4)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_shortest_path_unknown_endpoints() {
        let g = make_chain(3);
        assert!(shortest_path(&g, 99, 1).is_empty());
        assert!(shortest_path(&g, 0, 99).is_empty());
        assert!(shortest_path(&g, 99, 99).is_empty());
    }

    #[test]
    fn test_shortest_path_tie_break_smallest_ids() {
        // Two 3-hop routes from 0 to 9: 0-5-2-9 and 0-3-8-9 and 0-3-4-9.
        // Lexicographically smallest intermediate sequence is [3, 4].
        let g = build(10, [(0, 5), (0, 3), (5, 2), (2, 9), (3, 8), (3, 4), (8, 9), (4, 9)]);
        assert_eq!(ids(&shortest_path(&g, 0, 9)), vec![0, 3, 4, 9]);
    }

    #[test]
    fn test_shortest_path_tie_break_at_later_branch() {
        // Both routes start 0-1; branch at 1 between 7 and 6.
        let g = build(9, [(0, 1), (1, 7), (1, 6), (7, 8), (6, 8)]);
        assert_eq!(ids(&shortest_path(&g, 0, 8)), vec![0, 1, 6, 8]);
    }

    #[test]
    fn test_merge_ascending_dedups() {
        let merged: Vec<PersonId> =
            MergeAscending::new([1, 3, 5].into_iter(), [2, 3, 6].into_iter()).collect();
        assert_eq!(merged, vec![1, 2, 3, 5, 6]);
    }
}

use serde::Serialize;

use crate::error::QueryError;
use crate::graph::{GraphStore, PersonId, PersonRecord};
use crate::traversal::{bfs_reachable, records};

/// People reachable from both `a` and `b` within the same degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonConnections {
    pub common: Vec<PersonRecord>,
    pub number_in_common: usize,
}

/// Intersect the two reachable sets, ascending by id.
///
/// Each side is computed independently, so `a` may appear in the result if
/// `b` reaches it (and vice versa); only each side's own origin is excluded.
pub fn common_connections(
    graph: &GraphStore,
    a: PersonId,
    b: PersonId,
    degree: u32,
) -> Result<CommonConnections, QueryError> {
    let left = bfs_reachable(graph, a, degree)?;
    let right = bfs_reachable(graph, b, degree)?;

    let common_ids = intersect_sorted(
        &left.ids().collect::<Vec<_>>(),
        &right.ids().collect::<Vec<_>>(),
    );
    let common = records(graph, common_ids);
    Ok(CommonConnections {
        number_in_common: common.len(),
        common,
    })
}

/// Two-pointer intersection of ascending, duplicate-free slices.
fn intersect_sorted(left: &[PersonId], right: &[PersonId]) -> Vec<PersonId> {
    let mut out = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

use std::collections::HashMap;

use serde::Serialize;

use crate::error::LoadError;

/// Person identifier as it appears in the person dataset.
pub type PersonId = i64;

/// A person as returned by every query: `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
}

/// Which adjacency lists a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalDirection {
    #[default]
    Outgoing,
    Incoming,
    Both,
}

/// Immutable social graph: node table, forward and reverse adjacency.
///
/// Only [`GraphBuilder::build`] produces one. Adjacency lists are sorted
/// ascending and free of duplicates, so any traversal that walks them in
/// order expands smaller ids first.
#[derive(Debug)]
pub struct GraphStore {
    names: HashMap<PersonId, String>,
    /// Every person id, ascending.
    ids: Vec<PersonId>,
    outgoing: HashMap<PersonId, Vec<PersonId>>,
    incoming: HashMap<PersonId, Vec<PersonId>>,
    edge_count: usize,
    self_edge_count: usize,
}

impl GraphStore {
    /// A store with no people. Useful as the "prior state" before a load.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
            ids: Vec::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            edge_count: 0,
            self_edge_count: 0,
        }
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.names.contains_key(&id)
    }

    pub fn name(&self, id: PersonId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn person(&self, id: PersonId) -> Option<PersonRecord> {
        self.name(id).map(|name| PersonRecord {
            id,
            name: name.to_string(),
        })
    }

    /// All person ids in ascending order.
    pub fn ids(&self) -> &[PersonId] {
        &self.ids
    }

    /// Outgoing neighbours of `id`, ascending. Empty for unknown ids.
    pub fn neighbors_out(&self, id: PersonId) -> &[PersonId] {
        self.outgoing.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Incoming neighbours of `id`, ascending.
    pub fn neighbors_in(&self, id: PersonId) -> &[PersonId] {
        self.incoming.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn person_count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Distinct directed edges, self-edges included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn self_edge_count(&self) -> usize {
        self.self_edge_count
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let names_mem: usize = self
            .names
            .values()
            .map(|n| size_of::<PersonId>() + size_of::<String>() + n.capacity() + 16)
            .sum();
        let ids_mem = self.ids.capacity() * size_of::<PersonId>();
        let adjacency = |m: &HashMap<PersonId, Vec<PersonId>>| -> usize {
            m.values()
                .map(|v| size_of::<PersonId>() + size_of::<Vec<PersonId>>() + v.capacity() * size_of::<PersonId>())
                .sum()
        };

        names_mem + ids_mem + adjacency(&self.outgoing) + adjacency(&self.incoming)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::empty()
    }
}

/// The single mutable phase of a graph's life.
///
/// People and connections are collected in any order; [`build`](Self::build)
/// validates every endpoint and freezes the result into a [`GraphStore`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    names: HashMap<PersonId, String>,
    edges: Vec<(PersonId, PersonId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(person_count: usize, edge_count: usize) -> Self {
        Self {
            names: HashMap::with_capacity(person_count),
            edges: Vec::with_capacity(edge_count),
        }
    }

    /// Register a person. Returns false (and keeps the first name) if the id
    /// is already taken.
    pub fn add_person(&mut self, id: PersonId, name: impl Into<String>) -> bool {
        if self.names.contains_key(&id) {
            return false;
        }
        self.names.insert(id, name.into());
        true
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.names.contains_key(&id)
    }

    /// Record a directed connection. Endpoints are checked in `build`.
    pub fn add_connection(&mut self, from: PersonId, to: PersonId) {
        self.edges.push((from, to));
    }

    pub fn person_count(&self) -> usize {
        self.names.len()
    }

    /// Freeze into an immutable store.
    ///
    /// Fails with [`LoadError::UnknownNodeReference`] on the first edge whose
    /// endpoint was never added as a person; nothing is returned in that case.
    pub fn build(self) -> Result<GraphStore, LoadError> {
        let GraphBuilder { names, edges } = self;

        let mut outgoing: HashMap<PersonId, Vec<PersonId>> = HashMap::with_capacity(names.len());
        for (from, to) in edges {
            if !names.contains_key(&from) || !names.contains_key(&to) {
                return Err(LoadError::UnknownNodeReference {
                    line: None,
                    from,
                    to,
                });
            }
            outgoing.entry(from).or_default().push(to);
        }

        let mut incoming: HashMap<PersonId, Vec<PersonId>> = HashMap::with_capacity(names.len());
        let mut edge_count = 0;
        let mut self_edge_count = 0;
        for (&from, targets) in outgoing.iter_mut() {
            targets.sort_unstable();
            targets.dedup();
            targets.shrink_to_fit();
            edge_count += targets.len();
            for &to in targets.iter() {
                if to == from {
                    self_edge_count += 1;
                }
                incoming.entry(to).or_default().push(from);
            }
        }
        for sources in incoming.values_mut() {
            sources.sort_unstable();
        }

        let mut ids: Vec<PersonId> = names.keys().copied().collect();
        ids.sort_unstable();

        Ok(GraphStore {
            names,
            ids,
            outgoing,
            incoming,
            edge_count,
            self_edge_count,
        })
    }
}

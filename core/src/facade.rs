//! The five named operations the outer layer calls.
//!
//! Degrees arrive as the caller received them (`None` when omitted) and are
//! re-validated here even if the caller already checked them.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{self, MinMax};
use crate::error::QueryError;
use crate::graph::{GraphStore, PersonId, PersonRecord};
use crate::intersection::{self, CommonConnections};
use crate::traversal::{self, validate_degree};

pub const DEFAULT_DEGREE: i64 = 1;
pub const DEFAULT_MIN_MAX_DEGREE: i64 = 2;

/// A person with their direct (degree-1) connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonDetail {
    pub id: PersonId,
    pub name: String,
    #[serde(rename = "connection")]
    pub connections: Vec<PersonRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionList {
    pub connections: Vec<PersonRecord>,
    pub total_connections: usize,
}

/// Stateless query entry point over a published store.
#[derive(Debug, Clone)]
pub struct QueryFacade {
    graph: Arc<GraphStore>,
}

impl QueryFacade {
    pub fn new(graph: Arc<GraphStore>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// The person and their degree-1 connections; `None` for an unknown id.
    pub fn lookup_person(&self, id: PersonId) -> Option<PersonDetail> {
        debug!(id, "lookup_person");
        let person = self.graph.person(id)?;
        let connections = traversal::reachable_within_degree(&self.graph, id, 1).ok()?;
        Some(PersonDetail {
            id: person.id,
            name: person.name,
            connections,
        })
    }

    pub fn list_connections(
        &self,
        id: PersonId,
        degree: Option<i64>,
    ) -> Result<ConnectionList, QueryError> {
        let degree = validate_degree(degree.unwrap_or(DEFAULT_DEGREE))?;
        debug!(id, degree, "list_connections");
        let connections = traversal::reachable_within_degree(&self.graph, id, degree)?;
        Ok(ConnectionList {
            total_connections: connections.len(),
            connections,
        })
    }

    /// Shortest forward path between two people. Both ids are required.
    pub fn introduce(
        &self,
        from: Option<PersonId>,
        to: Option<PersonId>,
    ) -> Result<Vec<PersonRecord>, QueryError> {
        let to = to.ok_or(QueryError::MissingParameter("to"))?;
        let from = from.ok_or(QueryError::MissingParameter("from"))?;
        debug!(from, to, "introduce");
        Ok(traversal::shortest_path(&self.graph, from, to))
    }

    pub fn common_connections(
        &self,
        a: PersonId,
        b: PersonId,
        degree: Option<i64>,
    ) -> Result<CommonConnections, QueryError> {
        let degree = validate_degree(degree.unwrap_or(DEFAULT_DEGREE))?;
        debug!(a, b, degree, "common_connections");
        intersection::common_connections(&self.graph, a, b, degree)
    }

    /// Least and most connected people at `degree` (default 2).
    pub fn min_max(&self, degree: Option<i64>) -> Result<MinMax, QueryError> {
        let degree = validate_degree(degree.unwrap_or(DEFAULT_MIN_MAX_DEGREE))?;
        if self.graph.is_empty() {
            return Err(QueryError::EmptyGraph);
        }
        debug!(degree, persons = self.graph.person_count(), "min_max");
        aggregate::min_max_connections(&self.graph, degree)
    }
}

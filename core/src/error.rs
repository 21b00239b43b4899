//! Error taxonomy for loading and querying.
//!
//! Load errors are fatal: the store they would have produced is discarded
//! before any reader can see it. Query errors are returned per call and
//! never touch the published store.

use thiserror::Error;

use crate::graph::PersonId;

/// Which bulk-load input a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Person,
    Relationship,
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dataset::Person => f.write_str("person"),
            Dataset::Relationship => f.write_str("relationship"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Malformed line: wrong field count or a non-integer id.
    #[error("{dataset} data line {line}: {reason}")]
    Parse {
        dataset: Dataset,
        line: usize,
        reason: String,
    },

    #[error("person data line {line}: duplicate person id {id}")]
    DuplicatePerson { line: usize, id: PersonId },

    /// A connection endpoint that is not in the person dataset.
    #[error("relationship {from} -> {to} references an unknown person{}", at_line(.line))]
    UnknownNodeReference {
        line: Option<usize>,
        from: PersonId,
        to: PersonId,
    },
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" (relationship data line {n})"),
        None => String::new(),
    }
}

impl LoadError {
    pub(crate) fn parse(dataset: Dataset, line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            dataset,
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Degree that is not an integer, or is below 1. Carries the raw value.
    #[error("invalid degree '{0}': must be an integer >= 1")]
    InvalidDegree(String),

    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("aggregate requested over a graph with no people")]
    EmptyGraph,

    #[error("no graph loaded: run the bulk load first")]
    NotLoaded,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

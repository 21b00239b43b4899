//! Bulk loader for the two flat-file datasets.
//!
//! Person data: `<id>\t<name>` per line.
//! Relationship data: `<id>:<id>,<id>,...` per line; the list may be empty.
//!
//! The whole load runs against a private [`GraphBuilder`]; a [`GraphStore`]
//! exists only if every line parsed and every reference resolved.

use std::time::Instant;

use tracing::{info, warn};

use crate::error::{Dataset, LoadError};
use crate::graph::{GraphBuilder, GraphStore, PersonId};

/// Parse both datasets into an immutable store.
pub fn load(person_data: &str, relationship_data: &str) -> Result<GraphStore, LoadError> {
    let start = Instant::now();
    let mut builder = GraphBuilder::new();

    for (line_no, line) in numbered_lines(person_data) {
        let (id, name) = parse_person_line(line, line_no)?;
        if !builder.add_person(id, name) {
            return Err(LoadError::DuplicatePerson { line: line_no, id });
        }
    }

    for (line_no, line) in numbered_lines(relationship_data) {
        let (from, targets) = parse_relationship_line(line, line_no)?;
        for to in targets {
            if !builder.contains(from) || !builder.contains(to) {
                return Err(LoadError::UnknownNodeReference {
                    line: Some(line_no),
                    from,
                    to,
                });
            }
            if from == to {
                warn!(line = line_no, id = from, "self-connection kept in store, excluded from traversals");
            }
            builder.add_connection(from, to);
        }
        // An empty list still has to name a real person.
        if !builder.contains(from) {
            return Err(LoadError::UnknownNodeReference {
                line: Some(line_no),
                from,
                to: from,
            });
        }
    }

    let graph = builder.build()?;
    info!(
        persons = graph.person_count(),
        edges = graph.edge_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "graph loaded"
    );
    Ok(graph)
}

/// Non-blank lines with their 1-based line numbers, `\r` stripped.
fn numbered_lines(data: &str) -> impl Iterator<Item = (usize, &str)> {
    data.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_id(raw: &str, dataset: Dataset, line: usize) -> Result<PersonId, LoadError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<PersonId>()
        .map_err(|_| LoadError::parse(dataset, line, format!("'{trimmed}' is not an integer id")))
}

fn parse_person_line(line: &str, line_no: usize) -> Result<(PersonId, &str), LoadError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 2 {
        return Err(LoadError::parse(
            Dataset::Person,
            line_no,
            format!("expected 2 tab-separated fields, found {}", fields.len()),
        ));
    }
    let id = parse_id(fields[0], Dataset::Person, line_no)?;
    Ok((id, fields[1]))
}

fn parse_relationship_line(
    line: &str,
    line_no: usize,
) -> Result<(PersonId, Vec<PersonId>), LoadError> {
    let Some((id, rest)) = line.split_once(':') else {
        return Err(LoadError::parse(
            Dataset::Relationship,
            line_no,
            "expected '<id>:<ids>'",
        ));
    };
    if rest.contains(':') {
        return Err(LoadError::parse(
            Dataset::Relationship,
            line_no,
            "more than one ':' separator",
        ));
    }

    let from = parse_id(id, Dataset::Relationship, line_no)?;
    if rest.trim().is_empty() {
        return Ok((from, Vec::new()));
    }

    let targets = rest
        .split(',')
        .map(|raw| {
            if raw.trim().is_empty() {
                Err(LoadError::parse(
                    Dataset::Relationship,
                    line_no,
                    "empty entry in connection list",
                ))
            } else {
                parse_id(raw, Dataset::Relationship, line_no)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((from, targets))
}

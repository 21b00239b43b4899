//! social-graph CLI: loads the person and relationship datasets, publishes
//! the graph, and answers one query as JSON.
//!
//! Load failures are fatal and happen before any query runs. Query failures
//! are reported as a JSON error object.

pub mod cli;
pub mod config;
mod connections;
mod load;
mod status;
mod util;

use social_graph_core::SharedGraph;

pub use cli::{CliArgs, Command};
pub use config::{Overrides, Settings};
pub use load::{load_and_publish, read_datasets};
pub use util::Reply;

use crate::util::{degree_arg, render};

/// Load the graph described by `settings` and run `command` against it.
pub fn run(settings: &Settings, command: &Command) -> anyhow::Result<Reply> {
    let shared = SharedGraph::new();
    load_and_publish(&shared, settings)?;
    Ok(execute(&shared, command)?)
}

/// Run one command against whatever `shared` currently holds.
pub fn execute(shared: &SharedGraph, command: &Command) -> serde_json::Result<Reply> {
    match command {
        Command::Status => render(Ok(status::run(shared))),
        Command::Person { id } => render(
            shared
                .facade()
                .map(|f| f.lookup_person(*id).into_iter().collect::<Vec<_>>()),
        ),
        Command::Connections {
            id,
            degree,
            distances,
        } => render(
            shared
                .facade()
                .and_then(|f| connections::run(&f, *id, degree.as_deref(), *distances)),
        ),
        Command::Introduce { from, to } => {
            render(shared.facade().and_then(|f| f.introduce(*from, *to)))
        }
        Command::Common { a, b, degree } => render(
            shared
                .facade()
                .and_then(|f| f.common_connections(*a, *b, degree_arg(degree.as_deref())?)),
        ),
        Command::MinMax { degree } => render(
            shared
                .facade()
                .and_then(|f| f.min_max(degree_arg(degree.as_deref())?)),
        ),
    }
}

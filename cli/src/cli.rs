//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use social_graph_core::PersonId;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "social-graph", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "SOCIAL_GRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Person dataset (`<id>\t<name>` per line).
    #[arg(long, env = "SOCIAL_GRAPH_PERSONS")]
    pub persons: Option<PathBuf>,

    /// Relationship dataset (`<id>:<id>,<id>,...` per line).
    #[arg(long, env = "SOCIAL_GRAPH_RELATIONSHIPS")]
    pub relationships: Option<PathBuf>,

    /// Refuse to serve a graph larger than this (MB).
    #[arg(long, env = "SOCIAL_GRAPH_MAX_MEMORY_MB")]
    pub max_memory_mb: Option<u32>,

    /// Worker threads for population-wide queries.
    #[arg(long, env = "SOCIAL_GRAPH_WORKERS")]
    pub workers: Option<usize>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Log warnings and errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A person and their direct connections.
    Person {
        #[arg(allow_negative_numbers = true)]
        id: PersonId,
    },

    /// Everyone within N hops of a person.
    Connections {
        #[arg(allow_negative_numbers = true)]
        id: PersonId,

        /// Maximum hops (default 1).
        #[arg(short, long, allow_negative_numbers = true)]
        degree: Option<String>,

        /// Include each person's hop count.
        #[arg(long)]
        distances: bool,
    },

    /// Shortest chain of connections from one person to another.
    Introduce {
        #[arg(long, allow_negative_numbers = true)]
        from: Option<PersonId>,

        #[arg(long, allow_negative_numbers = true)]
        to: Option<PersonId>,
    },

    /// People within N hops of both A and B.
    Common {
        #[arg(allow_negative_numbers = true)]
        a: PersonId,

        #[arg(allow_negative_numbers = true)]
        b: PersonId,

        /// Maximum hops (default 1).
        #[arg(short, long, allow_negative_numbers = true)]
        degree: Option<String>,
    },

    /// Least and most connected people.
    MinMax {
        /// Maximum hops (default 2).
        #[arg(short, long, allow_negative_numbers = true)]
        degree: Option<String>,
    },

    /// Load the datasets and report graph statistics.
    Status,
}

impl CliArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            person_file: self.persons.clone(),
            relationship_file: self.relationships.clone(),
            max_memory_mb: self.max_memory_mb,
            workers: self.workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connections() {
        let args =
            CliArgs::try_parse_from(["social-graph", "connections", "34", "--degree", "2"]).unwrap();
        assert_eq!(
            args.command,
            Command::Connections {
                id: 34,
                degree: Some("2".into()),
                distances: false
            }
        );
    }

    #[test]
    fn test_parse_negative_degree_reaches_engine() {
        let args =
            CliArgs::try_parse_from(["social-graph", "min-max", "--degree", "-1"]).unwrap();
        assert_eq!(
            args.command,
            Command::MinMax {
                degree: Some("-1".into())
            }
        );
    }

    #[test]
    fn test_parse_introduce_optional_ids() {
        let args = CliArgs::try_parse_from(["social-graph", "introduce", "--from", "3"]).unwrap();
        assert_eq!(
            args.command,
            Command::Introduce {
                from: Some(3),
                to: None
            }
        );
    }

    #[test]
    fn test_overrides_from_flags() {
        let args = CliArgs::try_parse_from([
            "social-graph",
            "--persons",
            "p.txt",
            "--workers",
            "2",
            "status",
        ])
        .unwrap();
        let o = args.overrides();
        assert_eq!(o.person_file, Some(PathBuf::from("p.txt")));
        assert_eq!(o.workers, Some(2));
        assert!(o.relationship_file.is_none());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["social-graph", "-v", "-q", "status"]).is_err());
    }
}
